//! Storage helpers for local state backends.
//!
//! Contains a reusable JSON file-backed ordered map used by the file state store.

pub mod json_map_store;
