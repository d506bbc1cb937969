use serde::{Deserialize, Serialize};

/// One entry of a full scan: the store key and its decoded value.
///
/// `record` is the parsed JSON when the stored bytes are valid JSON and the raw
/// text otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyedRecord {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Record")]
    pub record: serde_json::Value,
}

impl KeyedRecord {
    /// Decode a raw stored value; the flag is false when the text fallback was used.
    pub fn decode(key: String, value: &[u8]) -> (Self, bool) {
        let text = String::from_utf8_lossy(value);
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(record) => (Self { key, record }, true),
            Err(_) => (
                Self { key, record: serde_json::Value::String(text.into_owned()) },
                false,
            ),
        }
    }
}
