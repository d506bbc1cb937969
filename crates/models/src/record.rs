use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Which registry a contract instance serves. Both kinds share one record shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Asset,
    Customer,
}

impl RecordKind {
    /// Value written to `docType` on seeded records.
    pub fn doc_type(self) -> &'static str {
        match self {
            RecordKind::Asset => "asset",
            RecordKind::Customer => "customer",
        }
    }

    /// Capitalized label used in kind-specific entry point names, e.g. `ReadCustomer`.
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Asset => "Asset",
            RecordKind::Customer => "Customer",
        }
    }

    pub fn not_found_message(self, id: &str) -> String {
        match self {
            RecordKind::Asset => format!("The asset {id} does not exist"),
            RecordKind::Customer => format!("The customer with ID = {id} does not exist"),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.doc_type())
    }
}

impl FromStr for RecordKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asset" => Ok(RecordKind::Asset),
            "customer" => Ok(RecordKind::Customer),
            other => Err(ModelError::UnknownKind(other.to_string())),
        }
    }
}

/// A registry entry as stored under its `ID`.
///
/// Field names follow the existing JSON consumers exactly. `doc_type` is only
/// present on seeded records; it is written as `docType` and read back from
/// either `docType` or `DocType`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Pan")]
    pub pan: u64,
    #[serde(rename = "Aadar_no")]
    pub aadar_no: u64,
    #[serde(rename = "Bank")]
    pub bank: String,
    #[serde(
        rename = "docType",
        alias = "DocType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub doc_type: Option<String>,
}

impl Record {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        gender: impl Into<String>,
        pan: u64,
        aadar_no: u64,
        bank: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gender: gender.into(),
            pan,
            aadar_no,
            bank: bank.into(),
            doc_type: None,
        }
    }

    pub fn with_doc_type(mut self, kind: RecordKind) -> Self {
        self.doc_type = Some(kind.doc_type().to_string());
        self
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        serde_json::to_string(self).map_err(|e| ModelError::Encode(e.to_string()))
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        serde_json::from_slice(bytes).map_err(|e| ModelError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_consumer_field_names() {
        let rec = Record::new("42", "Alice", "F", 999, 1111, "BankX");
        let json = rec.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"ID":"42","Name":"Alice","Gender":"F","Pan":999,"Aadar_no":1111,"Bank":"BankX"}"#
        );
    }

    #[test]
    fn doc_type_is_optional_and_accepts_both_casings() {
        let seeded = Record::new("1", "Kausthub", "M", 123, 2323, "abc").with_doc_type(RecordKind::Asset);
        let json = seeded.to_json().unwrap();
        assert!(json.ends_with(r#""docType":"asset"}"#));

        let upper = br#"{"ID":"1","Name":"n","Gender":"M","Pan":1,"Aadar_no":2,"Bank":"b","DocType":"customer"}"#;
        let rec = Record::from_slice(upper).unwrap();
        assert_eq!(rec.doc_type.as_deref(), Some("customer"));

        let bare = br#"{"ID":"1","Name":"n","Gender":"M","Pan":1,"Aadar_no":2,"Bank":"b"}"#;
        assert_eq!(Record::from_slice(bare).unwrap().doc_type, None);
    }

    #[test]
    fn kind_labels_and_messages() {
        assert_eq!("Customer".parse::<RecordKind>().unwrap(), RecordKind::Customer);
        assert!("vehicle".parse::<RecordKind>().is_err());
        assert_eq!(RecordKind::Asset.label(), "Asset");
        assert_eq!(RecordKind::Asset.not_found_message("7"), "The asset 7 does not exist");
        assert_eq!(
            RecordKind::Customer.not_found_message("7"),
            "The customer with ID = 7 does not exist"
        );
    }
}
