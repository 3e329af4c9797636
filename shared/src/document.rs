//! Mapping between plain records and Solr documents
//!
//! Field names are mapped explicitly rather than through annotations, so the
//! document layout is visible in one place.

use serde_json::{Map, Value};

use crate::errors::{SharedError, SharedResult};

/// A Solr document as sent to the `update` handler
pub type SolrDocument = Map<String, Value>;

/// Records that can be indexed as Solr documents
pub trait IntoSolrDocument {
    fn to_document(&self) -> SolrDocument;
}

/// Sample entity indexed by the playground scenarios
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub id: String,
    pub name: String,
}

impl Company {
    pub const ID_FIELD: &'static str = "id";
    pub const NAME_FIELD: &'static str = "name_t";

    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Rebuild a company from a stored document
    pub fn from_document(doc: &SolrDocument) -> SharedResult<Self> {
        Ok(Self {
            id: string_field(doc, Self::ID_FIELD)?,
            name: string_field(doc, Self::NAME_FIELD)?,
        })
    }
}

impl IntoSolrDocument for Company {
    fn to_document(&self) -> SolrDocument {
        let mut doc = SolrDocument::new();
        doc.insert(Self::ID_FIELD.to_string(), Value::String(self.id.clone()));
        doc.insert(Self::NAME_FIELD.to_string(), Value::String(self.name.clone()));
        doc
    }
}

// Stored text fields come back as single-element arrays when the schema marks them multiValued.
fn string_field(doc: &SolrDocument, field: &str) -> SharedResult<String> {
    match doc.get(field) {
        None | Some(Value::Null) => Err(SharedError::MissingField {
            field: field.to_string(),
        }),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(Value::Array(values)) => match values.as_slice() {
            [Value::String(value)] => Ok(value.clone()),
            _ => Err(SharedError::InvalidField {
                field: field.to_string(),
                message: format!("expected a single string, got {} values", values.len()),
            }),
        },
        Some(other) => Err(SharedError::InvalidField {
            field: field.to_string(),
            message: format!("expected a string, got {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_company_field_names() {
        let doc = Company::new("c1", "CodeLibs").to_document();
        assert_eq!(doc.get("id"), Some(&json!("c1")));
        assert_eq!(doc.get("name_t"), Some(&json!("CodeLibs")));
        assert!(doc.get("name").is_none(), "name must be mapped to name_t");
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_company_from_document() {
        let doc = Company::new("c2", "Marevol").to_document();
        let company = Company::from_document(&doc).unwrap();
        assert_eq!(company, Company::new("c2", "Marevol"));
    }

    #[test]
    fn test_company_from_multivalued_document() {
        let value = json!({ "id": "c3", "name_t": ["Acme"], "_version_": 1 });
        let doc = value.as_object().unwrap().clone();
        let company = Company::from_document(&doc).unwrap();
        assert_eq!(company.name, "Acme");
    }

    #[test]
    fn test_company_missing_name() {
        let value = json!({ "id": "c4" });
        let doc = value.as_object().unwrap().clone();
        let err = Company::from_document(&doc).unwrap_err();
        assert!(matches!(err, SharedError::MissingField { ref field } if field == "name_t"));
    }

    #[test]
    fn test_company_rejects_non_string() {
        let value = json!({ "id": 42, "name_t": "Acme" });
        let doc = value.as_object().unwrap().clone();
        assert!(matches!(
            Company::from_document(&doc),
            Err(SharedError::InvalidField { .. })
        ));
    }
}
