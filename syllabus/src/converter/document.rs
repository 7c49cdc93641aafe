use crate::collection::{Document, Path};
use crate::common::{FieldName, DOC_ID};
use crate::converter::{value_from_json, value_to_json};
use crate::errors::{ErrorKind, SyllabusError, SyllabusResult};
use serde_json::Map;

/// Converts documents to and from JSON.
///
/// A document is a JSON object with an `"_id"` member holding
/// `"<collection>/<docId>"` and one member per field.
///
/// ```rust
/// use syllabus::converter::DocumentConverter;
///
/// let doc = DocumentConverter::from_json_str(r#"{"_id": "users/alice", "age": 42}"#).unwrap();
/// assert_eq!(doc.path().to_string(), "users/alice");
/// assert_eq!(doc.len(), 1);
/// ```
pub struct DocumentConverter;

impl DocumentConverter {
    pub fn from_json_str(json: &str) -> SyllabusResult<Document> {
        let parsed: serde_json::Value = serde_json::from_str(json)?;
        DocumentConverter::from_json(&parsed)
    }

    pub fn from_json(json: &serde_json::Value) -> SyllabusResult<Document> {
        let members = match json.as_object() {
            Some(members) => members,
            None => {
                log::error!("Document JSON must be an object");
                return Err(SyllabusError::new(
                    "Document JSON must be an object",
                    ErrorKind::EncodingError,
                ));
            }
        };

        let path = match members.get(DOC_ID) {
            Some(serde_json::Value::String(raw)) => Path::parse(raw)?,
            Some(_) => {
                log::error!("Document member {} must be a string", DOC_ID);
                return Err(SyllabusError::new(
                    &format!("Document member {} must be a string", DOC_ID),
                    ErrorKind::ValidationError,
                ));
            }
            None => {
                log::error!("Document is missing its {} member", DOC_ID);
                return Err(SyllabusError::new(
                    &format!("Document is missing its {} member", DOC_ID),
                    ErrorKind::ValidationError,
                ));
            }
        };

        let fields = members
            .iter()
            .filter(|(name, _)| name.as_str() != DOC_ID)
            .map(|(name, value)| Ok((FieldName::new(name.as_str())?, value_from_json(value)?)))
            .collect::<SyllabusResult<Vec<_>>>()?;

        Ok(Document::at(path, fields))
    }

    pub fn to_json(document: &Document) -> SyllabusResult<serde_json::Value> {
        let mut members = Map::new();
        members.insert(
            DOC_ID.to_string(),
            serde_json::Value::String(document.path().to_string()),
        );
        for (name, value) in document.fields().iter() {
            members.insert(name.to_string(), value_to_json(value)?);
        }
        Ok(serde_json::Value::Object(members))
    }

    pub fn to_json_string(document: &Document) -> SyllabusResult<String> {
        Ok(serde_json::to_string(&DocumentConverter::to_json(document)?)?)
    }
}
