use crate::common::identifier::identifier;
use crate::common::PATH_SEPARATOR;
use crate::errors::{ErrorKind, SyllabusError, SyllabusResult};
use std::fmt::Display;

identifier!(
    /// Name of a collection of documents.
    CollectionId,
    "collection id"
);

identifier!(
    /// Identifier of a document, unique within its collection.
    DocId,
    "document id"
);

/// Address of a document: its collection and its id.
///
/// Displays as `<collection>/<docId>`, the form used by the `_id` member of
/// the document JSON format. [Path::parse] is the inverse.
///
/// # Examples
///
/// ```rust
/// use syllabus::collection::Path;
///
/// let path = Path::parse("users/alice").unwrap();
/// assert_eq!(path.collection().as_str(), "users");
/// assert_eq!(path.doc_id().as_str(), "alice");
/// assert_eq!(path.to_string(), "users/alice");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    collection: CollectionId,
    doc_id: DocId,
}

impl Path {
    pub fn new(collection: CollectionId, doc_id: DocId) -> Path {
        Path { collection, doc_id }
    }

    /// Parses `<collection>/<docId>`.
    pub fn parse(raw: &str) -> SyllabusResult<Path> {
        match raw.split_once(PATH_SEPARATOR) {
            Some((collection, doc_id)) => Ok(Path {
                collection: CollectionId::new(collection)?,
                doc_id: DocId::new(doc_id)?,
            }),
            None => {
                log::error!("Invalid document path: {:?}", raw);
                Err(SyllabusError::new(
                    &format!("Invalid document path, expected <collection>/<docId>: {:?}", raw),
                    ErrorKind::ValidationError,
                ))
            }
        }
    }

    pub fn collection(&self) -> &CollectionId {
        &self.collection
    }

    pub fn doc_id(&self) -> &DocId {
        &self.doc_id
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.collection, PATH_SEPARATOR, self.doc_id)
    }
}

impl std::str::FromStr for Path {
    type Err = SyllabusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_and_doc_ids() {
        assert!(CollectionId::new("users").is_ok());
        assert!(DocId::new("doc_1").is_ok());
        assert_eq!(
            CollectionId::new("users/x").unwrap_err().kind(),
            &ErrorKind::ValidationError
        );
        assert!(DocId::new("").is_err());
    }

    #[test]
    fn test_path_round_trip_through_display() {
        let path = Path::new(CollectionId::new("users").unwrap(), DocId::new("bob").unwrap());
        assert_eq!(path.to_string(), "users/bob");
        assert_eq!(Path::parse(&path.to_string()).unwrap(), path);
    }

    #[test]
    fn test_path_parse_failures() {
        for raw in ["users", "users/", "/bob", "users/bob/extra", "1users/bob", ""] {
            let err = Path::parse(raw).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::ValidationError, "{}", raw);
        }
    }

    #[test]
    fn test_path_order() {
        let a = Path::parse("a/z").unwrap();
        let b = Path::parse("b/a").unwrap();
        let a2 = Path::parse("a/zz").unwrap();
        assert!(a < b);
        assert!(a < a2);
    }
}
