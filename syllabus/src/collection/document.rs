use crate::collection::{CollectionId, DocId, Path};
use crate::common::{FieldName, FieldPath, Value};
use im::OrdMap;
use std::fmt::Display;

/// A document: an id, the collection it lives in and its top-level fields.
///
/// Documents are immutable. The fields are copied into a persistent ordered
/// map at construction, so cloning a document is cheap and never exposes the
/// caller's collection.
///
/// # Examples
///
/// ```rust
/// use syllabus::collection::{CollectionId, DocId, Document};
/// use syllabus::common::{FieldName, FieldPath, Value};
///
/// let address = Value::object(vec![(FieldName::new("city").unwrap(), Value::from("Oslo"))]);
/// let doc = Document::new(
///     DocId::new("alice").unwrap(),
///     CollectionId::new("users").unwrap(),
///     vec![(FieldName::new("address").unwrap(), address)],
/// );
///
/// let city = doc.get(&FieldPath::parse("address.city").unwrap());
/// assert_eq!(city, Some(&Value::from("Oslo")));
/// assert!(doc.get(&FieldPath::parse("address.zip").unwrap()).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    id: DocId,
    collection: CollectionId,
    fields: OrdMap<FieldName, Value>,
}

impl Document {
    /// Creates a document. A repeated field name keeps the last value.
    pub fn new<I>(id: DocId, collection: CollectionId, fields: I) -> Document
    where
        I: IntoIterator<Item = (FieldName, Value)>,
    {
        Document {
            id,
            collection,
            fields: fields.into_iter().collect(),
        }
    }

    /// Creates a document addressed by `path`.
    pub fn at<I>(path: Path, fields: I) -> Document
    where
        I: IntoIterator<Item = (FieldName, Value)>,
    {
        let collection = path.collection().clone();
        let id = path.doc_id().clone();
        Document::new(id, collection, fields)
    }

    pub fn id(&self) -> &DocId {
        &self.id
    }

    pub fn collection(&self) -> &CollectionId {
        &self.collection
    }

    pub fn path(&self) -> Path {
        Path::new(self.collection.clone(), self.id.clone())
    }

    pub fn fields(&self) -> &OrdMap<FieldName, Value> {
        &self.fields
    }

    pub fn get_field(&self, name: &FieldName) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Resolves `path` by walking nested objects.
    ///
    /// Returns `None` when any segment is missing or any intermediate value is
    /// not an object.
    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        let mut current = self.fields.get(path.first())?;
        for segment in &path.segments()[1..] {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.path(), Value::Object(self.fields.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> FieldName {
        FieldName::new(s).unwrap()
    }

    fn path(s: &str) -> FieldPath {
        FieldPath::parse(s).unwrap()
    }

    fn sample() -> Document {
        let inner = Value::object(vec![
            (name("c"), Value::from(3.0)),
            (name("list"), Value::list(vec![Value::TRUE])),
        ]);
        Document::new(
            DocId::new("d1").unwrap(),
            CollectionId::new("things").unwrap(),
            vec![
                (name("a"), Value::object(vec![(name("b"), inner)])),
                (name("top"), Value::from("x")),
            ],
        )
    }

    #[test]
    fn test_get_top_level() {
        let doc = sample();
        assert_eq!(doc.get(&path("top")), Some(&Value::from("x")));
        assert_eq!(doc.get_field(&name("top")), Some(&Value::from("x")));
        assert!(doc.get(&path("missing")).is_none());
    }

    #[test]
    fn test_get_nested() {
        let doc = sample();
        assert_eq!(doc.get(&path("a.b.c")), Some(&Value::from(3.0)));
        assert!(doc.get(&path("a.b")).unwrap().as_object().is_some());
    }

    #[test]
    fn test_get_through_non_object() {
        let doc = sample();
        assert!(doc.get(&path("top.x")).is_none());
        assert!(doc.get(&path("a.b.list.x")).is_none());
        assert!(doc.get(&path("a.x.c")).is_none());
    }

    #[test]
    fn test_path_and_at() {
        let doc = sample();
        assert_eq!(doc.path().to_string(), "things/d1");
        let again = Document::at(doc.path(), doc.fields().clone());
        assert_eq!(again, doc);
        assert_eq!(doc.len(), 2);
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_fields_are_copied() {
        let mut fields = vec![(name("a"), Value::NULL)];
        let doc = Document::new(
            DocId::new("d").unwrap(),
            CollectionId::new("c").unwrap(),
            fields.clone(),
        );
        fields.push((name("b"), Value::TRUE));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_duplicate_field_keeps_last() {
        let doc = Document::new(
            DocId::new("d").unwrap(),
            CollectionId::new("c").unwrap(),
            vec![(name("a"), Value::NULL), (name("a"), Value::TRUE)],
        );
        assert_eq!(doc.get_field(&name("a")), Some(&Value::TRUE));
    }
}
