use crate::collection::CollectionId;
use crate::common::identifier::identifier;
use crate::common::{Direction, FieldPath};
use crate::errors::{ErrorKind, SyllabusError, SyllabusResult};
use itertools::Itertools;
use std::fmt::Display;
use std::sync::Arc;

identifier!(
    /// Name of a secondary index. Every key of an index starts with it.
    IndexName,
    "index name"
);

/// One field of an index: where to read the value and which way it sorts.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexField {
    path: FieldPath,
    direction: Direction,
}

impl IndexField {
    pub fn new(path: FieldPath, direction: Direction) -> IndexField {
        IndexField { path, direction }
    }

    pub fn asc(path: FieldPath) -> IndexField {
        IndexField::new(path, Direction::Ascending)
    }

    pub fn desc(path: FieldPath) -> IndexField {
        IndexField::new(path, Direction::Descending)
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Display for IndexField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.path, self.direction)
    }
}

/// Definition of a secondary index over one collection.
///
/// # Characteristics
/// - **Immutable**: created once by a validating constructor
/// - **Cheap to clone**: the definition is shared behind an `Arc`
/// - **Non-empty**: at least one [IndexField], in the order the key is built
///
/// # Usage
///
/// ```rust
/// use syllabus::collection::CollectionId;
/// use syllabus::common::FieldPath;
/// use syllabus::index::{Index, IndexField, IndexName};
///
/// let index = Index::new(
///     IndexName::new("by_city_age").unwrap(),
///     CollectionId::new("users").unwrap(),
///     vec![
///         IndexField::asc(FieldPath::parse("address.city").unwrap()),
///         IndexField::desc(FieldPath::parse("age").unwrap()),
///     ],
/// )
/// .unwrap();
/// assert_eq!(index.fields().len(), 2);
/// assert!(index.is_compound());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Index {
    inner: Arc<IndexInner>,
}

impl Index {
    pub fn new(
        name: IndexName,
        collection: CollectionId,
        fields: Vec<IndexField>,
    ) -> SyllabusResult<Index> {
        if fields.is_empty() {
            log::error!("Index {} must have at least one field", name);
            return Err(SyllabusError::new(
                &format!("Index {} must have at least one field", name),
                ErrorKind::ValidationError,
            ));
        }

        Ok(Index {
            inner: Arc::new(IndexInner {
                name,
                collection,
                fields,
            }),
        })
    }

    pub fn name(&self) -> &IndexName {
        &self.inner.name
    }

    pub fn collection(&self) -> &CollectionId {
        &self.inner.collection
    }

    pub fn fields(&self) -> &[IndexField] {
        &self.inner.fields
    }

    /// True when the index spans more than one field.
    pub fn is_compound(&self) -> bool {
        self.inner.fields.len() > 1
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} on {} ({})",
            self.inner.name,
            self.inner.collection,
            self.inner.fields.iter().join(", ")
        )
    }
}

#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct IndexInner {
    name: IndexName,
    collection: CollectionId,
    fields: Vec<IndexField>,
}
