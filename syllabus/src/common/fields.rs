use crate::common::identifier::identifier;
use crate::common::FIELD_SEPARATOR;
use crate::errors::{ErrorKind, SyllabusError, SyllabusResult};
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::Display;

identifier!(
    /// Name of a single document field or object member.
    ///
    /// Field names are identifiers: a letter followed by letters, digits or
    /// underscores. They order by the codepoint order of the name, which is the
    /// order object members are iterated and encoded in.
    FieldName,
    "field name"
);

/// A non-empty, dotted path through nested objects, e.g. `address.city`.
///
/// # Purpose
/// Names the value an index field reads from a document. Resolution walks the
/// document one segment at a time, descending into nested `Object` values.
///
/// # Characteristics
/// - **Non-empty**: construction fails when there are no segments
/// - **Ordered**: lexicographic over segments using [FieldName]'s order, so a
///   path sorts before any longer path it is a prefix of
/// - **Small**: paths of up to four segments are stored inline
///
/// # Examples
///
/// ```rust
/// use syllabus::common::FieldPath;
///
/// let path = FieldPath::parse("address.city").unwrap();
/// assert_eq!(path.len(), 2);
/// assert_eq!(path.to_string(), "address.city");
/// assert!(FieldPath::parse("").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: SmallVec<[FieldName; 4]>,
}

impl FieldPath {
    /// Creates a path from already validated segments.
    pub fn new(segments: Vec<FieldName>) -> SyllabusResult<FieldPath> {
        if segments.is_empty() {
            log::error!("Field path cannot be empty");
            return Err(SyllabusError::new(
                "Field path cannot be empty",
                ErrorKind::ValidationError,
            ));
        }

        Ok(FieldPath {
            segments: SmallVec::from_vec(segments),
        })
    }

    /// Parses a dotted path, validating every segment as a [FieldName].
    pub fn parse(dotted: &str) -> SyllabusResult<FieldPath> {
        if dotted.is_empty() {
            log::error!("Field path cannot be empty");
            return Err(SyllabusError::new(
                "Field path cannot be empty",
                ErrorKind::ValidationError,
            ));
        }

        let segments = dotted
            .split(FIELD_SEPARATOR)
            .map(FieldName::new)
            .collect::<SyllabusResult<Vec<_>>>()?;
        FieldPath::new(segments)
    }

    /// A single-segment path.
    pub fn of(name: FieldName) -> FieldPath {
        let mut segments = SmallVec::new();
        segments.push(name);
        FieldPath { segments }
    }

    pub fn segments(&self) -> &[FieldName] {
        &self.segments
    }

    pub fn first(&self) -> &FieldName {
        // non-empty by construction
        &self.segments[0]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns a new path with `name` appended.
    pub fn child(&self, name: FieldName) -> FieldPath {
        let mut segments = self.segments.clone();
        segments.push(name);
        FieldPath { segments }
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.segments.iter().join(&FIELD_SEPARATOR.to_string())
        )
    }
}

impl std::str::FromStr for FieldPath {
    type Err = SyllabusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::parse(s)
    }
}

impl From<FieldName> for FieldPath {
    fn from(name: FieldName) -> Self {
        FieldPath::of(name)
    }
}
