use crate::common::{Direction, Value};
use crate::errors::{ErrorKind, SyllabusError, SyllabusResult};
use crate::index::IndexName;
use itertools::Itertools;
use std::fmt::Display;

/// A value in an index entry, paired with the direction it sorts in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndexValue {
    value: Value,
    direction: Direction,
}

impl IndexValue {
    pub fn new(value: Value, direction: Direction) -> IndexValue {
        IndexValue { value, direction }
    }

    pub fn asc(value: Value) -> IndexValue {
        IndexValue::new(value, Direction::Ascending)
    }

    pub fn desc(value: Value) -> IndexValue {
        IndexValue::new(value, Direction::Descending)
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Display for IndexValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.direction)
    }
}

/// One key of a secondary index: the index name followed by the values read
/// from a document, in field order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndexEntry {
    name: IndexName,
    values: Vec<IndexValue>,
}

impl IndexEntry {
    pub fn new(name: IndexName, values: Vec<IndexValue>) -> SyllabusResult<IndexEntry> {
        if values.is_empty() {
            log::error!("Index entry for {} must have at least one value", name);
            return Err(SyllabusError::new(
                &format!("Index entry for {} must have at least one value", name),
                ErrorKind::ValidationError,
            ));
        }
        Ok(IndexEntry { name, values })
    }

    pub fn name(&self) -> &IndexName {
        &self.name
    }

    pub fn values(&self) -> &[IndexValue] {
        &self.values
    }
}

impl Display for IndexEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.name, self.values.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_entry_rejected() {
        let err = IndexEntry::new(IndexName::new("idx").unwrap(), vec![]).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ValidationError);
    }

    #[test]
    fn test_shorthands() {
        assert_eq!(IndexValue::asc(Value::TRUE).direction(), Direction::Ascending);
        assert_eq!(IndexValue::desc(Value::TRUE).direction(), Direction::Descending);
        assert_eq!(IndexValue::desc(Value::TRUE).value(), &Value::TRUE);
    }

    #[test]
    fn test_display() {
        let entry = IndexEntry::new(
            IndexName::new("idx").unwrap(),
            vec![IndexValue::asc(Value::from("a")), IndexValue::desc(Value::from(1.0))],
        )
        .unwrap();
        assert_eq!(entry.to_string(), "idx[\"a\" asc, 1 desc]");
    }
}
