use crate::common::ByteArray;
use crate::encoding::{decoder::ValueDecoder, encoder::ValueEncoder};
use crate::errors::{ErrorKind, SyllabusError, SyllabusResult};
use crate::index::{Index, IndexEntry, IndexName, IndexValue};

/// Builds store keys from index entries.
///
/// A key is the ascending encoding of the index name followed by every value
/// of the entry, each encoded in its own direction. There is no other framing,
/// so all keys of one index share the [prefix](IndexEntryEncoder::prefix) and
/// sort by their values.
pub struct IndexEntryEncoder;

impl IndexEntryEncoder {
    pub fn encode(entry: &IndexEntry) -> ByteArray {
        let mut encoder = ValueEncoder::new();
        encoder.asc().write_string(entry.name().as_str());
        for value in entry.values() {
            encoder.directional(value.direction()).write_value(value.value());
        }
        encoder.into_byte_array()
    }

    /// The bytes every key of the index `name` starts with.
    pub fn prefix(name: &IndexName) -> ByteArray {
        let mut encoder = ValueEncoder::new();
        encoder.asc().write_string(name.as_str());
        encoder.into_byte_array()
    }
}

/// Reads index entries back from store keys.
pub struct IndexEntryDecoder;

impl IndexEntryDecoder {
    /// Decodes `key` using the field directions of `index`.
    ///
    /// Fails with [ErrorKind::DecodingError] when the key belongs to another
    /// index, is malformed, or has bytes left after the last field.
    pub fn decode(index: &Index, key: &[u8]) -> SyllabusResult<IndexEntry> {
        let mut decoder = ValueDecoder::new(key);
        let name = decoder.asc().read_string()?;
        if name != index.name().as_str() {
            log::error!("Key of index {:?} decoded as index {}", name, index.name());
            return Err(SyllabusError::new(
                &format!("Key belongs to index {:?}, not {}", name, index.name()),
                ErrorKind::DecodingError,
            ));
        }

        let mut values = Vec::with_capacity(index.fields().len());
        for field in index.fields() {
            let value = decoder.directional(field.direction()).read_value()?;
            values.push(IndexValue::new(value, field.direction()));
        }

        if !decoder.is_exhausted() {
            log::error!("Trailing bytes after key of index {}", index.name());
            return Err(SyllabusError::new(
                &format!(
                    "{} trailing byte(s) after key of index {}",
                    key.len() - decoder.position(),
                    index.name()
                ),
                ErrorKind::DecodingError,
            ));
        }

        IndexEntry::new(index.name().clone(), values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::CollectionId;
    use crate::common::{FieldPath, Value};
    use crate::index::IndexField;

    fn index() -> Index {
        Index::new(
            IndexName::new("idx").unwrap(),
            CollectionId::new("c").unwrap(),
            vec![
                IndexField::asc(FieldPath::parse("a").unwrap()),
                IndexField::desc(FieldPath::parse("b").unwrap()),
            ],
        )
        .unwrap()
    }

    fn entry(a: Value, b: Value) -> IndexEntry {
        IndexEntry::new(
            IndexName::new("idx").unwrap(),
            vec![IndexValue::asc(a), IndexValue::desc(b)],
        )
        .unwrap()
    }

    #[test]
    fn test_layout() {
        let key = IndexEntryEncoder::encode(&IndexEntry::new(
            IndexName::new("i").unwrap(),
            vec![IndexValue::asc(Value::NULL), IndexValue::desc(Value::NULL)],
        )
        .unwrap());
        assert_eq!(key.as_bytes(), &[0x69, 0x00, 0x01, 0x01, 0xFE]);
    }

    #[test]
    fn test_prefix() {
        let name = IndexName::new("idx").unwrap();
        let key = IndexEntryEncoder::encode(&entry(Value::TRUE, Value::TRUE));
        assert!(key.starts_with(&IndexEntryEncoder::prefix(&name)));
    }

    #[test]
    fn test_descending_field_reverses_order() {
        let low = IndexEntryEncoder::encode(&entry(Value::from("x"), Value::from(1.0)));
        let high = IndexEntryEncoder::encode(&entry(Value::from("x"), Value::from(2.0)));
        assert!(high < low);

        let first = IndexEntryEncoder::encode(&entry(Value::from("a"), Value::from(1.0)));
        let second = IndexEntryEncoder::encode(&entry(Value::from("b"), Value::from(2.0)));
        assert!(first < second);
    }

    #[test]
    fn test_decode_inverts_encode() {
        let original = entry(Value::from("x"), Value::list(vec![Value::NAN]));
        let key = IndexEntryEncoder::encode(&original);
        assert_eq!(IndexEntryDecoder::decode(&index(), &key).unwrap(), original);
    }

    #[test]
    fn test_decode_wrong_index() {
        let other = IndexEntry::new(
            IndexName::new("other").unwrap(),
            vec![IndexValue::asc(Value::NULL), IndexValue::desc(Value::NULL)],
        )
        .unwrap();
        let key = IndexEntryEncoder::encode(&other);
        let err = IndexEntryDecoder::decode(&index(), &key).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DecodingError);
    }

    #[test]
    fn test_decode_trailing_bytes() {
        let key = IndexEntryEncoder::encode(&entry(Value::NULL, Value::NULL));
        let mut bytes = key.as_bytes().to_vec();
        bytes.push(0x01);
        let err = IndexEntryDecoder::decode(&index(), &bytes).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DecodingError);
    }

    #[test]
    fn test_decode_wrong_direction_fails() {
        let swapped = IndexEntry::new(
            IndexName::new("idx").unwrap(),
            vec![IndexValue::desc(Value::from("s")), IndexValue::desc(Value::NULL)],
        )
        .unwrap();
        let key = IndexEntryEncoder::encode(&swapped);
        assert!(IndexEntryDecoder::decode(&index(), &key).is_err());
    }
}
