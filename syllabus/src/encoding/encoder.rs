use crate::common::{ByteArray, Direction, Value};
use crate::encoding::constants::*;
use crate::encoding::Tag;

/// Accumulates order-preserving encodings of values into one byte buffer.
///
/// Each write goes through a [DirectionalEncoder], so a single buffer can hold
/// a composite key whose parts sort in different directions.
///
/// # Examples
///
/// ```rust
/// use syllabus::common::Value;
/// use syllabus::encoding::ValueEncoder;
///
/// let mut encoder = ValueEncoder::new();
/// encoder.asc().write_value(&Value::from("a"));
/// assert_eq!(encoder.to_byte_array().as_bytes(), &[0x06, 0x61, 0x00, 0x01]);
///
/// encoder.reset();
/// encoder.desc().write_value(&Value::from("a"));
/// assert_eq!(encoder.to_byte_array().as_bytes(), &[0xF9, 0x9E, 0xFF, 0xFF]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ValueEncoder {
    buffer: Vec<u8>,
}

impl ValueEncoder {
    pub fn new() -> ValueEncoder {
        ValueEncoder { buffer: Vec::new() }
    }

    pub fn asc(&mut self) -> DirectionalEncoder<'_> {
        self.directional(Direction::Ascending)
    }

    pub fn desc(&mut self) -> DirectionalEncoder<'_> {
        self.directional(Direction::Descending)
    }

    pub fn directional(&mut self, direction: Direction) -> DirectionalEncoder<'_> {
        DirectionalEncoder {
            buffer: &mut self.buffer,
            direction,
        }
    }

    /// Discards everything written so far.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn to_byte_array(&self) -> ByteArray {
        ByteArray::from(self.buffer.as_slice())
    }

    pub fn into_byte_array(self) -> ByteArray {
        ByteArray::from(self.buffer)
    }
}

/// Writes values into a [ValueEncoder] in one direction.
///
/// Ascending writes each logical byte through the escaping scheme and ends
/// variable-length parts with `00 01`. Descending inverts each logical byte
/// before escaping and ends them with `FF FF`.
pub struct DirectionalEncoder<'a> {
    buffer: &'a mut Vec<u8>,
    direction: Direction,
}

impl DirectionalEncoder<'_> {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Appends the full encoding of `value`.
    pub fn write_value(&mut self, value: &Value) -> &mut Self {
        let tag = Tag::of(value);
        self.write_byte(tag.as_byte());
        match value {
            Value::Null | Value::Boolean(_) => {}
            Value::Number(n) => {
                if !n.is_nan() {
                    self.write_double(*n);
                }
            }
            Value::String(s) => {
                self.write_string(s);
            }
            Value::List(values) => {
                for element in values {
                    self.write_value(element);
                }
                self.write_separator();
            }
            Value::Object(entries) => {
                for (name, element) in entries.iter() {
                    self.write_string(name.as_str());
                    self.write_value(element);
                }
                self.write_separator();
            }
        }
        self
    }

    /// Appends the UTF-8 bytes of `s` followed by the separator, without a tag.
    pub fn write_string(&mut self, s: &str) -> &mut Self {
        for byte in s.bytes() {
            self.write_byte(byte);
        }
        self.write_separator();
        self
    }

    fn write_double(&mut self, n: f64) {
        let bits = n.to_bits();
        let ordered = if bits & SIGN_BIT != 0 {
            !bits
        } else {
            bits ^ SIGN_BIT
        };
        for byte in ordered.to_be_bytes() {
            self.write_byte(byte);
        }
    }

    fn write_byte(&mut self, byte: u8) {
        let byte = match self.direction {
            Direction::Ascending => byte,
            Direction::Descending => !byte,
        };
        match byte {
            ESCAPE_LOW => self.buffer.extend_from_slice(&[ESCAPE_LOW, LITERAL_LOW]),
            ESCAPE_HIGH => self.buffer.extend_from_slice(&[ESCAPE_HIGH, LITERAL_HIGH]),
            _ => self.buffer.push(byte),
        }
    }

    fn write_separator(&mut self) {
        match self.direction {
            Direction::Ascending => self.buffer.extend_from_slice(&MIN_SEPARATOR),
            Direction::Descending => self.buffer.extend_from_slice(&MAX_SEPARATOR),
        }
    }
}

/// Encodes a single value in `direction`.
pub fn encode_value(value: &Value, direction: Direction) -> ByteArray {
    let mut encoder = ValueEncoder::new();
    encoder.directional(direction).write_value(value);
    encoder.into_byte_array()
}
