use crate::common::Value;
use crate::errors::{ErrorKind, SyllabusError, SyllabusResult};

/// Leading byte of every encoded value. The numeric order of the tags is the
/// cross-variant order of [Value].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tag {
    Null = 0x01,
    False = 0x02,
    True = 0x03,
    NaN = 0x04,
    Double = 0x05,
    String = 0x06,
    List = 0x07,
    Object = 0x08,
}

impl Tag {
    pub fn of(value: &Value) -> Tag {
        match value {
            Value::Null => Tag::Null,
            Value::Boolean(false) => Tag::False,
            Value::Boolean(true) => Tag::True,
            Value::Number(n) if n.is_nan() => Tag::NaN,
            Value::Number(_) => Tag::Double,
            Value::String(_) => Tag::String,
            Value::List(_) => Tag::List,
            Value::Object(_) => Tag::Object,
        }
    }

    #[inline]
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(byte: u8) -> SyllabusResult<Tag> {
        match byte {
            0x01 => Ok(Tag::Null),
            0x02 => Ok(Tag::False),
            0x03 => Ok(Tag::True),
            0x04 => Ok(Tag::NaN),
            0x05 => Ok(Tag::Double),
            0x06 => Ok(Tag::String),
            0x07 => Ok(Tag::List),
            0x08 => Ok(Tag::Object),
            _ => {
                log::error!("Unknown tag value: 0x{:02X}", byte);
                Err(SyllabusError::new(
                    &format!("Unknown tag value: 0x{:02X}", byte),
                    ErrorKind::DecodingError,
                ))
            }
        }
    }
}
