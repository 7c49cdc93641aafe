use crate::common::{Direction, FieldName, Value};
use crate::encoding::constants::*;
use crate::encoding::Tag;
use crate::errors::{ErrorKind, SyllabusError, SyllabusResult};
use im::OrdMap;

fn decoding_error(message: String) -> SyllabusError {
    log::error!("{}", message);
    SyllabusError::new(&message, ErrorKind::DecodingError)
}

/// One logical unit of escaped input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Byte(u8),
    Min,
    Max,
}

/// Reads values back from bytes produced by a
/// [ValueEncoder](crate::encoding::ValueEncoder).
///
/// The decoder keeps a read position over the input. Every read goes through
/// a [DirectionalDecoder], which must use the direction the value was written
/// in. Any byte sequence the encoder could not have produced fails with
/// [ErrorKind::DecodingError].
///
/// # Examples
///
/// ```rust
/// use syllabus::common::Value;
/// use syllabus::encoding::{ValueDecoder, ValueEncoder};
///
/// let mut encoder = ValueEncoder::new();
/// encoder.asc().write_value(&Value::from("key"));
/// encoder.desc().write_value(&Value::from(7.0));
/// let bytes = encoder.into_byte_array();
///
/// let mut decoder = ValueDecoder::new(&bytes);
/// assert_eq!(decoder.asc().read_value().unwrap(), Value::from("key"));
/// assert_eq!(decoder.desc().read_value().unwrap(), Value::from(7.0));
/// assert!(decoder.is_exhausted());
/// ```
#[derive(Debug, Clone)]
pub struct ValueDecoder<'a> {
    input: &'a [u8],
    position: usize,
    depth: usize,
}

impl<'a> ValueDecoder<'a> {
    pub fn new(input: &'a [u8]) -> ValueDecoder<'a> {
        ValueDecoder {
            input,
            position: 0,
            depth: 0,
        }
    }

    pub fn asc(&mut self) -> DirectionalDecoder<'_, 'a> {
        self.directional(Direction::Ascending)
    }

    pub fn desc(&mut self) -> DirectionalDecoder<'_, 'a> {
        self.directional(Direction::Descending)
    }

    pub fn directional(&mut self, direction: Direction) -> DirectionalDecoder<'_, 'a> {
        DirectionalDecoder {
            source: self,
            direction,
        }
    }

    /// True once every input byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.input.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Decodes the token at the read position without consuming it. Returns
    /// the token and its length in bytes.
    fn peek_raw(&self) -> SyllabusResult<(Token, usize)> {
        let first = match self.input.get(self.position) {
            Some(byte) => *byte,
            None => {
                return Err(decoding_error(format!(
                    "Unexpected end of input at offset {}",
                    self.position
                )))
            }
        };

        if first != ESCAPE_LOW && first != ESCAPE_HIGH {
            return Ok((Token::Byte(first), 1));
        }

        let second = match self.input.get(self.position + 1) {
            Some(byte) => *byte,
            None => {
                return Err(decoding_error(format!(
                    "Truncated escape sequence at offset {}",
                    self.position
                )))
            }
        };

        match (first, second) {
            (ESCAPE_LOW, LITERAL_LOW) => Ok((Token::Byte(0x00), 2)),
            (ESCAPE_LOW, SENTINEL_MIN) => Ok((Token::Min, 2)),
            (ESCAPE_HIGH, LITERAL_HIGH) => Ok((Token::Byte(0xFF), 2)),
            (ESCAPE_HIGH, SENTINEL_MAX) => Ok((Token::Max, 2)),
            _ => Err(decoding_error(format!(
                "Invalid escape sequence 0x{:02X} 0x{:02X} at offset {}",
                first, second, self.position
            ))),
        }
    }
}

/// Reads values from a [ValueDecoder] in one direction.
pub struct DirectionalDecoder<'d, 'a> {
    source: &'d mut ValueDecoder<'a>,
    direction: Direction,
}

impl DirectionalDecoder<'_, '_> {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Reads one complete value.
    pub fn read_value(&mut self) -> SyllabusResult<Value> {
        let tag = Tag::from_byte(self.read_byte()?)?;
        match tag {
            Tag::Null => Ok(Value::Null),
            Tag::False => Ok(Value::FALSE),
            Tag::True => Ok(Value::TRUE),
            Tag::NaN => Ok(Value::NAN),
            Tag::Double => self.read_double(),
            Tag::String => Ok(Value::String(self.read_string()?)),
            Tag::List => self.nested(|decoder| {
                let mut values = Vec::new();
                while !decoder.at_separator()? {
                    values.push(decoder.read_value()?);
                }
                decoder.read_separator()?;
                Ok(Value::List(values))
            }),
            Tag::Object => self.nested(|decoder| {
                let mut entries = OrdMap::new();
                let mut previous: Option<FieldName> = None;
                while !decoder.at_separator()? {
                    let raw = decoder.read_string()?;
                    let name = FieldName::new(raw).map_err(|err| {
                        SyllabusError::new_with_cause(
                            "Encoded object has an invalid field name",
                            ErrorKind::DecodingError,
                            err,
                        )
                    })?;
                    // members are written in ascending name order, each once
                    if let Some(previous) = &previous {
                        if name <= *previous {
                            return Err(decoding_error(format!(
                                "Object member {} follows {} out of order",
                                name, previous
                            )));
                        }
                    }
                    let value = decoder.read_value()?;
                    entries.insert(name.clone(), value);
                    previous = Some(name);
                }
                decoder.read_separator()?;
                Ok(Value::Object(entries))
            }),
        }
    }

    /// Runs `read` one nesting level deeper, failing past [MAX_NESTING_DEPTH].
    fn nested(
        &mut self,
        read: impl FnOnce(&mut Self) -> SyllabusResult<Value>,
    ) -> SyllabusResult<Value> {
        if self.source.depth >= MAX_NESTING_DEPTH {
            return Err(decoding_error(format!(
                "Nesting deeper than {} levels at offset {}",
                MAX_NESTING_DEPTH, self.source.position
            )));
        }
        self.source.depth += 1;
        let result = read(self);
        self.source.depth -= 1;
        result
    }

    /// Reads a separator-terminated UTF-8 string without a tag.
    pub fn read_string(&mut self) -> SyllabusResult<String> {
        let mut bytes = Vec::new();
        loop {
            let token = self.next_token()?;
            match token {
                Token::Byte(byte) => bytes.push(byte),
                _ if token == self.separator() => break,
                _ => {
                    return Err(decoding_error(format!(
                        "Unexpected {:?} sentinel in {} string",
                        token, self.direction
                    )))
                }
            }
        }
        Ok(String::from_utf8(bytes)?)
    }

    fn read_double(&mut self) -> SyllabusResult<Value> {
        let mut raw = [0u8; 8];
        for slot in raw.iter_mut() {
            *slot = self.read_byte()?;
        }
        let ordered = u64::from_be_bytes(raw);
        let bits = if ordered & SIGN_BIT != 0 {
            ordered ^ SIGN_BIT
        } else {
            !ordered
        };
        Ok(Value::number(f64::from_bits(bits)))
    }

    fn separator(&self) -> Token {
        match self.direction {
            Direction::Ascending => Token::Min,
            Direction::Descending => Token::Max,
        }
    }

    fn at_separator(&self) -> SyllabusResult<bool> {
        let (token, _) = self.source.peek_raw()?;
        Ok(token == self.separator())
    }

    fn read_separator(&mut self) -> SyllabusResult<()> {
        let token = self.next_token()?;
        if token == self.separator() {
            Ok(())
        } else {
            Err(decoding_error(format!(
                "Expected {} separator, found {:?}",
                self.direction, token
            )))
        }
    }

    fn read_byte(&mut self) -> SyllabusResult<u8> {
        match self.next_token()? {
            Token::Byte(byte) => Ok(byte),
            sentinel => Err(decoding_error(format!(
                "Expected a literal byte, found {:?} sentinel at offset {}",
                sentinel,
                self.source.position
            ))),
        }
    }

    fn next_token(&mut self) -> SyllabusResult<Token> {
        let (token, len) = self.source.peek_raw()?;
        self.source.position += len;
        Ok(match (token, self.direction) {
            (Token::Byte(byte), Direction::Descending) => Token::Byte(!byte),
            _ => token,
        })
    }
}

/// Decodes a single value written in `direction`, failing if bytes remain.
pub fn decode_value(bytes: &[u8], direction: Direction) -> SyllabusResult<Value> {
    let mut decoder = ValueDecoder::new(bytes);
    let value = decoder.directional(direction).read_value()?;
    if !decoder.is_exhausted() {
        return Err(decoding_error(format!(
            "{} trailing byte(s) after encoded value",
            bytes.len() - decoder.position()
        )));
    }
    Ok(value)
}
