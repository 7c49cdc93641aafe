use crate::common::{FieldName, Value};
use crate::errors::{ErrorKind, SyllabusError, SyllabusResult};
use serde_json::{Map, Number};

/// Converts a [Value] to JSON.
///
/// Fails with [ErrorKind::EncodingError] for NaN and infinities, which JSON
/// cannot represent.
pub fn value_to_json(value: &Value) -> SyllabusResult<serde_json::Value> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => match Number::from_f64(*n) {
            Some(number) => serde_json::Value::Number(number),
            None => {
                log::error!("Cannot convert non-finite number {} to JSON", n);
                return Err(SyllabusError::new(
                    &format!("Cannot convert non-finite number {} to JSON", n),
                    ErrorKind::EncodingError,
                ));
            }
        },
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::List(values) => serde_json::Value::Array(
            values
                .iter()
                .map(value_to_json)
                .collect::<SyllabusResult<Vec<_>>>()?,
        ),
        Value::Object(entries) => {
            let mut map = Map::new();
            for (name, element) in entries.iter() {
                map.insert(name.to_string(), value_to_json(element)?);
            }
            serde_json::Value::Object(map)
        }
    })
}

/// Converts JSON to a [Value]. Every number becomes an `f64`; object member
/// names must be valid field names.
pub fn value_from_json(json: &serde_json::Value) -> SyllabusResult<Value> {
    Ok(match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(*b),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(n) => Value::number(n),
            None => {
                log::error!("JSON number {} is not representable as a double", n);
                return Err(SyllabusError::new(
                    &format!("JSON number {} is not representable as a double", n),
                    ErrorKind::EncodingError,
                ));
            }
        },
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(values) => Value::List(
            values
                .iter()
                .map(value_from_json)
                .collect::<SyllabusResult<Vec<_>>>()?,
        ),
        serde_json::Value::Object(map) => {
            let entries = map
                .iter()
                .map(|(name, element)| Ok((FieldName::new(name.as_str())?, value_from_json(element)?)))
                .collect::<SyllabusResult<Vec<_>>>()?;
            Value::object(entries)
        }
    })
}
