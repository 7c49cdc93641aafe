use crate::common::FieldName;
use im::OrdMap;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Canonical bit pattern every NaN hashes as.
const CANONICAL_NAN_BITS: u64 = 0x7FF8_0000_0000_0000;

/// Compares two doubles with NaN first and `-0.0 == +0.0`.
#[inline]
fn num_cmp(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Bits of `n` after collapsing every NaN and both zeros to one representative.
#[inline]
fn canonical_bits(n: f64) -> u64 {
    if n.is_nan() {
        CANONICAL_NAN_BITS
    } else if n == 0.0 {
        0
    } else {
        n.to_bits()
    }
}

/// A value stored in a document field or an index entry.
///
/// # Purpose
/// `Value` is the closed data model of the storage core. Every field of a
/// [Document](crate::collection::Document) holds one, every index entry is a
/// sequence of them, and the order-preserving encoder turns them into bytes
/// whose unsigned ordering matches [Ord] on `Value`.
///
/// # Variants
/// - `Null`: absence of a value
/// - `Boolean(bool)`
/// - `Number(f64)`: every number is a double, NaN included
/// - `String(String)`
/// - `List(Vec<Value>)`: ordered sequence
/// - `Object(OrdMap<FieldName, Value>)`: members iterate by ascending name
///
/// # Ordering
/// Across variants `Null < Boolean < Number < String < List < Object`. Within a
/// variant:
/// - `false < true`
/// - NaN sorts before every other number, the rest follow IEEE-754 with
///   `-0.0 == +0.0`
/// - strings compare by codepoint, then length
/// - lists compare element-wise, then by length
/// - objects compare entry by entry in ascending key order (key first, then
///   value), then by size
///
/// Equality is defined as `cmp() == Equal`, so all NaNs are equal and both
/// zeros are equal. `Hash` agrees with that equality.
///
/// # Construction
/// Build values through the factories ([Value::number], [Value::object], the
/// `From` impls). The variants are public for pattern matching. A
/// `Number` built directly may hold any NaN bit pattern; comparison, hashing,
/// [Display] and the encoder all treat it as [Value::NAN].
///
/// # Examples
///
/// ```rust
/// use syllabus::common::Value;
///
/// assert!(Value::NULL < Value::FALSE);
/// assert!(Value::NAN < Value::number(f64::NEG_INFINITY));
/// assert_eq!(Value::number(-0.0), Value::number(0.0));
/// assert!(Value::from("zzz") < Value::empty_list());
/// ```
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Object(OrdMap<FieldName, Value>),
}

/// The variant of a [Value], ordered like the variants themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueType {
    Null,
    Boolean,
    Number,
    String,
    List,
    Object,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueType::Null => "null",
            ValueType::Boolean => "boolean",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::List => "list",
            ValueType::Object => "object",
        };
        write!(f, "{}", name)
    }
}

impl Value {
    pub const NULL: Value = Value::Null;
    pub const TRUE: Value = Value::Boolean(true);
    pub const FALSE: Value = Value::Boolean(false);
    pub const NAN: Value = Value::Number(f64::NAN);

    /// Creates a number, collapsing every NaN bit pattern to [Value::NAN].
    pub fn number(n: f64) -> Value {
        if n.is_nan() {
            Value::NAN
        } else {
            Value::Number(n)
        }
    }

    pub fn boolean(b: bool) -> Value {
        Value::Boolean(b)
    }

    pub fn string(s: impl Into<String>) -> Value {
        Value::String(s.into())
    }

    pub fn list(values: Vec<Value>) -> Value {
        Value::List(values)
    }

    pub fn empty_list() -> Value {
        Value::List(Vec::new())
    }

    /// Creates an object. A repeated name keeps the last value.
    pub fn object<I>(entries: I) -> Value
    where
        I: IntoIterator<Item = (FieldName, Value)>,
    {
        Value::Object(entries.into_iter().collect())
    }

    pub fn empty_object() -> Value {
        Value::Object(OrdMap::new())
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::List(_) => ValueType::List,
            Value::Object(_) => ValueType::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Number(n) if n.is_nan())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&OrdMap<FieldName, Value>> {
        match self {
            Value::Object(entries) => Some(entries),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => num_cmp(*a, *b),
            // byte order of UTF-8 is codepoint order
            (Value::String(a), Value::String(b)) => a.as_bytes().cmp(b.as_bytes()),
            (Value::List(a), Value::List(b)) => a.iter().cmp(b.iter()),
            (Value::Object(a), Value::Object(b)) => a.iter().cmp(b.iter()),
            _ => self.value_type().cmp(&other.value_type()),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value_type().hash(state);
        match self {
            Value::Null => {}
            Value::Boolean(b) => b.hash(state),
            Value::Number(n) => canonical_bits(*n).hash(state),
            Value::String(s) => s.hash(state),
            Value::List(values) => {
                values.len().hash(state);
                for value in values {
                    value.hash(state);
                }
            }
            Value::Object(entries) => {
                entries.len().hash(state);
                for (name, value) in entries.iter() {
                    name.hash(state);
                    value.hash(state);
                }
            }
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::List(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
            Value::Object(entries) => {
                write!(f, "{{")?;
                for (i, (name, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::List(values)
    }
}

impl From<OrdMap<FieldName, Value>> for Value {
    fn from(entries: OrdMap<FieldName, Value>) -> Self {
        Value::Object(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(value: &Value) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn name(s: &str) -> FieldName {
        FieldName::new(s).unwrap()
    }

    #[test]
    fn test_cross_variant_order() {
        let ordered = vec![
            Value::NULL,
            Value::FALSE,
            Value::TRUE,
            Value::NAN,
            Value::number(f64::NEG_INFINITY),
            Value::number(f64::INFINITY),
            Value::string(""),
            Value::empty_list(),
            Value::empty_object(),
        ];
        for pair in ordered.windows(2) {
            assert!(pair[0] < pair[1], "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_zeros_are_equal() {
        let neg = Value::number(-0.0);
        let pos = Value::number(0.0);
        assert_eq!(neg, pos);
        assert_eq!(neg.cmp(&pos), Ordering::Equal);
        assert_eq!(hash_of(&neg), hash_of(&pos));
    }

    #[test]
    fn test_nans_are_equal() {
        let odd_nan = Value::Number(f64::from_bits(0x7FF0_0000_0000_0001));
        assert_eq!(odd_nan, Value::NAN);
        assert_eq!(hash_of(&odd_nan), hash_of(&Value::NAN));
        assert!(Value::number(f64::from_bits(0xFFF8_0000_0000_0000)).is_nan());
        assert_eq!(
            Value::number(f64::from_bits(0xFFF8_0000_0000_0000))
                .as_number()
                .unwrap()
                .to_bits(),
            f64::NAN.to_bits()
        );
    }

    #[test]
    fn test_string_codepoint_order() {
        assert!(Value::from("a") < Value::from("aa"));
        assert!(Value::from("a") < Value::from("\u{20ac}"));
        assert!(Value::from("\u{FF61}") < Value::from("\u{10002}"));
        assert!(Value::from("Z") < Value::from("a"));
    }

    #[test]
    fn test_list_order() {
        let short = Value::list(vec![Value::FALSE]);
        let long = Value::list(vec![Value::FALSE, Value::NULL]);
        let bigger = Value::list(vec![Value::TRUE]);
        assert!(Value::empty_list() < short);
        assert!(short < long);
        assert!(long < bigger);
    }

    #[test]
    fn test_object_order() {
        let a_null = Value::object(vec![(name("a"), Value::NULL)]);
        let a_false = Value::object(vec![(name("a"), Value::FALSE)]);
        let aa_null = Value::object(vec![(name("aa"), Value::NULL)]);
        let two = Value::object(vec![(name("a"), Value::NULL), (name("b"), Value::NULL)]);
        assert!(Value::empty_object() < a_null);
        assert!(a_null < a_false);
        assert!(a_false < aa_null);
        assert!(a_null < two);
        assert!(two < a_false);
    }

    #[test]
    fn test_object_iterates_by_name() {
        let value = Value::object(vec![
            (name("zeta"), Value::NULL),
            (name("alpha"), Value::TRUE),
        ]);
        let names: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::TRUE.as_bool(), Some(true));
        assert_eq!(Value::from(2.5).as_number(), Some(2.5));
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::empty_list().as_list().map(|l| l.len()), Some(0));
        assert!(Value::NULL.as_object().is_none());
        assert!(Value::NULL.is_null());
        assert_eq!(Value::from("x").value_type(), ValueType::String);
        assert_eq!(Value::default(), Value::NULL);
    }

    #[test]
    fn test_display() {
        let value = Value::object(vec![
            (name("tags"), Value::list(vec![Value::from("a"), Value::NULL])),
            (name("n"), Value::from(1.5)),
        ]);
        assert_eq!(value.to_string(), "{n: 1.5, tags: [\"a\", null]}");
        assert_eq!(ValueType::Object.to_string(), "object");
    }
}
