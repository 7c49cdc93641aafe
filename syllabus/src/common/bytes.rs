use crate::errors::SyllabusResult;
use itertools::Itertools;
use std::borrow::Borrow;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Deref;
use std::sync::Arc;

/// An immutable, cheaply cloneable byte string.
///
/// `ByteArray` is the key and value type of the key-value store and the output
/// of the order-preserving encoder. Ordering is unsigned lexicographic, which is
/// the order the encoder is designed against.
///
/// # Examples
///
/// ```rust
/// use syllabus::common::ByteArray;
///
/// let low = ByteArray::from(vec![0x01u8]);
/// let high = ByteArray::from(vec![0xFFu8]);
/// assert!(low < high);
/// assert_eq!(high.to_string(), "0xFF");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ByteArray {
    bytes: Arc<[u8]>,
}

impl ByteArray {
    /// Wraps the UTF-8 bytes of `s`.
    pub fn copy_utf8(s: &str) -> Self {
        ByteArray {
            bytes: Arc::from(s.as_bytes()),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decodes the bytes as UTF-8.
    pub fn to_utf8(&self) -> SyllabusResult<String> {
        Ok(String::from_utf8(self.bytes.to_vec())?)
    }

    #[inline]
    pub fn starts_with(&self, prefix: &ByteArray) -> bool {
        self.bytes.starts_with(&prefix.bytes)
    }

    /// Renders every byte as eight binary digits, e.g. `0b00000110_01100001`.
    pub fn to_binary_string(&self) -> String {
        format!(
            "0b{}",
            self.bytes.iter().map(|b| format!("{:08b}", b)).join("_")
        )
    }
}

impl From<Vec<u8>> for ByteArray {
    fn from(bytes: Vec<u8>) -> Self {
        ByteArray {
            bytes: Arc::from(bytes),
        }
    }
}

impl From<&[u8]> for ByteArray {
    fn from(bytes: &[u8]) -> Self {
        ByteArray {
            bytes: Arc::from(bytes),
        }
    }
}

impl From<String> for ByteArray {
    fn from(s: String) -> Self {
        ByteArray::from(s.into_bytes())
    }
}

impl From<&str> for ByteArray {
    fn from(s: &str) -> Self {
        ByteArray::copy_utf8(s)
    }
}

impl Deref for ByteArray {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.bytes
    }
}

impl AsRef<[u8]> for ByteArray {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl Borrow<[u8]> for ByteArray {
    fn borrow(&self) -> &[u8] {
        &self.bytes
    }
}

impl Display for ByteArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "0x{}",
            self.bytes.iter().map(|b| format!("{:02X}", b)).join("_")
        )
    }
}

impl Debug for ByteArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
