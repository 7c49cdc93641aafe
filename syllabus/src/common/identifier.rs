use crate::common::IDENTIFIER_PATTERN;
use crate::errors::{ErrorKind, SyllabusError, SyllabusResult};
use once_cell::sync::Lazy;
use regex::Regex;

static VALID_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(IDENTIFIER_PATTERN).expect("identifier pattern is a valid regex"));

/// Checks `raw` against `^[A-Za-z][A-Za-z0-9_]*$`.
///
/// `kind` names the identifier in the error message, e.g. "field name".
pub(crate) fn validate_identifier(kind: &str, raw: &str) -> SyllabusResult<()> {
    if VALID_ID_REGEX.is_match(raw) {
        Ok(())
    } else {
        log::error!("Invalid {}: {:?}", kind, raw);
        Err(SyllabusError::new(
            &format!("Invalid {}: {:?}", kind, raw),
            ErrorKind::ValidationError,
        ))
    }
}

/// Declares a validated string newtype.
///
/// The generated type can only be built through `new`, which rejects any
/// string not matching the identifier pattern. Ordering is the codepoint order
/// of the underlying string.
macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Validates `raw` and wraps it.
            pub fn new(raw: impl Into<String>) -> $crate::errors::SyllabusResult<Self> {
                let raw = raw.into();
                $crate::common::identifier::validate_identifier($kind, &raw)?;
                Ok($name(raw))
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::errors::SyllabusError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

pub(crate) use identifier;
