use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;
use std::sync::Arc;

/// Error kinds for storage core operations.
///
/// Each kind names a category of failure so callers can decide between
/// retrying, reporting corrupt data or treating the failure as a bug.
///
/// # Examples
///
/// ```rust
/// use syllabus::errors::{ErrorKind, SyllabusError, SyllabusResult};
///
/// fn example() -> SyllabusResult<()> {
///     Err(SyllabusError::new("Invalid field name: 1abc", ErrorKind::ValidationError))
/// }
///
/// assert_eq!(example().unwrap_err().kind(), &ErrorKind::ValidationError);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// A value object was constructed from malformed input (identifier,
    /// empty field path, empty index definition, malformed document path).
    ValidationError,

    /// Encoded bytes are corrupt or were not produced by this encoder.
    DecodingError,

    /// A lock could not be acquired before the configured deadline.
    LockTimeout,

    /// An API contract was violated: an invalid cursor was used, or a lock
    /// lease was released twice or from the wrong thread.
    IllegalState,

    /// Error converting to or from the JSON wire format.
    EncodingError,

    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::DecodingError => write!(f, "Decoding error"),
            ErrorKind::LockTimeout => write!(f, "Lock acquisition timeout"),
            ErrorKind::IllegalState => write!(f, "Illegal state"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Error type of the storage core.
///
/// `SyllabusError` carries a message, an [ErrorKind], an optional cause and
/// the backtrace captured where it was raised.
///
/// # Examples
///
/// ```rust
/// use syllabus::errors::{ErrorKind, SyllabusError};
///
/// let cause = SyllabusError::new("unknown tag value: 0x42", ErrorKind::DecodingError);
/// let err = SyllabusError::new_with_cause("corrupt index key", ErrorKind::DecodingError, cause);
/// assert!(err.cause().is_some());
/// ```
#[derive(Clone)]
pub struct SyllabusError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<SyllabusError>>,
    backtrace: Arc<Backtrace>,
}

impl SyllabusError {
    /// Creates a new `SyllabusError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        SyllabusError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    /// Creates a new `SyllabusError` that wraps the error which caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: SyllabusError) -> Self {
        SyllabusError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&SyllabusError> {
        self.cause.as_deref()
    }
}

impl Display for SyllabusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for SyllabusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}: {}\nCaused by: {:?}", self.error_kind, self.message, cause),
            None => write!(f, "{}: {}\n{:?}", self.error_kind, self.message, self.backtrace),
        }
    }
}

impl Error for SyllabusError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for storage core operations.
pub type SyllabusResult<T> = Result<T, SyllabusError>;

impl From<std::string::FromUtf8Error> for SyllabusError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        SyllabusError::new(
            &format!("Encoded string is not valid UTF-8: {}", err),
            ErrorKind::DecodingError,
        )
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for SyllabusError {
    fn from(err: serde_json::Error) -> Self {
        SyllabusError::new(&format!("JSON error: {}", err), ErrorKind::EncodingError)
    }
}

impl From<String> for SyllabusError {
    fn from(msg: String) -> Self {
        SyllabusError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for SyllabusError {
    fn from(msg: &str) -> Self {
        SyllabusError::new(msg, ErrorKind::InternalError)
    }
}
