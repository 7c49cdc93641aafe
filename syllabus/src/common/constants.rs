use std::time::Duration;

// identifier constants
pub const IDENTIFIER_PATTERN: &str = "^[A-Za-z][A-Za-z0-9_]*$";
pub const FIELD_SEPARATOR: char = '.';
pub const PATH_SEPARATOR: char = '/';

// document json constants
pub const DOC_ID: &str = "_id";

// lock constants
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(10);
