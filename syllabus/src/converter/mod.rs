//! JSON converters for documents and index definitions.
//!
//! Available with the `json` feature, which is on by default.

mod document;
mod index;
mod value;

pub use document::*;
pub use index::*;
pub use value::*;
