//! Documents and the identifiers that address them.

mod document;
mod ids;

pub use document::*;
pub use ids::*;
