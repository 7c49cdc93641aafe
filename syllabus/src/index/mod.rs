//! Secondary indexes.
//!
//! An [`Index`] names the document fields a secondary index is built from
//! and the direction each one sorts in. The [`Indexer`] reads those fields
//! from a document and produces [`IndexEntry`] values, which
//! [`IndexEntryEncoder`](crate::encoding::IndexEntryEncoder) turns into store
//! keys.
//!
//! Indexes are sparse: a document lacking any indexed field gets no entry in
//! that index.

mod descriptor;
mod entry;
mod indexer;

pub use descriptor::*;
pub use entry::*;
pub use indexer::*;
