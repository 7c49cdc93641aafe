//! # Syllabus - storage core of an embedded document database
//!
//! Syllabus keeps documents and their secondary indexes in an ordered
//! key-value store. Index entries are turned into byte keys whose unsigned
//! lexicographic order matches the order of the indexed values, so a plain
//! ordered byte map can answer range queries.
//!
//! ## Data flow
//!
//! ```text
//! Document -> Indexer -> IndexEntry* -> IndexEntryEncoder -> ByteArray keys -> KeyValueStore::write
//! KeyValueStore::cursor -> seek / scan -> IndexEntryDecoder -> IndexEntry
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use syllabus::collection::{CollectionId, DocId, Document};
//! use syllabus::common::{Direction, FieldName, FieldPath, Value};
//! use syllabus::encoding::IndexEntryEncoder;
//! use syllabus::index::{Index, IndexField, IndexName, Indexer};
//! use syllabus::store::{InMemoryKeyValueStore, KeyValueStore, KeyValueStoreProvider, WriteOperation};
//!
//! # fn main() -> Result<(), syllabus::errors::SyllabusError> {
//! let users = CollectionId::new("users")?;
//! let by_age = Index::new(
//!     IndexName::new("by_age")?,
//!     users.clone(),
//!     vec![IndexField::new(FieldPath::parse("age")?, Direction::Descending)],
//! )?;
//! let indexer = Indexer::new(vec![by_age]);
//!
//! let doc = Document::new(
//!     DocId::new("alice")?,
//!     users,
//!     vec![(FieldName::new("age")?, Value::from(42.0))],
//! );
//!
//! let store = KeyValueStore::new(InMemoryKeyValueStore::new());
//! let batch = indexer
//!     .index(&doc)
//!     .iter()
//!     .map(|entry| WriteOperation::put(IndexEntryEncoder::encode(entry), doc.path().to_string()))
//!     .collect();
//! store.write(batch)?;
//!
//! let mut cursor = store.cursor();
//! cursor.seek_to_start();
//! assert!(cursor.valid());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`common`] - Value model, identifiers, byte arrays, the upgradable lock
//! - [`collection`] - Document identity and documents
//! - [`index`] - Index definitions, index entries and the indexer
//! - [`encoding`] - Order-preserving binary encoding of values and index keys
//! - [`store`] - Ordered key-value store contract and in-memory backend
//! - [`converter`] - JSON converters for documents and index definitions
//! - [`errors`] - Error types and result definitions

pub mod collection;
pub mod common;
#[cfg(feature = "json")]
pub mod converter;
pub mod encoding;
pub mod errors;
pub mod index;
pub mod store;
