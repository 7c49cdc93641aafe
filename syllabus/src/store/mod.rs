//! Ordered key-value storage.
//!
//! The storage layer is an ordered byte map behind the
//! [`KeyValueStoreProvider`] trait. Reads go through a [`Cursor`] over an
//! immutable snapshot; writes are atomic batches of [`WriteOperation`]s.
//!
//! [`InMemoryKeyValueStore`] is the reference backend. Other backends plug in
//! by implementing [`KeyValueStoreProvider`] and [`CursorProvider`].

mod cursor;
mod key_value_store;
pub mod memory;

pub use cursor::*;
pub use key_value_store::*;
pub use memory::*;
