use crate::common::ByteArray;
use crate::errors::SyllabusResult;
use crate::store::Cursor;
use std::fmt::Display;
use std::ops::Deref;
use std::sync::Arc;

/// One mutation of a write batch.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum WriteOperation {
    /// Inserts `key` or replaces its value.
    Put { key: ByteArray, value: ByteArray },
    /// Removes `key`; a missing key is not an error.
    Delete { key: ByteArray },
}

impl WriteOperation {
    pub fn put(key: impl Into<ByteArray>, value: impl Into<ByteArray>) -> WriteOperation {
        WriteOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn delete(key: impl Into<ByteArray>) -> WriteOperation {
        WriteOperation::Delete { key: key.into() }
    }

    pub fn key(&self) -> &ByteArray {
        match self {
            WriteOperation::Put { key, .. } => key,
            WriteOperation::Delete { key } => key,
        }
    }
}

impl Display for WriteOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteOperation::Put { key, value } => write!(f, "put {} = {}", key, value),
            WriteOperation::Delete { key } => write!(f, "delete {}", key),
        }
    }
}

/// Contract of an ordered byte key-value store.
///
/// Keys are ordered by unsigned lexicographic comparison of their bytes.
///
/// # Guarantees
/// - **Snapshot reads**: [cursor](KeyValueStoreProvider::cursor) reads the
///   store as it was when the cursor was created. Writes that finish later are
///   never visible through it.
/// - **Atomic batches**: [write](KeyValueStoreProvider::write) applies every
///   operation of the batch, in order, or none of them. A reader never sees
///   part of a batch.
/// - **Serialised writers**: concurrent batches are applied one after another.
pub trait KeyValueStoreProvider: Send + Sync {
    /// Opens a cursor over a point-in-time snapshot. The cursor starts
    /// unpositioned.
    fn cursor(&self) -> Cursor;

    /// Applies `batch` atomically. An empty batch is a no-op.
    fn write(&self, batch: Vec<WriteOperation>) -> SyllabusResult<()>;
}

/// Shared handle to a [KeyValueStoreProvider].
///
/// # Examples
///
/// ```rust
/// use syllabus::store::{InMemoryKeyValueStore, KeyValueStore, KeyValueStoreProvider, WriteOperation};
///
/// let store = KeyValueStore::new(InMemoryKeyValueStore::new());
/// store.write(vec![WriteOperation::put("k", "v")]).unwrap();
/// let mut cursor = store.cursor();
/// cursor.seek_to_start();
/// assert_eq!(cursor.value().unwrap().to_utf8().unwrap(), "v");
/// ```
#[derive(Clone)]
pub struct KeyValueStore {
    inner: Arc<dyn KeyValueStoreProvider>,
}

impl KeyValueStore {
    pub fn new<T: KeyValueStoreProvider + 'static>(inner: T) -> Self {
        KeyValueStore {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for KeyValueStore {
    type Target = Arc<dyn KeyValueStoreProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorKind, SyllabusError};
    use crate::store::CursorProvider;
    use parking_lot::Mutex;

    struct EmptyCursor;

    impl CursorProvider for EmptyCursor {
        fn seek_to_start(&mut self) {}
        fn seek_to_end(&mut self) {}
        fn seek(&mut self, _key: &[u8]) {}
        fn valid(&self) -> bool {
            false
        }
        fn next(&mut self) -> SyllabusResult<()> {
            Err(SyllabusError::new("invalid", ErrorKind::IllegalState))
        }
        fn previous(&mut self) -> SyllabusResult<()> {
            Err(SyllabusError::new("invalid", ErrorKind::IllegalState))
        }
        fn key(&self) -> SyllabusResult<ByteArray> {
            Err(SyllabusError::new("invalid", ErrorKind::IllegalState))
        }
        fn value(&self) -> SyllabusResult<ByteArray> {
            Err(SyllabusError::new("invalid", ErrorKind::IllegalState))
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        batches: Mutex<Vec<Vec<WriteOperation>>>,
    }

    impl KeyValueStoreProvider for RecordingStore {
        fn cursor(&self) -> Cursor {
            Cursor::new(EmptyCursor)
        }

        fn write(&self, batch: Vec<WriteOperation>) -> SyllabusResult<()> {
            self.batches.lock().push(batch);
            Ok(())
        }
    }

    #[test]
    fn test_wrapper_delegates() {
        let store = KeyValueStore::new(RecordingStore::default());
        store.write(vec![WriteOperation::delete("a")]).unwrap();
        let cursor = store.cursor();
        assert!(!cursor.valid());
    }

    #[test]
    fn test_clone_shares_provider() {
        let store = KeyValueStore::new(RecordingStore::default());
        let clone = store.clone();
        assert!(Arc::ptr_eq(&store.inner, &clone.inner));
    }

    #[test]
    fn test_operation_constructors() {
        let put = WriteOperation::put("k", vec![1u8, 2]);
        assert_eq!(put.key(), &ByteArray::from("k"));
        assert_eq!(put.to_string(), "put 0x6B = 0x01_02");
        let delete = WriteOperation::delete(ByteArray::from("k"));
        assert_eq!(delete.key(), &ByteArray::from("k"));
        assert_eq!(delete.to_string(), "delete 0x6B");
    }
}
