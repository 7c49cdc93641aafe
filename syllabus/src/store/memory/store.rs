use crate::common::{atomic, Atomic, ByteArray, ReadExecutor, WriteExecutor};
use crate::errors::SyllabusResult;
use crate::store::memory::InMemoryCursor;
use crate::store::{Cursor, KeyValueStoreProvider, WriteOperation};
use im::OrdMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// Ordered byte map of one store version.
pub type Snapshot = OrdMap<ByteArray, ByteArray>;

/// In-memory reference implementation of [KeyValueStoreProvider].
///
/// The store holds the current version of a persistent ordered map. A cursor
/// keeps the version that was current when it was opened. A write builds the
/// next version from the current one with the whole batch applied and swaps it
/// in, so readers see either all of a batch or none of it. Versions share
/// structure, so taking a snapshot is O(1).
///
/// # Examples
///
/// ```rust
/// use syllabus::store::{InMemoryKeyValueStore, KeyValueStoreProvider, WriteOperation};
///
/// let store = InMemoryKeyValueStore::new();
/// store.write(vec![WriteOperation::put("a", "1")]).unwrap();
/// let mut snapshot = store.cursor();
/// store.write(vec![WriteOperation::put("b", "2")]).unwrap();
///
/// snapshot.seek_to_start();
/// assert_eq!(snapshot.entries().count(), 1);
/// assert_eq!(store.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    inner: Arc<InMemoryKeyValueStoreInner>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> InMemoryKeyValueStore {
        InMemoryKeyValueStore {
            inner: Arc::new(InMemoryKeyValueStoreInner::new()),
        }
    }

    /// Number of entries in the current version.
    pub fn len(&self) -> usize {
        self.inner.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.snapshot().is_empty()
    }
}

impl KeyValueStoreProvider for InMemoryKeyValueStore {
    fn cursor(&self) -> Cursor {
        Cursor::new(InMemoryCursor::new(self.inner.snapshot()))
    }

    fn write(&self, batch: Vec<WriteOperation>) -> SyllabusResult<()> {
        self.inner.write(batch)
    }
}

#[derive(Default)]
struct InMemoryKeyValueStoreInner {
    data: Atomic<Snapshot>,
    writer: Mutex<()>,
}

impl InMemoryKeyValueStoreInner {
    fn new() -> InMemoryKeyValueStoreInner {
        InMemoryKeyValueStoreInner {
            data: atomic(OrdMap::new()),
            writer: Mutex::new(()),
        }
    }

    fn snapshot(&self) -> Snapshot {
        self.data.load()
    }

    fn write(&self, batch: Vec<WriteOperation>) -> SyllabusResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let _writer = self.writer.lock();
        let mut next = self.snapshot();
        let operations = batch.len();
        for operation in batch {
            match operation {
                WriteOperation::Put { key, value } => {
                    next.insert(key, value);
                }
                WriteOperation::Delete { key } => {
                    next.remove(&key);
                }
            }
        }
        let size = next.len();
        self.data.store(next);
        log::debug!("Applied batch of {} operation(s), store has {} entries", operations, size);
        Ok(())
    }
}
