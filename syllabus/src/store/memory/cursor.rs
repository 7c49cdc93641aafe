use crate::common::ByteArray;
use crate::errors::{ErrorKind, SyllabusError, SyllabusResult};
use crate::store::memory::Snapshot;
use crate::store::CursorProvider;
use std::ops::Bound::{Excluded, Included, Unbounded};

/// Cursor over one version of an [InMemoryKeyValueStore](super::InMemoryKeyValueStore).
pub struct InMemoryCursor {
    snapshot: Snapshot,
    current: Option<(ByteArray, ByteArray)>,
}

impl InMemoryCursor {
    pub(crate) fn new(snapshot: Snapshot) -> InMemoryCursor {
        InMemoryCursor {
            snapshot,
            current: None,
        }
    }

    fn current(&self) -> SyllabusResult<&(ByteArray, ByteArray)> {
        match &self.current {
            Some(entry) => Ok(entry),
            None => {
                log::error!("Cursor is not positioned on an entry");
                Err(SyllabusError::new(
                    "Cursor is not positioned on an entry",
                    ErrorKind::IllegalState,
                ))
            }
        }
    }
}

impl CursorProvider for InMemoryCursor {
    fn seek_to_start(&mut self) {
        self.current = self
            .snapshot
            .get_min()
            .map(|(k, v)| (k.clone(), v.clone()));
    }

    fn seek_to_end(&mut self) {
        self.current = self
            .snapshot
            .get_max()
            .map(|(k, v)| (k.clone(), v.clone()));
    }

    fn seek(&mut self, key: &[u8]) {
        self.current = self
            .snapshot
            .range((Included(ByteArray::from(key)), Unbounded))
            .next()
            .map(|(k, v)| (k.clone(), v.clone()));
    }

    fn valid(&self) -> bool {
        self.current.is_some()
    }

    fn next(&mut self) -> SyllabusResult<()> {
        let (key, _) = self.current()?;
        let key = key.clone();
        self.current = self
            .snapshot
            .range((Excluded(key), Unbounded))
            .next()
            .map(|(k, v)| (k.clone(), v.clone()));
        Ok(())
    }

    fn previous(&mut self) -> SyllabusResult<()> {
        let (key, _) = self.current()?;
        let key = key.clone();
        self.current = self
            .snapshot
            .range((Unbounded, Excluded(key)))
            .next_back()
            .map(|(k, v)| (k.clone(), v.clone()));
        Ok(())
    }

    fn key(&self) -> SyllabusResult<ByteArray> {
        self.current().map(|(k, _)| k.clone())
    }

    fn value(&self) -> SyllabusResult<ByteArray> {
        self.current().map(|(_, v)| v.clone())
    }
}
