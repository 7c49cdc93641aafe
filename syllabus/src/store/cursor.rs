use crate::common::ByteArray;
use crate::errors::SyllabusResult;

/// A bidirectional cursor over a snapshot of a key-value store.
///
/// A cursor is either positioned on an entry (`valid()` is true) or not.
/// Seeking never fails; it leaves the cursor invalid when there is no entry to
/// land on. Reading or moving an invalid cursor fails with
/// [ErrorKind::IllegalState](crate::errors::ErrorKind::IllegalState).
pub trait CursorProvider: Send {
    /// Positions on the smallest key.
    fn seek_to_start(&mut self);

    /// Positions on the largest key.
    fn seek_to_end(&mut self);

    /// Positions on the first key greater than or equal to `key`.
    fn seek(&mut self, key: &[u8]);

    fn valid(&self) -> bool;

    /// Moves to the next larger key, becoming invalid past the end.
    fn next(&mut self) -> SyllabusResult<()>;

    /// Moves to the next smaller key, becoming invalid before the start.
    fn previous(&mut self) -> SyllabusResult<()>;

    fn key(&self) -> SyllabusResult<ByteArray>;

    fn value(&self) -> SyllabusResult<ByteArray>;
}

/// Owned handle to a [CursorProvider].
///
/// Movement takes `&mut self`, so one cursor is never driven from two places
/// at once.
pub struct Cursor {
    inner: Box<dyn CursorProvider>,
}

impl Cursor {
    pub fn new<T: CursorProvider + 'static>(inner: T) -> Self {
        Cursor {
            inner: Box::new(inner),
        }
    }

    pub fn seek_to_start(&mut self) {
        self.inner.seek_to_start()
    }

    pub fn seek_to_end(&mut self) {
        self.inner.seek_to_end()
    }

    pub fn seek(&mut self, key: &[u8]) {
        self.inner.seek(key)
    }

    pub fn valid(&self) -> bool {
        self.inner.valid()
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> SyllabusResult<()> {
        CursorProvider::next(self.inner.as_mut())
    }

    pub fn previous(&mut self) -> SyllabusResult<()> {
        self.inner.previous()
    }

    pub fn key(&self) -> SyllabusResult<ByteArray> {
        self.inner.key()
    }

    pub fn value(&self) -> SyllabusResult<ByteArray> {
        self.inner.value()
    }

    /// Iterates forward from the current position, leaving the cursor invalid
    /// at the end. Yields nothing when the cursor is not positioned.
    pub fn entries(&mut self) -> CursorEntries<'_> {
        CursorEntries { cursor: self }
    }
}

/// Forward iterator over `(key, value)` pairs of a [Cursor].
pub struct CursorEntries<'a> {
    cursor: &'a mut Cursor,
}

impl Iterator for CursorEntries<'_> {
    type Item = (ByteArray, ByteArray);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.cursor.valid() {
            return None;
        }
        let key = self.cursor.key().ok()?;
        let value = self.cursor.value().ok()?;
        if let Err(err) = self.cursor.next() {
            log::error!("Cursor failed to advance past {}: {}", key, err);
            return None;
        }
        Some((key, value))
    }
}
