use crate::common::DEFAULT_LOCK_TIMEOUT;
use crate::errors::{ErrorKind, SyllabusError, SyllabusResult};
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};

/// Configuration of an [UpgradableLock].
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use syllabus::common::{LockConfig, UpgradableLock};
///
/// let lock = UpgradableLock::new(LockConfig::new().timeout(Duration::from_millis(50)));
/// assert_eq!(lock.timeout(), Duration::from_millis(50));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockConfig {
    timeout: Duration,
}

impl LockConfig {
    pub fn new() -> LockConfig {
        LockConfig {
            timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// Sets how long an acquisition may wait. Zero means a single attempt;
    /// `Duration::MAX` waits without a deadline.
    pub fn timeout(mut self, timeout: Duration) -> LockConfig {
        self.timeout = timeout;
        self
    }

    pub fn get_timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        LockConfig::new()
    }
}

/// The kind of hold a [LockLease] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockKind {
    Read,
    Write,
}

impl Display for LockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockKind::Read => write!(f, "read"),
            LockKind::Write => write!(f, "write"),
        }
    }
}

#[derive(Default, Debug)]
struct LockState {
    readers: HashMap<ThreadId, usize>,
    writer: Option<ThreadId>,
    write_holds: usize,
    updater: Option<ThreadId>,
    update_holds: usize,
}

impl LockState {
    fn can_read(&self, me: ThreadId) -> bool {
        let no_foreign_writer = self.writer.map_or(true, |w| w == me);
        // a pending writer holds the update mutex; only existing readers may re-enter
        let no_foreign_updater =
            self.readers.contains_key(&me) || self.updater.map_or(true, |u| u == me);
        no_foreign_writer && no_foreign_updater
    }

    fn can_update(&self, me: ThreadId) -> bool {
        self.updater.map_or(true, |u| u == me)
    }

    fn can_write(&self, me: ThreadId) -> bool {
        self.readers.is_empty() && self.writer.map_or(true, |w| w == me)
    }

    fn release_update(&mut self) {
        self.update_holds -= 1;
        if self.update_holds == 0 {
            self.updater = None;
        }
    }
}

struct LockInner {
    state: Mutex<LockState>,
    changed: Condvar,
    timeout: Duration,
}

impl LockInner {
    /// The instant an acquisition started now gives up at, or `None` when the
    /// timeout is too large to represent and the wait is unbounded.
    fn deadline(&self) -> Option<Instant> {
        Instant::now().checked_add(self.timeout)
    }

    /// Waits on the condition variable until `deadline`. Returns false once
    /// the deadline has passed.
    fn wait(&self, state: &mut MutexGuard<'_, LockState>, deadline: Option<Instant>) -> bool {
        match deadline {
            Some(deadline) => {
                if Instant::now() >= deadline {
                    return false;
                }
                self.changed.wait_until(state, deadline);
            }
            None => self.changed.wait(state),
        }
        true
    }

    fn timeout_error(&self, kind: LockKind) -> SyllabusError {
        log::error!(
            "Could not acquire {} lock within {:?}",
            kind,
            self.timeout
        );
        SyllabusError::new(
            &format!("Could not acquire {} lock within {:?}", kind, self.timeout),
            ErrorKind::LockTimeout,
        )
    }

    fn acquire_read(&self, me: ThreadId) -> SyllabusResult<()> {
        let deadline = self.deadline();
        let mut state = self.state.lock();
        loop {
            if state.can_read(me) {
                *state.readers.entry(me).or_insert(0) += 1;
                log::trace!("Read lock acquired by {:?}", me);
                return Ok(());
            }
            if !self.wait(&mut state, deadline) {
                return Err(self.timeout_error(LockKind::Read));
            }
        }
    }

    fn acquire_write(&self, me: ThreadId) -> SyllabusResult<()> {
        let deadline = self.deadline();
        let mut state = self.state.lock();

        loop {
            if state.can_update(me) {
                state.updater = Some(me);
                state.update_holds += 1;
                break;
            }
            if !self.wait(&mut state, deadline) {
                return Err(self.timeout_error(LockKind::Write));
            }
        }

        let own_reads = state.readers.remove(&me).unwrap_or(0);
        if own_reads > 0 {
            log::debug!("Upgrading {} read hold(s) of {:?} to write", own_reads, me);
        }

        loop {
            if state.can_write(me) {
                state.writer = Some(me);
                state.write_holds += 1;
                break;
            }
            if !self.wait(&mut state, deadline) {
                state.release_update();
                if own_reads > 0 {
                    state.readers.insert(me, own_reads);
                }
                self.changed.notify_all();
                return Err(self.timeout_error(LockKind::Write));
            }
        }

        if own_reads > 0 {
            state.readers.insert(me, own_reads);
        }
        log::trace!("Write lock acquired by {:?}", me);
        Ok(())
    }

    fn release(&self, me: ThreadId, kind: LockKind) -> SyllabusResult<()> {
        let mut state = self.state.lock();
        match kind {
            LockKind::Read => {
                let holds = state.readers.get(&me).copied().unwrap_or(0);
                if holds == 0 {
                    log::error!("Thread {:?} holds no read lock", me);
                    return Err(SyllabusError::new(
                        "Thread holds no read lock",
                        ErrorKind::IllegalState,
                    ));
                }
                if holds == 1 {
                    state.readers.remove(&me);
                } else {
                    state.readers.insert(me, holds - 1);
                }
            }
            LockKind::Write => {
                if state.writer != Some(me) || state.update_holds == 0 {
                    log::error!("Thread {:?} holds no write lock", me);
                    return Err(SyllabusError::new(
                        "Thread holds no write lock",
                        ErrorKind::IllegalState,
                    ));
                }
                state.write_holds -= 1;
                if state.write_holds == 0 {
                    state.writer = None;
                }
                state.release_update();
            }
        }
        log::trace!("{} lock released by {:?}", kind, me);
        self.changed.notify_all();
        Ok(())
    }
}

/// A reader/writer lock whose readers can upgrade to writers in place.
///
/// # Purpose
/// Lets a thread that already reads a resource decide to modify it without
/// first giving up its read hold. The writer can also take read holds and
/// later release the write, which downgrades it to a reader.
///
/// # Model
/// Ownership is tracked per thread: a read hold count for every reading
/// thread, the writing thread with its hold count, and the owner of the update
/// mutex with its hold count. All of it lives under one mutex with a condition
/// variable. Both kinds of hold are re-entrant.
///
/// - A read is granted when no other thread writes. A thread that holds no
///   read yet also waits while another thread owns the update mutex, so a
///   waiting writer is not starved by new readers.
/// - A write first takes the update mutex, sets aside the caller's own read
///   holds, waits until no other thread reads or writes, takes the write hold
///   and restores the read holds. On timeout the update mutex is dropped and
///   the read holds are restored.
///
/// Every acquisition is bounded by the configured timeout and fails with
/// [ErrorKind::LockTimeout]. Two readers upgrading at the same time wait on
/// each other until one of them times out.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use syllabus::common::UpgradableLock;
///
/// let lock = UpgradableLock::with_timeout(Duration::from_millis(100));
/// let mut read = lock.read_lock().unwrap();
/// let mut write = lock.write_lock().unwrap();
/// read.release().unwrap();
/// write.release().unwrap();
/// ```
#[derive(Clone)]
pub struct UpgradableLock {
    inner: Arc<LockInner>,
}

impl UpgradableLock {
    pub fn new(config: LockConfig) -> UpgradableLock {
        UpgradableLock {
            inner: Arc::new(LockInner {
                state: Mutex::new(LockState::default()),
                changed: Condvar::new(),
                timeout: config.get_timeout(),
            }),
        }
    }

    pub fn with_timeout(timeout: Duration) -> UpgradableLock {
        UpgradableLock::new(LockConfig::new().timeout(timeout))
    }

    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// True while some thread owns the update mutex, pending or writing.
    #[cfg(test)]
    fn has_updater(&self) -> bool {
        self.inner.state.lock().updater.is_some()
    }

    /// Acquires a read hold for the calling thread.
    pub fn read_lock(&self) -> SyllabusResult<LockLease> {
        let me = thread::current().id();
        self.inner.acquire_read(me)?;
        Ok(LockLease::new(self.inner.clone(), me, LockKind::Read))
    }

    /// Acquires a write hold for the calling thread, upgrading any read holds
    /// it already has.
    pub fn write_lock(&self) -> SyllabusResult<LockLease> {
        let me = thread::current().id();
        self.inner.acquire_write(me)?;
        Ok(LockLease::new(self.inner.clone(), me, LockKind::Write))
    }
}

impl Default for UpgradableLock {
    fn default() -> Self {
        UpgradableLock::new(LockConfig::default())
    }
}

/// A hold on an [UpgradableLock], released explicitly or on drop.
///
/// A lease belongs to the thread that acquired it. Releasing from any other
/// thread, or releasing twice, fails with [ErrorKind::IllegalState]. A lease
/// dropped unreleased on its owning thread releases itself; dropped on any
/// other thread it logs an error and the hold stays in place.
pub struct LockLease {
    lock: Arc<LockInner>,
    owner: ThreadId,
    kind: LockKind,
    released: bool,
}

impl std::fmt::Debug for LockLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockLease")
            .field("owner", &self.owner)
            .field("kind", &self.kind)
            .field("released", &self.released)
            .finish()
    }
}

impl LockLease {
    fn new(lock: Arc<LockInner>, owner: ThreadId, kind: LockKind) -> LockLease {
        LockLease {
            lock,
            owner,
            kind,
            released: false,
        }
    }

    pub fn kind(&self) -> LockKind {
        self.kind
    }

    pub fn owner(&self) -> ThreadId {
        self.owner
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn release(&mut self) -> SyllabusResult<()> {
        if self.released {
            log::error!("{} lease already released", self.kind);
            return Err(SyllabusError::new(
                &format!("{} lease already released", self.kind),
                ErrorKind::IllegalState,
            ));
        }

        let me = thread::current().id();
        if me != self.owner {
            log::error!(
                "{} lease owned by {:?} cannot be released by {:?}",
                self.kind,
                self.owner,
                me
            );
            return Err(SyllabusError::new(
                &format!("{} lease can only be released by its owning thread", self.kind),
                ErrorKind::IllegalState,
            ));
        }

        self.lock.release(me, self.kind)?;
        self.released = true;
        Ok(())
    }
}

impl Drop for LockLease {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if thread::current().id() != self.owner {
            log::error!(
                "{} lease of {:?} dropped on another thread, hold is kept",
                self.kind,
                self.owner
            );
            return;
        }
        if let Err(err) = self.release() {
            log::error!("Failed to release {} lease on drop: {}", self.kind, err);
        }
    }
}
