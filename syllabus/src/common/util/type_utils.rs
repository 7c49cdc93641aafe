use std::sync::Arc;

use parking_lot::RwLock;

/// Shared, lock-protected state. Cloning shares the same slot.
pub type Atomic<T> = Arc<RwLock<T>>;

#[inline]
pub fn atomic<T>(t: T) -> Atomic<T> {
    Arc::new(RwLock::new(t))
}

/// Scoped read access to an [Atomic] slot.
pub trait ReadExecutor<T> {
    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> R;

    /// Clones the current contents out of the slot.
    ///
    /// Cheap for persistent structures such as `im::OrdMap`, whose clones
    /// share nodes with the original.
    fn load(&self) -> T
    where
        T: Clone,
    {
        self.read_with(T::clone)
    }
}

impl<T> ReadExecutor<T> for Atomic<T> {
    #[inline]
    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.read())
    }
}

/// Scoped write access to an [Atomic] slot.
pub trait WriteExecutor<T> {
    fn write_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R;

    /// Swaps `value` into the slot and returns what was there.
    fn store(&self, value: T) -> T {
        self.write_with(|slot| std::mem::replace(slot, value))
    }
}

impl<T> WriteExecutor<T> for Atomic<T> {
    #[inline]
    fn write_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.write())
    }
}
