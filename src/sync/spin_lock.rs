use core::cell::UnsafeCell;
use core::ops::{Deref, DerefMut, Drop};
use core::{
    hint,
    sync::atomic::{AtomicBool, Ordering},
};

use crate::sync::intr_guard::IntrGuard;

/// Spin lock guarding a `T`, combining an atomic spin with `IntrGuard` for
/// interrupt protection. Not reentrant: nested `lock()` calls on the same
/// lock deadlock (spin forever with interrupts disabled).
///
/// ```ignore
/// static COUNTER: SpinLock<usize> = SpinLock::new(0);
/// {
///     let mut guard = COUNTER.lock(); // acquires the lock, disables interrupts
///     *guard += 1;
/// } // scope ends: lock released, interrupt state restored
/// ```
pub struct SpinLock<T> {
    lock: AtomicBool,
    data: UnsafeCell<T>,
}

unsafe impl<T: Send> Send for SpinLock<T> {}
unsafe impl<T: Send> Sync for SpinLock<T> {}

impl<T> SpinLock<T> {
    pub const fn new(data: T) -> Self {
        SpinLock {
            lock: AtomicBool::new(false),
            data: UnsafeCell::new(data),
        }
    }

    /// Acquire the lock, disabling local interrupts, and return an RAII guard.
    pub fn lock(&self) -> SpinLockGuard<'_, T> {
        let guard = IntrGuard::new();

        while self
            .lock
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            hint::spin_loop();
        }

        SpinLockGuard {
            lock: self,
            intr_guard: guard,
        }
    }

    /// Try to acquire the lock without spinning.
    pub fn try_lock(&self) -> Option<SpinLockGuard<'_, T>> {
        let guard = IntrGuard::new();

        if self
            .lock
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            Some(SpinLockGuard {
                lock: self,
                intr_guard: guard,
            })
        } else {
            None
        }
    }

    fn unlock(&self) {
        self.lock.store(false, Ordering::Release);
    }

    /// Check whether the lock is held (debug/test only).
    #[cfg(test)]
    pub fn is_locked(&self) -> bool {
        self.lock.load(Ordering::Relaxed)
    }
}

/// RAII guard releasing the spin lock and restoring interrupt state on drop.
pub struct SpinLockGuard<'a, T> {
    lock: &'a SpinLock<T>,
    intr_guard: IntrGuard,
}

impl<T> Deref for SpinLockGuard<'_, T> {
    type Target = T;
    fn deref(&self) -> &T {
        unsafe { &*self.lock.data.get() }
    }
}

impl<T> DerefMut for SpinLockGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<T> Drop for SpinLockGuard<'_, T> {
    /// Order of operations: release the spin flag, then the contained
    /// `IntrGuard` drops and restores the interrupt state.
    fn drop(&mut self) {
        self.lock.unlock();
    }
}
