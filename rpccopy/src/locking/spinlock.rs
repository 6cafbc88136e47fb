// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2022-2023 SUSE LLC
//
// Author: Joerg Roedel <jroedel@suse.de>

use core::cell::UnsafeCell;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicU64, Ordering};

/// Exclusive access to the data behind a [`SpinLock`]. The lock is
/// released when the guard goes out of scope.
#[derive(Debug)]
#[must_use = "if unused the SpinLock will immediately unlock"]
pub struct LockGuard<'a, T> {
    holder: &'a AtomicU64,
    data: &'a mut T,
}

impl<T> Drop for LockGuard<'_, T> {
    fn drop(&mut self) {
        self.holder.fetch_add(1, Ordering::Release);
    }
}

impl<T> Deref for LockGuard<'_, T> {
    type Target = T;
    fn deref(&self) -> &T {
        self.data
    }
}

impl<T> DerefMut for LockGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.data
    }
}

/// A ticket spinlock. Waiters are served in arrival order, so a cache
/// slot being populated by one caller is handed to late callers one at a
/// time once the populating caller is done.
///
/// # Examples
///
/// ```
/// use rpccopy::locking::SpinLock;
///
/// let slot = SpinLock::new(None::<u32>);
///
/// {
///     let mut guard = slot.lock();
///     guard.get_or_insert(7);
/// }
///
/// assert_eq!(slot.locked_do(|v| *v), Some(7));
/// ```
#[derive(Debug, Default)]
pub struct SpinLock<T> {
    /// Next ticket to hand out.
    current: AtomicU64,
    /// Ticket currently allowed to access `data`.
    holder: AtomicU64,
    data: UnsafeCell<T>,
}

unsafe impl<T: Send> Send for SpinLock<T> {}
unsafe impl<T: Send> Sync for SpinLock<T> {}

impl<T> SpinLock<T> {
    pub const fn new(data: T) -> Self {
        Self {
            current: AtomicU64::new(0),
            holder: AtomicU64::new(0),
            data: UnsafeCell::new(data),
        }
    }

    /// Acquires the lock, spinning until this caller's ticket comes up.
    pub fn lock(&self) -> LockGuard<'_, T> {
        let ticket = self.current.fetch_add(1, Ordering::Relaxed);
        loop {
            let h = self.holder.load(Ordering::Acquire);
            if h == ticket {
                break;
            }
            core::hint::spin_loop();
        }
        LockGuard {
            holder: &self.holder,
            // SAFETY: holding the current ticket grants exclusive access.
            data: unsafe { &mut *self.data.get() },
        }
    }

    /// Runs `f` while holding the lock.
    pub fn locked_do<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        let mut l = self.lock();
        f(&mut l)
    }

    /// Acquires the lock only if nobody holds or waits for it.
    pub fn try_lock(&self) -> Option<LockGuard<'_, T>> {
        let current = self.current.load(Ordering::Relaxed);
        let holder = self.holder.load(Ordering::Acquire);

        if current == holder {
            let result = self.current.compare_exchange(
                current,
                current + 1,
                Ordering::Acquire,
                Ordering::Relaxed,
            );
            if result.is_ok() {
                return Some(LockGuard {
                    holder: &self.holder,
                    // SAFETY: the successful exchange claimed the ticket
                    // that `holder` points at.
                    data: unsafe { &mut *self.data.get() },
                });
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spin_lock() {
        let spin_lock = SpinLock::new(0);

        let mut guard = spin_lock.lock();
        *guard += 1;
        assert_eq!(*guard, 1);

        // Held, so a second attempt fails.
        assert!(spin_lock.try_lock().is_none());
        drop(guard);

        let guard = spin_lock.try_lock();
        assert_eq!(guard.as_deref(), Some(&1));
    }

    #[test]
    fn contended() {
        extern crate std;
        use std::sync::Arc;
        use std::thread;

        let lock = Arc::new(SpinLock::new(0u64));
        let workers: std::vec::Vec<_> = (0..4)
            .map(|_| {
                let lock = Arc::clone(&lock);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        lock.locked_do(|v| *v += 1);
                    }
                })
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }
        assert_eq!(lock.locked_do(|v| *v), 4000);
    }
}
