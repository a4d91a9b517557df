//! Process-wide frame exclusion
//!
//! A binary lock held for the duration of one update+draw tick. Asset change
//! callbacks take the same lock, so a hot reload is never observed mid-frame.

use std::sync::{Mutex, MutexGuard, TryLockError};

/// Binary lock shared by the frame tick and asset change dispatch
#[derive(Debug, Default)]
pub struct FrameLock {
    lock: Mutex<()>,
}

/// Held while a frame tick or reload is in progress. Released on drop.
#[must_use = "the frame lock is released as soon as the guard is dropped"]
pub struct FrameGuard<'a> {
    _guard: MutexGuard<'a, ()>,
}

impl FrameLock {
    pub const fn new() -> Self {
        Self { lock: Mutex::new(()) }
    }

    /// Block until the lock is free and take it
    ///
    /// A panic in a previous holder does not poison the frame: the lock is
    /// recovered and handed out again.
    pub fn acquire(&self) -> FrameGuard<'_> {
        let guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        FrameGuard { _guard: guard }
    }

    /// Take the lock only if nobody holds it
    pub fn try_acquire(&self) -> Option<FrameGuard<'_>> {
        match self.lock.try_lock() {
            Ok(guard) => Some(FrameGuard { _guard: guard }),
            Err(TryLockError::Poisoned(poisoned)) => Some(FrameGuard { _guard: poisoned.into_inner() }),
            Err(TryLockError::WouldBlock) => None,
        }
    }

    /// Run `f` while holding the lock
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.acquire();
        f()
    }
}

#[cfg(test)]
#[path = "frame_lock_tests.rs"]
mod tests;
