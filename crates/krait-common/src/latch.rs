//! Shared (reader/writer) latch primitive.
//!
//! A thin wrapper over [`parking_lot::RwLock`] used to protect whole
//! structures that do not latch internally. Writers take the latch in
//! exclusive mode, readers in shared mode; guards release on drop.
//!
//! The in-memory index core is single-threaded and never takes this latch
//! itself; components that share an index across threads wrap the entire
//! index and hold the latch exclusively for writes and shared for scans.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A cheap reader/writer latch.
#[derive(Debug, Default)]
pub struct SharedLatch {
    latch: RwLock<()>,
}

/// RAII guard for shared (read) acquisition.
pub type SharedGuard<'a> = RwLockReadGuard<'a, ()>;

/// RAII guard for exclusive (write) acquisition.
pub type ExclusiveGuard<'a> = RwLockWriteGuard<'a, ()>;

impl SharedLatch {
    /// Creates a new unlocked latch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the latch in exclusive mode, blocking until available.
    pub fn lock_exclusive(&self) -> ExclusiveGuard<'_> {
        self.latch.write()
    }

    /// Acquires the latch in shared mode, blocking until available.
    pub fn lock_shared(&self) -> SharedGuard<'_> {
        self.latch.read()
    }

    /// Tries to acquire the latch in exclusive mode without blocking.
    pub fn try_lock_exclusive(&self) -> Option<ExclusiveGuard<'_>> {
        self.latch.try_write()
    }

    /// Tries to acquire the latch in shared mode without blocking.
    pub fn try_lock_shared(&self) -> Option<SharedGuard<'_>> {
        self.latch.try_read()
    }
}
