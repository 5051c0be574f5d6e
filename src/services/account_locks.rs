use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-account mutation locks.
///
/// Read-modify-write sequences against the same account are serialized by
/// holding the guard returned from [`AccountLocks::acquire`] across the
/// load and the save. Different accounts never contend with each other.
/// The locks are process-local and do not coordinate separate replicas.
#[derive(Clone, Default)]
pub struct AccountLocks {
    locks: Arc<DashMap<i64, Arc<Mutex<()>>>>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, account_id: i64) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(account_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone();
        lock.lock_owned().await
    }

    /// Drops the lock entry of a deleted account.
    pub fn forget(&self, account_id: i64) {
        self.locks.remove(&account_id);
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
