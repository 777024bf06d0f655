//! Pool Registry - durable table of pool records.
//!
//! Owns creation, id assignment, and all access to `Pool` records. Every
//! mutating operation on a pool runs inside `with_pool`, which holds that
//! pool's mutex for the whole check-then-act sequence (including the
//! ledger call and membership updates the closure performs). Operations
//! on different pools proceed independently.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::core_types::{AccountId, Amount, PoolId, Ticks};
use crate::error::PoolError;
use crate::pool::Pool;

#[derive(Debug)]
pub struct PoolRegistry {
    pools: DashMap<PoolId, Mutex<Pool>>,
    next_id: AtomicU64,
}

impl Default for PoolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self {
            pools: DashMap::new(),
            // Pool ids start at 1; 0 is never a valid pool
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a pool record and return its id.
    ///
    /// Constraint checks (`total_cost > 0`, `max_participants > 0`,
    /// `duration > 0`) fail with `InvalidAmount`. No ledger side effects.
    pub fn create(
        &self,
        creator: AccountId,
        provider: AccountId,
        total_cost: Amount,
        max_participants: u32,
        duration: Ticks,
        created_at: Ticks,
    ) -> Result<PoolId, PoolError> {
        if total_cost == 0 || max_participants == 0 || duration == 0 {
            return Err(PoolError::InvalidAmount);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let pool = Pool::new(
            id,
            creator,
            provider,
            total_cost,
            max_participants,
            duration,
            created_at,
        );
        self.pools.insert(id, Mutex::new(pool));
        Ok(id)
    }

    /// Run `f` with exclusive access to the pool. This is the per-pool
    /// serialization point required by the lifecycle engine.
    pub fn with_pool<R>(
        &self,
        pool_id: PoolId,
        f: impl FnOnce(&mut Pool) -> Result<R, PoolError>,
    ) -> Result<R, PoolError> {
        let entry = self.pools.get(&pool_id).ok_or(PoolError::PoolNotFound)?;
        let mut pool = entry.lock().expect("pool lock poisoned");
        f(&mut pool)
    }

    /// Read-only snapshot of a pool record.
    pub fn snapshot(&self, pool_id: PoolId) -> Result<Pool, PoolError> {
        self.with_pool(pool_id, |pool| Ok(pool.clone()))
    }

    /// Number of pools ever created.
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}
