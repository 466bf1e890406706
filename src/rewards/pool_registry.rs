//! Registry of pools that have received a deposit
use odra::prelude::*;
use crate::errors::RewardError;

/// Append-only list of known pools (index -> pool, like the pair factory list)
#[odra::module]
pub struct PoolRegistry {
    /// Pools by registration index
    pools: Mapping<u32, Address>,
    /// Registration index by pool
    indices: Mapping<Address, u32>,
    /// Total number of pools
    pool_count: Var<u32>,
}

#[odra::module]
impl PoolRegistry {
    /// Number of registered pools
    pub fn pool_count(&self) -> u32 {
        self.pool_count.get_or_default()
    }

    /// Pool at a registration index
    pub fn pool_at(&self, index: u32) -> Option<Address> {
        self.pools.get(&index)
    }

    pub fn contains(&self, pool: Address) -> bool {
        self.indices.get(&pool).is_some()
    }

    /// All registered pools in registration order
    pub fn pools(&self) -> Vec<Address> {
        (0..self.pool_count())
            .filter_map(|index| self.pools.get(&index))
            .collect()
    }
}

impl PoolRegistry {
    /// Register `pool` unless it is already known.
    /// Returns the registration index when the pool was added by this call.
    pub fn ensure_pool(&mut self, pool: Address) -> Option<u32> {
        if self.contains(pool) {
            return None;
        }

        let index = self.pool_count();
        let count = index
            .checked_add(1)
            .unwrap_or_revert_with(&self.env(), RewardError::ArithmeticOverflow);
        self.pools.set(&index, pool);
        self.indices.set(&pool, index);
        self.pool_count.set(count);
        Some(index)
    }
}
