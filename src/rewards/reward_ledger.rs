//! Reward Ledger - lazy per-pool accrual of the global emission
//!
//! Each pool carries `acc_reward_per_unit`, the reward earned by one unit of
//! principal since the pool was registered (scaled by 1e12). It is advanced
//! only when the pool is touched:
//!
//! ```text
//! reward = elapsed * emission_rate * value_weight / total_value_weighted
//! acc   += reward * 1e12 / principal_total
//! ```
//!
//! Intervals where the pool is disabled, holds no principal, or where no pool
//! carries value weight accrue nothing and are never replayed.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::pool_registry::PoolRegistry;
use crate::errors::RewardError;
use crate::events::PoolAdded;
use crate::math::{RewardMath, SafeMath};
use crate::oracle::ValuationOracleContractRef;

/// Accrual checkpoint of one pool
#[odra::odra_type]
pub struct PoolState {
    /// Sum of all depositors' principal
    pub principal_total: U256,
    /// Last observed reference value of the principal
    pub value_weight: U256,
    /// Tick `acc_reward_per_unit` was last advanced at
    pub last_accrual_tick: u64,
    /// Cumulative reward per principal unit (scaled by 1e12)
    pub acc_reward_per_unit: U256,
    /// Accrual and weight contribution are frozen while false
    pub rewards_enabled: bool,
}

/// Ledger owning every pool checkpoint and the global weight sum
#[odra::module]
pub struct RewardLedger {
    /// Known pools
    registry: SubModule<PoolRegistry>,
    /// Pool checkpoints
    pools: Mapping<Address, PoolState>,
    /// Reward units emitted per tick across all pools
    emission_rate: Var<U256>,
    /// Sum of value weights of enabled pools
    total_value_weighted: Var<U256>,
    /// Block time units per tick
    tick_duration: Var<u64>,
    /// First tick that emits
    emission_start: Var<u64>,
}

#[odra::module]
impl RewardLedger {
    pub fn emission_rate(&self) -> U256 {
        self.emission_rate.get_or_default()
    }

    pub fn total_value_weighted(&self) -> U256 {
        self.total_value_weighted.get_or_default()
    }

    pub fn emission_start(&self) -> u64 {
        self.emission_start.get_or_default()
    }

    /// Current tick derived from the host block time
    pub fn current_tick(&self) -> u64 {
        let duration = self.tick_duration.get_or_default().max(1);
        self.env().get_block_time() / duration
    }

    pub fn has_pool(&self, pool: Address) -> bool {
        self.registry.contains(pool)
    }

    pub fn pool_count(&self) -> u32 {
        self.registry.pool_count()
    }

    pub fn pool_at(&self, index: u32) -> Option<Address> {
        self.registry.pool_at(index)
    }

    pub fn pools(&self) -> Vec<Address> {
        self.registry.pools()
    }

    pub fn pool_state(&self, pool: Address) -> Option<PoolState> {
        self.pools.get(&pool)
    }
}

impl RewardLedger {
    /// Validate and store the emission parameters
    pub fn configure(
        &mut self,
        emission_rate: U256,
        tick_duration: u64,
        emission_start: u64,
    ) -> Result<(), RewardError> {
        if tick_duration == 0 {
            return Err(RewardError::InvalidConfiguration);
        }
        if emission_start < self.env().get_block_time() / tick_duration {
            return Err(RewardError::InvalidConfiguration);
        }

        self.tick_duration.set(tick_duration);
        self.emission_start.set(emission_start);
        self.emission_rate.set(emission_rate);
        self.total_value_weighted.set(U256::zero());
        Ok(())
    }

    /// Register `pool` on its first deposit. A new pool starts at the current
    /// tick, so it earns nothing for the tick it was created in.
    pub fn ensure_pool(&mut self, pool: Address) {
        let Some(index) = self.registry.ensure_pool(pool) else {
            return;
        };

        let tick = self.current_tick();
        self.pools.set(&pool, PoolState {
            principal_total: U256::zero(),
            value_weight: U256::zero(),
            last_accrual_tick: tick,
            acc_reward_per_unit: U256::zero(),
            rewards_enabled: true,
        });

        self.env().emit_event(PoolAdded { pool, index, tick });
    }

    /// Bring `pool` up to the current tick, then apply `principal_delta`.
    /// Returns the accumulator the caller must settle depositors against.
    pub fn accrue_pool(
        &mut self,
        pool: Address,
        principal_delta: U256,
        is_deposit: bool,
    ) -> Result<U256, RewardError> {
        let mut state = self.pools.get(&pool).ok_or(RewardError::InvalidConfiguration)?;
        let now = self.current_tick();

        if now > state.last_accrual_tick {
            state.acc_reward_per_unit = self.projected_acc(&state, now)?;
            state.last_accrual_tick = now;
        }

        state.principal_total = if is_deposit {
            SafeMath::add(state.principal_total, principal_delta)?
        } else {
            SafeMath::sub(state.principal_total, principal_delta)?
        };

        let acc = state.acc_reward_per_unit;
        self.pools.set(&pool, state);
        Ok(acc)
    }

    /// Zero-delta accrual of every registered pool
    pub fn flush_all(&mut self) -> Result<(), RewardError> {
        for pool in self.registry.pools() {
            self.accrue_pool(pool, U256::zero(), true)?;
        }
        Ok(())
    }

    /// Accumulator of `pool` replayed to the current tick, without writing it
    pub fn pending_acc_reward_per_unit(&self, pool: Address) -> Result<U256, RewardError> {
        let state = self.pools.get(&pool).ok_or(RewardError::InvalidConfiguration)?;
        self.projected_acc(&state, self.current_tick())
    }

    /// Toggle pool rewards after locking in every pool's entitlement under the
    /// current weight set. Returns the new total value weight.
    pub fn set_enabled(&mut self, pool: Address, enabled: bool) -> Result<U256, RewardError> {
        let state = self.pools.get(&pool).ok_or(RewardError::InvalidConfiguration)?;
        if state.rewards_enabled == enabled {
            return Err(RewardError::AlreadyInTargetState);
        }

        self.flush_all()?;

        let mut state = self.pools.get(&pool).ok_or(RewardError::InvalidConfiguration)?;
        let total = self.total_value_weighted();
        let new_total = if enabled {
            SafeMath::add(total, state.value_weight)?
        } else {
            let reduced = SafeMath::sub(total, state.value_weight)?;
            state.value_weight = U256::zero();
            reduced
        };
        state.rewards_enabled = enabled;

        self.pools.set(&pool, state);
        self.total_value_weighted.set(new_total);
        Ok(new_total)
    }

    /// Re-read the value of `pools` from the oracle. Every registered pool is
    /// flushed at the old weights first; the total is then recomputed over all
    /// enabled pools. Returns the number of pools re-read and the new total.
    pub fn refresh_value_weights(
        &mut self,
        pools: &[Address],
        oracle: Address,
    ) -> Result<(u32, U256), RewardError> {
        if pools.iter().any(|pool| !self.registry.contains(*pool)) {
            return Err(RewardError::InvalidConfiguration);
        }

        self.flush_all()?;

        let valuation = ValuationOracleContractRef::new(self.env(), oracle);
        let mut refreshed = 0u32;
        for pool in pools {
            let mut state = self.pools.get(pool).ok_or(RewardError::InvalidConfiguration)?;
            if !state.rewards_enabled {
                continue;
            }
            state.value_weight = valuation.value_of(*pool, state.principal_total);
            self.pools.set(pool, state);
            refreshed += 1;
        }

        let total = self.recompute_total()?;
        Ok((refreshed, total))
    }

    /// Change the emission rate after settling every pool at the old rate.
    /// Returns the previous rate.
    pub fn set_emission_rate(&mut self, rate: U256) -> Result<U256, RewardError> {
        self.flush_all()?;
        let old_rate = self.emission_rate();
        self.emission_rate.set(rate);
        Ok(old_rate)
    }

    fn recompute_total(&mut self) -> Result<U256, RewardError> {
        let mut total = U256::zero();
        for pool in self.registry.pools() {
            if let Some(state) = self.pools.get(&pool) {
                if state.rewards_enabled {
                    total = SafeMath::add(total, state.value_weight)?;
                }
            }
        }
        self.total_value_weighted.set(total);
        Ok(total)
    }

    fn projected_acc(&self, state: &PoolState, now: u64) -> Result<U256, RewardError> {
        let total = self.total_value_weighted();
        if !state.rewards_enabled || state.principal_total.is_zero() || total.is_zero() {
            return Ok(state.acc_reward_per_unit);
        }

        let from = state.last_accrual_tick.max(self.emission_start());
        if now <= from {
            return Ok(state.acc_reward_per_unit);
        }

        let reward = RewardMath::pool_reward(
            now - from,
            self.emission_rate(),
            state.value_weight,
            total,
        )?;
        let increment = RewardMath::acc_increment(reward, state.principal_total)?;
        SafeMath::add(state.acc_reward_per_unit, increment)
    }
}
