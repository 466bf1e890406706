//! Rewards Controller - entry points of the lending rewards system
//!
//! Every mutating call accrues the affected pool for the current tick before
//! it changes any balance. Claims finish all bookkeeping before the reward
//! issuer is called, and the whole call reverts if the mint fails.
//!
//! Roles:
//! - registry: the only source of deposit and withdrawal notifications
//! - treasury: the only claimant of the treasury stream
//! - admin: the deployer; rates, addresses and pool toggles

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::reward_ledger::RewardLedger;
use super::treasury::TreasuryEmission;
use super::user_accounts::{UserAccountTracker, UserPosition};
use crate::errors::RewardError;
use crate::events::*;
use crate::math::SafeMath;
use crate::token::RewardIssuerContractRef;

/// Read-only view of a pool, accumulator projected to the current tick
#[odra::odra_type]
pub struct PoolSnapshot {
    pub pool: Address,
    pub principal_total: U256,
    pub value_weight: U256,
    pub acc_reward_per_unit: U256,
    pub last_accrual_tick: u64,
    pub rewards_enabled: bool,
}

/// Rewards controller contract
#[odra::module]
pub struct RewardsController {
    /// Pool checkpoints and emission split
    ledger: SubModule<RewardLedger>,
    /// Depositor positions
    accounts: SubModule<UserAccountTracker>,
    /// Treasury stream
    treasury_emission: SubModule<TreasuryEmission>,
    /// Reward token minter
    reward_issuer: Var<Address>,
    /// Pool valuation source
    valuation_oracle: Var<Address>,
    /// Deposit/withdrawal notifier
    registry: Var<Address>,
    /// Admin address
    admin: Var<Address>,
    /// Reentrancy lock
    locked: Var<bool>,
}

#[odra::module]
impl RewardsController {
    /// Initialize the controller
    ///
    /// # Arguments
    /// * `tick_duration` - block time units per tick, non-zero
    /// * `emission_start` - first emitting tick, not in the past
    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &mut self,
        reward_issuer: Address,
        valuation_oracle: Address,
        registry: Address,
        treasury: Address,
        emission_rate: U256,
        treasury_emission_rate: U256,
        tick_duration: u64,
        emission_start: u64,
    ) {
        let caller = self.env().caller();

        self.ledger
            .configure(emission_rate, tick_duration, emission_start)
            .unwrap_or_revert(&self.env());
        self.treasury_emission.configure(treasury, treasury_emission_rate, emission_start);

        self.reward_issuer.set(reward_issuer);
        self.valuation_oracle.set(valuation_oracle);
        self.registry.set(registry);
        self.admin.set(caller);
        self.locked.set(false);
    }

    // ========================================
    // Registry Notifications
    // ========================================

    /// Record a deposit of `amount` into `pool` by `user` (registry only).
    /// The first deposit into an unknown pool registers it.
    pub fn record_deposit(&mut self, pool: Address, user: Address, amount: U256) {
        self.ensure_unlocked();
        self.only_registry();
        self.ensure_positive(amount);

        let env = self.env();
        self.ledger.ensure_pool(pool);
        let acc = self.ledger.accrue_pool(pool, amount, true).unwrap_or_revert(&env);
        let balance = self.accounts
            .record_deposit(pool, user, amount, acc)
            .unwrap_or_revert(&env);

        env.emit_event(DepositRecorded {
            pool,
            user,
            amount,
            balance,
            tick: self.ledger.current_tick(),
        });
    }

    /// Record a withdrawal of `amount` from `pool` by `user` (registry only)
    pub fn record_withdrawal(&mut self, pool: Address, user: Address, amount: U256) {
        self.ensure_unlocked();
        self.only_registry();
        self.ensure_positive(amount);
        self.ensure_known_pool(pool);

        let env = self.env();
        self.accounts
            .ensure_withdrawable(pool, user, amount)
            .unwrap_or_revert(&env);
        let acc = self.ledger.accrue_pool(pool, amount, false).unwrap_or_revert(&env);
        let balance = self.accounts
            .record_withdrawal(pool, user, amount, acc)
            .unwrap_or_revert(&env);

        env.emit_event(WithdrawalRecorded {
            pool,
            user,
            amount,
            balance,
            tick: self.ledger.current_tick(),
        });
    }

    // ========================================
    // Claims
    // ========================================

    /// Claim the caller's reward in `pool`, minted to `recipient`
    pub fn claim(&mut self, pool: Address, recipient: Address) -> U256 {
        self.lock();
        self.ensure_known_pool(pool);

        let user = self.env().caller();
        let reward = self.settle(pool, user).unwrap_or_revert(&self.env());
        self.issue(recipient, reward);

        if !reward.is_zero() {
            self.env().emit_event(RewardClaimed {
                pool,
                user,
                recipient,
                amount: reward,
                tick: self.ledger.current_tick(),
            });
        }

        self.unlock();
        reward
    }

    /// Claim the caller's reward in every pool with a single mint
    pub fn claim_all(&mut self, recipient: Address) -> U256 {
        self.lock();

        let env = self.env();
        let user = env.caller();
        let tick = self.ledger.current_tick();
        let mut total = U256::zero();
        for pool in self.ledger.pools() {
            let reward = self.settle(pool, user).unwrap_or_revert(&env);
            if reward.is_zero() {
                continue;
            }
            total = SafeMath::add(total, reward).unwrap_or_revert(&env);
            env.emit_event(RewardClaimed {
                pool,
                user,
                recipient,
                amount: reward,
                tick,
            });
        }
        self.issue(recipient, total);

        self.unlock();
        total
    }

    /// Claim the treasury stream up to the current tick (treasury only)
    pub fn claim_treasury(&mut self) -> U256 {
        self.lock();

        let env = self.env();
        let caller = env.caller();
        let now = self.ledger.current_tick();
        let (amount, from_tick) = self.treasury_emission
            .claim(caller, now)
            .unwrap_or_revert(&env);
        self.issue(caller, amount);

        if !amount.is_zero() {
            env.emit_event(TreasuryRewardClaimed {
                treasury: caller,
                amount,
                from_tick,
                to_tick: now,
            });
        }

        self.unlock();
        amount
    }

    // ========================================
    // Maintenance
    // ========================================

    /// Accrue one pool to the current tick
    pub fn accrue_pool(&mut self, pool: Address) {
        self.ensure_unlocked();
        self.ensure_known_pool(pool);
        self.ledger
            .accrue_pool(pool, U256::zero(), true)
            .unwrap_or_revert(&self.env());
    }

    /// Re-read every pool's value weight from the oracle.
    /// Must be sent directly by an account: a refresh composed with a price
    /// read in the same call chain is open to manipulation.
    pub fn refresh_all(&mut self) {
        self.ensure_unlocked();
        self.only_direct_caller();
        let pools = self.ledger.pools();
        self.refresh(pools);
    }

    /// Re-read the value weight of the listed pools (same caller rule as `refresh_all`)
    pub fn refresh_pools(&mut self, pools: Vec<Address>) {
        self.ensure_unlocked();
        self.only_direct_caller();
        self.refresh(pools);
    }

    // ========================================
    // Admin Functions
    // ========================================

    /// Change the pool emission rate; pools settle at the old rate first
    pub fn set_emission_rate(&mut self, rate: U256) {
        self.ensure_unlocked();
        self.only_admin();

        let old_rate = self.ledger.set_emission_rate(rate).unwrap_or_revert(&self.env());

        self.env().emit_event(EmissionRateChanged {
            old_rate,
            new_rate: rate,
            updated_by: self.env().caller(),
        });
    }

    pub fn set_registry(&mut self, registry: Address) {
        self.ensure_unlocked();
        self.only_admin();

        let old_registry = self.registry.get_or_revert_with(RewardError::InvalidConfiguration);
        self.registry.set(registry);

        self.env().emit_event(RegistryChanged {
            old_registry,
            new_registry: registry,
            updated_by: self.env().caller(),
        });
    }

    pub fn set_treasury(&mut self, treasury: Address) {
        self.ensure_unlocked();
        self.only_admin();

        let old_treasury = self.treasury_emission
            .set_treasury(treasury)
            .unwrap_or_revert_with(&self.env(), RewardError::InvalidConfiguration);

        self.env().emit_event(TreasuryChanged {
            old_treasury,
            new_treasury: treasury,
            updated_by: self.env().caller(),
        });
    }

    /// Enable or disable rewards for a pool. All pools are settled under the
    /// current weights before the toggle; a disabled pool drops its weight.
    pub fn set_pool_rewards_enabled(&mut self, pool: Address, enabled: bool) {
        self.ensure_unlocked();
        self.only_admin();

        let total_value_weighted = self.ledger
            .set_enabled(pool, enabled)
            .unwrap_or_revert(&self.env());

        self.env().emit_event(PoolRewardsToggled {
            pool,
            enabled,
            total_value_weighted,
            tick: self.ledger.current_tick(),
        });
    }

    // ========================================
    // View Functions
    // ========================================

    /// Unclaimed reward of `user` in `pool` as of the current tick
    pub fn pending_reward(&self, pool: Address, user: Address) -> U256 {
        if !self.ledger.has_pool(pool) {
            return U256::zero();
        }
        let env = self.env();
        let acc = self.ledger.pending_acc_reward_per_unit(pool).unwrap_or_revert(&env);
        self.accounts.pending_reward(pool, user, acc).unwrap_or_revert(&env)
    }

    /// Treasury stream owed as of the current tick
    pub fn pending_treasury_reward(&self) -> U256 {
        self.treasury_emission
            .pending(self.ledger.current_tick())
            .unwrap_or_revert(&self.env())
    }

    /// Tick the treasury stream was last claimed up to
    pub fn treasury_last_claim_tick(&self) -> u64 {
        self.treasury_emission.last_claim_tick()
    }

    pub fn pool_snapshot(&self, pool: Address) -> Option<PoolSnapshot> {
        let state = self.ledger.pool_state(pool)?;
        let acc_reward_per_unit = self.ledger
            .pending_acc_reward_per_unit(pool)
            .unwrap_or_revert(&self.env());

        Some(PoolSnapshot {
            pool,
            principal_total: state.principal_total,
            value_weight: state.value_weight,
            acc_reward_per_unit,
            last_accrual_tick: state.last_accrual_tick,
            rewards_enabled: state.rewards_enabled,
        })
    }

    pub fn user_position(&self, pool: Address, user: Address) -> Option<UserPosition> {
        self.accounts.position(pool, user)
    }

    pub fn pool_count(&self) -> u32 {
        self.ledger.pool_count()
    }

    pub fn pool_at(&self, index: u32) -> Option<Address> {
        self.ledger.pool_at(index)
    }

    pub fn pools(&self) -> Vec<Address> {
        self.ledger.pools()
    }

    pub fn emission_rate(&self) -> U256 {
        self.ledger.emission_rate()
    }

    pub fn treasury_emission_rate(&self) -> U256 {
        self.treasury_emission.emission_rate()
    }

    pub fn total_value_weighted(&self) -> U256 {
        self.ledger.total_value_weighted()
    }

    pub fn current_tick(&self) -> u64 {
        self.ledger.current_tick()
    }

    pub fn registry(&self) -> Address {
        self.registry.get_or_revert_with(RewardError::InvalidConfiguration)
    }

    pub fn treasury(&self) -> Address {
        self.treasury_emission
            .treasury()
            .unwrap_or_revert_with(&self.env(), RewardError::InvalidConfiguration)
    }

    pub fn admin(&self) -> Address {
        self.admin.get_or_revert_with(RewardError::Unauthorized)
    }

    // ========================================
    // Internal Functions
    // ========================================

    fn settle(&mut self, pool: Address, user: Address) -> Result<U256, RewardError> {
        let acc = self.ledger.accrue_pool(pool, U256::zero(), true)?;
        self.accounts.settle_claim(pool, user, acc)
    }

    fn refresh(&mut self, pools: Vec<Address>) {
        let oracle = self.valuation_oracle.get_or_revert_with(RewardError::InvalidConfiguration);
        let (refreshed, total_value_weighted) = self.ledger
            .refresh_value_weights(&pools, oracle)
            .unwrap_or_revert(&self.env());

        self.env().emit_event(ValueWeightsRefreshed {
            refreshed,
            total_value_weighted,
            tick: self.ledger.current_tick(),
        });
    }

    /// Mint through the reward issuer; callers finalize bookkeeping first
    fn issue(&mut self, recipient: Address, amount: U256) {
        if amount.is_zero() {
            return;
        }
        let issuer = self.reward_issuer.get_or_revert_with(RewardError::InvalidConfiguration);
        let mut issuer = RewardIssuerContractRef::new(self.env(), issuer);
        issuer.mint(recipient, amount);
    }

    fn ensure_known_pool(&self, pool: Address) {
        if !self.ledger.has_pool(pool) {
            self.env().revert(RewardError::InvalidConfiguration);
        }
    }

    fn ensure_positive(&self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(RewardError::InvalidConfiguration);
        }
    }

    fn only_admin(&self) {
        let caller = self.env().caller();
        let admin = self.admin.get_or_revert_with(RewardError::Unauthorized);
        if caller != admin {
            self.env().revert(RewardError::Unauthorized);
        }
    }

    fn only_registry(&self) {
        let caller = self.env().caller();
        let registry = self.registry.get_or_revert_with(RewardError::Unauthorized);
        if caller != registry {
            self.env().revert(RewardError::Unauthorized);
        }
    }

    fn only_direct_caller(&self) {
        if self.env().caller().is_contract() {
            self.env().revert(RewardError::Unauthorized);
        }
    }

    /// Reentrancy lock
    fn lock(&mut self) {
        self.ensure_unlocked();
        self.locked.set(true);
    }

    /// Reentrancy unlock
    fn unlock(&mut self) {
        self.locked.set(false);
    }

    fn ensure_unlocked(&self) {
        if self.locked.get_or_default() {
            self.env().revert(RewardError::ReentrantCall);
        }
    }
}
