//! Per-depositor balances and reward settlement against pool accumulators
use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::RewardError;
use crate::math::{RewardMath, SafeMath};

/// Depositor position in one pool
#[odra::odra_type]
#[derive(Default)]
pub struct UserPosition {
    /// Principal currently deposited
    pub balance: U256,
    /// Reward frozen at the last interaction, not yet claimed
    pub pending: U256,
    /// `balance * acc / 1e12` at the last interaction
    pub reward_debt: U256,
}

/// Account tracker. Only ever reads pool accumulators handed to it by the
/// ledger, after the ledger has accrued the pool for the current tick.
#[odra::module]
pub struct UserAccountTracker {
    /// (pool, user) -> position
    positions: Mapping<(Address, Address), UserPosition>,
}

#[odra::module]
impl UserAccountTracker {
    pub fn position(&self, pool: Address, user: Address) -> Option<UserPosition> {
        self.positions.get(&(pool, user))
    }

    pub fn balance_of(&self, pool: Address, user: Address) -> U256 {
        self.position(pool, user).map(|p| p.balance).unwrap_or_default()
    }
}

impl UserAccountTracker {
    /// Settle the position at `acc`, then add `amount`. Returns the new balance.
    pub fn record_deposit(
        &mut self,
        pool: Address,
        user: Address,
        amount: U256,
        acc: U256,
    ) -> Result<U256, RewardError> {
        let mut position = self.positions.get(&(pool, user)).unwrap_or_default();

        position.pending = RewardMath::unclaimed(
            position.balance,
            acc,
            position.reward_debt,
            position.pending,
        )?;
        position.balance = SafeMath::add(position.balance, amount)?;
        position.reward_debt = RewardMath::accrued(position.balance, acc)?;

        let balance = position.balance;
        self.positions.set(&(pool, user), position);
        Ok(balance)
    }

    /// Fails without touching anything when `amount` exceeds the balance
    pub fn ensure_withdrawable(
        &self,
        pool: Address,
        user: Address,
        amount: U256,
    ) -> Result<(), RewardError> {
        if amount > self.balance_of(pool, user) {
            return Err(RewardError::InsufficientBalance);
        }
        Ok(())
    }

    /// Settle the position at `acc`, then remove `amount`. Returns the new balance.
    pub fn record_withdrawal(
        &mut self,
        pool: Address,
        user: Address,
        amount: U256,
        acc: U256,
    ) -> Result<U256, RewardError> {
        let mut position = self.positions.get(&(pool, user))
            .ok_or(RewardError::InsufficientBalance)?;

        position.pending = RewardMath::unclaimed(
            position.balance,
            acc,
            position.reward_debt,
            position.pending,
        )?;
        position.balance = SafeMath::sub(position.balance, amount)?;
        position.reward_debt = RewardMath::accrued(position.balance, acc)?;

        let balance = position.balance;
        self.positions.set(&(pool, user), position);
        Ok(balance)
    }

    /// Zero the position's unclaimed reward at `acc` and return it
    pub fn settle_claim(
        &mut self,
        pool: Address,
        user: Address,
        acc: U256,
    ) -> Result<U256, RewardError> {
        let Some(mut position) = self.positions.get(&(pool, user)) else {
            return Ok(U256::zero());
        };

        let reward = RewardMath::unclaimed(
            position.balance,
            acc,
            position.reward_debt,
            position.pending,
        )?;
        position.pending = U256::zero();
        position.reward_debt = RewardMath::accrued(position.balance, acc)?;

        self.positions.set(&(pool, user), position);
        Ok(reward)
    }

    /// Unclaimed reward at `acc`, read-only
    pub fn pending_reward(
        &self,
        pool: Address,
        user: Address,
        acc: U256,
    ) -> Result<U256, RewardError> {
        let position = self.positions.get(&(pool, user)).unwrap_or_default();
        RewardMath::unclaimed(position.balance, acc, position.reward_debt, position.pending)
    }
}
