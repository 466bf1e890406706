//! Fixed-point reward arithmetic for the rewards ledger
//! All operations are checked and truncate toward zero, so the ledger never
//! pays out more than the emission it has funded.
use odra::casper_types::U256;
use crate::errors::RewardError;

/// Fixed-point scale of the per-unit reward accumulator (1e12)
pub const ACC_SCALE: u128 = 1_000_000_000_000;

/// Fixed-point scale of oracle prices (1e18)
pub const PRICE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Checked U256 helpers
pub struct SafeMath;

impl SafeMath {
    /// Safe addition with overflow check
    pub fn add(a: U256, b: U256) -> Result<U256, RewardError> {
        a.checked_add(b).ok_or(RewardError::ArithmeticOverflow)
    }

    /// Safe subtraction, underflow reported as an insufficient balance
    pub fn sub(a: U256, b: U256) -> Result<U256, RewardError> {
        a.checked_sub(b).ok_or(RewardError::InsufficientBalance)
    }

    /// Safe multiplication with overflow check
    pub fn mul(a: U256, b: U256) -> Result<U256, RewardError> {
        a.checked_mul(b).ok_or(RewardError::ArithmeticOverflow)
    }

    /// Truncating division; callers guard the zero denominator
    pub fn div(a: U256, b: U256) -> Result<U256, RewardError> {
        a.checked_div(b).ok_or(RewardError::ArithmeticOverflow)
    }
}

/// Accrual formulas shared by the ledger, the account tracker and the treasury
pub struct RewardMath;

impl RewardMath {
    pub fn acc_scale() -> U256 {
        U256::from(ACC_SCALE)
    }

    /// Share of the global emission earned by one pool over `elapsed` ticks:
    /// `elapsed * rate * weight / total_weight`
    pub fn pool_reward(
        elapsed: u64,
        rate: U256,
        weight: U256,
        total_weight: U256,
    ) -> Result<U256, RewardError> {
        if total_weight.is_zero() {
            return Ok(U256::zero());
        }
        let emitted = SafeMath::mul(U256::from(elapsed), rate)?;
        SafeMath::div(SafeMath::mul(emitted, weight)?, total_weight)
    }

    /// Accumulator increase for `reward` spread over `principal` units
    pub fn acc_increment(reward: U256, principal: U256) -> Result<U256, RewardError> {
        if principal.is_zero() {
            return Ok(U256::zero());
        }
        SafeMath::div(SafeMath::mul(reward, Self::acc_scale())?, principal)
    }

    /// Reward priced into `balance` at accumulator `acc`
    pub fn accrued(balance: U256, acc: U256) -> Result<U256, RewardError> {
        SafeMath::div(SafeMath::mul(balance, acc)?, Self::acc_scale())
    }

    /// `balance * acc / SCALE - reward_debt + pending`
    pub fn unclaimed(
        balance: U256,
        acc: U256,
        reward_debt: U256,
        pending: U256,
    ) -> Result<U256, RewardError> {
        let earned = SafeMath::sub(Self::accrued(balance, acc)?, reward_debt)?;
        SafeMath::add(earned, pending)
    }

    /// Linear stream between two ticks; empty when `to <= from`
    pub fn linear_emission(from: u64, to: u64, rate: U256) -> Result<U256, RewardError> {
        if to <= from {
            return Ok(U256::zero());
        }
        SafeMath::mul(U256::from(to - from), rate)
    }
}
