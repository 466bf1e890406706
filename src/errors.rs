//! Error definitions for the lending rewards contracts
use odra::prelude::*;

/// Errors raised by the rewards controller and its ledgers
#[odra::odra_error]
pub enum RewardError {
    /// Caller lacks the role required for the operation
    Unauthorized = 1,

    /// Withdrawal or reward settlement would underflow a balance
    InsufficientBalance = 2,

    /// Pool rewards are already enabled or disabled
    AlreadyInTargetState = 3,

    /// Non-positive amount, unknown pool or invalid deployment parameter
    InvalidConfiguration = 4,

    /// Checked arithmetic left the U256 domain
    ArithmeticOverflow = 5,

    /// Reentrancy guard is held
    ReentrantCall = 6,
}

/// Errors raised by the reward token
#[odra::odra_error]
pub enum TokenError {
    /// Insufficient balance for operation
    InsufficientBalance = 100,

    /// Caller is not the token minter or admin
    Unauthorized = 101,
}

/// Errors raised by the valuation oracle
#[odra::odra_error]
pub enum OracleError {
    /// No active price feed for the pool
    PriceFeedNotAvailable = 200,

    /// Price feed is older than the staleness window
    StalePrice = 201,

    /// Zero price or overflowing valuation
    InvalidPrice = 202,

    /// Caller is not the oracle admin
    Unauthorized = 203,
}
