//! Event definitions for the lending rewards contracts
use odra::prelude::*;
use odra::casper_types::U256;

/// Event emitted when the registry reports a deposit
#[odra::event]
pub struct DepositRecorded {
    /// Pool the deposit went into
    pub pool: Address,
    /// Depositor
    pub user: Address,
    /// Principal added
    pub amount: U256,
    /// Depositor balance after the deposit
    pub balance: U256,
    /// Tick of the deposit
    pub tick: u64,
}

/// Event emitted when the registry reports a withdrawal
#[odra::event]
pub struct WithdrawalRecorded {
    /// Pool the withdrawal came from
    pub pool: Address,
    /// Depositor
    pub user: Address,
    /// Principal removed
    pub amount: U256,
    /// Depositor balance after the withdrawal
    pub balance: U256,
    /// Tick of the withdrawal
    pub tick: u64,
}

/// Event emitted when a depositor claims pool rewards
#[odra::event]
pub struct RewardClaimed {
    /// Pool the reward was earned in
    pub pool: Address,
    /// Depositor
    pub user: Address,
    /// Address the reward was minted to
    pub recipient: Address,
    /// Reward minted
    pub amount: U256,
    /// Tick of the claim
    pub tick: u64,
}

/// Event emitted when the treasury claims its emission
#[odra::event]
pub struct TreasuryRewardClaimed {
    /// Treasury address
    pub treasury: Address,
    /// Reward minted
    pub amount: U256,
    /// Checkpoint before the claim
    pub from_tick: u64,
    /// Checkpoint after the claim
    pub to_tick: u64,
}

/// Event emitted when the pool emission rate changes
#[odra::event]
pub struct EmissionRateChanged {
    pub old_rate: U256,
    pub new_rate: U256,
    pub updated_by: Address,
}

/// Event emitted when the registry address changes
#[odra::event]
pub struct RegistryChanged {
    pub old_registry: Address,
    pub new_registry: Address,
    pub updated_by: Address,
}

/// Event emitted when the treasury address changes
#[odra::event]
pub struct TreasuryChanged {
    pub old_treasury: Address,
    pub new_treasury: Address,
    pub updated_by: Address,
}

/// Event emitted when a pool receives its first deposit
#[odra::event]
pub struct PoolAdded {
    /// Pool identifier
    pub pool: Address,
    /// Position in the registry
    pub index: u32,
    /// Tick the pool starts accruing from
    pub tick: u64,
}

/// Event emitted when pool rewards are enabled or disabled
#[odra::event]
pub struct PoolRewardsToggled {
    pub pool: Address,
    pub enabled: bool,
    /// Total value weight after the toggle
    pub total_value_weighted: U256,
    pub tick: u64,
}

/// Event emitted after value weights are re-read from the oracle
#[odra::event]
pub struct ValueWeightsRefreshed {
    /// Number of pools whose weight was re-read
    pub refreshed: u32,
    pub total_value_weighted: U256,
    pub tick: u64,
}

/// Event emitted when reward tokens move
#[odra::event]
pub struct Transfer {
    /// Sender address
    pub from: Address,
    /// Recipient address
    pub to: Address,
    /// Amount transferred
    pub value: U256,
}

/// Event emitted when the reward token minter changes
#[odra::event]
pub struct MinterChanged {
    pub old_minter: Option<Address>,
    pub new_minter: Address,
}

/// Event emitted when a pool price feed is set
#[odra::event]
pub struct PriceUpdated {
    pub pool: Address,
    pub price: U256,
    pub timestamp: u64,
}
