//! Lending Rewards - Emission split across deposit pools by value weight
//!
//! One global emission rate is divided between pools in proportion to their
//! oracle-reported value, and within a pool in proportion to each depositor's
//! principal. Accrual is lazy: every pool keeps a per-unit accumulator that is
//! only advanced when the pool is touched, and every depositor settles against
//! it on their next interaction.

pub mod pool_registry;
pub mod reward_ledger;
pub mod user_accounts;
pub mod treasury;
pub mod controller;


pub use pool_registry::PoolRegistry;
pub use reward_ledger::{PoolState, RewardLedger};
pub use user_accounts::{UserAccountTracker, UserPosition};
pub use treasury::TreasuryEmission;
pub use controller::{PoolSnapshot, RewardsController};
