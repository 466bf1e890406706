#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]
extern crate alloc;

pub mod errors;
pub mod events;
pub mod math;

// Reward token minted to claimants
pub mod token;

// Pool valuation feeds
pub mod oracle;

// Lending rewards: pool accrual, depositor accounts, treasury stream
pub mod rewards;
