//! Treasury Emission - fixed linear stream independent of pool accrual
use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::RewardError;
use crate::math::RewardMath;

#[odra::module]
pub struct TreasuryEmission {
    /// Sole claimant of the stream
    treasury: Var<Address>,
    /// Reward units per tick
    emission_rate: Var<U256>,
    /// Tick up to which the stream has been paid
    last_claim_tick: Var<u64>,
}

#[odra::module]
impl TreasuryEmission {
    pub fn treasury(&self) -> Option<Address> {
        self.treasury.get()
    }

    pub fn emission_rate(&self) -> U256 {
        self.emission_rate.get_or_default()
    }

    pub fn last_claim_tick(&self) -> u64 {
        self.last_claim_tick.get_or_default()
    }
}

impl TreasuryEmission {
    pub fn configure(&mut self, treasury: Address, emission_rate: U256, start_tick: u64) {
        self.treasury.set(treasury);
        self.emission_rate.set(emission_rate);
        self.last_claim_tick.set(start_tick);
    }

    /// Replace the claimant; the unclaimed stream follows the address.
    /// Returns the previous claimant.
    pub fn set_treasury(&mut self, treasury: Address) -> Option<Address> {
        let old = self.treasury.get();
        self.treasury.set(treasury);
        old
    }

    /// Stream owed at tick `now`, read-only
    pub fn pending(&self, now: u64) -> Result<U256, RewardError> {
        RewardMath::linear_emission(self.last_claim_tick(), now, self.emission_rate())
    }

    /// Pay the stream up to `now` to `caller`, who must be the treasury.
    /// Returns the amount owed and the checkpoint it was counted from.
    pub fn claim(&mut self, caller: Address, now: u64) -> Result<(U256, u64), RewardError> {
        let treasury = self.treasury.get().ok_or(RewardError::Unauthorized)?;
        if caller != treasury {
            return Err(RewardError::Unauthorized);
        }

        let from = self.last_claim_tick();
        let amount = self.pending(now)?;
        // Before emission starts the checkpoint stays put
        if now > from {
            self.last_claim_tick.set(now);
        }
        Ok((amount, from))
    }
}
