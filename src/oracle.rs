//! Valuation Oracle - Converts pool principal into a reference-currency value
//!
//! Prices are pushed by the oracle admin per pool and are rejected once older
//! than the staleness window. The rewards controller only ever consumes
//! `value_of`; it must be queried outside of composed multi-step calls, as a
//! price read bundled with a refresh in one transaction can be manipulated.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::OracleError;
use crate::events::PriceUpdated;
use crate::math::PRICE_SCALE;

/// Price feed for one pool
#[odra::odra_type]
pub struct PriceFeed {
    /// Pool identifier
    pub pool: Address,
    /// Reference value of one principal unit (scaled by 1e18)
    pub price: U256,
    /// Block time of last update
    pub last_update: u64,
    /// Whether the feed is active
    pub is_active: bool,
}

/// Admin-fed valuation oracle
#[odra::module]
pub struct PriceValuationOracle {
    /// Price feeds by pool
    price_feeds: Mapping<Address, PriceFeed>,

    /// Admin address
    admin: Var<Address>,

    /// Maximum price age, in block time units
    max_staleness: Var<u64>,
}

#[odra::module]
impl PriceValuationOracle {
    /// Initialize the oracle
    pub fn init(&mut self, max_staleness: u64) {
        let caller = self.env().caller();
        self.admin.set(caller);
        self.max_staleness.set(max_staleness);
    }

    /// Set the price for a pool (admin only)
    pub fn set_price(&mut self, pool: Address, price: U256) {
        self.only_admin();

        if price.is_zero() {
            self.env().revert(OracleError::InvalidPrice);
        }

        let timestamp = self.env().get_block_time();
        self.price_feeds.set(&pool, PriceFeed {
            pool,
            price,
            last_update: timestamp,
            is_active: true,
        });

        self.env().emit_event(PriceUpdated {
            pool,
            price,
            timestamp,
        });
    }

    /// Current price of a pool, rejecting missing, inactive and stale feeds
    pub fn get_price(&self, pool: Address) -> U256 {
        let feed = self.price_feeds.get(&pool)
            .unwrap_or_revert_with(&self.env(), OracleError::PriceFeedNotAvailable);

        if !feed.is_active {
            self.env().revert(OracleError::PriceFeedNotAvailable);
        }

        let age = self.env().get_block_time().saturating_sub(feed.last_update);
        if age > self.max_staleness.get_or_default() {
            self.env().revert(OracleError::StalePrice);
        }

        feed.price
    }

    /// Reference value of `principal_amount` units of the pool's asset
    pub fn value_of(&self, pool: Address, principal_amount: U256) -> U256 {
        let price = self.get_price(pool);

        // value = principal * price / scale
        principal_amount
            .checked_mul(price)
            .map(|scaled| scaled / U256::from(PRICE_SCALE))
            .unwrap_or_revert_with(&self.env(), OracleError::InvalidPrice)
    }

    pub fn get_feed(&self, pool: Address) -> Option<PriceFeed> {
        self.price_feeds.get(&pool)
    }

    /// Disable a price feed (admin only)
    pub fn disable_feed(&mut self, pool: Address) {
        self.only_admin();

        let mut feed = self.price_feeds.get(&pool)
            .unwrap_or_revert_with(&self.env(), OracleError::PriceFeedNotAvailable);

        feed.is_active = false;
        self.price_feeds.set(&pool, feed);
    }

    /// Update max staleness (admin only)
    pub fn set_max_staleness(&mut self, max_staleness: u64) {
        self.only_admin();
        self.max_staleness.set(max_staleness);
    }

    pub fn get_admin(&self) -> Address {
        self.admin.get_or_revert_with(OracleError::Unauthorized)
    }

    fn only_admin(&self) {
        let caller = self.env().caller();
        let admin = self.admin.get_or_revert_with(OracleError::Unauthorized);
        if caller != admin {
            self.env().revert(OracleError::Unauthorized);
        }
    }
}

/// Valuation source consumed by the rewards controller
#[odra::external_contract]
pub trait ValuationOracle {
    /// Reference value of `principal_amount` units held in `pool`
    fn value_of(&self, pool: Address, principal_amount: U256) -> U256;
}
