//! Reward token minted to pool depositors and the treasury
//! A minimal CEP-18 style token whose supply is only created by one minter,
//! normally the rewards controller.
use odra::prelude::*;
use odra::casper_types::U256;
use crate::events::{MinterChanged, Transfer};
use crate::errors::TokenError;

/// Reward token module
#[odra::module]
pub struct RewardToken {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Token decimals
    decimals: Var<u8>,
    /// Total supply of tokens
    total_supply: Var<U256>,
    /// Balance mapping: owner -> balance
    balances: Mapping<Address, U256>,
    /// Admin allowed to rotate the minter
    admin: Var<Address>,
    /// Sole address allowed to mint
    minter: Var<Address>,
}

#[odra::module]
impl RewardToken {
    /// Initialize the token with name and symbol
    pub fn init(&mut self, name: String, symbol: String) {
        let caller = self.env().caller();
        self.name.set(name);
        self.symbol.set(symbol);
        self.decimals.set(18);
        self.total_supply.set(U256::zero());
        self.admin.set(caller);
    }

    pub fn name(&self) -> String {
        self.name.get_or_default()
    }

    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    /// Current minter, if one was set
    pub fn minter(&self) -> Option<Address> {
        self.minter.get()
    }

    /// Transfer tokens to another address
    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        let from_balance = self.balance_of(caller);
        if from_balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }

        self.balances.set(&caller, from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + amount);

        self.env().emit_event(Transfer {
            from: caller,
            to,
            value: amount,
        });
        true
    }

    /// Mint new tokens; restricted to the minter
    pub fn mint(&mut self, recipient: Address, amount: U256) {
        let caller = self.env().caller();
        let minter = self.minter.get_or_revert_with(TokenError::Unauthorized);
        if caller != minter {
            self.env().revert(TokenError::Unauthorized);
        }

        let new_supply = self.total_supply()
            .checked_add(amount)
            .unwrap_or_revert_with(&self.env(), TokenError::InsufficientBalance);
        self.total_supply.set(new_supply);

        // Balance can not exceed the supply, which was checked above
        let balance = self.balance_of(recipient);
        self.balances.set(&recipient, balance + amount);

        self.env().emit_event(Transfer {
            from: Address::from(self.env().self_address()),
            to: recipient,
            value: amount,
        });
    }

    /// Rotate the minter (admin only)
    pub fn set_minter(&mut self, minter: Address) {
        let caller = self.env().caller();
        let admin = self.admin.get_or_revert_with(TokenError::Unauthorized);
        if caller != admin {
            self.env().revert(TokenError::Unauthorized);
        }

        let old_minter = self.minter.get();
        self.minter.set(minter);

        self.env().emit_event(MinterChanged {
            old_minter,
            new_minter: minter,
        });
    }
}

/// Issuer of the reward token, as seen by the rewards controller
#[odra::external_contract]
pub trait RewardIssuer {
    /// Mint `amount` reward tokens to `recipient`
    fn mint(&mut self, recipient: Address, amount: U256);
}
