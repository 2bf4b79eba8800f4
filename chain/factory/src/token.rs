//! XToken — wrapped-token instance deployed by the factory
//!
//! Minimal model of the token collaborator. Limit accounting and bridge
//! permissioning live elsewhere; this type only carries what the factory
//! reads and writes:
//! - Owner and ownership transfer
//! - Per-bridge minter/burner limit configuration (owner-only)
//! - A write-once lockbox reference, writable only by the creating factory

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use types::ids::Address;

use crate::errors::TokenError;
use crate::security::{OneShot, Owned};

/// Configured limits for one bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeLimits {
    pub minter_limit: Decimal,
    pub burner_limit: Decimal,
}

/// Wrapped-token instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XToken {
    name: String,
    symbol: String,
    decimals: u8,
    owner: Address,
    /// Factory that deployed this token; the only writer of `lockbox`
    factory: Address,
    bridges: BTreeMap<Address, BridgeLimits>,
    lockbox: OneShot<Address>,
}

impl XToken {
    /// Create a token owned by its deploying factory.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
        factory: Address,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            owner: factory,
            factory,
            bridges: BTreeMap::new(),
            lockbox: OneShot::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn factory(&self) -> Address {
        self.factory
    }

    // ───────────────────────── Ownership ─────────────────────────

    /// Hand ownership to `new_owner`. Owner-only.
    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> Result<(), TokenError> {
        self.check_owner(caller)?;
        self.owner = new_owner;
        Ok(())
    }

    // ───────────────────────── Bridges ─────────────────────────

    /// Set mint/burn limits for a bridge. Owner-only.
    ///
    /// Reconfiguring a bridge replaces its previous limits.
    pub fn configure_bridge(
        &mut self,
        caller: &Address,
        bridge: Address,
        minter_limit: Decimal,
        burner_limit: Decimal,
    ) -> Result<(), TokenError> {
        self.check_owner(caller)?;
        if minter_limit.is_sign_negative() || burner_limit.is_sign_negative() {
            return Err(TokenError::InvalidLimit { bridge });
        }
        self.bridges.insert(
            bridge,
            BridgeLimits {
                minter_limit,
                burner_limit,
            },
        );
        Ok(())
    }

    /// Limits configured for `bridge`, if any.
    pub fn bridge_limits(&self, bridge: &Address) -> Option<BridgeLimits> {
        self.bridges.get(bridge).copied()
    }

    /// Number of configured bridges.
    pub fn bridge_count(&self) -> usize {
        self.bridges.len()
    }

    // ───────────────────────── Lockbox ─────────────────────────

    /// Record the paired lockbox. Factory-only, and only once.
    pub fn set_lockbox(&mut self, caller: &Address, lockbox: Address) -> Result<(), TokenError> {
        if *caller != self.factory {
            return Err(TokenError::NotFactory { caller: *caller });
        }
        self.lockbox
            .set(lockbox)
            .map_err(|existing| TokenError::LockboxAlreadySet {
                existing: *existing,
            })
    }

    /// Paired lockbox, if one has been deployed.
    pub fn lockbox(&self) -> Option<Address> {
        self.lockbox.get().copied()
    }

    fn check_owner(&self, caller: &Address) -> Result<(), TokenError> {
        if *caller != self.owner {
            return Err(TokenError::NotOwner { caller: *caller });
        }
        Ok(())
    }
}

impl Owned for XToken {
    fn owner(&self) -> Address {
        self.owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACTORY: Address = Address::repeat_byte(0xfa);
    const ALICE: Address = Address::repeat_byte(0xa1);
    const EVE: Address = Address::repeat_byte(0xee);
    const BRIDGE: Address = Address::repeat_byte(0xb1);

    fn setup_token() -> XToken {
        XToken::new("Wrapped Ether", "xETH", 18, FACTORY)
    }

    #[test]
    fn test_new_token_owned_by_factory() {
        let token = setup_token();
        assert_eq!(token.owner(), FACTORY);
        assert_eq!(token.factory(), FACTORY);
        assert_eq!(token.symbol(), "xETH");
        assert_eq!(token.decimals(), 18);
        assert_eq!(token.lockbox(), None);
    }

    #[test]
    fn test_transfer_ownership() {
        let mut token = setup_token();
        token.transfer_ownership(&FACTORY, ALICE).unwrap();
        assert_eq!(token.owner(), ALICE);
    }

    #[test]
    fn test_transfer_ownership_unauthorized() {
        let mut token = setup_token();
        let result = token.transfer_ownership(&EVE, EVE);
        assert_eq!(result, Err(TokenError::NotOwner { caller: EVE }));
        assert_eq!(token.owner(), FACTORY);
    }

    #[test]
    fn test_configure_bridge_last_write_wins() {
        let mut token = setup_token();
        token
            .configure_bridge(&FACTORY, BRIDGE, Decimal::from(10), Decimal::from(5))
            .unwrap();
        token
            .configure_bridge(&FACTORY, BRIDGE, Decimal::from(1), Decimal::from(2))
            .unwrap();

        let limits = token.bridge_limits(&BRIDGE).unwrap();
        assert_eq!(limits.minter_limit, Decimal::from(1));
        assert_eq!(limits.burner_limit, Decimal::from(2));
        assert_eq!(token.bridge_count(), 1);
    }

    #[test]
    fn test_configure_bridge_negative_limit() {
        let mut token = setup_token();
        let result = token.configure_bridge(&FACTORY, BRIDGE, Decimal::from(-1), Decimal::ZERO);
        assert_eq!(result, Err(TokenError::InvalidLimit { bridge: BRIDGE }));
        assert_eq!(token.bridge_limits(&BRIDGE), None);
    }

    #[test]
    fn test_configure_bridge_after_transfer_requires_new_owner() {
        let mut token = setup_token();
        token.transfer_ownership(&FACTORY, ALICE).unwrap();
        let result = token.configure_bridge(&FACTORY, BRIDGE, Decimal::ONE, Decimal::ONE);
        assert_eq!(result, Err(TokenError::NotOwner { caller: FACTORY }));
        token
            .configure_bridge(&ALICE, BRIDGE, Decimal::ONE, Decimal::ONE)
            .unwrap();
    }

    #[test]
    fn test_set_lockbox_once() {
        let mut token = setup_token();
        let lockbox = Address::repeat_byte(0x10);
        token.set_lockbox(&FACTORY, lockbox).unwrap();
        assert_eq!(token.lockbox(), Some(lockbox));

        let result = token.set_lockbox(&FACTORY, Address::repeat_byte(0x11));
        assert_eq!(result, Err(TokenError::LockboxAlreadySet { existing: lockbox }));
        assert_eq!(token.lockbox(), Some(lockbox));
    }

    #[test]
    fn test_set_lockbox_only_factory() {
        let mut token = setup_token();
        token.transfer_ownership(&FACTORY, ALICE).unwrap();
        let result = token.set_lockbox(&ALICE, Address::repeat_byte(0x10));
        assert_eq!(result, Err(TokenError::NotFactory { caller: ALICE }));
        assert_eq!(token.lockbox(), None);
    }
}
