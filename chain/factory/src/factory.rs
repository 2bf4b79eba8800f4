//! XTokenFactory — token and lockbox creation plus registry queries
//!
//! Creation operations validate everything that can fail before the first
//! observable mutation. A failed call leaves the ledger, the registry, and
//! the event log exactly as they were.
//!
//! Order of checks for `create_lockbox`:
//! 1. Base asset / native flag combination
//! 2. Ownership guard on the token
//! 3. One lockbox per token (registry mapping, then the token's own slot)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use types::ids::Address;

use crate::config::FactoryConfig;
use crate::deployer::{
    derive_lockbox_salt, derive_token_salt, Deployer, DeploymentBackend, InMemoryLedger, Instance,
};
use crate::errors::{FactoryError, TokenError};
use crate::events::{FactoryEvent, LockboxDeployed, TokenDeployed};
use crate::lockbox::Lockbox;
use crate::registry::Registry;
use crate::security::require_owner;
use crate::token::XToken;

/// Parameters for `create_token`.
///
/// `minter_limits[i]` and `burner_limits[i]` apply to `bridges[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRequest {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub minter_limits: Vec<Decimal>,
    pub burner_limits: Vec<Decimal>,
    pub bridges: Vec<Address>,
}

impl TokenRequest {
    /// Request with no bridges configured.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            minter_limits: Vec::new(),
            burner_limits: Vec::new(),
            bridges: Vec::new(),
        }
    }

    /// Append a bridge with its limits.
    pub fn with_bridge(mut self, bridge: Address, minter_limit: Decimal, burner_limit: Decimal) -> Self {
        self.bridges.push(bridge);
        self.minter_limits.push(minter_limit);
        self.burner_limits.push(burner_limit);
        self
    }
}

/// Factory deploying tokens and lockboxes at deterministic addresses.
#[derive(Debug)]
pub struct XTokenFactory<B = InMemoryLedger> {
    deployer: Deployer<B>,
    registry: Registry,
    /// Emitted events log (append-only)
    events: Vec<FactoryEvent>,
}

impl XTokenFactory<InMemoryLedger> {
    /// Create a factory backed by an in-process ledger.
    pub fn new(config: FactoryConfig) -> Self {
        Self::with_backend(config, InMemoryLedger::new())
    }
}

impl<B: DeploymentBackend> XTokenFactory<B> {
    pub fn with_backend(config: FactoryConfig, backend: B) -> Self {
        Self {
            deployer: Deployer::new(config.address, backend),
            registry: Registry::new(),
            events: Vec::new(),
        }
    }

    /// Identity of this factory.
    pub fn address(&self) -> Address {
        self.deployer.factory()
    }

    // ───────────────────────── Token Creation ─────────────────────────

    /// Deploy a token for `caller`, configure its bridges, and register it.
    ///
    /// The token is built with the factory as temporary owner, bridges are
    /// configured in input order, then ownership passes to `caller`.
    /// Emits `TokenDeployed`.
    pub fn create_token(
        &mut self,
        caller: Address,
        request: &TokenRequest,
    ) -> Result<Address, FactoryError> {
        self.try_create_token(caller, request).inspect_err(|err| {
            warn!(%caller, symbol = %request.symbol, error = %err, "token creation rejected");
        })
    }

    fn try_create_token(
        &mut self,
        caller: Address,
        request: &TokenRequest,
    ) -> Result<Address, FactoryError> {
        let (minters, burners, bridges) = (
            request.minter_limits.len(),
            request.burner_limits.len(),
            request.bridges.len(),
        );
        if minters != bridges || burners != bridges {
            return Err(FactoryError::InvalidLength {
                minters,
                burners,
                bridges,
            });
        }

        let salt = derive_token_salt(&request.name, &request.symbol, &caller);
        self.deployer.ensure_vacant(&salt)?;

        let factory = self.deployer.factory();
        let mut token = XToken::new(
            request.name.clone(),
            request.symbol.clone(),
            request.decimals,
            factory,
        );
        let limits = request.minter_limits.iter().zip(&request.burner_limits);
        for (bridge, (minter_limit, burner_limit)) in request.bridges.iter().zip(limits) {
            token.configure_bridge(&factory, *bridge, *minter_limit, *burner_limit)?;
        }
        token.transfer_ownership(&factory, caller)?;

        let address = self.deployer.create_at(&salt, Instance::Token(token))?;
        self.registry.record_token(address)?;

        let event = FactoryEvent::TokenDeployed(TokenDeployed { token: address });
        self.events.push(event);
        info!(token = %address, %caller, symbol = %request.symbol, "token deployed");
        Ok(address)
    }

    // ───────────────────────── Lockbox Creation ─────────────────────────

    /// Deploy the lockbox for `token` and wire it onto the token.
    ///
    /// Only the token's current owner may call this, at most once per token.
    /// Emits `LockboxDeployed`.
    pub fn create_lockbox(
        &mut self,
        caller: Address,
        token: Address,
        base_asset: Option<Address>,
        is_native: bool,
    ) -> Result<Address, FactoryError> {
        self.try_create_lockbox(caller, token, base_asset, is_native)
            .inspect_err(|err| {
                warn!(%caller, %token, error = %err, "lockbox creation rejected");
            })
    }

    fn try_create_lockbox(
        &mut self,
        caller: Address,
        token: Address,
        base_asset: Option<Address>,
        is_native: bool,
    ) -> Result<Address, FactoryError> {
        if base_asset.is_none() && !is_native {
            return Err(FactoryError::BadTokenAddress);
        }

        let instance = self
            .deployer
            .token(&token)
            .ok_or(FactoryError::UnknownToken { token })?;
        require_owner(instance, &caller)?;

        self.registry.ensure_no_lockbox(&token)?;
        if let Some(existing) = instance.lockbox() {
            return Err(TokenError::LockboxAlreadySet { existing }.into());
        }

        let salt = derive_lockbox_salt(&token, base_asset.as_ref(), &caller);
        let lockbox = Lockbox::new(token, base_asset, is_native);
        let address = self.deployer.create_at(&salt, Instance::Lockbox(lockbox))?;

        let factory = self.deployer.factory();
        self.deployer
            .token_mut(&token)
            .ok_or(FactoryError::UnknownToken { token })?
            .set_lockbox(&factory, address)?;
        self.registry.record_lockbox(token, address)?;

        let event = FactoryEvent::LockboxDeployed(LockboxDeployed { lockbox: address });
        self.events.push(event);
        info!(lockbox = %address, %token, %caller, is_native, "lockbox deployed");
        Ok(address)
    }

    // ───────────────────────── Registry Queries ─────────────────────────

    /// Up to `amount` tokens from index `start`, in creation order.
    /// Empty when `start` is at or past the end.
    pub fn tokens(&self, start: usize, amount: usize) -> &[Address] {
        self.registry.tokens(start, amount)
    }

    /// Up to `amount` lockboxes from index `start`, in creation order.
    /// Empty when `start` is at or past the end.
    pub fn lockboxes(&self, start: usize, amount: usize) -> &[Address] {
        self.registry.lockboxes(start, amount)
    }

    pub fn is_token_registered(&self, address: &Address) -> bool {
        self.registry.is_token_registered(address)
    }

    pub fn is_lockbox_registered(&self, address: &Address) -> bool {
        self.registry.is_lockbox_registered(address)
    }

    pub fn lockbox_of(&self, token: &Address) -> Option<Address> {
        self.registry.lockbox_of(token)
    }

    pub fn token_count(&self) -> usize {
        self.registry.token_count()
    }

    pub fn lockbox_count(&self) -> usize {
        self.registry.lockbox_count()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    // ───────────────────────── Address Prediction ─────────────────────────

    /// Address `create_token` would return for these inputs.
    pub fn predict_token_address(&self, name: &str, symbol: &str, caller: &Address) -> Address {
        self.deployer.predict(&derive_token_salt(name, symbol, caller))
    }

    /// Address `create_lockbox` would return for these inputs.
    pub fn predict_lockbox_address(
        &self,
        token: &Address,
        base_asset: Option<&Address>,
        caller: &Address,
    ) -> Address {
        self.deployer
            .predict(&derive_lockbox_salt(token, base_asset, caller))
    }

    // ───────────────────────── Instances ─────────────────────────

    /// Deployed token at `address`.
    pub fn token(&self, address: &Address) -> Option<&XToken> {
        self.deployer.token(address)
    }

    /// Deployed lockbox at `address`.
    pub fn lockbox(&self, address: &Address) -> Option<&Lockbox> {
        self.deployer.lockbox(address)
    }

    /// Forward an ownership transfer to the token; the token checks `caller`.
    pub fn transfer_token_ownership(
        &mut self,
        caller: Address,
        token: Address,
        new_owner: Address,
    ) -> Result<(), FactoryError> {
        self.deployer
            .token_mut(&token)
            .ok_or(FactoryError::UnknownToken { token })?
            .transfer_ownership(&caller, new_owner)?;
        Ok(())
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[FactoryEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<FactoryEvent> {
        std::mem::take(&mut self.events)
    }
}
