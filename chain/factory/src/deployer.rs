//! Deterministic deployment — salt derivation and create-or-fail
//!
//! Split into a pure half and an impure half:
//! - `derive_token_salt` / `derive_lockbox_salt` / `compute_address` are pure
//!   SHA-256 derivations, testable without deploying anything
//! - `Deployer::create_at` installs an instance at the derived address on a
//!   `DeploymentBackend`, failing with `AddressOccupied` if anything is
//!   already there
//!
//! The address depends only on the factory identity and the salt, never on
//! the instance being installed.

use sha2::{Digest, Sha256};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;
use types::ids::Address;

use crate::errors::FactoryError;
use crate::lockbox::Lockbox;
use crate::token::XToken;

const TOKEN_SALT_TAG: &[u8] = b"XTOKEN_SALT_V1";
const LOCKBOX_SALT_TAG: &[u8] = b"LOCKBOX_SALT_V1";
const ADDRESS_PREFIX: u8 = 0xff;

/// 32-byte create-site identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Salt([u8; 32]);

impl Salt {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Length-prefix variable fields so distinct tuples never hash the same bytes.
fn update_field(hasher: &mut Sha256, field: &[u8]) {
    hasher.update((field.len() as u64).to_be_bytes());
    hasher.update(field);
}

/// Salt for a token: (name, symbol, caller).
pub fn derive_token_salt(name: &str, symbol: &str, caller: &Address) -> Salt {
    let mut hasher = Sha256::new();
    hasher.update(TOKEN_SALT_TAG);
    update_field(&mut hasher, name.as_bytes());
    update_field(&mut hasher, symbol.as_bytes());
    hasher.update(caller.as_bytes());
    Salt(hasher.finalize().into())
}

/// Salt for a lockbox: (token, base asset, caller).
pub fn derive_lockbox_salt(token: &Address, base_asset: Option<&Address>, caller: &Address) -> Salt {
    let mut hasher = Sha256::new();
    hasher.update(LOCKBOX_SALT_TAG);
    hasher.update(token.as_bytes());
    match base_asset {
        Some(asset) => {
            hasher.update([1u8]);
            hasher.update(asset.as_bytes());
        }
        None => hasher.update([0u8]),
    }
    hasher.update(caller.as_bytes());
    Salt(hasher.finalize().into())
}

/// Address an instance created by `factory` with `salt` lands at.
pub fn compute_address(factory: &Address, salt: &Salt) -> Address {
    let mut hasher = Sha256::new();
    hasher.update([ADDRESS_PREFIX]);
    hasher.update(factory.as_bytes());
    hasher.update(salt.as_bytes());
    Address::from_digest_tail(&hasher.finalize())
}

/// Anything the factory can deploy.
#[derive(Debug, Clone, PartialEq)]
pub enum Instance {
    Token(XToken),
    Lockbox(Lockbox),
}

/// Host storage for deployed instances.
pub trait DeploymentBackend {
    /// Instance at `address`, if any.
    fn get(&self, address: &Address) -> Option<&Instance>;

    /// Mutable instance at `address`, if any.
    fn get_mut(&mut self, address: &Address) -> Option<&mut Instance>;

    /// Install `instance` at `address`.
    ///
    /// Must fail with `AddressOccupied` and leave storage untouched when the
    /// address already holds an instance.
    fn install(&mut self, address: Address, instance: Instance) -> Result<(), FactoryError>;
}

/// In-process backend keyed by address.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    instances: HashMap<Address, Instance>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of deployed instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl DeploymentBackend for InMemoryLedger {
    fn get(&self, address: &Address) -> Option<&Instance> {
        self.instances.get(address)
    }

    fn get_mut(&mut self, address: &Address) -> Option<&mut Instance> {
        self.instances.get_mut(address)
    }

    fn install(&mut self, address: Address, instance: Instance) -> Result<(), FactoryError> {
        match self.instances.entry(address) {
            Entry::Occupied(_) => Err(FactoryError::AddressOccupied { address }),
            Entry::Vacant(slot) => {
                slot.insert(instance);
                Ok(())
            }
        }
    }
}

/// Create-or-fail deployment on behalf of one factory identity.
#[derive(Debug)]
pub struct Deployer<B> {
    factory: Address,
    backend: B,
}

impl<B: DeploymentBackend> Deployer<B> {
    pub fn new(factory: Address, backend: B) -> Self {
        Self { factory, backend }
    }

    /// Identity the derived addresses are bound to.
    pub fn factory(&self) -> Address {
        self.factory
    }

    /// Address `create_at(salt, ..)` would deploy to.
    pub fn predict(&self, salt: &Salt) -> Address {
        compute_address(&self.factory, salt)
    }

    pub fn is_deployed(&self, address: &Address) -> bool {
        self.backend.get(address).is_some()
    }

    /// Fail with `AddressOccupied` if `salt` has already been used.
    pub fn ensure_vacant(&self, salt: &Salt) -> Result<Address, FactoryError> {
        let address = self.predict(salt);
        if self.is_deployed(&address) {
            return Err(FactoryError::AddressOccupied { address });
        }
        Ok(address)
    }

    /// Install `instance` at the address derived from `salt`.
    pub fn create_at(&mut self, salt: &Salt, instance: Instance) -> Result<Address, FactoryError> {
        let address = self.predict(salt);
        self.backend.install(address, instance)?;
        debug!(%address, %salt, "instance deployed");
        Ok(address)
    }

    pub fn token(&self, address: &Address) -> Option<&XToken> {
        match self.backend.get(address) {
            Some(Instance::Token(token)) => Some(token),
            _ => None,
        }
    }

    pub fn token_mut(&mut self, address: &Address) -> Option<&mut XToken> {
        match self.backend.get_mut(address) {
            Some(Instance::Token(token)) => Some(token),
            _ => None,
        }
    }

    pub fn lockbox(&self, address: &Address) -> Option<&Lockbox> {
        match self.backend.get(address) {
            Some(Instance::Lockbox(lockbox)) => Some(lockbox),
            _ => None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
