//! Lockbox — custody instance paired with a token
//!
//! Binds a token to the base asset it wraps. Bindings are fixed at
//! construction; there are no setters.

use serde::{Deserialize, Serialize};
use types::ids::Address;

/// Custody instance for one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lockbox {
    token: Address,
    /// `None` is the null asset, only meaningful for native lockboxes
    base_asset: Option<Address>,
    is_native: bool,
}

impl Lockbox {
    pub fn new(token: Address, base_asset: Option<Address>, is_native: bool) -> Self {
        Self {
            token,
            base_asset,
            is_native,
        }
    }

    /// Token this lockbox backs.
    pub fn token(&self) -> Address {
        self.token
    }

    /// Base asset held in custody.
    pub fn base_asset(&self) -> Option<Address> {
        self.base_asset
    }

    /// Whether the lockbox holds the host's native asset.
    pub fn is_native(&self) -> bool {
        self.is_native
    }
}
