//! Factory events
//!
//! Notifications recorded by successful creation operations. These are the
//! only observable side-channel of the factory; failed operations record
//! nothing.

use serde::{Deserialize, Serialize};
use types::ids::Address;

/// A token instance was deployed and registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDeployed {
    pub token: Address,
}

/// A lockbox instance was deployed and bound to its token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockboxDeployed {
    pub lockbox: Address,
}

/// Enum wrapper for all factory events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactoryEvent {
    TokenDeployed(TokenDeployed),
    LockboxDeployed(LockboxDeployed),
}
