//! Token Factory — deterministic deployment and creation registries
//!
//! This crate deploys wrapped-token instances and their optional lockboxes
//! at addresses derived from the creation inputs, and keeps an authoritative
//! record of everything it has created.
//!
//! # Modules
//! - `config`: Factory identity and JSON loading
//! - `errors`: Error taxonomy (invalid input, unauthorized, conflict)
//! - `events`: `TokenDeployed` / `LockboxDeployed` notifications
//! - `security`: Ownership guard and write-once slot
//! - `deployer`: Salt derivation, address prediction, create-or-fail
//! - `token`: Wrapped-token instance model
//! - `lockbox`: Custody instance model
//! - `registry`: Ordered, deduplicated address sets and token → lockbox map
//! - `factory`: `XTokenFactory` creation operations and queries
//!
//! # Version
//! v0.1.0

pub mod config;
pub mod errors;
pub mod events;
pub mod security;
pub mod deployer;
pub mod token;
pub mod lockbox;
pub mod registry;
pub mod factory;

pub use config::FactoryConfig;
pub use errors::{ErrorKind, FactoryError, TokenError};
pub use factory::{TokenRequest, XTokenFactory};

/// Factory ABI version — frozen after release
pub const FACTORY_ABI_VERSION: &str = "1.0.0";
