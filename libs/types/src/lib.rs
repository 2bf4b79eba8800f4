//! Types library for the token factory
//!
//! Identity types shared between the factory, the token instances it
//! deploys, and their lockboxes.
//!
//! # Version
//! v1.0.0
//!
//! # Modules
//! - `ids`: 20-byte `Address` used for principals and deployed instances
//! - `errors`: Parsing errors for identity types

// Public modules
pub mod ids;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::errors::*;
}
