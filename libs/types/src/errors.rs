//! Error types for identity parsing
//!
//! Uses thiserror, like every other error taxonomy in the workspace.

use thiserror::Error;

/// Failure to parse an `Address` from text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AddressError {
    #[error("Invalid hex in address: {0}")]
    InvalidHex(String),

    #[error("Invalid address length: expected 20 bytes, got {len}")]
    InvalidLength { len: usize },
}
