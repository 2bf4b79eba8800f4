//! Factory-specific error types
//!
//! Every failure aborts the whole operation. `ErrorKind` groups the variants
//! into the three classes callers act on: fix the input, change the caller,
//! or change the salt-affecting inputs.

use thiserror::Error;
use types::ids::Address;

/// Coarse error classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed request; resubmit with valid parameters
    InvalidInput,
    /// Caller is not the owner of the resource
    Unauthorized,
    /// Target address occupied or token already has a lockbox
    Conflict,
}

/// Errors raised by a token instance itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenError {
    #[error("Caller {caller} is not the token owner")]
    NotOwner { caller: Address },

    #[error("Caller {caller} is not the creating factory")]
    NotFactory { caller: Address },

    #[error("Lockbox already set to {existing}")]
    LockboxAlreadySet { existing: Address },

    #[error("Invalid limit for bridge {bridge}: limits must be non-negative")]
    InvalidLimit { bridge: Address },
}

/// Errors raised by factory operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FactoryError {
    #[error("Length mismatch: {minters} minter limits, {burners} burner limits, {bridges} bridges")]
    InvalidLength {
        minters: usize,
        burners: usize,
        bridges: usize,
    },

    #[error("Base asset is null and lockbox is not native")]
    BadTokenAddress,

    #[error("No token deployed at {token}")]
    UnknownToken { token: Address },

    #[error("Unauthorized: {caller} is not the owner")]
    Unauthorized { caller: Address },

    #[error("Address already occupied: {address}")]
    AddressOccupied { address: Address },

    #[error("Lockbox already deployed for token {token}: {lockbox}")]
    LockboxAlreadyDeployed { token: Address, lockbox: Address },

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl FactoryError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FactoryError::InvalidLength { .. }
            | FactoryError::BadTokenAddress
            | FactoryError::UnknownToken { .. } => ErrorKind::InvalidInput,
            FactoryError::Unauthorized { .. } => ErrorKind::Unauthorized,
            FactoryError::AddressOccupied { .. }
            | FactoryError::LockboxAlreadyDeployed { .. } => ErrorKind::Conflict,
            FactoryError::Token(err) => match err {
                TokenError::NotOwner { .. } | TokenError::NotFactory { .. } => {
                    ErrorKind::Unauthorized
                }
                TokenError::LockboxAlreadySet { .. } => ErrorKind::Conflict,
                TokenError::InvalidLimit { .. } => ErrorKind::InvalidInput,
            },
        }
    }
}

/// Configuration loading errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Malformed factory config: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Malformed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_length_display() {
        let err = FactoryError::InvalidLength {
            minters: 2,
            burners: 1,
            bridges: 2,
        };
        assert_eq!(
            err.to_string(),
            "Length mismatch: 2 minter limits, 1 burner limits, 2 bridges"
        );
    }

    #[test]
    fn test_error_kinds() {
        let addr = Address::repeat_byte(1);
        assert_eq!(FactoryError::BadTokenAddress.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            FactoryError::Unauthorized { caller: addr }.kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(
            FactoryError::AddressOccupied { address: addr }.kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            FactoryError::LockboxAlreadyDeployed {
                token: addr,
                lockbox: addr
            }
            .kind(),
            ErrorKind::Conflict
        );
    }

    #[test]
    fn test_factory_error_from_token() {
        let token_err = TokenError::LockboxAlreadySet {
            existing: Address::repeat_byte(9),
        };
        let err: FactoryError = token_err.into();
        assert!(matches!(err, FactoryError::Token(_)));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_config_error_from_json() {
        let json_err = serde_json::from_str::<u8>("not json").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(err.to_string().starts_with("Malformed factory config"));
    }
}
