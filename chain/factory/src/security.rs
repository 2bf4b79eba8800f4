//! Shared security primitives for factory operations
//!
//! Provides the ownership guard consulted before privileged creation and the
//! write-once slot used for the token → lockbox back-reference.

use serde::{Deserialize, Serialize};
use types::ids::Address;

use crate::errors::FactoryError;

/// A resource with a single owning principal.
pub trait Owned {
    /// Current owner.
    fn owner(&self) -> Address;
}

/// Fail with `Unauthorized` unless `principal` owns `instance`.
///
/// Evaluated once per operation, before any state mutation.
pub fn require_owner<T: Owned + ?Sized>(
    instance: &T,
    principal: &Address,
) -> Result<(), FactoryError> {
    if instance.owner() != *principal {
        return Err(FactoryError::Unauthorized { caller: *principal });
    }
    Ok(())
}

/// Optional slot that can only transition from empty to filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneShot<T> {
    value: Option<T>,
}

impl<T> OneShot<T> {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self { value: None }
    }

    /// Fill the slot. Returns the already stored value as `Err` if filled.
    pub fn set(&mut self, value: T) -> Result<(), &T> {
        match self.value {
            Some(ref existing) => Err(existing),
            None => {
                self.value = Some(value);
                Ok(())
            }
        }
    }

    /// Stored value, if any.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Check if the slot has been filled.
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }
}

impl<T> Default for OneShot<T> {
    fn default() -> Self {
        Self::new()
    }
}
