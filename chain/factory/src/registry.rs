//! Registry — every token and lockbox this factory has created
//!
//! Two append-only, deduplicated, insertion-ordered address sets plus the
//! token → lockbox mapping. Mutators are crate-private: only the creation
//! operations, after a successful deployment, may record an address.

use std::collections::{HashMap, HashSet};
use types::ids::Address;

use crate::errors::FactoryError;

/// Insertion-ordered set with O(1) membership.
#[derive(Debug, Clone, Default)]
pub struct AddressSet {
    order: Vec<Address>,
    members: HashSet<Address>,
}

impl AddressSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `address`. Returns `false` if already present.
    fn insert(&mut self, address: Address) -> bool {
        if !self.members.insert(address) {
            return false;
        }
        self.order.push(address);
        true
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.members.contains(address)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Up to `amount` entries starting at index `start`.
    ///
    /// Truncated at the end of the set; empty when `start >= len`.
    pub fn window(&self, start: usize, amount: usize) -> &[Address] {
        let len = self.order.len();
        let begin = start.min(len);
        let end = start.saturating_add(amount).min(len);
        &self.order[begin..end]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.order.iter()
    }
}

/// Registry of created instances.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    tokens: AddressSet,
    lockboxes: AddressSet,
    /// token → lockbox, write-once per token
    lockbox_by_token: HashMap<Address, Address>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // ───────────────────────── Mutation (crate-private) ─────────────────────────

    /// Record a freshly deployed token.
    pub(crate) fn record_token(&mut self, token: Address) -> Result<(), FactoryError> {
        if !self.tokens.insert(token) {
            return Err(FactoryError::AddressOccupied { address: token });
        }
        Ok(())
    }

    /// Fail with `LockboxAlreadyDeployed` if `token` already has a lockbox.
    pub(crate) fn ensure_no_lockbox(&self, token: &Address) -> Result<(), FactoryError> {
        if let Some(lockbox) = self.lockbox_by_token.get(token) {
            return Err(FactoryError::LockboxAlreadyDeployed {
                token: *token,
                lockbox: *lockbox,
            });
        }
        Ok(())
    }

    /// Record a freshly deployed lockbox and bind it to `token`.
    ///
    /// Checks both the mapping and the lockbox set before touching either,
    /// so a rejected call leaves the registry as it was.
    pub(crate) fn record_lockbox(&mut self, token: Address, lockbox: Address) -> Result<(), FactoryError> {
        self.ensure_no_lockbox(&token)?;
        if self.lockboxes.contains(&lockbox) {
            return Err(FactoryError::AddressOccupied { address: lockbox });
        }
        self.lockboxes.insert(lockbox);
        self.lockbox_by_token.insert(token, lockbox);
        Ok(())
    }

    // ───────────────────────── Queries ─────────────────────────

    pub fn is_token_registered(&self, address: &Address) -> bool {
        self.tokens.contains(address)
    }

    pub fn is_lockbox_registered(&self, address: &Address) -> bool {
        self.lockboxes.contains(address)
    }

    /// Lockbox bound to `token`, if any.
    pub fn lockbox_of(&self, token: &Address) -> Option<Address> {
        self.lockbox_by_token.get(token).copied()
    }

    /// Paginated tokens in creation order.
    pub fn tokens(&self, start: usize, amount: usize) -> &[Address] {
        self.tokens.window(start, amount)
    }

    /// Paginated lockboxes in creation order.
    pub fn lockboxes(&self, start: usize, amount: usize) -> &[Address] {
        self.lockboxes.window(start, amount)
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn lockbox_count(&self) -> usize {
        self.lockboxes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::repeat_byte(n)
    }

    fn registry_with_tokens(n: u8) -> Registry {
        let mut registry = Registry::new();
        for i in 0..n {
            registry.record_token(addr(i)).unwrap();
        }
        registry
    }

    // ─── AddressSet ───

    #[test]
    fn test_address_set_dedup() {
        let mut set = AddressSet::new();
        assert!(set.insert(addr(1)));
        assert!(!set.insert(addr(1)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_address_set_preserves_order() {
        let mut set = AddressSet::new();
        for n in [5, 3, 9] {
            set.insert(addr(n));
        }
        let order: Vec<_> = set.iter().copied().collect();
        assert_eq!(order, vec![addr(5), addr(3), addr(9)]);
    }

    // ─── Pagination ───

    #[test]
    fn test_pagination_full() {
        let registry = registry_with_tokens(5);
        let expected: Vec<_> = (0..5).map(addr).collect();
        assert_eq!(registry.tokens(0, 10), expected.as_slice());
    }

    #[test]
    fn test_pagination_truncates() {
        let registry = registry_with_tokens(5);
        assert_eq!(registry.tokens(3, 5), &[addr(3), addr(4)]);
    }

    #[test]
    fn test_pagination_at_exact_size() {
        let registry = registry_with_tokens(5);
        assert!(registry.tokens(5, 1).is_empty());
    }

    #[test]
    fn test_pagination_past_end_is_empty() {
        let registry = registry_with_tokens(5);
        assert!(registry.tokens(6, 1).is_empty());
        assert!(registry.tokens(usize::MAX, usize::MAX).is_empty());
    }

    #[test]
    fn test_pagination_zero_amount() {
        let registry = registry_with_tokens(5);
        assert!(registry.tokens(2, 0).is_empty());
    }

    #[test]
    fn test_pagination_saturates() {
        let registry = registry_with_tokens(3);
        assert_eq!(registry.tokens(1, usize::MAX), &[addr(1), addr(2)]);
    }

    // ─── Tokens ───

    #[test]
    fn test_record_token_duplicate_rejected() {
        let mut registry = registry_with_tokens(2);
        let result = registry.record_token(addr(0));
        assert_eq!(result, Err(FactoryError::AddressOccupied { address: addr(0) }));
        assert_eq!(registry.token_count(), 2);
    }

    #[test]
    fn test_membership() {
        let registry = registry_with_tokens(2);
        assert!(registry.is_token_registered(&addr(1)));
        assert!(!registry.is_token_registered(&addr(7)));
    }

    // ─── Lockboxes ───

    #[test]
    fn test_record_lockbox() {
        let mut registry = registry_with_tokens(1);
        registry.record_lockbox(addr(0), addr(0x10)).unwrap();
        assert_eq!(registry.lockbox_of(&addr(0)), Some(addr(0x10)));
        assert!(registry.is_lockbox_registered(&addr(0x10)));
        assert_eq!(registry.lockboxes(0, 10), &[addr(0x10)]);
    }

    #[test]
    fn test_record_lockbox_twice_for_token() {
        let mut registry = registry_with_tokens(1);
        registry.record_lockbox(addr(0), addr(0x10)).unwrap();
        let result = registry.record_lockbox(addr(0), addr(0x11));
        assert_eq!(
            result,
            Err(FactoryError::LockboxAlreadyDeployed {
                token: addr(0),
                lockbox: addr(0x10)
            })
        );
        assert_eq!(registry.lockbox_of(&addr(0)), Some(addr(0x10)));
        assert_eq!(registry.lockbox_count(), 1);
    }

    #[test]
    fn test_record_lockbox_shared_between_tokens_rejected() {
        let mut registry = registry_with_tokens(2);
        registry.record_lockbox(addr(0), addr(0x10)).unwrap();
        let result = registry.record_lockbox(addr(1), addr(0x10));
        assert_eq!(result, Err(FactoryError::AddressOccupied { address: addr(0x10) }));
        assert_eq!(registry.lockbox_of(&addr(1)), None);
    }
}
