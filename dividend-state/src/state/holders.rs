//! Index of accounts holding a nonzero balance.

use std::collections::HashMap;

use dividend_core::Address;

/// Set of current holders with O(1) insert, remove and positional access.
///
/// Holders live in a dense vector; a side map records each holder's
/// position so removal can swap the last entry into the hole. Enumeration
/// order is therefore unspecified.
///
/// Dividend math never reads this set. It exists for introspection only.
#[derive(Clone, Debug, Default)]
pub struct HolderSet {
    holders: Vec<Address>,
    positions: HashMap<Address, usize>,
}

impl HolderSet {
    /// Create an empty holder set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty holder set with room for `capacity` holders.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            holders: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Add a holder. Returns false if it was already present.
    pub fn insert(&mut self, address: Address) -> bool {
        if self.positions.contains_key(&address) {
            return false;
        }
        self.positions.insert(address, self.holders.len());
        self.holders.push(address);
        true
    }

    /// Remove a holder. Returns false if it was not present.
    pub fn remove(&mut self, address: &Address) -> bool {
        let Some(index) = self.positions.remove(address) else {
            return false;
        };
        self.holders.swap_remove(index);
        if let Some(moved) = self.holders.get(index) {
            self.positions.insert(*moved, index);
        }
        true
    }

    /// Bring membership in line with `is_holder`.
    pub fn sync(&mut self, address: &Address, is_holder: bool) {
        if is_holder {
            self.insert(*address);
        } else {
            self.remove(address);
        }
    }

    /// Check membership.
    pub fn contains(&self, address: &Address) -> bool {
        self.positions.contains_key(address)
    }

    /// Number of holders.
    pub fn len(&self) -> usize {
        self.holders.len()
    }

    /// Check if there are no holders.
    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }

    /// Holder at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Address> {
        self.holders.get(index)
    }

    /// All holders as a slice.
    pub fn as_slice(&self) -> &[Address] {
        &self.holders
    }

    /// Iterate over holders.
    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.holders.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(tag: u8) -> Address {
        [tag; 20]
    }

    #[test]
    fn test_new_set_empty() {
        let set = HolderSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(set.get(0).is_none());
    }

    #[test]
    fn test_insert_idempotent() {
        let mut set = HolderSet::new();
        assert!(set.insert(addr(1)));
        assert!(!set.insert(addr(1)));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&addr(1)));
    }

    #[test]
    fn test_remove_idempotent() {
        let mut set = HolderSet::new();
        set.insert(addr(1));
        assert!(set.remove(&addr(1)));
        assert!(!set.remove(&addr(1)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_swap_remove_keeps_positions() {
        let mut set = HolderSet::new();
        set.insert(addr(1));
        set.insert(addr(2));
        set.insert(addr(3));

        // Removing the first moves the last into its slot
        set.remove(&addr(1));
        assert_eq!(set.as_slice(), &[addr(3), addr(2)]);

        // The moved holder must still be removable by address
        assert!(set.remove(&addr(3)));
        assert_eq!(set.as_slice(), &[addr(2)]);
        assert!(set.contains(&addr(2)));
        assert!(!set.contains(&addr(3)));
    }

    #[test]
    fn test_remove_last() {
        let mut set = HolderSet::new();
        set.insert(addr(1));
        set.insert(addr(2));
        set.remove(&addr(2));
        assert_eq!(set.as_slice(), &[addr(1)]);
        assert_eq!(set.get(0), Some(&addr(1)));
    }

    #[test]
    fn test_sync() {
        let mut set = HolderSet::with_capacity(4);
        set.sync(&addr(5), true);
        set.sync(&addr(5), true);
        assert_eq!(set.len(), 1);
        set.sync(&addr(5), false);
        set.sync(&addr(6), false);
        assert!(set.is_empty());
    }
}
