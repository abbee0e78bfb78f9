//! Global dividend accumulator.

use serde::{Deserialize, Serialize};

use crate::u256::U256;

/// Ledger-wide supply and dividend index.
///
/// A dividend deposit raises `dividend_per_unit` by `deposit / total_supply`
/// in 128.128 fixed-point. No holder is touched; each one picks up its share
/// lazily the next time it is settled or queried.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendAccumulator {
    /// Cumulative dividend-per-unit index (128.128 fixed-point).
    pub dividend_per_unit: U256,

    /// Sum of all account balances.
    pub total_supply: U256,

    /// Total dividend value ever deposited.
    pub total_dividends: U256,

    /// Total dividend value ever paid out.
    pub total_withdrawn: U256,
}

impl DividendAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self {
            dividend_per_unit: U256::zero(),
            total_supply: U256::zero(),
            total_dividends: U256::zero(),
            total_withdrawn: U256::zero(),
        }
    }

    /// Check if any units are outstanding.
    #[inline]
    pub fn has_supply(&self) -> bool {
        !self.total_supply.is_zero()
    }

    /// Dividend value deposited but not yet withdrawn.
    ///
    /// Includes truncation dust that no holder can ever claim.
    pub fn undistributed(&self) -> U256 {
        self.total_dividends.saturating_sub(self.total_withdrawn)
    }

    /// Value custody must hold to back every unit and every unpaid dividend.
    ///
    /// Returns `None` on overflow.
    pub fn required_reserves(&self) -> Option<U256> {
        self.total_supply.checked_add(self.undistributed())
    }
}

impl Default for DividendAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accumulator() {
        let acc = DividendAccumulator::new();
        assert!(!acc.has_supply());
        assert!(acc.dividend_per_unit.is_zero());
        assert!(acc.undistributed().is_zero());
    }

    #[test]
    fn test_undistributed() {
        let mut acc = DividendAccumulator::new();
        acc.total_dividends = U256::from(300u64);
        acc.total_withdrawn = U256::from(120u64);
        assert_eq!(acc.undistributed(), U256::from(180u64));
    }

    #[test]
    fn test_required_reserves() {
        let mut acc = DividendAccumulator::new();
        acc.total_supply = U256::from(50u64);
        acc.total_dividends = U256::from(30u64);
        acc.total_withdrawn = U256::from(10u64);
        assert_eq!(acc.required_reserves(), Some(U256::from(70u64)));

        acc.total_supply = U256::max_value();
        assert_eq!(acc.required_reserves(), None);
    }
}
