//! Per-account ledger state.

use serde::{Deserialize, Serialize};

use crate::u256::U256;

/// Balance and dividend bookkeeping for a single account.
///
/// The amount owed to the account is never stored. It is derived on demand:
///
/// ```text
/// owed = settled_dividends + balance * (dividend_per_unit - dividend_entry) >> 128
/// ```
///
/// Every balance change first settles the account (folds the accrued part
/// into `settled_dividends` and moves `dividend_entry` up to the current
/// index), so a balance change never alters what is already owed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Token units held.
    pub balance: U256,

    /// Dividend-per-unit index (128.128 fixed-point) at the last settlement.
    pub dividend_entry: U256,

    /// Dividend accrued before the last settlement and not yet withdrawn.
    pub settled_dividends: U256,

    /// Total dividend value paid out to this account.
    pub withdrawn: U256,
}

impl Account {
    /// Create an empty account.
    pub fn new() -> Self {
        Self {
            balance: U256::zero(),
            dividend_entry: U256::zero(),
            settled_dividends: U256::zero(),
            withdrawn: U256::zero(),
        }
    }

    /// Whether the account currently counts as a holder.
    #[inline]
    pub fn is_holder(&self) -> bool {
        !self.balance.is_zero()
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_is_empty() {
        let account = Account::new();
        assert!(account.balance.is_zero());
        assert!(account.dividend_entry.is_zero());
        assert!(account.settled_dividends.is_zero());
        assert!(account.withdrawn.is_zero());
        assert!(!account.is_holder());
    }

    #[test]
    fn test_holder_follows_balance() {
        let mut account = Account::new();
        account.balance = U256::from(1u64);
        assert!(account.is_holder());
    }
}
