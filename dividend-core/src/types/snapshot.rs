//! Serializable point-in-time copy of the ledger.

use serde::{Deserialize, Serialize};

use super::account::Account;
use super::accumulator::DividendAccumulator;
use super::address::Address;
use crate::u256::U256;

/// Snapshot format version written by this crate.
pub const SNAPSHOT_VERSION: u16 = 1;

/// Everything needed to rebuild a ledger.
///
/// Entries are kept sorted by key so that equal ledgers encode to equal
/// bytes. The holder index is not stored; it is derived from balances
/// on restore.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Format version.
    pub version: u16,

    /// Global supply and dividend index.
    pub accumulator: DividendAccumulator,

    /// Account records sorted by address.
    pub accounts: Vec<(Address, Account)>,

    /// Nonzero allowances sorted by (owner, spender).
    pub allowances: Vec<((Address, Address), U256)>,
}

impl LedgerSnapshot {
    /// Build a snapshot from unsorted parts, sorting them by key.
    pub fn new(
        accumulator: DividendAccumulator,
        mut accounts: Vec<(Address, Account)>,
        mut allowances: Vec<((Address, Address), U256)>,
    ) -> Self {
        accounts.sort_by(|a, b| a.0.cmp(&b.0));
        allowances.sort_by(|a, b| a.0.cmp(&b.0));
        Self {
            version: SNAPSHOT_VERSION,
            accumulator,
            accounts,
            allowances,
        }
    }

    /// Sum of all account balances in the snapshot.
    ///
    /// Returns `None` on overflow.
    pub fn balance_sum(&self) -> Option<U256> {
        self.accounts
            .iter()
            .try_fold(U256::zero(), |sum, (_, account)| sum.checked_add(account.balance))
    }
}
