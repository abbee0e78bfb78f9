//! In-memory ledger state container.

use std::collections::HashMap;

use dividend_core::u256::FIXED_POINT_FRACTIONAL_BITS;
use dividend_core::{Account, Address, DividendAccumulator, LedgerSnapshot, SNAPSHOT_VERSION, U256};

use super::holders::HolderSet;
use super::store::{LedgerReader, LedgerWriter};
use crate::error::{StateError, StateResult};

/// In-memory ledger state backed by HashMaps.
///
/// Owns every account record, the dividend accumulator, allowances and the
/// holder index. Nothing outside this crate mutates it except through the
/// operation executor.
#[derive(Clone, Debug, Default)]
pub struct LedgerState {
    /// Account records by address.
    accounts: HashMap<Address, Account>,

    /// Global supply and dividend index.
    accumulator: DividendAccumulator,

    /// Allowances per (owner, spender). Zero entries are not stored.
    allowances: HashMap<(Address, Address), U256>,

    /// Accounts with a nonzero balance.
    holders: HolderSet,
}

impl LedgerState {
    /// Create a new empty ledger state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty ledger state pre-sized for `capacity` accounts.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            accounts: HashMap::with_capacity(capacity),
            accumulator: DividendAccumulator::new(),
            allowances: HashMap::new(),
            holders: HolderSet::with_capacity(capacity),
        }
    }

    /// Number of accounts ever touched.
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// The holder index.
    pub fn holder_set(&self) -> &HolderSet {
        &self.holders
    }

    /// Iterate over all account records.
    pub fn accounts(&self) -> impl Iterator<Item = (&Address, &Account)> {
        self.accounts.iter()
    }

    /// Capture the state as a sorted, serializable snapshot.
    pub fn to_snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot::new(
            self.accumulator.clone(),
            self.accounts()
                .map(|(address, account)| (*address, account.clone()))
                .collect(),
            self.allowances
                .iter()
                .map(|(key, amount)| (*key, *amount))
                .collect(),
        )
    }

    /// Rebuild state from a snapshot.
    ///
    /// The holder index is derived from balances. Snapshots are rejected
    /// when balances do not add up to the recorded total supply, or when the
    /// dividend totals, index and entries could not have come from a
    /// sequence of deposits and withdrawals.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> StateResult<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(StateError::InvalidSnapshot {
                reason: format!(
                    "unsupported version {} (expected {})",
                    snapshot.version, SNAPSHOT_VERSION
                ),
            });
        }

        let balance_sum = snapshot.balance_sum().ok_or(StateError::InvalidSnapshot {
            reason: "balance sum overflows".to_string(),
        })?;
        if balance_sum != snapshot.accumulator.total_supply {
            return Err(StateError::InvalidSnapshot {
                reason: format!(
                    "balances sum to {} but total supply is {}",
                    balance_sum, snapshot.accumulator.total_supply
                ),
            });
        }

        check_dividend_totals(&snapshot.accumulator)?;

        let mut state = Self::with_capacity(snapshot.accounts.len());
        state.accumulator = snapshot.accumulator;
        for (address, account) in snapshot.accounts {
            if state.accounts.contains_key(&address) {
                return Err(StateError::InvalidSnapshot {
                    reason: format!("duplicate account {}", dividend_core::short_hex(&address)),
                });
            }
            if account.dividend_entry > state.accumulator.dividend_per_unit {
                return Err(invalid_snapshot(format!(
                    "account {} entered the index above its current value",
                    dividend_core::short_hex(&address)
                )));
            }
            state.holders.sync(&address, account.is_holder());
            state.accounts.insert(address, account);
        }
        for ((owner, spender), amount) in snapshot.allowances {
            state.set_allowance(&owner, &spender, amount);
        }

        Ok(state)
    }
}

fn invalid_snapshot(reason: String) -> StateError {
    StateError::InvalidSnapshot { reason }
}

/// Dividend totals must fit the fixed-point integer bits, withdrawals must
/// not exceed deposits, and the index cannot exceed `total_dividends << 128`
/// (each deposit raises it by at most `amount << 128`).
fn check_dividend_totals(acc: &DividendAccumulator) -> StateResult<()> {
    if !acc.total_dividends.fits_fixed_point() {
        return Err(invalid_snapshot(format!(
            "total dividends {} exceed 128 bits",
            acc.total_dividends
        )));
    }
    if acc.total_withdrawn > acc.total_dividends {
        return Err(invalid_snapshot(format!(
            "withdrawn {} exceeds deposited {}",
            acc.total_withdrawn, acc.total_dividends
        )));
    }
    if acc.dividend_per_unit > acc.total_dividends << FIXED_POINT_FRACTIONAL_BITS {
        return Err(invalid_snapshot(format!(
            "dividend index is not backed by {} deposited",
            acc.total_dividends
        )));
    }
    Ok(())
}

impl LedgerReader for LedgerState {
    fn get_account(&self, address: &Address) -> Option<&Account> {
        self.accounts.get(address)
    }

    fn get_accumulator(&self) -> &DividendAccumulator {
        &self.accumulator
    }

    fn get_allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_else(U256::zero)
    }

    fn holders(&self) -> &[Address] {
        self.holders.as_slice()
    }
}

impl LedgerWriter for LedgerState {
    fn update_account<F>(&mut self, address: &Address, f: F)
    where
        F: FnOnce(&mut Account),
    {
        let account = self.accounts.entry(*address).or_default();
        f(account);
        let is_holder = account.is_holder();
        self.holders.sync(address, is_holder);
    }

    fn restore_account(&mut self, address: &Address, account: Option<Account>) {
        match account {
            Some(account) => {
                self.holders.sync(address, account.is_holder());
                self.accounts.insert(*address, account);
            }
            None => {
                self.holders.remove(address);
                self.accounts.remove(address);
            }
        }
    }

    fn update_accumulator<F>(&mut self, f: F)
    where
        F: FnOnce(&mut DividendAccumulator),
    {
        f(&mut self.accumulator);
    }

    fn set_allowance(&mut self, owner: &Address, spender: &Address, amount: U256) {
        if amount.is_zero() {
            self.allowances.remove(&(*owner, *spender));
        } else {
            self.allowances.insert((*owner, *spender), amount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = LedgerState::new();
        assert_eq!(state.account_count(), 0);
        assert_eq!(state.holder_count(), 0);
        assert!(state.total_supply().is_zero());
    }

    #[test]
    fn test_update_account_creates_and_tracks_holder() {
        let mut state = LedgerState::new();
        let address = [1u8; 20];

        assert!(state.get_account(&address).is_none());
        state.update_account(&address, |account| {
            account.balance = U256::from(10u64);
        });

        assert_eq!(state.balance_of(&address), U256::from(10u64));
        assert_eq!(state.holders(), &[address]);

        state.update_account(&address, |account| {
            account.balance = U256::zero();
        });
        assert_eq!(state.holder_count(), 0);
        // The record itself survives with a zero balance
        assert!(state.get_account(&address).is_some());
    }

    #[test]
    fn test_restore_account() {
        let mut state = LedgerState::new();
        let address = [2u8; 20];
        state.update_account(&address, |account| account.balance = U256::from(3u64));

        state.restore_account(&address, None);
        assert!(state.get_account(&address).is_none());
        assert_eq!(state.holder_count(), 0);

        let restored = Account {
            balance: U256::from(8u64),
            ..Account::new()
        };
        state.restore_account(&address, Some(restored));
        assert_eq!(state.balance_of(&address), U256::from(8u64));
        assert_eq!(state.holder_count(), 1);
    }

    #[test]
    fn test_allowance_zero_clears() {
        let mut state = LedgerState::new();
        let owner = [1u8; 20];
        let spender = [2u8; 20];

        assert!(state.get_allowance(&owner, &spender).is_zero());
        state.set_allowance(&owner, &spender, U256::from(50u64));
        assert_eq!(state.get_allowance(&owner, &spender), U256::from(50u64));
        state.set_allowance(&owner, &spender, U256::zero());
        assert!(state.get_allowance(&owner, &spender).is_zero());
        assert!(state.to_snapshot().allowances.is_empty());
    }

    #[test]
    fn test_snapshot_restores_holders() {
        let mut state = LedgerState::new();
        state.update_account(&[1u8; 20], |a| a.balance = U256::from(4u64));
        state.update_account(&[2u8; 20], |a| a.balance = U256::from(6u64));
        state.update_account(&[3u8; 20], |a| a.withdrawn = U256::from(1u64));
        state.update_accumulator(|acc| acc.total_supply = U256::from(10u64));
        state.set_allowance(&[1u8; 20], &[2u8; 20], U256::from(2u64));

        let restored = LedgerState::from_snapshot(state.to_snapshot()).unwrap();
        assert_eq!(restored.account_count(), 3);
        assert_eq!(restored.holder_count(), 2);
        assert!(restored.holder_set().contains(&[1u8; 20]));
        assert!(!restored.holder_set().contains(&[3u8; 20]));
        assert_eq!(restored.total_supply(), U256::from(10u64));
        assert_eq!(restored.get_allowance(&[1u8; 20], &[2u8; 20]), U256::from(2u64));
    }

    #[test]
    fn test_snapshot_supply_mismatch_rejected() {
        let mut state = LedgerState::new();
        state.update_account(&[1u8; 20], |a| a.balance = U256::from(4u64));
        state.update_accumulator(|acc| acc.total_supply = U256::from(5u64));

        let result = LedgerState::from_snapshot(state.to_snapshot());
        assert!(matches!(result, Err(StateError::InvalidSnapshot { .. })));
    }

    fn funded_snapshot() -> LedgerSnapshot {
        let mut state = LedgerState::new();
        state.update_account(&[1u8; 20], |a| a.balance = U256::from(4u64));
        state.update_accumulator(|acc| {
            acc.total_supply = U256::from(4u64);
            acc.total_dividends = U256::from(8u64);
            acc.dividend_per_unit = U256::from(2u64) << 128;
        });
        state.to_snapshot()
    }

    #[test]
    fn test_snapshot_with_dividends_accepted() {
        let restored = LedgerState::from_snapshot(funded_snapshot()).unwrap();
        assert_eq!(restored.get_accumulator().total_dividends, U256::from(8u64));
    }

    #[test]
    fn test_snapshot_unbacked_index_rejected() {
        let mut snapshot = funded_snapshot();
        snapshot.accumulator.total_dividends = U256::zero();
        snapshot.accumulator.dividend_per_unit = U256::max_value();
        let result = LedgerState::from_snapshot(snapshot);
        assert!(matches!(result, Err(StateError::InvalidSnapshot { .. })));
    }

    #[test]
    fn test_snapshot_oversized_dividends_rejected() {
        let mut snapshot = funded_snapshot();
        snapshot.accumulator.total_dividends = U256::from(1u64) << 128;
        let result = LedgerState::from_snapshot(snapshot);
        assert!(matches!(result, Err(StateError::InvalidSnapshot { .. })));
    }

    #[test]
    fn test_snapshot_overdrawn_rejected() {
        let mut snapshot = funded_snapshot();
        snapshot.accumulator.total_withdrawn = U256::from(9u64);
        let result = LedgerState::from_snapshot(snapshot);
        assert!(matches!(result, Err(StateError::InvalidSnapshot { .. })));
    }

    #[test]
    fn test_snapshot_entry_above_index_rejected() {
        let mut snapshot = funded_snapshot();
        snapshot.accounts[0].1.dividend_entry = U256::from(3u64) << 128;
        let result = LedgerState::from_snapshot(snapshot);
        assert!(matches!(result, Err(StateError::InvalidSnapshot { .. })));
    }

    #[test]
    fn test_snapshot_version_rejected() {
        let mut snapshot = LedgerState::new().to_snapshot();
        snapshot.version = SNAPSHOT_VERSION + 1;
        let result = LedgerState::from_snapshot(snapshot);
        assert!(matches!(result, Err(StateError::InvalidSnapshot { .. })));
    }
}
