//! Undo journal for all-or-nothing operations.
//!
//! [`JournaledState`] wraps a mutable store and records the pre-image of
//! every entry the first time it is written. Committing drops the journal;
//! rolling back writes the pre-images back. Only touched entries are
//! recorded, so the cost is proportional to the operation, not the ledger.

use std::collections::HashMap;

use dividend_core::{Account, Address, DividendAccumulator, U256};

use super::store::{LedgerReader, LedgerWriter};

/// A store wrapper that can undo everything written through it.
pub struct JournaledState<'a, S: LedgerWriter> {
    inner: &'a mut S,
    accounts: HashMap<Address, Option<Account>>,
    accumulator: Option<DividendAccumulator>,
    allowances: HashMap<(Address, Address), U256>,
}

impl<'a, S: LedgerWriter> JournaledState<'a, S> {
    /// Start journaling writes to `inner`.
    pub fn new(inner: &'a mut S) -> Self {
        Self {
            inner,
            accounts: HashMap::new(),
            accumulator: None,
            allowances: HashMap::new(),
        }
    }

    /// Number of distinct entries written so far.
    pub fn touched(&self) -> usize {
        self.accounts.len() + self.allowances.len() + usize::from(self.accumulator.is_some())
    }

    /// Keep every write.
    pub fn commit(self) {}

    /// Undo every write made through this journal.
    pub fn rollback(self) {
        let JournaledState {
            inner,
            accounts,
            accumulator,
            allowances,
        } = self;

        for (address, prior) in accounts {
            inner.restore_account(&address, prior);
        }
        if let Some(prior) = accumulator {
            inner.update_accumulator(|acc| *acc = prior);
        }
        for ((owner, spender), prior) in allowances {
            inner.set_allowance(&owner, &spender, prior);
        }
    }
}

impl<S: LedgerWriter> LedgerReader for JournaledState<'_, S> {
    fn get_account(&self, address: &Address) -> Option<&Account> {
        self.inner.get_account(address)
    }

    fn get_accumulator(&self) -> &DividendAccumulator {
        self.inner.get_accumulator()
    }

    fn get_allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.inner.get_allowance(owner, spender)
    }

    fn holders(&self) -> &[Address] {
        self.inner.holders()
    }
}

impl<S: LedgerWriter> LedgerWriter for JournaledState<'_, S> {
    fn update_account<F>(&mut self, address: &Address, f: F)
    where
        F: FnOnce(&mut Account),
    {
        if !self.accounts.contains_key(address) {
            let prior = self.inner.get_account(address).cloned();
            self.accounts.insert(*address, prior);
        }
        self.inner.update_account(address, f);
    }

    fn restore_account(&mut self, address: &Address, account: Option<Account>) {
        if !self.accounts.contains_key(address) {
            let prior = self.inner.get_account(address).cloned();
            self.accounts.insert(*address, prior);
        }
        self.inner.restore_account(address, account);
    }

    fn update_accumulator<F>(&mut self, f: F)
    where
        F: FnOnce(&mut DividendAccumulator),
    {
        if self.accumulator.is_none() {
            self.accumulator = Some(self.inner.get_accumulator().clone());
        }
        self.inner.update_accumulator(f);
    }

    fn set_allowance(&mut self, owner: &Address, spender: &Address, amount: U256) {
        let key = (*owner, *spender);
        if !self.allowances.contains_key(&key) {
            let prior = self.inner.get_allowance(owner, spender);
            self.allowances.insert(key, prior);
        }
        self.inner.set_allowance(owner, spender, amount);
    }
}
