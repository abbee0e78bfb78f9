//! Ledger storage traits.
//!
//! These traits abstract over the backing store so the operation handlers
//! can run against the in-memory [`LedgerState`](super::LedgerState) or
//! against a [`JournaledState`](super::JournaledState) that can undo them.

use dividend_core::{Account, Address, DividendAccumulator, U256};

/// Read access to ledger state.
pub trait LedgerReader {
    // === Account Operations ===

    /// Get an account by address.
    fn get_account(&self, address: &Address) -> Option<&Account>;

    /// Balance of an account (zero if it was never touched).
    fn balance_of(&self, address: &Address) -> U256 {
        self.get_account(address)
            .map(|account| account.balance)
            .unwrap_or_else(U256::zero)
    }

    // === Accumulator Operations ===

    /// Get the global dividend accumulator.
    fn get_accumulator(&self) -> &DividendAccumulator;

    /// Total units outstanding.
    fn total_supply(&self) -> U256 {
        self.get_accumulator().total_supply
    }

    // === Allowance Operations ===

    /// Units `spender` may move on behalf of `owner`.
    fn get_allowance(&self, owner: &Address, spender: &Address) -> U256;

    // === Holder Operations ===

    /// Accounts with a nonzero balance, in unspecified order.
    fn holders(&self) -> &[Address];

    /// Number of accounts with a nonzero balance.
    fn holder_count(&self) -> usize {
        self.holders().len()
    }
}

/// Mutable access to ledger state.
///
/// Implementations keep the holder index in step with balances: after any
/// account write, the account is a holder exactly when its balance is
/// nonzero.
pub trait LedgerWriter: LedgerReader {
    // === Account Mutations ===

    /// Update an account, creating it first if needed.
    fn update_account<F>(&mut self, address: &Address, f: F)
    where
        F: FnOnce(&mut Account);

    /// Replace an account record wholesale (`None` removes it).
    ///
    /// Used when undoing a failed operation.
    fn restore_account(&mut self, address: &Address, account: Option<Account>);

    // === Accumulator Mutations ===

    /// Update the global dividend accumulator.
    fn update_accumulator<F>(&mut self, f: F)
    where
        F: FnOnce(&mut DividendAccumulator);

    // === Allowance Mutations ===

    /// Set an allowance (zero clears it).
    fn set_allowance(&mut self, owner: &Address, spender: &Address, amount: U256);
}
