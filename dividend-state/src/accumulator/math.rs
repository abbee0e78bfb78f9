//! Accumulator math operations.
//!
//! Implements O(1) dividend distribution using a dividend-per-unit index
//! with 128.128 fixed-point arithmetic.
//!
//! A deposit only raises the global index. Each account remembers the
//! index at its last settlement (`dividend_entry`) plus whatever it had
//! accrued up to then (`settled_dividends`). What it is owed at any moment:
//!
//! ```text
//! owed = settled_dividends + balance * (global - entry) >> 128
//! ```
//!
//! Settling before every balance change keeps `owed` fixed across that
//! change, so units only earn dividends deposited while they are held.

use dividend_core::{accrued_dividend, dividend_per_unit_increment, Account, Address, U256};

use crate::error::{StateError, StateResult};
use crate::state::{LedgerReader, LedgerWriter};

/// Owed amount for an account record against index `global`.
fn owed_for(account: &Account, global: U256) -> StateResult<U256> {
    let accrued = accrued_dividend(account.balance, global, account.dividend_entry)
        .ok_or(StateError::ArithmeticOverflow)?;
    account
        .settled_dividends
        .checked_add(accrued)
        .ok_or(StateError::ArithmeticOverflow)
}

/// Dividend currently owed to an account and not yet withdrawn.
///
/// Accounts that were never touched are owed nothing.
pub fn owed_dividends<S: LedgerReader>(state: &S, address: &Address) -> StateResult<U256> {
    let global = state.get_accumulator().dividend_per_unit;
    match state.get_account(address) {
        Some(account) => owed_for(account, global),
        None => Ok(U256::zero()),
    }
}

/// Everything an account has ever earned: owed plus already withdrawn.
pub fn accumulative_dividend_of<S: LedgerReader>(state: &S, address: &Address) -> StateResult<U256> {
    let owed = owed_dividends(state, address)?;
    let withdrawn = state
        .get_account(address)
        .map(|account| account.withdrawn)
        .unwrap_or_else(U256::zero);
    owed.checked_add(withdrawn).ok_or(StateError::ArithmeticOverflow)
}

/// Settle an account against the current index.
///
/// Folds the accrued amount into `settled_dividends` and moves
/// `dividend_entry` up to the current index. `owed` is unchanged. Must run
/// before every change to the account's balance; creates the account if
/// it does not exist yet.
pub fn settle_account<S: LedgerWriter>(state: &mut S, address: &Address) -> StateResult<()> {
    let global = state.get_accumulator().dividend_per_unit;
    let settled = match state.get_account(address) {
        Some(account) => owed_for(account, global)?,
        None => U256::zero(),
    };

    state.update_account(address, |account| {
        account.settled_dividends = settled;
        account.dividend_entry = global;
    });

    Ok(())
}

/// Spread a dividend deposit over the current supply.
///
/// `dividend_per_unit += (amount << 128) / total_supply`, truncating. The
/// truncated remainder is never claimable by anyone.
///
/// # Errors
/// - [`StateError::EmptyDividend`] if `amount` is zero
/// - [`StateError::NoSupply`] if no units are outstanding
/// - [`StateError::ArithmeticOverflow`] if cumulative deposits would leave
///   the 128 integer bits of the fixed-point index
pub fn distribute_dividend<S: LedgerWriter>(state: &mut S, amount: U256) -> StateResult<()> {
    if amount.is_zero() {
        return Err(StateError::EmptyDividend);
    }

    let acc = state.get_accumulator();
    if !acc.has_supply() {
        return Err(StateError::NoSupply);
    }

    // Capping cumulative deposits at 2^128 keeps every
    // balance * (global - entry) product inside 256 bits.
    let total_dividends = acc
        .total_dividends
        .checked_add(amount)
        .filter(|total| total.fits_fixed_point())
        .ok_or(StateError::ArithmeticOverflow)?;

    let increment = dividend_per_unit_increment(amount, acc.total_supply)
        .ok_or(StateError::ArithmeticOverflow)?;
    let dividend_per_unit = acc
        .dividend_per_unit
        .checked_add(increment)
        .ok_or(StateError::ArithmeticOverflow)?;

    state.update_accumulator(|acc| {
        acc.dividend_per_unit = dividend_per_unit;
        acc.total_dividends = total_dividends;
    });

    Ok(())
}

/// Mark everything owed to an account as withdrawn and return the amount.
///
/// Returns zero without touching state when nothing is owed. The caller
/// is responsible for actually paying the amount out.
pub fn take_owed_dividends<S: LedgerWriter>(state: &mut S, address: &Address) -> StateResult<U256> {
    let owed = owed_dividends(state, address)?;
    if owed.is_zero() {
        return Ok(U256::zero());
    }

    let global = state.get_accumulator().dividend_per_unit;
    let total_withdrawn = state
        .get_accumulator()
        .total_withdrawn
        .checked_add(owed)
        .ok_or(StateError::ArithmeticOverflow)?;
    let withdrawn = state
        .get_account(address)
        .map(|account| account.withdrawn)
        .unwrap_or_else(U256::zero)
        .checked_add(owed)
        .ok_or(StateError::ArithmeticOverflow)?;

    state.update_account(address, |account| {
        account.settled_dividends = U256::zero();
        account.dividend_entry = global;
        account.withdrawn = withdrawn;
    });
    state.update_accumulator(|acc| {
        acc.total_withdrawn = total_withdrawn;
    });

    Ok(owed)
}
