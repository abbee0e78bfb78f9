//! Token transaction handlers.
//!
//! Handles Mint, Burn, Transfer, Approve and TransferFrom. Every handler
//! validates first, settles the accounts whose balance is about to change,
//! writes, and leaves the single custody call for last.

use dividend_core::{Address, U256};

use crate::accumulator::settle_account;
use crate::custody::ValueCustody;
use crate::error::{StateError, StateResult};
use crate::state::{LedgerReader, LedgerWriter};

/// Check that `account` can part with `amount` units.
fn require_spendable<S: LedgerReader>(state: &S, account: &Address, amount: U256) -> StateResult<U256> {
    if amount.is_zero() {
        return Err(StateError::InvalidAmount);
    }
    let available = state.balance_of(account);
    if available < amount {
        return Err(StateError::InsufficientBalance {
            account: *account,
            available,
            requested: amount,
        });
    }
    Ok(available)
}

/// Execute a Mint.
///
/// Settles `account`, credits `amount` units and raises total supply by the
/// same amount, then hands the deposited value to custody.
///
/// # Validation
/// - Amount must be > 0
/// - Custody must accept the deposit
pub fn execute_mint<S: LedgerWriter, C: ValueCustody>(
    state: &mut S,
    custody: &mut C,
    account: &Address,
    amount: U256,
) -> StateResult<()> {
    if amount.is_zero() {
        return Err(StateError::InvalidAmount);
    }

    let balance = state
        .balance_of(account)
        .checked_add(amount)
        .ok_or(StateError::ArithmeticOverflow)?;
    let total_supply = state
        .total_supply()
        .checked_add(amount)
        .ok_or(StateError::ArithmeticOverflow)?;

    settle_account(state, account)?;
    state.update_account(account, |a| a.balance = balance);
    state.update_accumulator(|acc| acc.total_supply = total_supply);

    custody
        .receive(amount)
        .map_err(|e| StateError::DepositRejected {
            amount,
            reason: e.to_string(),
        })
}

/// Execute a Burn.
///
/// Settles `account` so dividends already earned survive the shrinking
/// balance, debits `amount` units and total supply, then pays the
/// redeemed value out. Returns the amount paid.
///
/// # Validation
/// - Amount must be > 0
/// - Amount must not exceed the account's balance
/// - Custody must complete the payment
pub fn execute_burn<S: LedgerWriter, C: ValueCustody>(
    state: &mut S,
    custody: &mut C,
    account: &Address,
    amount: U256,
) -> StateResult<U256> {
    let available = require_spendable(state, account, amount)?;

    settle_account(state, account)?;
    state.update_account(account, |a| a.balance = available - amount);
    state.update_accumulator(|acc| acc.total_supply = acc.total_supply - amount);

    custody
        .pay(account, amount)
        .map_err(|e| StateError::PayoutFailure {
            account: *account,
            amount,
            reason: e.to_string(),
        })?;

    Ok(amount)
}

/// Execute a Transfer.
///
/// Settles both sides before moving units so each keeps exactly what it
/// had earned. A transfer to self is validated and then does nothing.
///
/// # Validation
/// - Amount must be > 0
/// - Amount must not exceed the sender's balance
pub fn execute_transfer<S: LedgerWriter>(
    state: &mut S,
    from: &Address,
    to: &Address,
    amount: U256,
) -> StateResult<()> {
    let available = require_spendable(state, from, amount)?;
    if from == to {
        return Ok(());
    }

    let to_balance = state
        .balance_of(to)
        .checked_add(amount)
        .ok_or(StateError::ArithmeticOverflow)?;

    settle_account(state, from)?;
    settle_account(state, to)?;
    state.update_account(from, |a| a.balance = available - amount);
    state.update_account(to, |a| a.balance = to_balance);

    Ok(())
}

/// Execute an Approve.
///
/// Replaces the allowance `owner` grants `spender`. Zero revokes it.
pub fn execute_approve<S: LedgerWriter>(
    state: &mut S,
    owner: &Address,
    spender: &Address,
    amount: U256,
) -> StateResult<()> {
    state.set_allowance(owner, spender, amount);
    Ok(())
}

/// Execute a TransferFrom.
///
/// Spends `spender`'s allowance over `from`, then transfers. An allowance
/// of `U256::max_value()` is unlimited and is not decremented.
///
/// # Validation
/// - Amount must be > 0
/// - Amount must not exceed the allowance
/// - Amount must not exceed the sender's balance
pub fn execute_transfer_from<S: LedgerWriter>(
    state: &mut S,
    spender: &Address,
    from: &Address,
    to: &Address,
    amount: U256,
) -> StateResult<()> {
    if amount.is_zero() {
        return Err(StateError::InvalidAmount);
    }

    let allowance = state.get_allowance(from, spender);
    if allowance < amount {
        return Err(StateError::InsufficientAllowance {
            owner: *from,
            spender: *spender,
            available: allowance,
            requested: amount,
        });
    }
    if allowance != U256::max_value() {
        state.set_allowance(from, spender, allowance - amount);
    }

    execute_transfer(state, from, to, amount)
}
