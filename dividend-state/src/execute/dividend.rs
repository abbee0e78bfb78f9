//! Dividend transaction handlers.
//!
//! Handles RecordDividend and WithdrawDividends.

use dividend_core::{Address, U256};

use crate::accumulator::{distribute_dividend, take_owed_dividends};
use crate::custody::ValueCustody;
use crate::error::{StateError, StateResult};
use crate::state::LedgerWriter;

/// Execute a RecordDividend.
///
/// Raises the dividend-per-unit index so every current holder is owed its
/// pro-rata share, then hands the deposited value to custody. No account
/// is touched.
///
/// # Validation
/// - Amount must be > 0
/// - Total supply must be > 0
/// - Custody must accept the deposit
pub fn execute_record_dividend<S: LedgerWriter, C: ValueCustody>(
    state: &mut S,
    custody: &mut C,
    amount: U256,
) -> StateResult<()> {
    distribute_dividend(state, amount)?;

    custody
        .receive(amount)
        .map_err(|e| StateError::DepositRejected {
            amount,
            reason: e.to_string(),
        })
}

/// Execute a WithdrawDividends.
///
/// Pays out everything currently owed to `account` and returns the amount.
/// With nothing owed this succeeds, returns zero and makes no custody call.
///
/// # Validation
/// - Custody must complete the payment
pub fn execute_withdraw_dividends<S: LedgerWriter, C: ValueCustody>(
    state: &mut S,
    custody: &mut C,
    account: &Address,
) -> StateResult<U256> {
    let amount = take_owed_dividends(state, account)?;
    if amount.is_zero() {
        return Ok(amount);
    }

    custody
        .pay(account, amount)
        .map_err(|e| StateError::PayoutFailure {
            account: *account,
            amount,
            reason: e.to_string(),
        })?;

    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::owed_dividends;
    use crate::custody::VaultCustody;
    use crate::execute::token::execute_mint;
    use crate::state::LedgerState;

    #[test]
    fn test_record_then_withdraw() {
        let mut state = LedgerState::new();
        let mut vault = VaultCustody::new();
        let a = [1u8; 20];
        execute_mint(&mut state, &mut vault, &a, U256::from(10u64)).unwrap();

        execute_record_dividend(&mut state, &mut vault, U256::from(30u64)).unwrap();
        assert_eq!(vault.reserves(), U256::from(40u64));

        let paid = execute_withdraw_dividends(&mut state, &mut vault, &a).unwrap();
        assert_eq!(paid, U256::from(30u64));
        assert_eq!(vault.paid_to(&a), U256::from(30u64));
        assert!(owed_dividends(&state, &a).unwrap().is_zero());
    }

    #[test]
    fn test_withdraw_nothing_owed() {
        let mut state = LedgerState::new();
        let mut vault = VaultCustody::new();
        let a = [1u8; 20];
        // A frozen payee proves no custody call is made
        vault.freeze(a);

        let paid = execute_withdraw_dividends(&mut state, &mut vault, &a).unwrap();
        assert!(paid.is_zero());
    }

    #[test]
    fn test_record_without_supply() {
        let mut state = LedgerState::new();
        let mut vault = VaultCustody::new();
        let result = execute_record_dividend(&mut state, &mut vault, U256::from(1u64));
        assert_eq!(result, Err(StateError::NoSupply));
        assert!(vault.reserves().is_zero());
    }

    #[test]
    fn test_withdraw_to_frozen_payee_fails() {
        let mut state = LedgerState::new();
        let mut vault = VaultCustody::new();
        let a = [1u8; 20];
        execute_mint(&mut state, &mut vault, &a, U256::from(1u64)).unwrap();
        execute_record_dividend(&mut state, &mut vault, U256::from(1u64)).unwrap();
        vault.freeze(a);

        let result = execute_withdraw_dividends(&mut state, &mut vault, &a);
        assert!(matches!(result, Err(StateError::PayoutFailure { .. })));
    }
}
