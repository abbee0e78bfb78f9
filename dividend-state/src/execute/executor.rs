//! Operation executor - main entry point for ledger mutations.
//!
//! [`apply_operation`] runs one [`Operation`] against the ledger state
//! through an undo journal. If the handler fails at any point, including
//! the final custody call, every write is rolled back.

use dividend_core::{short_hex, Operation, U256};
use tracing::trace;

use crate::custody::ValueCustody;
use crate::error::StateResult;
use crate::state::{JournaledState, LedgerWriter};

use super::dividend::{execute_record_dividend, execute_withdraw_dividends};
use super::token::{
    execute_approve, execute_burn, execute_mint, execute_transfer, execute_transfer_from,
};

/// Apply an operation to the ledger state.
///
/// # Arguments
/// - `state`: Mutable ledger state
/// - `custody`: Value custodian receiving deposits and making payouts
/// - `op`: The operation to apply
///
/// # Returns
/// - `Ok(paid)` with the value paid out by custody (zero for operations
///   that pay nothing)
/// - `Err(StateError)` if validation or execution failed; the state is
///   then exactly as it was before the call
pub fn apply_operation<S: LedgerWriter, C: ValueCustody>(
    state: &mut S,
    custody: &mut C,
    op: &Operation,
) -> StateResult<U256> {
    let mut journal = JournaledState::new(state);

    match dispatch(&mut journal, custody, op) {
        Ok(paid) => {
            trace!(op = op.kind(), touched = journal.touched(), "operation committed");
            journal.commit();
            Ok(paid)
        }
        Err(e) => {
            journal.rollback();
            Err(e)
        }
    }
}

fn dispatch<S: LedgerWriter, C: ValueCustody>(
    state: &mut S,
    custody: &mut C,
    op: &Operation,
) -> StateResult<U256> {
    match op {
        Operation::Mint { account, amount } => {
            trace!(account = %short_hex(account), %amount, "mint");
            execute_mint(state, custody, account, *amount)?;
            Ok(U256::zero())
        }

        Operation::Burn { account, amount } => {
            trace!(account = %short_hex(account), %amount, "burn");
            execute_burn(state, custody, account, *amount)
        }

        Operation::Transfer { from, to, amount } => {
            execute_transfer(state, from, to, *amount)?;
            Ok(U256::zero())
        }

        Operation::Approve {
            owner,
            spender,
            amount,
        } => {
            execute_approve(state, owner, spender, *amount)?;
            Ok(U256::zero())
        }

        Operation::TransferFrom {
            spender,
            from,
            to,
            amount,
        } => {
            execute_transfer_from(state, spender, from, to, *amount)?;
            Ok(U256::zero())
        }

        Operation::RecordDividend { amount } => {
            execute_record_dividend(state, custody, *amount)?;
            Ok(U256::zero())
        }

        Operation::WithdrawDividends { account } => {
            execute_withdraw_dividends(state, custody, account)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::owed_dividends;
    use crate::custody::VaultCustody;
    use crate::error::StateError;
    use crate::state::{LedgerReader, LedgerState};

    fn mint_op(tag: u8, amount: u64) -> Operation {
        Operation::Mint {
            account: [tag; 20],
            amount: U256::from(amount),
        }
    }

    #[test]
    fn test_apply_mint() {
        let mut state = LedgerState::new();
        let mut vault = VaultCustody::new();

        let paid = apply_operation(&mut state, &mut vault, &mint_op(1, 50)).unwrap();

        assert!(paid.is_zero());
        assert_eq!(state.balance_of(&[1u8; 20]), U256::from(50u64));
    }

    #[test]
    fn test_refused_mint_leaves_no_trace() {
        let mut state = LedgerState::new();
        let mut vault = VaultCustody::new();
        vault.set_refuse_deposits(true);

        let result = apply_operation(&mut state, &mut vault, &mint_op(1, 50));

        assert!(matches!(result, Err(StateError::DepositRejected { .. })));
        assert_eq!(state.account_count(), 0);
        assert_eq!(state.holder_count(), 0);
        assert!(state.total_supply().is_zero());
    }

    #[test]
    fn test_failed_burn_payout_rolls_back() {
        let mut state = LedgerState::new();
        let mut vault = VaultCustody::new();
        let a = [1u8; 20];
        apply_operation(&mut state, &mut vault, &mint_op(1, 10)).unwrap();
        apply_operation(&mut state, &mut vault, &Operation::RecordDividend { amount: U256::from(5u64) }).unwrap();
        let before = state.get_account(&a).cloned();

        vault.freeze(a);
        let burn = Operation::Burn { account: a, amount: U256::from(10u64) };
        let result = apply_operation(&mut state, &mut vault, &burn);

        assert!(matches!(result, Err(StateError::PayoutFailure { .. })));
        assert_eq!(state.get_account(&a).cloned(), before);
        assert_eq!(state.total_supply(), U256::from(10u64));
        assert_eq!(state.holders(), &[a]);
        assert_eq!(owed_dividends(&state, &a).unwrap(), U256::from(5u64));
    }

    #[test]
    fn test_failed_withdraw_rolls_back() {
        let mut state = LedgerState::new();
        let mut vault = VaultCustody::new();
        let a = [1u8; 20];
        apply_operation(&mut state, &mut vault, &mint_op(1, 10)).unwrap();
        apply_operation(&mut state, &mut vault, &Operation::RecordDividend { amount: U256::from(5u64) }).unwrap();

        vault.freeze(a);
        let result = apply_operation(&mut state, &mut vault, &Operation::WithdrawDividends { account: a });

        assert!(matches!(result, Err(StateError::PayoutFailure { .. })));
        assert_eq!(owed_dividends(&state, &a).unwrap(), U256::from(5u64));
        assert!(state.get_accumulator().total_withdrawn.is_zero());

        vault.unfreeze(&a);
        let paid = apply_operation(&mut state, &mut vault, &Operation::WithdrawDividends { account: a }).unwrap();
        assert_eq!(paid, U256::from(5u64));
    }

    #[test]
    fn test_failed_transfer_from_keeps_allowance() {
        let mut state = LedgerState::new();
        let mut vault = VaultCustody::new();
        let owner = [1u8; 20];
        let spender = [2u8; 20];
        apply_operation(&mut state, &mut vault, &mint_op(1, 5)).unwrap();
        let approve = Operation::Approve { owner, spender, amount: U256::from(100u64) };
        apply_operation(&mut state, &mut vault, &approve).unwrap();

        // Allowance is spent before the balance check fails
        let op = Operation::TransferFrom {
            spender,
            from: owner,
            to: spender,
            amount: U256::from(50u64),
        };
        let result = apply_operation(&mut state, &mut vault, &op);

        assert!(matches!(result, Err(StateError::InsufficientBalance { .. })));
        assert_eq!(state.get_allowance(&owner, &spender), U256::from(100u64));
    }
}
