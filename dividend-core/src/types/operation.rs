//! Ledger operations.

use serde::{Deserialize, Serialize};

use super::address::Address;
use crate::u256::U256;

/// Every mutation the ledger accepts.
///
/// Operations are applied one at a time, in order. Each either applies in
/// full or fails without leaving any trace in the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Deposit `amount` of value and mint the same number of units to `account`.
    Mint {
        /// Receiving account.
        account: Address,
        /// Units to mint (equal to the value deposited).
        amount: U256,
    },

    /// Burn `amount` units from `account` and pay the same value back.
    Burn {
        /// Account whose units are burned.
        account: Address,
        /// Units to burn.
        amount: U256,
    },

    /// Move units between accounts.
    Transfer {
        /// Sending account.
        from: Address,
        /// Receiving account.
        to: Address,
        /// Units to move.
        amount: U256,
    },

    /// Set the number of units `spender` may move on behalf of `owner`.
    Approve {
        /// Account granting the allowance.
        owner: Address,
        /// Account allowed to spend.
        spender: Address,
        /// New allowance (replaces the previous one).
        amount: U256,
    },

    /// Move units on behalf of `from`, spending `spender`'s allowance.
    TransferFrom {
        /// Account spending the allowance.
        spender: Address,
        /// Account whose units are moved.
        from: Address,
        /// Receiving account.
        to: Address,
        /// Units to move.
        amount: U256,
    },

    /// Deposit `amount` of dividend value for all current holders.
    RecordDividend {
        /// Dividend value deposited.
        amount: U256,
    },

    /// Pay out everything currently owed to `account`.
    WithdrawDividends {
        /// Account withdrawing.
        account: Address,
    },
}

impl Operation {
    /// Short name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Mint { .. } => "mint",
            Operation::Burn { .. } => "burn",
            Operation::Transfer { .. } => "transfer",
            Operation::Approve { .. } => "approve",
            Operation::TransferFrom { .. } => "transfer_from",
            Operation::RecordDividend { .. } => "record_dividend",
            Operation::WithdrawDividends { .. } => "withdraw_dividends",
        }
    }
}
