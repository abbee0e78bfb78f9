//! Error types for ledger operations.

use dividend_core::{Address, U256};

/// All validation and execution errors for ledger operations.
///
/// Every error leaves the ledger exactly as it was before the operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateError {
    // === Amount Errors ===
    /// Amount must be greater than zero.
    InvalidAmount,
    /// Burn or transfer exceeds the account's balance.
    InsufficientBalance {
        account: Address,
        available: U256,
        requested: U256,
    },
    /// Transfer-from exceeds the spender's allowance.
    InsufficientAllowance {
        owner: Address,
        spender: Address,
        available: U256,
        requested: U256,
    },

    // === Dividend Errors ===
    /// Dividend deposit is zero.
    EmptyDividend,
    /// No units outstanding to distribute a dividend against.
    NoSupply,

    // === Custody Errors ===
    /// The custody layer refused to pay an account.
    PayoutFailure {
        account: Address,
        amount: U256,
        reason: String,
    },
    /// The custody layer refused an incoming deposit.
    DepositRejected { amount: U256, reason: String },

    // === General Errors ===
    /// Arithmetic overflow in calculation.
    ArithmeticOverflow,
    /// A snapshot does not describe a consistent ledger.
    InvalidSnapshot { reason: String },
}

impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateError::InvalidAmount => write!(f, "amount must be greater than zero"),
            StateError::InsufficientBalance {
                account,
                available,
                requested,
            } => {
                write!(
                    f,
                    "insufficient balance for {:?}: available {}, requested {}",
                    &account[..4],
                    available,
                    requested
                )
            }
            StateError::InsufficientAllowance {
                owner,
                spender,
                available,
                requested,
            } => {
                write!(
                    f,
                    "insufficient allowance from {:?} to {:?}: available {}, requested {}",
                    &owner[..4],
                    &spender[..4],
                    available,
                    requested
                )
            }

            StateError::EmptyDividend => write!(f, "empty dividend"),
            StateError::NoSupply => write!(f, "no supply to distribute dividend against"),

            StateError::PayoutFailure {
                account,
                amount,
                reason,
            } => {
                write!(
                    f,
                    "payout of {} to {:?} failed: {}",
                    amount,
                    &account[..4],
                    reason
                )
            }
            StateError::DepositRejected { amount, reason } => {
                write!(f, "deposit of {} rejected: {}", amount, reason)
            }

            StateError::ArithmeticOverflow => write!(f, "arithmetic overflow"),
            StateError::InvalidSnapshot { reason } => write!(f, "invalid snapshot: {}", reason),
        }
    }
}

impl std::error::Error for StateError {}

pub type StateResult<T> = Result<T, StateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StateError::InsufficientBalance {
            account: [0u8; 20],
            available: U256::from(1u64),
            requested: U256::from(2u64),
        };
        let msg = err.to_string();
        assert!(msg.contains("insufficient balance"));
        assert!(msg.contains("available 1, requested 2"));

        assert_eq!(StateError::EmptyDividend.to_string(), "empty dividend");
    }

    #[test]
    fn test_error_clone() {
        let err = StateError::PayoutFailure {
            account: [1u8; 20],
            amount: U256::from(5u64),
            reason: "frozen".into(),
        };
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }
}
