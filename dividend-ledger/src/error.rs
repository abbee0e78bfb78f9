//! Ledger error types.

use dividend_core::{SerializationError, U256};
use dividend_state::StateError;
use thiserror::Error;

/// Errors returned by the [`Ledger`](crate::Ledger) facade.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// An operation was rejected; the ledger is unchanged.
    #[error(transparent)]
    State(#[from] StateError),

    /// Snapshot encoding or decoding failed.
    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// The custodian paired with a restored snapshot cannot back it.
    #[error("custody holds {available} but the ledger requires {required}")]
    UnderfundedCustody { available: U256, required: U256 },

    /// IO error while reading or writing a snapshot file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    /// The underlying state error, if this is one.
    pub fn as_state(&self) -> Option<&StateError> {
        match self {
            LedgerError::State(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_error_is_transparent() {
        let err: LedgerError = StateError::EmptyDividend.into();
        assert_eq!(err.to_string(), "empty dividend");
        assert_eq!(err.as_state(), Some(&StateError::EmptyDividend));
    }

    #[test]
    fn test_serialization_error_display() {
        let err: LedgerError = SerializationError::DecodeFailed("eof".into()).into();
        assert!(err.to_string().contains("decode failed: eof"));
        assert!(err.as_state().is_none());
    }

    #[test]
    fn test_underfunded_custody_display() {
        let err = LedgerError::UnderfundedCustody {
            available: U256::zero(),
            required: U256::from(15u64),
        };
        assert_eq!(err.to_string(), "custody holds 0 but the ledger requires 15");
    }
}
