// Allow manual assign operations - U256 doesn't implement AddAssign/SubAssign
#![allow(clippy::assign_op_pattern)]

//! State machine for the dividend ledger.
//!
//! This crate implements every ledger mutation. Given the current state and
//! an operation, it produces the next state or an error that leaves the
//! state untouched. Dividend accrual is lazy: recording a dividend moves a
//! single global index, and each account settles against it only when its
//! balance changes or it withdraws.
//!
//! # Key Components
//!
//! - [`LedgerState`]: In-memory state container backed by HashMaps
//! - [`LedgerReader`]/[`LedgerWriter`]: Traits abstracting state access
//! - [`HolderSet`]: O(1) index of accounts with a nonzero balance
//! - [`ValueCustody`]: Collaborator that receives and pays out value
//! - [`apply_operation`]: Main entry point for executing operations
//! - [`StateError`]: Error type for validation and custody failures
//!
//! # Example
//!
//! ```
//! use dividend_core::{Operation, U256};
//! use dividend_state::{apply_operation, owed_dividends, LedgerState, VaultCustody};
//!
//! let mut state = LedgerState::new();
//! let mut vault = VaultCustody::new();
//! let holder = [1u8; 20];
//!
//! apply_operation(&mut state, &mut vault, &Operation::Mint { account: holder, amount: U256::from(10u64) }).unwrap();
//! apply_operation(&mut state, &mut vault, &Operation::RecordDividend { amount: U256::from(5u64) }).unwrap();
//! assert_eq!(owed_dividends(&state, &holder).unwrap(), U256::from(5u64));
//! ```

mod accumulator;
mod custody;
mod error;
mod execute;
mod state;

pub use accumulator::{accumulative_dividend_of, owed_dividends};
pub use custody::{CustodyError, ValueCustody, VaultCustody};
pub use error::{StateError, StateResult};
pub use execute::apply_operation;
pub use state::{HolderSet, JournaledState, LedgerReader, LedgerState, LedgerWriter};
