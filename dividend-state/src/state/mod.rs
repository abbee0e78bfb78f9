//! State container and storage traits.
//!
//! This module provides:
//! - [`LedgerReader`]: Read-only access to ledger state
//! - [`LedgerWriter`]: Mutable access to ledger state
//! - [`LedgerState`]: In-memory HashMap-backed implementation
//! - [`HolderSet`]: O(1) index of accounts with a nonzero balance
//! - [`JournaledState`]: Undo journal used to make operations atomic

mod holders;
mod journal;
mod ledger_state;
mod store;

pub use holders::HolderSet;
pub use journal::JournaledState;
pub use ledger_state::LedgerState;
pub use store::{LedgerReader, LedgerWriter};
