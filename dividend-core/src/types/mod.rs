//! Ledger data types.
//!
//! This module defines:
//! - Account addresses
//! - Per-account balance and dividend state ([`Account`])
//! - The global dividend accumulator ([`DividendAccumulator`])
//! - The operations the ledger accepts ([`Operation`])
//! - The snapshot format ([`LedgerSnapshot`])

mod account;
mod accumulator;
mod address;
mod operation;
mod snapshot;

pub use account::Account;
pub use accumulator::DividendAccumulator;
pub use address::{address_from_tag, short_hex, Address};
pub use operation::Operation;
pub use snapshot::{LedgerSnapshot, SNAPSHOT_VERSION};
