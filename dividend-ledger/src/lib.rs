//! Dividend-paying token ledger.
//!
//! Ties the fixed-point accumulator in `dividend-state` to an owned
//! [`Ledger`] with configuration, logging and snapshot files.
//!
//! # Example
//!
//! Dividends are split through a 128.128 fixed-point index that rounds
//! down, so a holder can end up one base unit short of the exact share.
//! Here 10 over 100 units leaves the sole holder owed 9.
//!
//! ```
//! use dividend_core::{address_from_tag, U256};
//! use dividend_ledger::{Ledger, LedgerConfig};
//!
//! let mut ledger = Ledger::new(LedgerConfig::default());
//! let alice = address_from_tag(1);
//!
//! ledger.mint(alice, U256::from(100u64)).unwrap();
//! ledger.record_dividend(U256::from(10u64)).unwrap();
//! assert_eq!(ledger.owed(&alice).unwrap(), U256::from(9u64));
//!
//! ledger.burn(alice, U256::from(100u64)).unwrap();
//! assert_eq!(ledger.withdraw_dividends(alice).unwrap(), U256::from(9u64));
//! ```

mod config;
mod error;
mod ledger;

pub use config::LedgerConfig;
pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;

pub use dividend_core::{Address, Operation, U256};
pub use dividend_state::{CustodyError, StateError, ValueCustody, VaultCustody};
