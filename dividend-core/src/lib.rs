//! # Dividend Core
//!
//! Core types, arithmetic and serialization for the dividend ledger.
//!
//! This crate provides the foundation for the other ledger crates:
//! - 256-bit arithmetic with a 128.128 fixed-point dividend index
//! - Account, accumulator and operation types
//! - The snapshot format
//! - Deterministic binary serialization

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod serialization;
pub mod types;
pub mod u256;

/// Fixed external precision of one unit (value is minted 1:1 in base units).
pub const DECIMALS: u8 = 18;

// Re-export commonly used types at crate root
pub use error::SerializationError;
pub use types::{
    address_from_tag, short_hex, Account, Address, DividendAccumulator, LedgerSnapshot, Operation, SNAPSHOT_VERSION,
};
pub use u256::{accrued_dividend, dividend_per_unit_increment, FIXED_POINT_SCALE, U256};
