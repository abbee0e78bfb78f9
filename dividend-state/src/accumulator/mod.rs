//! Accumulator math module.
//!
//! The accumulator implements O(1) dividend distribution using a
//! dividend-per-unit index with 128.128 fixed-point arithmetic.

mod math;

pub use math::{
    accumulative_dividend_of,
    distribute_dividend,
    owed_dividends,
    settle_account,
    take_owed_dividends,
};
