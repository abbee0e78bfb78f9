//! Fixed-point operations backing the dividend-per-unit index.
//!
//! The index is stored in 128.128 format:
//! - 128 bits for the integer part
//! - 128 bits for the fractional part
//!
//! A deposit of `amount` against `supply` units raises the index by
//! `(amount << 128) / supply`. A holder of `balance` units is owed
//! `balance * (index - entry) >> 128`. Both divisions truncate, so the
//! ledger never distributes more than it received.

use super::{U256, FIXED_POINT_FRACTIONAL_BITS};

/// Fixed-point scale factor: 2^128.
pub const FIXED_POINT_SCALE: U256 = U256([0, 0, 1, 0]);

/// Index increment for a deposit of `amount` spread over `supply` units.
///
/// Returns `None` when `supply` is zero or when `amount` does not fit in
/// the 128 integer bits of the fixed-point format.
pub fn dividend_per_unit_increment(amount: U256, supply: U256) -> Option<U256> {
    if supply.is_zero() || !amount.fits_fixed_point() {
        return None;
    }
    let scaled = amount << FIXED_POINT_FRACTIONAL_BITS;
    Some(scaled / supply)
}

/// Dividend accrued by `balance` units while the index moved from `entry`
/// to `global`, truncated to a whole amount.
///
/// Returns `None` on overflow of the intermediate product.
pub fn accrued_dividend(balance: U256, global: U256, entry: U256) -> Option<U256> {
    if global <= entry || balance.is_zero() {
        return Some(U256::zero());
    }
    let delta = global - entry;
    let scaled = balance.checked_mul(delta)?;
    Some(scaled >> FIXED_POINT_FRACTIONAL_BITS)
}
