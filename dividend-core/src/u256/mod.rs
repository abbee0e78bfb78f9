//! 256-bit unsigned integer arithmetic for the dividend accumulator.
//!
//! Balances, dividend amounts and the dividend-per-unit index are all held
//! as 256-bit integers. The index uses a 128.128 fixed-point layout so that
//! `amount / total_supply` keeps 128 fractional bits of precision.

// Allow clippy warnings from the uint crate's construct_uint macro
#![allow(clippy::manual_div_ceil)]
#![allow(clippy::assign_op_pattern)]

mod fixed_point;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uint::construct_uint;

pub use fixed_point::{accrued_dividend, dividend_per_unit_increment, FIXED_POINT_SCALE};

construct_uint! {
    /// 256-bit unsigned integer.
    ///
    /// Used for:
    /// - Token balances and total supply
    /// - Dividend amounts
    /// - The 128.128 fixed-point dividend-per-unit index
    pub struct U256(4);
}

/// Number of fractional bits in fixed-point representation.
pub const FIXED_POINT_FRACTIONAL_BITS: u32 = 128;

impl U256 {
    /// Create a U256 from a u128 value.
    #[inline]
    pub fn from_u128(value: u128) -> Self {
        U256([value as u64, (value >> 64) as u64, 0, 0])
    }

    /// Convert to u128, returning None if the value doesn't fit.
    #[inline]
    pub fn to_u128(&self) -> Option<u128> {
        if self.0[2] == 0 && self.0[3] == 0 {
            Some((self.0[1] as u128) << 64 | self.0[0] as u128)
        } else {
            None
        }
    }

    /// Whether the value fits in the 128 integer bits of a fixed-point number.
    #[inline]
    pub fn fits_fixed_point(&self) -> bool {
        self.0[2] == 0 && self.0[3] == 0
    }

    /// Serialize to little-endian bytes.
    pub fn to_le_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (chunk, limb) in bytes.chunks_exact_mut(8).zip(self.0.iter()) {
            chunk.copy_from_slice(&limb.to_le_bytes());
        }
        bytes
    }

    /// Deserialize from little-endian bytes.
    pub fn from_le_bytes(bytes: &[u8; 32]) -> Self {
        let mut limbs = [0u64; 4];
        for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            *limb = u64::from_le_bytes(word);
        }
        U256(limbs)
    }
}

// Fixed 32-byte encoding keeps snapshots byte-stable across platforms.
impl Serialize for U256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.to_le_bytes())
    }
}

impl<'de> Deserialize<'de> for U256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct U256Visitor;

        impl<'de> serde::de::Visitor<'de> for U256Visitor {
            type Value = U256;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("32 bytes")
            }

            fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<U256, E> {
                let bytes: [u8; 32] = v
                    .try_into()
                    .map_err(|_| E::invalid_length(v.len(), &self))?;
                Ok(U256::from_le_bytes(&bytes))
            }

            fn visit_seq<A: serde::de::SeqAccess<'de>>(self, mut seq: A) -> Result<U256, A::Error> {
                let mut bytes = [0u8; 32];
                for (i, byte) in bytes.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                }
                Ok(U256::from_le_bytes(&bytes))
            }
        }

        deserializer.deserialize_bytes(U256Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_arithmetic() {
        let a = U256::from(100u64);
        let b = U256::from(50u64);
        assert_eq!(a + b, U256::from(150u64));
        assert_eq!(a - b, U256::from(50u64));
        assert_eq!(a * b, U256::from(5000u64));
        assert_eq!(a / b, U256::from(2u64));
    }

    #[test]
    fn test_one_ether_fixed_point_precision() {
        // 1e18 << 128 / 7 keeps the integer part and a nonzero fraction
        let one_ether = U256::from(1_000_000_000_000_000_000u64);
        let result = (one_ether << 128) / U256::from(7u64);

        let integer_part = result >> 128;
        assert_eq!(integer_part, U256::from(142_857_142_857_142_857u64));

        let fractional_part = result - (integer_part << 128);
        assert!(!fractional_part.is_zero());
    }

    #[test]
    fn test_le_bytes() {
        let value = U256::from_u128(0x0123_4567_89AB_CDEF_FEDC_BA98_7654_3210);
        let bytes = value.to_le_bytes();
        assert_eq!(bytes[0], 0x10);
        assert_eq!(bytes[15], 0x01);
        assert_eq!(bytes[16..], [0u8; 16]);
        assert_eq!(U256::from_le_bytes(&bytes), value);
    }

    #[test]
    fn test_from_u128() {
        let value = U256::from_u128(u128::MAX);
        assert_eq!(value.to_u128(), Some(u128::MAX));
        assert!(value.fits_fixed_point());
    }

    #[test]
    fn test_large_value_does_not_fit_fixed_point() {
        let value = U256::from(1u64) << 128;
        assert_eq!(value.to_u128(), None);
        assert!(!value.fits_fixed_point());
    }
}
