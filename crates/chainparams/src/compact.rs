//! Compact ("bits") encoding of difficulty targets
//!
//! A compact value stores a 256-bit target as a one-byte size followed by a
//! three-byte mantissa, with the mantissa's top bit acting as a sign bit.

use crate::{Error, Result};
use primitive_types::U256;

const SIGN_BIT: u32 = 0x0080_0000;
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// Encode a target in compact form.
pub fn compact_from_target(target: U256) -> u32 {
    let mut size = (target.bits() + 7) / 8;
    let mut compact = if size <= 3 {
        target.low_u32() << (8 * (3 - size))
    } else {
        (target >> (8 * (size - 3))).low_u32()
    };

    // Keep the sign bit clear by moving one byte into the exponent
    if compact & SIGN_BIT != 0 {
        compact >>= 8;
        size += 1;
    }

    compact | ((size as u32) << 24)
}

/// Decode a compact value into the full target.
///
/// Negative and overflowing encodings never describe a valid target and are
/// rejected.
pub fn target_from_compact(compact: u32) -> Result<U256> {
    let size = (compact >> 24) as usize;
    let word = compact & MANTISSA_MASK;

    if word != 0 && compact & SIGN_BIT != 0 {
        return Err(Error::InvalidCompact(compact));
    }

    let overflow =
        word != 0 && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));
    if overflow {
        return Err(Error::InvalidCompact(compact));
    }

    Ok(if size <= 3 {
        U256::from(word >> (8 * (3 - size)))
    } else {
        U256::from(word) << (8 * (size - 3))
    })
}

/// Target with the top `zero_bits` bits cleared, i.e. `~0 >> zero_bits`.
pub fn limit_with_leading_zero_bits(zero_bits: usize) -> U256 {
    U256::MAX >> zero_bits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_encode_to_known_bits() {
        assert_eq!(compact_from_target(limit_with_leading_zero_bits(20)), 0x1e0f_ffff);
        assert_eq!(compact_from_target(limit_with_leading_zero_bits(16)), 0x1f00_ffff);
        assert_eq!(compact_from_target(limit_with_leading_zero_bits(1)), 0x207f_ffff);
    }

    #[test]
    fn test_bitcoin_genesis_bits() {
        let target = target_from_compact(0x1d00_ffff).unwrap();
        assert_eq!(target, U256::from(0xffffu64) << 208);
        assert_eq!(compact_from_target(target), 0x1d00_ffff);
    }

    #[test]
    fn test_small_targets() {
        assert_eq!(compact_from_target(U256::zero()), 0);
        assert_eq!(compact_from_target(U256::from(0x12u64)), 0x0112_0000);
        assert_eq!(target_from_compact(0x0112_0000).unwrap(), U256::from(0x12u64));
        assert_eq!(compact_from_target(U256::from(0x80u64)), 0x0200_8000);
    }

    #[test]
    fn test_decode_truncates_to_mantissa_precision() {
        let limit = limit_with_leading_zero_bits(20);
        let decoded = target_from_compact(compact_from_target(limit)).unwrap();
        assert!(decoded <= limit);
        assert_eq!(decoded, U256::from(0x0f_ffffu64) << 216);
    }

    #[test]
    fn test_rejects_negative() {
        assert!(matches!(
            target_from_compact(0x0480_0001),
            Err(Error::InvalidCompact(0x0480_0001))
        ));
    }

    #[test]
    fn test_rejects_overflow() {
        assert!(target_from_compact(0xff12_3456).is_err());
        assert!(target_from_compact(0x2301_0000).is_err());
    }
}
