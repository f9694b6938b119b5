use anchor_lang::prelude::*;

use crate::errors::CrownFarmError;

/// `a * b / denominator` in u128 with overflow and zero-divisor checks.
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Result<u128> {
    let value = a
        .checked_mul(b)
        .ok_or(CrownFarmError::MathOverflow)?
        .checked_div(denominator)
        .ok_or(CrownFarmError::MathOverflow)?;
    Ok(value)
}

/// `a * b / denominator` without forming `a * b`. Exact while
/// `denominator * b` fits in u128; otherwise fails only when the quotient
/// itself is out of range.
pub fn mul_div_split(a: u128, b: u128, denominator: u128) -> Result<u128> {
    let quotient = a
        .checked_div(denominator)
        .ok_or(CrownFarmError::MathOverflow)?;
    let remainder = a % denominator;
    let value = quotient
        .checked_mul(b)
        .ok_or(CrownFarmError::MathOverflow)?
        .checked_add(mul_div(remainder, b, denominator)?)
        .ok_or(CrownFarmError::MathOverflow)?;
    Ok(value)
}

pub fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(CrownFarmError::MathOverflow))
}

pub fn pow10(exponent: u8) -> Result<u128> {
    10u128
        .checked_pow(exponent as u32)
        .ok_or_else(|| error!(CrownFarmError::MathOverflow))
}

/// Clamp `ts` into `[start, end]`.
pub fn clamp_ts(ts: i64, start: i64, end: i64) -> i64 {
    ts.max(start).min(end)
}

/// Whole seconds from `from` to `to`, zero when the clock went backwards.
pub fn elapsed_seconds(from: i64, to: i64) -> u64 {
    if to <= from {
        return 0;
    }
    (to as i128 - from as i128) as u64
}

/// Seconds of `[from, to]` that fall inside the window `[start, end]`.
pub fn overlap_seconds(from: i64, to: i64, start: i64, end: i64) -> u64 {
    elapsed_seconds(clamp_ts(from, start, end), clamp_ts(to, start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_floors() {
        assert_eq!(mul_div(10, 3, 4).unwrap(), 7);
        assert_eq!(mul_div(0, 3, 4).unwrap(), 0);
    }

    #[test]
    fn mul_div_rejects_zero_divisor_and_overflow() {
        assert!(mul_div(1, 1, 0).is_err());
        assert!(mul_div(u128::MAX, 2, 1).is_err());
    }

    #[test]
    fn mul_div_split_avoids_wide_product() {
        assert_eq!(mul_div_split(10, 3, 4).unwrap(), 7);
        // 1e26 * 1e18 does not fit in u128, the quotient does
        let a = 100_000_000_000_000_000_000_000_000u128;
        let b = 1_000_000_000_000_000_000u128;
        assert!(mul_div(a, b, 10_000_000_000_000_000_000).is_err());
        assert_eq!(
            mul_div_split(a, b, 10_000_000_000_000_000_000).unwrap(),
            10_000_000_000_000_000_000_000_000
        );
        assert!(mul_div_split(1, 1, 0).is_err());
    }

    #[test]
    fn to_u64_bounds() {
        assert_eq!(to_u64(u64::MAX as u128).unwrap(), u64::MAX);
        assert!(to_u64(u64::MAX as u128 + 1).is_err());
    }

    #[test]
    fn overlap_is_clamped_to_window() {
        assert_eq!(overlap_seconds(0, 50, 10, 100), 40);
        assert_eq!(overlap_seconds(90, 500, 10, 100), 10);
        assert_eq!(overlap_seconds(200, 500, 10, 100), 0);
        assert_eq!(overlap_seconds(50, 40, 10, 100), 0);
    }

    #[test]
    fn pow10_scales() {
        assert_eq!(pow10(9).unwrap(), 1_000_000_000);
        assert!(pow10(40).is_err());
    }
}
