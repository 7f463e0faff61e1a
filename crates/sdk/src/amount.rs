//! Amount codec: human-entered decimal token amounts to integer base units.
//!
//! The ledger provider takes amounts as integer base-unit strings
//! (`amount x 10^18` for the 18-decimal token). Conversion here is exact
//! integer arithmetic on the decimal text -- no floating point -- so large
//! values never lose precision. The result is floored: fractional digits
//! beyond the token's 18 decimals are truncated.

use config::constants::TOKEN_DECIMALS;

use crate::WalletError;

/// Convert a decimal token amount to an integer base-unit string.
///
/// Equals `floor(d x 10^18)` for any non-negative finite decimal `d`:
///
/// - `"1.5"` -> `"1500000000000000000"`
/// - `"0"` -> `"0"`
/// - `".5"` -> `"500000000000000000"`
///
/// # Errors
///
/// [`WalletError::InvalidAmount`] for empty, non-numeric, negative, or
/// out-of-range input (whole part beyond `u128` after scaling).
pub fn to_base_units(decimal: &str) -> Result<String, WalletError> {
    let trimmed = decimal.trim();
    if trimmed.is_empty() {
        return Err(WalletError::InvalidAmount);
    }

    let (whole, frac) = match trimmed.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (trimmed, ""),
    };

    // A second '.' ends up inside `frac` and fails the digit check below.
    if whole.is_empty() && frac.is_empty() {
        return Err(WalletError::InvalidAmount);
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WalletError::InvalidAmount);
    }

    let scale = 10u128.pow(TOKEN_DECIMALS);

    let whole_units: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| WalletError::InvalidAmount)?
    };
    let scaled_whole = whole_units
        .checked_mul(scale)
        .ok_or(WalletError::InvalidAmount)?;

    // Truncate (floor) past the token's precision, right-pad the rest.
    let kept = &frac[..frac.len().min(TOKEN_DECIMALS as usize)];
    let frac_units: u128 = if kept.is_empty() {
        0
    } else {
        let digits: u128 = kept.parse().map_err(|_| WalletError::InvalidAmount)?;
        digits * 10u128.pow(TOKEN_DECIMALS - kept.len() as u32)
    };

    let base_units = scaled_whole
        .checked_add(frac_units)
        .ok_or(WalletError::InvalidAmount)?;

    Ok(base_units.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_and_a_half_tokens() {
        assert_eq!(to_base_units("1.5").unwrap(), "1500000000000000000");
    }

    #[test]
    fn zero() {
        assert_eq!(to_base_units("0").unwrap(), "0");
        assert_eq!(to_base_units("0.0").unwrap(), "0");
    }

    #[test]
    fn whole_amount() {
        assert_eq!(to_base_units("10").unwrap(), "10000000000000000000");
    }

    #[test]
    fn bare_fraction() {
        assert_eq!(to_base_units(".5").unwrap(), "500000000000000000");
    }

    #[test]
    fn smallest_base_unit() {
        assert_eq!(to_base_units("0.000000000000000001").unwrap(), "1");
    }

    #[test]
    fn excess_precision_is_floored() {
        // 19th fractional digit is dropped, not rounded.
        assert_eq!(
            to_base_units("1.0000000000000000019").unwrap(),
            "1000000000000000001"
        );
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert_eq!(to_base_units(" 2 ").unwrap(), "2000000000000000000");
    }

    #[test]
    fn large_amount_is_exact() {
        // Beyond f64's 53-bit integer precision.
        assert_eq!(
            to_base_units("90071992547409.93").unwrap(),
            "90071992547409930000000000000000"
        );
    }

    #[test]
    fn rejects_empty_and_garbage() {
        for bad in ["", "   ", ".", "abc", "1,5", "1.2.3", "1e5", "0x10"] {
            assert_eq!(to_base_units(bad), Err(WalletError::InvalidAmount), "{bad:?}");
        }
    }

    #[test]
    fn rejects_negative() {
        assert_eq!(to_base_units("-1"), Err(WalletError::InvalidAmount));
    }

    #[test]
    fn rejects_overflow() {
        // u128::MAX has 39 digits; 39 digits of whole tokens cannot be scaled.
        let huge = "9".repeat(39);
        assert_eq!(to_base_units(&huge), Err(WalletError::InvalidAmount));
    }
}
