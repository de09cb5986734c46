use alloy::primitives::utils::{format_units as alloy_format_units, parse_units};
use alloy::primitives::U256;

use crate::error::{QuoteError, Result};

// Human amount ("1.5", "1,5", " 2 ") into smallest units. Exact decimal
// parsing; an empty string means zero.
pub fn to_smallest_unit(human: &str, decimals: u8) -> Result<U256> {
    let normalized = human.trim().replace(',', ".");
    if normalized.is_empty() {
        return Ok(U256::ZERO);
    }
    if normalized.starts_with('-') {
        return Err(QuoteError::invalid(format!("negative amount: {human}")));
    }
    parse_units(&normalized, decimals)
        .map(|parsed| parsed.get_absolute())
        .map_err(|e| QuoteError::invalid(format!("bad amount {human:?}: {e}")))
}

// Render with exactly `dp` fractional digits, truncating the rest.
pub fn format_units(value: U256, decimals: u8, dp: usize) -> Result<String> {
    let full = alloy_format_units(value, decimals)
        .map_err(|e| QuoteError::invalid(format!("cannot format with {decimals} decimals: {e}")))?;
    let (int_part, frac_part) = full.split_once('.').unwrap_or((full.as_str(), ""));
    if dp == 0 {
        return Ok(int_part.to_string());
    }
    let mut frac: String = frac_part.chars().take(dp).collect();
    while frac.len() < dp {
        frac.push('0');
    }
    Ok(format!("{int_part}.{frac}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_human_amounts() {
        assert_eq!(
            to_smallest_unit("1.5", 18).unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        assert_eq!(to_smallest_unit(" 2,25 ", 6).unwrap(), U256::from(2_250_000u64));
        assert_eq!(to_smallest_unit("", 18).unwrap(), U256::ZERO);
        assert_eq!(to_smallest_unit("0", 18).unwrap(), U256::ZERO);
    }

    #[test]
    fn rejects_bad_amounts() {
        assert!(matches!(to_smallest_unit("-1", 18), Err(QuoteError::InvalidInput(_))));
        assert!(matches!(to_smallest_unit("abc", 18), Err(QuoteError::InvalidInput(_))));
    }

    #[test]
    fn formats_with_fixed_places() {
        let value = U256::from(1_234_567_000_000_000_000u128);
        assert_eq!(format_units(value, 18, 4).unwrap(), "1.2345");
        assert_eq!(format_units(value, 18, 0).unwrap(), "1");
        assert_eq!(format_units(U256::ZERO, 18, 2).unwrap(), "0.00");
        assert_eq!(format_units(U256::from(1991u64), 0, 2).unwrap(), "1991.00");
    }
}
