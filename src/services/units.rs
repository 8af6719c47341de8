use ethers::types::U256;

use crate::errors::CustomError;

/// Decimals of the native asset and its wrapped form.
pub const NATIVE_DECIMALS: u8 = 18;

fn invalid(input: &str) -> CustomError {
    CustomError::InvalidAmountError(format!("Enter a valid amount: {input:?} is not a number"))
}

/// Scale a decimal string to integer base units. Digits beyond `decimals`
/// are rounded half-up.
pub fn parse_units(input: &str, decimals: u8) -> Result<U256, CustomError> {
    let text = input.trim();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (text, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid(input));
    }
    if !int_part.chars().all(|c| c.is_ascii_digit()) || !frac_part.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(input));
    }

    let scale = decimals as usize;
    let (kept, dropped) = if frac_part.len() > scale {
        frac_part.split_at(scale)
    } else {
        (frac_part, "")
    };

    let digits = format!("{int_part}{kept:0<scale$}");
    let digits = digits.trim_start_matches('0');
    let mut value = if digits.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(digits).map_err(|_| {
            CustomError::InvalidAmountError(format!("Amount {input:?} is too large"))
        })?
    };

    if dropped.as_bytes().first().is_some_and(|d| *d >= b'5') {
        value = value
            .checked_add(U256::one())
            .ok_or_else(|| CustomError::InvalidAmountError(format!("Amount {input:?} is too large")))?;
    }

    Ok(value)
}

/// Render base units as a decimal string with trailing zeros trimmed.
pub fn format_units(amount: U256, decimals: u8) -> String {
    let scale = decimals as usize;
    let mut digits = amount.to_string();
    if digits.len() <= scale {
        digits.insert_str(0, &"0".repeat(scale - digits.len() + 1));
    }

    let (int_part, frac_part) = digits.split_at(digits.len() - scale);
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wei(n: u128) -> U256 {
        U256::from(n)
    }

    #[test]
    fn parses_ether_amounts() {
        assert_eq!(parse_units("0.01", 18).unwrap(), wei(10_000_000_000_000_000));
        assert_eq!(parse_units(" 1 ", 18).unwrap(), U256::exp10(18));
        assert_eq!(parse_units(".5", 18).unwrap(), U256::exp10(17) * 5);
        assert_eq!(parse_units("2.", 6).unwrap(), wei(2_000_000));
        assert_eq!(parse_units("0", 18).unwrap(), U256::zero());
        assert_eq!(parse_units("007.25", 2).unwrap(), wei(725));
    }

    #[test]
    fn rounds_excess_precision_half_up() {
        assert_eq!(parse_units("1.2345", 2).unwrap(), wei(123));
        assert_eq!(parse_units("1.235", 2).unwrap(), wei(124));
        assert_eq!(parse_units("0.9999", 0).unwrap(), wei(1));
    }

    #[test]
    fn rejects_non_numeric_input() {
        for input in ["abc", "", " ", ".", "-1", "+1", "1e18", "1.2.3", "0x10", "1,5"] {
            assert!(
                matches!(parse_units(input, 18), Err(CustomError::InvalidAmountError(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_overflow() {
        let huge = "9".repeat(80);
        assert!(parse_units(&huge, 18).is_err());
    }

    #[test]
    fn formats_base_units() {
        assert_eq!(format_units(wei(10_000_000_000_000_000), 18), "0.01");
        assert_eq!(format_units(U256::exp10(18) * 3, 18), "3");
        assert_eq!(format_units(wei(1_234_500), 6), "1.2345");
        assert_eq!(format_units(wei(42), 0), "42");
        assert_eq!(format_units(U256::zero(), 18), "0");
    }
}
