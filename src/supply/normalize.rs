//! Base-unit normalization.
//!
//! Provider responses carry balances as base-unit integers (hex quantities
//! on the wire) that can exceed `u128`, let alone `f64` precision. They are
//! parsed into `BigInt` and scaled by 10^18 as exact decimals; nothing past
//! this module handles a raw base-unit value.

use anyhow::{anyhow, Context, Result};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;

/// Decimal precision of the token: base units per token = 10^18.
pub const TOKEN_DECIMALS: i64 = 18;

/// Parse a base-unit quantity as returned by the provider.
///
/// Accepts `0x`-prefixed hex (the JSON-RPC wire format) and plain decimal
/// strings. A bare `0x` reads as zero, matching provider behavior for
/// empty quantities.
pub fn parse_base_units(raw: &str) -> Result<BigInt> {
    let trimmed = raw.trim();

    if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        if hex.is_empty() {
            return Ok(BigInt::from(0));
        }
        BigInt::parse_bytes(hex.as_bytes(), 16)
            .ok_or_else(|| anyhow!("invalid hex quantity: {}", raw))
    } else {
        trimmed
            .parse::<BigInt>()
            .with_context(|| format!("invalid decimal quantity: {}", raw))
    }
}

/// Scale a base-unit integer down to a whole-token decimal amount.
pub fn to_token_amount(base_units: BigInt) -> BigDecimal {
    BigDecimal::new(base_units, TOKEN_DECIMALS)
}

/// Render a token amount for API responses.
///
/// Trailing fractional zeros are dropped so integral amounts print without
/// a decimal point.
pub fn format_token_amount(amount: &BigDecimal) -> String {
    amount.normalized().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parses_hex_and_decimal_quantities() {
        assert_eq!(parse_base_units("0xde0b6b3a7640000").unwrap(), BigInt::from(10u64).pow(18));
        assert_eq!(parse_base_units("1000000000000000000").unwrap(), BigInt::from(10u64).pow(18));
        assert_eq!(parse_base_units("0x0").unwrap(), BigInt::from(0));
        assert_eq!(parse_base_units("0x").unwrap(), BigInt::from(0));
    }

    #[test]
    fn test_rejects_malformed_quantities() {
        assert!(parse_base_units("0xzz").is_err());
        assert!(parse_base_units("not a number").is_err());
        assert!(parse_base_units("").is_err());
    }

    #[test]
    fn test_scales_by_token_decimals() {
        let one_token = to_token_amount(BigInt::from(10u64).pow(18));
        assert_eq!(format_token_amount(&one_token), "1");

        let fractional = to_token_amount(BigInt::from(1_500_000_000_000_000_000u64));
        assert_eq!(format_token_amount(&fractional), "1.5");

        let zero = to_token_amount(BigInt::from(0));
        assert_eq!(format_token_amount(&zero), "0");
    }

    #[test]
    fn test_round_trip_preserves_precision() {
        // Well beyond f64's 53-bit mantissa; float parsing loses digits here.
        let raw = BigInt::from_str("123456789012345678901234567890123456789").unwrap();

        let amount = to_token_amount(raw.clone());
        let (rescaled, exponent) = amount.with_scale(TOKEN_DECIMALS).into_bigint_and_exponent();

        assert_eq!(exponent, TOKEN_DECIMALS);
        assert_eq!(rescaled, raw);
    }

    #[test]
    fn test_formats_exact_fractions() {
        let amount = to_token_amount(BigInt::from_str("123456789012345678901").unwrap());
        assert_eq!(format_token_amount(&amount), "123.456789012345678901");
    }
}
