//! Chain format conversion for spot prices and quantities.
//!
//! The exchange module stores prices and quantities as integers in the
//! smallest denomination of each token, then carries them on the wire as
//! 18-decimal fixed-point integers (`LegacyDec`). This module turns human
//! readable decimals into that representation and back.
//!
//! - price:    `human × 10^(quote_decimals − base_decimals)`
//! - quantity: `human × 10^base_decimals`
//!
//! All arithmetic is exact `Decimal`; floats never touch an order value.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::U256;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of fractional digits carried by the on-chain fixed-point type.
pub const CHAIN_DEC_PRECISION: u32 = 18;

/// Largest power of ten a `Decimal` can hold as a scale or mantissa.
const MAX_DECIMAL_EXPONENT: i32 = 28;

/// Errors raised while converting to or from the chain format.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainFormatError {
    #[error("negative value {0} cannot be represented on chain")]
    Negative(Decimal),
    #[error("value overflows decimal range while scaling by 10^{exponent}")]
    Overflow { exponent: i32 },
    #[error("non-zero value underflows decimal precision while scaling by 10^{exponent}")]
    Underflow { exponent: i32 },
    #[error("tick size must not be negative, got {0}")]
    NegativeTick(Decimal),
    #[error("value {value} overflows decimal range at tick size {tick}")]
    TickOverflow { value: Decimal, tick: Decimal },
    #[error("invalid fixed-point digits: {0:?}")]
    InvalidDigits(String),
}

/// An 18-decimal fixed-point integer, as serialized in exchange messages.
///
/// `ChainDec` of `1.5` is the integer `1_500_000_000_000_000_000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ChainDec(U256);

impl ChainDec {
    pub const ZERO: Self = Self(U256::ZERO);

    /// Build from a non-negative decimal, truncating past 18 fractional digits.
    pub fn from_decimal(value: Decimal) -> Result<Self, ChainFormatError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ChainFormatError::Negative(value));
        }

        let truncated =
            value.round_dp_with_strategy(CHAIN_DEC_PRECISION, RoundingStrategy::ToZero);
        let mantissa = u128::try_from(truncated.mantissa())
            .map_err(|_| ChainFormatError::Negative(value))?;
        let shift = CHAIN_DEC_PRECISION - truncated.scale();

        let scaled = U256::from(mantissa) * U256::from(10u8).pow(U256::from(shift));
        Ok(Self(scaled))
    }

    /// Convert back into a human decimal.
    ///
    /// Fails when the integer part exceeds what `Decimal` can represent.
    pub fn to_decimal(&self) -> Result<Decimal, ChainFormatError> {
        let digits = self.0.to_string();
        let precision = CHAIN_DEC_PRECISION as usize;
        let padded = format!("{digits:0>width$}", width = precision + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - precision);
        let frac_part = frac_part.trim_end_matches('0');
        let text = if frac_part.is_empty() {
            int_part.to_string()
        } else {
            format!("{int_part}.{frac_part}")
        };

        Decimal::from_str(&text)
            .map(|d| d.normalize())
            .map_err(|_| ChainFormatError::Overflow { exponent: 0 })
    }

    /// Parse the wire form (an unsigned integer string).
    pub fn from_wire(raw: &str) -> Result<Self, ChainFormatError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ChainFormatError::InvalidDigits(raw.to_string()));
        }
        U256::from_str_radix(raw, 10)
            .map(Self)
            .map_err(|_| ChainFormatError::InvalidDigits(raw.to_string()))
    }

    /// Wire form: the raw integer as a base-10 string.
    pub fn to_wire(&self) -> String {
        self.0.to_string()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for ChainDec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl Serialize for ChainDec {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for ChainDec {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_wire(&raw).map_err(serde::de::Error::custom)
    }
}

/// `10^exponent` as an exact decimal, for |exponent| ≤ 28.
pub fn pow10(exponent: i32) -> Result<Decimal, ChainFormatError> {
    if exponent.abs() > MAX_DECIMAL_EXPONENT {
        return Err(ChainFormatError::Overflow { exponent });
    }
    if exponent >= 0 {
        Ok(Decimal::from_i128_with_scale(10i128.pow(exponent.unsigned_abs()), 0))
    } else {
        Ok(Decimal::from_i128_with_scale(1, exponent.unsigned_abs()))
    }
}

fn scale_by(value: Decimal, exponent: i32) -> Result<Decimal, ChainFormatError> {
    let scaled = value
        .checked_mul(pow10(exponent)?)
        .ok_or(ChainFormatError::Overflow { exponent })?;
    // Decimal keeps at most 28 fractional digits and rounds the rest away.
    if scaled.is_zero() && !value.is_zero() {
        return Err(ChainFormatError::Underflow { exponent });
    }
    Ok(scaled)
}

/// Human price (quote per base) to chain units.
pub fn price_to_chain_format(
    price: Decimal,
    base_decimals: u32,
    quote_decimals: u32,
) -> Result<Decimal, ChainFormatError> {
    scale_by(price, quote_decimals as i32 - base_decimals as i32)
}

/// Human quantity (in base tokens) to chain units.
pub fn quantity_to_chain_format(
    quantity: Decimal,
    base_decimals: u32,
) -> Result<Decimal, ChainFormatError> {
    scale_by(quantity, base_decimals as i32)
}

pub fn price_from_chain_format(
    price: Decimal,
    base_decimals: u32,
    quote_decimals: u32,
) -> Result<Decimal, ChainFormatError> {
    scale_by(price, base_decimals as i32 - quote_decimals as i32).map(|d| d.normalize())
}

pub fn quantity_from_chain_format(
    quantity: Decimal,
    base_decimals: u32,
) -> Result<Decimal, ChainFormatError> {
    scale_by(quantity, -(base_decimals as i32)).map(|d| d.normalize())
}

/// Round `value` down to a multiple of `tick`. A zero tick leaves it untouched.
///
/// Fails on a negative tick, or when `value / tick` leaves the `Decimal` range.
pub fn quantize_to_tick(value: Decimal, tick: Decimal) -> Result<Decimal, ChainFormatError> {
    if tick.is_sign_negative() && !tick.is_zero() {
        return Err(ChainFormatError::NegativeTick(tick));
    }
    if tick.is_zero() {
        return Ok(value);
    }
    let overflow = || ChainFormatError::TickOverflow { value, tick };
    let steps = value.checked_div(tick).ok_or_else(overflow)?.trunc();
    let quantized = steps.checked_mul(tick).ok_or_else(overflow)?;
    Ok(quantized.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_chain_dec_wire_form() {
        let d = ChainDec::from_decimal(dec!(1.5)).unwrap();
        assert_eq!(d.to_wire(), "1500000000000000000");

        let tiny = ChainDec::from_decimal(dec!(0.000000000000000001)).unwrap();
        assert_eq!(tiny.to_wire(), "1");

        assert_eq!(ChainDec::from_decimal(Decimal::ZERO).unwrap(), ChainDec::ZERO);
    }

    #[test]
    fn test_chain_dec_large_quantity_does_not_overflow() {
        // 1000 tokens with 18 decimals: 1e21 chain units → 1e39 on the wire
        let qty = quantity_to_chain_format(dec!(1000), 18).unwrap();
        let d = ChainDec::from_decimal(qty).unwrap();
        assert_eq!(d.to_wire(), format!("1{}", "0".repeat(39)));
    }

    #[test]
    fn test_chain_dec_truncates_extra_digits() {
        let d = ChainDec::from_decimal(dec!(0.0000000000000000019)).unwrap();
        assert_eq!(d.to_wire(), "1");
    }

    #[test]
    fn test_chain_dec_rejects_negative() {
        let err = ChainDec::from_decimal(dec!(-0.5)).unwrap_err();
        assert_eq!(err, ChainFormatError::Negative(dec!(-0.5)));
    }

    #[test]
    fn test_chain_dec_to_decimal() {
        let d = ChainDec::from_wire("480000000000000").unwrap();
        assert_eq!(d.to_decimal().unwrap(), dec!(0.00048));

        let whole = ChainDec::from_wire("12000000000000000000").unwrap();
        assert_eq!(whole.to_decimal().unwrap(), dec!(12));
    }

    #[test]
    fn test_from_wire_rejects_garbage() {
        assert!(ChainDec::from_wire("").is_err());
        assert!(ChainDec::from_wire("1.5").is_err());
        assert!(ChainDec::from_wire("-1").is_err());
    }

    #[test]
    fn test_price_to_chain_format_atom_inj() {
        // ATOM (6 decimals) priced in INJ (18 decimals)
        let p = price_to_chain_format(dec!(0.48), 6, 18).unwrap();
        assert_eq!(p, dec!(480000000000));
    }

    #[test]
    fn test_price_to_chain_format_inj_usdt() {
        // INJ (18 decimals) priced in USDT (6 decimals)
        let p = price_to_chain_format(dec!(25.3), 18, 6).unwrap();
        assert_eq!(p.normalize(), dec!(0.0000000000253));
    }

    #[test]
    fn test_quantity_to_chain_format() {
        let q = quantity_to_chain_format(dec!(0.01), 18).unwrap();
        assert_eq!(q, dec!(10000000000000000));
    }

    #[test]
    fn test_inverse_conversions() {
        let p = price_to_chain_format(dec!(0.48), 6, 18).unwrap();
        assert_eq!(price_from_chain_format(p, 6, 18).unwrap(), dec!(0.48));

        let q = quantity_to_chain_format(dec!(3.25), 6).unwrap();
        assert_eq!(quantity_from_chain_format(q, 6).unwrap(), dec!(3.25));
    }

    #[test]
    fn test_pow10_bounds() {
        assert_eq!(pow10(0).unwrap(), Decimal::ONE);
        assert_eq!(pow10(-2).unwrap(), dec!(0.01));
        assert!(pow10(29).is_err());
        assert!(pow10(-29).is_err());
    }

    #[test]
    fn test_price_underflow_is_error() {
        // 1.234e-17 × 10^-12 needs 29+ fractional digits
        let err = price_to_chain_format(dec!(0.00000000000000001234), 18, 6).unwrap_err();
        assert_eq!(err, ChainFormatError::Underflow { exponent: -12 });

        assert_eq!(price_to_chain_format(Decimal::ZERO, 18, 6).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_quantize_to_tick() {
        assert_eq!(quantize_to_tick(dec!(1234), dec!(100)).unwrap(), dec!(1200));
        assert_eq!(
            quantize_to_tick(dec!(0.000487), dec!(0.0001)).unwrap(),
            dec!(0.0004)
        );
        assert_eq!(quantize_to_tick(dec!(99), dec!(100)).unwrap(), Decimal::ZERO);
        assert_eq!(quantize_to_tick(dec!(7.7), Decimal::ZERO).unwrap(), dec!(7.7));
    }

    #[test]
    fn test_quantize_rejects_negative_tick() {
        assert_eq!(
            quantize_to_tick(dec!(1234), dec!(-100)),
            Err(ChainFormatError::NegativeTick(dec!(-100)))
        );
    }

    #[test]
    fn test_quantize_ratio_overflow_is_error() {
        let value = Decimal::from_str("1000000000000000000000").unwrap();
        let tick = Decimal::from_str("0.0000000001").unwrap();
        assert_eq!(
            quantize_to_tick(value, tick),
            Err(ChainFormatError::TickOverflow { value, tick })
        );
    }
}
