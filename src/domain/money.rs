//! Monetary types and lenient numeric parsing.
//!
//! Volume and target values come from admin forms, SQLite text columns and
//! remote JSON. A malformed value never fails a render: it is read as zero.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Visitor};

/// Sales volume represented as a Decimal for precision.
pub type Volume = Decimal;

/// Largest sale amount or monthly volume target accepted from admin input.
///
/// One trillion. Counters summed from many such values stay far below
/// `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Largest unit count or monthly unit target accepted from admin input.
pub const MAX_UNITS: i64 = 1_000_000_000;

/// Parse a decimal, reading anything non-numeric as zero.
#[must_use]
pub fn parse_lenient(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<Decimal>() {
        return value;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(|f| Decimal::try_from(f).ok())
        .unwrap_or(Decimal::ZERO)
}

/// Parse a unit count, reading anything non-numeric as zero.
///
/// Fractional input is truncated toward zero.
#[must_use]
pub fn parse_lenient_units(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return value;
    }
    parse_lenient(trimmed).trunc().to_i64().unwrap_or(0)
}

/// Serde adapter accepting numbers, numeric strings or null for a [`Decimal`].
pub mod lenient_decimal {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LenientDecimalVisitor)
    }

    struct LenientDecimalVisitor;

    impl<'de> Visitor<'de> for LenientDecimalVisitor {
        type Value = Decimal;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number, a numeric string or null")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
            Ok(Decimal::try_from(v).unwrap_or(Decimal::ZERO))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
            Ok(parse_lenient(v))
        }

        fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Decimal, E> {
            Ok(Decimal::ZERO)
        }

        fn visit_none<E: de::Error>(self) -> Result<Decimal, E> {
            Ok(Decimal::ZERO)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Decimal, E> {
            Ok(Decimal::ZERO)
        }
    }
}

/// Serde adapter accepting numbers, numeric strings or null for a unit count.
pub mod lenient_units {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LenientUnitsVisitor)
    }

    struct LenientUnitsVisitor;

    impl<'de> Visitor<'de> for LenientUnitsVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an integer, a numeric string or null")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            Ok(i64::try_from(v).unwrap_or(0))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            if v.is_finite() {
                Ok(v.trunc() as i64)
            } else {
                Ok(0)
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            Ok(parse_lenient_units(v))
        }

        fn visit_bool<E: de::Error>(self, _v: bool) -> Result<i64, E> {
            Ok(0)
        }

        fn visit_none<E: de::Error>(self) -> Result<i64, E> {
            Ok(0)
        }

        fn visit_unit<E: de::Error>(self) -> Result<i64, E> {
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde::Deserialize;

    #[test]
    fn max_amount_is_one_trillion() {
        assert_eq!(MAX_AMOUNT, dec!(1000000000000));
    }

    #[test]
    fn parse_lenient_reads_plain_decimals() {
        assert_eq!(parse_lenient("1250.50"), dec!(1250.50));
        assert_eq!(parse_lenient("  42 "), dec!(42));
    }

    #[test]
    fn parse_lenient_reads_garbage_as_zero() {
        assert_eq!(parse_lenient("abc"), Decimal::ZERO);
        assert_eq!(parse_lenient(""), Decimal::ZERO);
        assert_eq!(parse_lenient("NaN"), Decimal::ZERO);
    }

    #[test]
    fn parse_lenient_accepts_exponent_notation() {
        assert_eq!(parse_lenient("1e3"), dec!(1000));
    }

    #[test]
    fn parse_lenient_units_truncates_fractions() {
        assert_eq!(parse_lenient_units("7"), 7);
        assert_eq!(parse_lenient_units("7.9"), 7);
        assert_eq!(parse_lenient_units("seven"), 0);
    }

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "lenient_decimal::deserialize")]
        volume: Decimal,
        #[serde(default, deserialize_with = "lenient_units::deserialize")]
        units: i64,
    }

    #[test]
    fn lenient_serde_accepts_mixed_json() {
        let row: Row = serde_json::from_str(r#"{"volume":"12.5","units":3}"#).unwrap();
        assert_eq!(row.volume, dec!(12.5));
        assert_eq!(row.units, 3);

        let row: Row = serde_json::from_str(r#"{"volume":null,"units":"n/a"}"#).unwrap();
        assert_eq!(row.volume, Decimal::ZERO);
        assert_eq!(row.units, 0);

        let row: Row = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(row.volume, Decimal::ZERO);
        assert_eq!(row.units, 0);
    }
}
