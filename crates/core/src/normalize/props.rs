//! Property-based tests for amount parsing.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{parse_amount_str, parse_date_str};

/// Strategy for amounts between -1,000,000.00 and 1,000,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Parsing is idempotent: re-parsing a formatted parse result does not
    /// change the value.
    #[test]
    fn prop_parse_amount_idempotent(value in amount()) {
        let parsed = parse_amount_str(&value.to_string());
        let reparsed = parse_amount_str(&parsed.to_string());
        prop_assert_eq!(parsed, reparsed);
    }

    /// A plain decimal rendering round-trips exactly.
    #[test]
    fn prop_parse_amount_roundtrip(value in amount()) {
        prop_assert_eq!(parse_amount_str(&value.to_string()), value);
    }

    /// German thousands formatting parses to the same value as the plain
    /// rendering.
    #[test]
    fn prop_parse_amount_german_grouping(units in -999_999i64..1_000_000i64, cents in 0i64..100i64) {
        let sign = if units < 0 { "-" } else { "" };
        let abs = units.abs();
        let grouped = if abs >= 1000 {
            format!("{}.{:03}", abs / 1000, abs % 1000)
        } else {
            abs.to_string()
        };
        let german = format!("{sign}{grouped},{cents:02}");
        let plain = format!("{sign}{abs}.{cents:02}");
        prop_assert_eq!(parse_amount_str(&german), parse_amount_str(&plain));
    }

    /// Arbitrary garbage never panics and yields a decimal.
    #[test]
    fn prop_parse_amount_never_panics(input in ".*") {
        let _ = parse_amount_str(&input);
    }

    /// Arbitrary garbage never panics the date parser either.
    #[test]
    fn prop_parse_date_never_panics(input in ".*") {
        let _ = parse_date_str(&input);
    }
}
