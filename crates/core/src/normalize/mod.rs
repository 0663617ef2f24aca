//! Locale-tolerant value normalization.
//!
//! Ledger rows arrive as whatever the user typed: "1.234,56" next to
//! "1234.56", "19%" next to "0.19", "14.03.2026" next to ISO dates. This
//! module parses all of it into canonical decimal/date types. Parse failures
//! recover to safe defaults and never propagate as errors.

use chrono::NaiveDate;
use kontor_store::CellValue;
use rust_decimal::Decimal;
use std::str::FromStr;

#[cfg(test)]
mod props;

/// Parses a cell into a decimal amount.
///
/// Numbers pass through; strings are reduced to digits, separators, and a
/// sign, and the last separator before the decimal digits is treated as the
/// decimal point (so both "1.234,56" and "1,234.56" parse to 1234.56).
/// Unparseable input yields zero.
#[must_use]
pub fn parse_amount(cell: &CellValue) -> Decimal {
    match cell {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => try_parse_amount(s).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Parses an amount string; see [`parse_amount`].
#[must_use]
pub fn parse_amount_str(value: &str) -> Decimal {
    try_parse_amount(value).unwrap_or(Decimal::ZERO)
}

fn try_parse_amount(value: &str) -> Option<Decimal> {
    let filtered: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();

    let negative = filtered.contains('-');
    let body: String = filtered.chars().filter(|c| *c != '-').collect();

    let (int_raw, frac) = match body.rfind([',', '.']) {
        Some(pos) => (&body[..pos], &body[pos + 1..]),
        None => (body.as_str(), ""),
    };
    let int_digits: String = int_raw.chars().filter(char::is_ascii_digit).collect();

    if int_digits.is_empty() && frac.is_empty() {
        return None;
    }

    let canonical = format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        if int_digits.is_empty() { "0" } else { &int_digits },
        if frac.is_empty() { "0" } else { frac },
    );
    Decimal::from_str(&canonical).ok()
}

/// Parses a cell into a VAT rate in the 0-100 percent domain.
///
/// A fractional value below 1 is interpreted as a ratio and scaled by 100
/// (0.19 becomes 19). Strings have a trailing "%" stripped. Unparseable
/// input falls back to the configured default rate.
#[must_use]
pub fn parse_rate(cell: &CellValue, default_percent: Decimal) -> Decimal {
    let raw = match cell {
        CellValue::Number(n) => Some(*n),
        CellValue::Text(s) => try_parse_amount(&s.replace('%', "")),
        _ => None,
    };
    match raw {
        Some(rate) if rate.abs() < Decimal::ONE && !rate.is_zero() => {
            rate * Decimal::ONE_HUNDRED
        }
        Some(rate) => rate,
        None => default_percent,
    }
}

/// Parses a cell into a date.
///
/// Accepts native date cells, day.month.year strings (two- or four-digit
/// years), and ISO-like strings (a time suffix is tolerated). Invalid input
/// yields `None`, never an error.
#[must_use]
pub fn parse_date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Date(d) => Some(*d),
        CellValue::Text(s) => parse_date_str(s),
        _ => None,
    }
}

/// Parses a date string; see [`parse_date`].
#[must_use]
pub fn parse_date_str(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    // "2026-03-14T10:30:00" and "2026-03-14 10:30" reduce to the date part.
    let date_part = trimmed
        .split(['T', ' '])
        .next()
        .unwrap_or(trimmed);

    for format in ["%d.%m.%Y", "%d.%m.%y", "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, format) {
            return Some(date);
        }
    }
    None
}

/// Normalizes text for fuzzy reference comparison.
///
/// Lowercases, folds German umlauts and sharp s to their ASCII digraphs,
/// folds common accented vowels, and strips everything that is not an ASCII
/// letter or digit. Never used for persisted values.
#[must_use]
pub fn normalize_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.to_lowercase().chars() {
        match c {
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'ß' => out.push_str("ss"),
            'à' | 'á' | 'â' => out.push('a'),
            'è' | 'é' | 'ê' => out.push('e'),
            'ì' | 'í' | 'î' => out.push('i'),
            'ò' | 'ó' | 'ô' => out.push('o'),
            'ù' | 'ú' | 'û' => out.push('u'),
            c if c.is_ascii_alphanumeric() => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("1234.56", dec!(1234.56))]
    #[case("1.234,56", dec!(1234.56))]
    #[case("1,234.56", dec!(1234.56))]
    #[case("1.234.567,89", dec!(1234567.89))]
    #[case("-1.190,00", dec!(-1190.00))]
    #[case("EUR 99,90", dec!(99.90))]
    #[case("42", dec!(42))]
    #[case("0,5", dec!(0.5))]
    fn test_parse_amount_formats(#[case] input: &str, #[case] expected: Decimal) {
        assert_eq!(parse_amount_str(input), expected);
    }

    #[rstest]
    #[case("")]
    #[case("n/a")]
    #[case("---")]
    fn test_parse_amount_unparseable_is_zero(#[case] input: &str) {
        assert_eq!(parse_amount_str(input), Decimal::ZERO);
    }

    #[test]
    fn test_parse_amount_number_cell_passthrough() {
        assert_eq!(parse_amount(&CellValue::Number(dec!(-17.5))), dec!(-17.5));
        assert_eq!(parse_amount(&CellValue::Empty), Decimal::ZERO);
    }

    #[rstest]
    #[case(CellValue::Number(dec!(19)), dec!(19))]
    #[case(CellValue::Number(dec!(0.19)), dec!(19))]
    #[case(CellValue::Number(dec!(0.07)), dec!(7))]
    #[case(CellValue::Number(dec!(0)), dec!(0))]
    #[case(CellValue::Text("7%".to_string()), dec!(7))]
    #[case(CellValue::Text("0,19".to_string()), dec!(19))]
    #[case(CellValue::Text("19 %".to_string()), dec!(19))]
    #[case(CellValue::Text("unknown".to_string()), dec!(19))]
    #[case(CellValue::Empty, dec!(19))]
    fn test_parse_rate(#[case] input: CellValue, #[case] expected: Decimal) {
        assert_eq!(parse_rate(&input, dec!(19)), expected);
    }

    #[rstest]
    #[case("14.03.2026", 2026, 3, 14)]
    #[case("14.03.26", 2026, 3, 14)]
    #[case("2026-03-14", 2026, 3, 14)]
    #[case("2026-03-14T10:30:00", 2026, 3, 14)]
    #[case(" 01.12.2025 ", 2025, 12, 1)]
    fn test_parse_date_formats(#[case] input: &str, #[case] y: i32, #[case] m: u32, #[case] d: u32) {
        assert_eq!(
            parse_date_str(input),
            Some(NaiveDate::from_ymd_opt(y, m, d).unwrap())
        );
    }

    #[rstest]
    #[case("")]
    #[case("not a date")]
    #[case("32.13.2026")]
    fn test_parse_date_invalid_is_none(#[case] input: &str) {
        assert_eq!(parse_date_str(input), None);
    }

    #[test]
    fn test_parse_date_native_cell() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
        assert_eq!(parse_date(&CellValue::Date(date)), Some(date));
        assert_eq!(parse_date(&CellValue::Number(dec!(45000))), None);
    }

    #[test]
    fn test_normalize_text_folds_umlauts() {
        assert_eq!(normalize_text("Büromöbel GmbH"), "bueromoebelgmbh");
        assert_eq!(normalize_text("Straße 12"), "strasse12");
        assert_eq!(normalize_text("RE-2026/0042"), "re20260042");
        assert_eq!(normalize_text("Café"), "cafe");
    }

    #[test]
    fn test_normalize_text_strips_symbols() {
        assert_eq!(normalize_text("  INV #17 / A  "), "inv17a");
        assert_eq!(normalize_text("§$%&"), "");
    }
}
