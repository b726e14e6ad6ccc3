//! Cell coercion into report measures and rates
//!
//! Measures zero-fill: a missing or malformed sales figure is reported as 0.
//! Rates keep spreadsheet errors (`#DIV/0!`, `#REF!`) and blanks as `None`
//! so that "not applicable" never shows up as a 0% ACoS.

use regex::Regex;
use std::sync::OnceLock;

use crate::reader::CellValue;

/// Stray label that appears in numeric columns of the source sheet.
const STRAY_LABEL: &str = "to";

/// Convert a cell into a finite measure, falling back to 0.
pub fn coerce_number(cell: &CellValue) -> f64 {
    match cell {
        CellValue::Number(n) if n.is_finite() => *n,
        CellValue::Number(_) => 0.0,
        CellValue::Text(s) => parse_text_number(s),
        CellValue::Error(_) | CellValue::Empty | CellValue::Boolean(_) => 0.0,
    }
}

/// Convert a cell into an optional rate. Errors and blanks are `None`.
pub fn coerce_rate(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Empty | CellValue::Error(_) => None,
        CellValue::Text(s) if s.contains('#') => None,
        other => Some(coerce_number(other)),
    }
}

fn parse_text_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if s.contains('#') || trimmed.is_empty() || s.eq_ignore_ascii_case(STRAY_LABEL) {
        return 0.0;
    }

    leading_number(trimmed)
        .and_then(|n| n.parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Longest decimal literal at the start of `s` ("12.5 units" -> "12.5").
fn leading_number(s: &str) -> Option<&str> {
    static NUMBER_PREFIX: OnceLock<Regex> = OnceLock::new();
    let re = NUMBER_PREFIX
        .get_or_init(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap());
    re.find(s).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::text(s)
    }

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(coerce_number(&CellValue::Number(1520.75)), 1520.75);
        assert_eq!(coerce_number(&CellValue::Number(-3.0)), -3.0);
    }

    #[test]
    fn test_non_finite_numbers_become_zero() {
        assert_eq!(coerce_number(&CellValue::Number(f64::NAN)), 0.0);
        assert_eq!(coerce_number(&CellValue::Number(f64::INFINITY)), 0.0);
        assert_eq!(coerce_number(&CellValue::Number(f64::NEG_INFINITY)), 0.0);
    }

    #[test]
    fn test_markers_blanks_and_stray_label_become_zero() {
        for raw in ["#DIV/0!", "#REF!", "n/a #", "", "   ", "to", "TO", "To"] {
            assert_eq!(coerce_number(&text(raw)), 0.0, "input {:?}", raw);
        }
        assert_eq!(coerce_number(&CellValue::Error("#N/A".into())), 0.0);
        assert_eq!(coerce_number(&CellValue::Empty), 0.0);
        assert_eq!(coerce_number(&CellValue::Boolean(true)), 0.0);
    }

    #[test]
    fn test_text_numbers_parse() {
        assert_eq!(coerce_number(&text("42")), 42.0);
        assert_eq!(coerce_number(&text(" 0.44 ")), 0.44);
        assert_eq!(coerce_number(&text("-7.5")), -7.5);
        assert_eq!(coerce_number(&text("1e3")), 1000.0);
        assert_eq!(coerce_number(&text("12.5 units")), 12.5);
    }

    #[test]
    fn test_unparseable_text_becomes_zero() {
        assert_eq!(coerce_number(&text("Brand total")), 0.0);
        assert_eq!(coerce_number(&text("$1,200")), 0.0);
        assert_eq!(coerce_number(&text("Infinity")), 0.0);
        assert_eq!(coerce_number(&text("NaN")), 0.0);
    }

    #[test]
    fn test_rate_error_markers_are_none_not_zero() {
        assert_eq!(coerce_rate(&text("#DIV/0!")), None);
        assert_eq!(coerce_rate(&text("#REF!")), None);
        assert_eq!(coerce_rate(&CellValue::Error("#DIV/0!".into())), None);
        assert_eq!(coerce_rate(&CellValue::Empty), None);
    }

    #[test]
    fn test_rate_delegates_to_number() {
        assert_eq!(coerce_rate(&CellValue::Number(0.44)), Some(0.44));
        assert_eq!(coerce_rate(&CellValue::Number(0.0)), Some(0.0));
        assert_eq!(coerce_rate(&text("0.31")), Some(0.31));
        assert_eq!(coerce_rate(&text("  ")), Some(0.0));
        assert_eq!(coerce_rate(&text("to")), Some(0.0));
        assert_eq!(coerce_rate(&CellValue::Number(f64::NAN)), Some(0.0));
    }
}
