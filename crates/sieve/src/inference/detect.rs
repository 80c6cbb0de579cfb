//! Value-level type detection.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::ColumnType;

// Shapes worth handing to the date parsers. Anything else is rejected
// without trying every format.
static DATE_SHAPES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}[-/]\d{1,2}([-/]\d{1,2})?([T ]|$)").unwrap(), // ISO / alt ISO
        Regex::new(r"^\d{1,2}[-/]\d{1,2}[-/]\d{4}").unwrap(),           // US / European
        Regex::new(r"(?i)^[a-z]{3,9},? ").unwrap(),                       // Month name / weekday
        Regex::new(r"(?i)^\d{1,2} [a-z]{3,9} \d{4}").unwrap(),            // 5 Mar 2024
    ]
});

static YEAR_MONTH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}$").unwrap());

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Classify a single field value.
///
/// Priority: null/empty → text, numeric literal → number, lowercase
/// `true`/`false` → boolean, date/time → date, otherwise text.
pub fn infer_type(value: Option<&str>) -> ColumnType {
    let Some(value) = value else {
        return ColumnType::Text;
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return ColumnType::Text;
    }

    if is_numeric_literal(trimmed) {
        return ColumnType::Number;
    }

    if trimmed == "true" || trimmed == "false" {
        return ColumnType::Boolean;
    }

    if is_date(trimmed) {
        return ColumnType::Date;
    }

    ColumnType::Text
}

/// Decimal, exponent, `Infinity`, or `0x` / `0o` / `0b` integer literals.
pub fn is_numeric_literal(value: &str) -> bool {
    let unsigned = value.trim_start_matches(['+', '-']);
    if unsigned.len() + 1 < value.len() {
        // More than one sign character
        return false;
    }

    if unsigned == "Infinity" {
        return true;
    }

    if unsigned.len() == value.len() {
        for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
            if let Some(digits) = value.strip_prefix(prefix) {
                return !digits.is_empty() && u128::from_str_radix(digits, radix).is_ok();
            }
        }
    }

    // Only digits, signs, dots and exponents; rules out "inf" / "nan".
    if !unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return false;
    }

    value.parse::<f64>().map(|n| !n.is_nan()).unwrap_or(false)
}

/// Permissive calendar date / date-time check.
pub fn is_date(value: &str) -> bool {
    if DateTime::parse_from_rfc3339(value).is_ok() || DateTime::parse_from_rfc2822(value).is_ok() {
        return true;
    }

    if YEAR_MONTH.is_match(value) {
        return NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d").is_ok();
    }

    if !DATE_SHAPES.iter().any(|shape| shape.is_match(value)) {
        return false;
    }

    DATETIME_FORMATS
        .iter()
        .any(|f| NaiveDateTime::parse_from_str(value, f).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|f| NaiveDate::parse_from_str(value, f).is_ok())
}
