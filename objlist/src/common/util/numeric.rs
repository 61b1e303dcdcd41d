use once_cell::sync::Lazy;
use regex::Regex;

use crate::common::Value;

// optional sign, integral and/or fractional digits, optional exponent
static NUMERIC_TEXT: Lazy<Option<Regex>> = Lazy::new(|| {
    match Regex::new(r"^\s*[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?\s*$") {
        Ok(regex) => Some(regex),
        Err(err) => {
            log::error!("Failed to compile numeric text pattern: {}", err);
            None
        }
    }
});

/// Parses text as a finite decimal number.
///
/// Only plain decimal literals qualify: `"10"`, `"-2.5"`, `" 3e2 "`, `".5"`.
/// Partial numbers such as `"12px"`, hexadecimal, `"NaN"` and `"Infinity"`
/// are rejected.
pub fn parse_numeric_text(text: &str) -> Option<f64> {
    let pattern = NUMERIC_TEXT.as_ref()?;
    if !pattern.is_match(text) {
        return None;
    }

    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Returns the value as a finite number if it is numeric.
///
/// Numbers qualify when finite; text qualifies when [parse_numeric_text]
/// accepts it. Every other value is not numeric.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::I64(v) => Some(*v as f64),
        Value::F64(v) if v.is_finite() => Some(*v),
        Value::String(s) => parse_numeric_text(s),
        _ => None,
    }
}

/// Checks whether a value counts as numeric for ordering purposes.
#[inline]
pub fn is_numeric(value: &Value) -> bool {
    numeric_value(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_text_accepts_decimals() {
        assert_eq!(parse_numeric_text("10"), Some(10.0));
        assert_eq!(parse_numeric_text("-2.5"), Some(-2.5));
        assert_eq!(parse_numeric_text("+7"), Some(7.0));
        assert_eq!(parse_numeric_text(".5"), Some(0.5));
        assert_eq!(parse_numeric_text("5."), Some(5.0));
        assert_eq!(parse_numeric_text("1e3"), Some(1000.0));
        assert_eq!(parse_numeric_text("  42  "), Some(42.0));
    }

    #[test]
    fn test_parse_numeric_text_rejects_non_numbers() {
        assert_eq!(parse_numeric_text(""), None);
        assert_eq!(parse_numeric_text("   "), None);
        assert_eq!(parse_numeric_text("abc"), None);
        assert_eq!(parse_numeric_text("12px"), None);
        assert_eq!(parse_numeric_text("0x10"), None);
        assert_eq!(parse_numeric_text("NaN"), None);
        assert_eq!(parse_numeric_text("Infinity"), None);
        assert_eq!(parse_numeric_text("1.2.3"), None);
    }

    #[test]
    fn test_parse_numeric_text_rejects_overflow() {
        assert_eq!(parse_numeric_text("1e999"), None);
    }

    #[test]
    fn test_numeric_value() {
        assert_eq!(numeric_value(&Value::I64(3)), Some(3.0));
        assert_eq!(numeric_value(&Value::F64(1.5)), Some(1.5));
        assert_eq!(numeric_value(&Value::F64(f64::NAN)), None);
        assert_eq!(numeric_value(&Value::F64(f64::INFINITY)), None);
        assert_eq!(numeric_value(&Value::from("2")), Some(2.0));
        assert_eq!(numeric_value(&Value::Bool(true)), None);
        assert_eq!(numeric_value(&Value::Null), None);
    }

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric(&Value::from("10")));
        assert!(!is_numeric(&Value::from("ten")));
    }
}
