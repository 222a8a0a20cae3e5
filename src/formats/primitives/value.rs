//! Typed table cells and best-effort literal coercion.
//!
//! Report bodies are plain text; each field is promoted to the most specific
//! literal it spells, trying integer, then float, then boolean, and keeping
//! the original text when nothing applies.
//!
//! # Examples
//!
//! ```
//! use vchk::formats::primitives::CellValue;
//!
//! assert_eq!(CellValue::coerce("3"), CellValue::Integer(3));
//! assert_eq!(CellValue::coerce("3.5"), CellValue::Float(3.5));
//! assert_eq!(CellValue::coerce("True"), CellValue::Boolean(true));
//! assert_eq!(CellValue::coerce("TRUE"), CellValue::Text("TRUE".to_string()));
//! assert_eq!(CellValue::coerce("A>C"), CellValue::Text("A>C".to_string()));
//! ```

use serde::Serialize;
use std::fmt;

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Decimal integer literal
    Integer(i64),
    /// Floating point literal (decimal point or exponent)
    Float(f64),
    /// `True` or `False`
    Boolean(bool),
    /// Anything else, verbatim
    Text(String),
}

impl CellValue {
    /// Coerces a text field to the most specific literal type it represents.
    ///
    /// Numeric and boolean forms are recognized after trimming surrounding
    /// whitespace; text keeps the field exactly as given. Integers outside
    /// the `i64` range become floats.
    pub fn coerce(field: &str) -> CellValue {
        let text = field.trim();

        if let Some(value) = parse_integer(text) {
            return value;
        }
        if let Some(value) = parse_float(text) {
            return CellValue::Float(value);
        }
        match text {
            "True" => CellValue::Boolean(true),
            "False" => CellValue::Boolean(false),
            _ => CellValue::Text(field.to_string()),
        }
    }

    /// Returns the integer value, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the numeric value; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the text, if this cell stayed text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer or float.
    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Integer(_) | CellValue::Float(_))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(v) => write!(f, "{}", v),
            // Debug keeps the trailing ".0" on whole floats
            CellValue::Float(v) => write!(f, "{:?}", v),
            CellValue::Boolean(true) => f.write_str("True"),
            CellValue::Boolean(false) => f.write_str("False"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

fn split_sign(text: &str) -> &str {
    text.strip_prefix(['+', '-']).unwrap_or(text)
}

/// Decimal integer: optional sign, digits, no leading zeros unless all zeros.
fn parse_integer(text: &str) -> Option<CellValue> {
    let digits = split_sign(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') && digits.bytes().any(|b| b != b'0') {
        return None;
    }

    match text.parse::<i64>() {
        Ok(v) => Some(CellValue::Integer(v)),
        Err(_) => text.parse::<f64>().ok().map(CellValue::Float),
    }
}

/// Float literal: digits with a decimal point and/or exponent.
///
/// Rejects spellings such as `inf` and `NaN` that `f64::from_str` would
/// otherwise accept.
fn parse_float(text: &str) -> Option<f64> {
    let body = split_sign(text);
    let allowed = body
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    let has_digit = body.bytes().any(|b| b.is_ascii_digit());
    let has_marker = body.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'));

    if !allowed || !has_digit || !has_marker {
        return None;
    }
    text.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(CellValue::coerce("3"), CellValue::Integer(3));
        assert_eq!(CellValue::coerce("-12"), CellValue::Integer(-12));
        assert_eq!(CellValue::coerce("+7"), CellValue::Integer(7));
        assert_eq!(CellValue::coerce("0"), CellValue::Integer(0));
        assert_eq!(CellValue::coerce("000"), CellValue::Integer(0));
        assert_eq!(CellValue::coerce(" 42 "), CellValue::Integer(42));
    }

    #[test]
    fn test_leading_zero_integer_stays_text() {
        assert_eq!(CellValue::coerce("0012"), CellValue::Text("0012".to_string()));
        // Leading zeros are fine in floats
        assert_eq!(CellValue::coerce("0012.5"), CellValue::Float(12.5));
    }

    #[test]
    fn test_integer_overflow_becomes_float() {
        let value = CellValue::coerce("99999999999999999999");
        assert!(matches!(value, CellValue::Float(_)));
        assert!((value.as_f64().unwrap() - 1e20).abs() < 1e6);
    }

    #[test]
    fn test_floats() {
        assert_eq!(CellValue::coerce("3.5"), CellValue::Float(3.5));
        assert_eq!(CellValue::coerce("-0.25"), CellValue::Float(-0.25));
        assert_eq!(CellValue::coerce(".5"), CellValue::Float(0.5));
        assert_eq!(CellValue::coerce("2."), CellValue::Float(2.0));
        assert_eq!(CellValue::coerce("1e3"), CellValue::Float(1000.0));
        assert_eq!(CellValue::coerce("1.5E-2"), CellValue::Float(0.015));
    }

    #[test]
    fn test_non_literal_floats_stay_text() {
        for text in ["inf", "-inf", "NaN", "nan", "Infinity", "1e", ".", "1.2.3", "e5"] {
            assert_eq!(
                CellValue::coerce(text),
                CellValue::Text(text.to_string()),
                "{text} should stay text"
            );
        }
    }

    #[test]
    fn test_booleans() {
        assert_eq!(CellValue::coerce("True"), CellValue::Boolean(true));
        assert_eq!(CellValue::coerce("False"), CellValue::Boolean(false));
        assert_eq!(CellValue::coerce("TRUE"), CellValue::Text("TRUE".to_string()));
        assert_eq!(CellValue::coerce("false"), CellValue::Text("false".to_string()));
    }

    #[test]
    fn test_text_keeps_original_field() {
        assert_eq!(CellValue::coerce(" A>C "), CellValue::Text(" A>C ".to_string()));
        assert_eq!(CellValue::coerce(""), CellValue::Text(String::new()));
        assert_eq!(CellValue::coerce("None"), CellValue::Text("None".to_string()));
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Integer(5).to_string(), "5");
        assert_eq!(CellValue::Float(2.0).to_string(), "2.0");
        assert_eq!(CellValue::Float(0.015).to_string(), "0.015");
        assert_eq!(CellValue::Boolean(true).to_string(), "True");
        assert_eq!(CellValue::Text("A>C".into()).to_string(), "A>C");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(CellValue::Integer(4).as_f64(), Some(4.0));
        assert_eq!(CellValue::Float(4.5).as_i64(), None);
        assert_eq!(CellValue::Boolean(false).as_bool(), Some(false));
        assert_eq!(CellValue::Text("x".into()).as_str(), Some("x"));
        assert!(CellValue::Float(1.0).is_numeric());
        assert!(!CellValue::Text("1".into()).is_numeric());
    }

    #[test]
    fn test_serializes_as_plain_json_scalars() {
        let row = vec![
            CellValue::Integer(1),
            CellValue::Float(0.5),
            CellValue::Boolean(true),
            CellValue::Text("A>C".into()),
        ];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"[1,0.5,true,"A>C"]"#);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_any_i64_coerces_to_integer(v in any::<i64>()) {
            prop_assert_eq!(CellValue::coerce(&v.to_string()), CellValue::Integer(v));
        }

        #[test]
        fn test_finite_floats_round_trip(v in -1.0e12f64..1.0e12) {
            // Debug formatting always carries a '.' or exponent
            let text = format!("{:?}", v);
            prop_assert_eq!(CellValue::coerce(&text), CellValue::Float(v));
        }

        #[test]
        fn test_alphabetic_words_stay_text(word in "[a-zA-Z]{1,12}") {
            prop_assume!(word != "True" && word != "False");
            let value = CellValue::coerce(&word);
            prop_assert_eq!(value, CellValue::Text(word));
        }
    }
}
