//! Number text helpers for the numeric stepper

use serde::Deserialize;
use std::fmt;

/// A numeric prop given either as a number or as numeric text
///
/// ```toml
/// step = 0.5
/// max = "100"
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberLike {
    Number(f64),
    Text(String),
}

impl NumberLike {
    /// The finite number this prop stands for, if any
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            NumberLike::Number(n) => Some(*n).filter(|n| n.is_finite()),
            NumberLike::Text(text) => match parse_number_text(text) {
                ParsedNumber::Number(n) => Some(n),
                ParsedNumber::Empty | ParsedNumber::Invalid => None,
            },
        }
    }
}

impl From<f64> for NumberLike {
    fn from(n: f64) -> Self {
        NumberLike::Number(n)
    }
}

impl From<i32> for NumberLike {
    fn from(n: i32) -> Self {
        NumberLike::Number(n as f64)
    }
}

impl From<&str> for NumberLike {
    fn from(text: &str) -> Self {
        NumberLike::Text(text.to_string())
    }
}

impl fmt::Display for NumberLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberLike::Number(n) => write!(f, "{n}"),
            NumberLike::Text(text) => f.write_str(text),
        }
    }
}

/// Result of reading user text as a number
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParsedNumber {
    /// Blank text
    Empty,
    Number(f64),
    /// Text that is not a finite number
    Invalid,
}

/// Read text typed into a number field
///
/// Surrounding whitespace is ignored. Infinity and NaN spellings are invalid.
pub fn parse_number_text(text: &str) -> ParsedNumber {
    let text = text.trim();
    if text.is_empty() {
        return ParsedNumber::Empty;
    }
    // Rust accepts "inf"/"nan"; a number field does not
    if !text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
    {
        return ParsedNumber::Invalid;
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => ParsedNumber::Number(n),
        _ => ParsedNumber::Invalid,
    }
}

/// Canonical display text of a number
///
/// Integral values print without a fraction, others with the shortest text
/// that reads back to the same value. Negative zero prints as `0`.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    format!("{n}")
}
