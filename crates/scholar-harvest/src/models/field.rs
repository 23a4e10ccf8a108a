//! Helpers for loosely-typed API fields.
//!
//! Internet Archive and NDLTD return the same field as a scalar in one
//! document and a list in the next; years arrive as integers, strings,
//! ISO dates or lists of any of those. Every extractor goes through these
//! helpers so the sources cannot drift apart in how they read them.

use serde::{Deserialize, Serialize};

/// A field that may be a single value or a sequence of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// Scalar form.
    One(T),
    /// Sequence form.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// The scalar, or the first element of the sequence.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(values) => values.first(),
        }
    }

    /// All values in order.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }

    /// Whether there is no value at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Many(values) if values.is_empty())
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

/// Collapse a scalar-or-list text field to one string.
///
/// Returns the scalar or the first element, and an empty string when the
/// field is absent or an empty list.
#[must_use]
pub fn first_text(field: Option<&OneOrMany<String>>) -> String {
    field.and_then(OneOrMany::first).cloned().unwrap_or_default()
}

/// A year as any of the shapes the sources send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearValue {
    /// `2019`
    Int(i64),
    /// `2019.0`
    Float(f64),
    /// `"2019"` or `"2019-06-01T00:00:00Z"`
    Text(String),
    /// `["2019"]`, `[2019, 6, 1]`
    List(Vec<YearValue>),
}

/// Parse a year from any supported shape.
///
/// Lists use their first element. Anything that does not yield a
/// four-digit year gives `None`; this never fails.
#[must_use]
pub fn parse_year(value: &YearValue) -> Option<i32> {
    match value {
        YearValue::Int(n) => four_digit(*n),
        #[allow(clippy::float_cmp)]
        YearValue::Float(f) if f.fract() == 0.0 && f.is_finite() => four_digit(*f as i64),
        YearValue::Float(_) => None,
        YearValue::Text(text) => parse_year_str(text),
        YearValue::List(values) => values.first().and_then(parse_year),
    }
}

/// Parse a year from text: either all digits, or an ISO date whose first
/// four characters are the year.
#[must_use]
pub fn parse_year_str(text: &str) -> Option<i32> {
    let text = text.trim();
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse::<i64>().ok().and_then(four_digit);
    }

    let prefix = text.get(..4)?;
    let rest = &text[4..];
    if prefix.bytes().all(|b| b.is_ascii_digit()) && rest.starts_with(['-', 'T', '/']) {
        return prefix.parse::<i64>().ok().and_then(four_digit);
    }

    None
}

fn four_digit(n: i64) -> Option<i32> {
    if (1000..=9999).contains(&n) { i32::try_from(n).ok() } else { None }
}

/// Collapse runs of whitespace (including newlines) to single spaces and trim.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
