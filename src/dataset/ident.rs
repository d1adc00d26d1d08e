//! Customer identifiers
//!
//! Feeds are not consistent about identifier types: the same customer can be
//! keyed as `1` in the customers collection and `"1"` in the transactions
//! collection. Identifiers are canonicalized once, at ingestion, so the join
//! and chart lookups compare with plain equality.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Canonical customer identifier
///
/// Numeric identifiers (JSON numbers, or strings that parse as a finite
/// number) are stored in their shortest decimal form, so `1`, `1.0`, `"1"`,
/// `" 01 "` all compare equal. Decimal text keeps every digit, however
/// long. Any other string is kept trimmed, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomerId(String);

impl CustomerId {
    /// Canonicalize an identifier given as text
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(canonicalize_str(raw.as_ref()))
    }

    /// Canonicalize an identifier given as a number
    pub fn from_number(value: f64) -> Self {
        Self(canonicalize_number(value))
    }

    /// Canonical string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CustomerId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<u64> for CustomerId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<i32> for CustomerId {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

fn canonicalize_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(decimal) = canonical_decimal(trimmed) {
        return decimal;
    }
    // Exponent forms such as "1e3"
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => canonicalize_number(value),
        _ => trimmed.to_string(),
    }
}

/// Exact canonical form of plain decimal text (`[+-]digits[.digits]`)
///
/// Digits are never routed through a float, so ids of any length keep every
/// digit. The output matches `f64` and integer `Display` for the values
/// those types represent exactly.
fn canonical_decimal(text: &str) -> Option<String> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let int_part = int_part.trim_start_matches('0');
    let frac_part = frac_part.trim_end_matches('0');
    if int_part.is_empty() && frac_part.is_empty() {
        return Some("0".to_string());
    }

    let mut out = String::with_capacity(int_part.len() + frac_part.len() + 3);
    if negative {
        out.push('-');
    }
    out.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    Some(out)
}

fn canonicalize_number(value: f64) -> String {
    if value == 0.0 {
        // Covers -0.0
        "0".to_string()
    } else {
        value.to_string()
    }
}

impl Serialize for CustomerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CustomerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CustomerIdVisitor)
    }
}

struct CustomerIdVisitor;

impl<'de> Visitor<'de> for CustomerIdVisitor {
    type Value = CustomerId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a customer identifier (number or string)")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(CustomerId::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(CustomerId(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v.is_finite() {
            Ok(CustomerId::from_number(v))
        } else {
            Err(E::custom("customer identifier must be finite"))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(CustomerId::new(v))
    }
}
