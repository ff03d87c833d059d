//! Cell and identity-key types.

use std::fmt;

/// A parsed CSV cell.
///
/// Parsing tries `i64`, then `f64`, then falls back to text, so `"7"` is an
/// [`Value::Int`] while `"7.5"` is a [`Value::Float`] and `"cat"` is
/// [`Value::Text`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Parses a raw cell string into the narrowest matching variant.
    pub fn parse(raw: &str) -> Self {
        if let Ok(i) = raw.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return Value::Float(f);
        }
        Value::Text(raw.to_string())
    }

    /// Numeric view of the cell. Text cells are re-parsed so a quoted
    /// `"3.5"` still counts as numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Text(s) => s.parse::<f64>().ok(),
        }
    }

    /// Canonical class label for classification comparison.
    ///
    /// Numeric cells use their display form, so the `-1` fill sentinel and a
    /// genuine `-1` label compare equal, matching how the scores behaved when
    /// labels round-tripped through untyped CSV cells.
    pub fn class_label(&self) -> String {
        match self {
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => s.clone(),
        }
    }

    /// Identity key for join/set operations.
    ///
    /// Integral floats key as integers, so ids that round-tripped through a
    /// float dtype (`1.0`, `2.0`) still match an integer reference. Only
    /// genuinely fractional or out-of-range floats fall back to text.
    pub fn id_key(&self) -> IdKey {
        const I64_RANGE: std::ops::RangeInclusive<f64> = (i64::MIN as f64)..=(i64::MAX as f64);
        match self {
            Value::Int(i) => IdKey::Int(*i),
            Value::Float(f) if f.fract() == 0.0 && I64_RANGE.contains(f) => IdKey::Int(*f as i64),
            Value::Float(f) => IdKey::Text(f.to_string()),
            Value::Text(s) => IdKey::Text(s.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Hashable, orderable identity key derived from an id cell.
///
/// Integer ids stay integers; anything else keys on its text form. Ordering
/// puts integers before text so diagnostic lists sort deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdKey {
    Int(i64),
    Text(String),
}

impl fmt::Display for IdKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdKey::Int(i) => write!(f, "{i}"),
            IdKey::Text(s) => write!(f, "{s}"),
        }
    }
}
