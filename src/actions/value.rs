//! Typed parameter values carried by an `Action`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single action parameter value, after type coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Str(String),
    IntList(Vec<i64>),
}

impl ParamValue {
    /// Attempt to coerce a raw textual token into int, then float, else string —
    /// the one-shot coercion rule of §4.1(d).
    pub fn coerce_from_str(raw: &str) -> ParamValue {
        let trimmed = raw.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return ParamValue::Int(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return ParamValue::Float(f);
        }
        ParamValue::Str(trimmed.to_string())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(i) => Some(*i as f64),
            ParamValue::Float(f) => Some(*f),
            ParamValue::Str(s) => s.trim().parse::<f64>().ok(),
            ParamValue::IntList(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            ParamValue::Float(f) => Some(*f as i64),
            ParamValue::Str(s) => s.trim().parse::<i64>().ok(),
            ParamValue::IntList(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int_list(&self) -> Option<&[i64]> {
        match self {
            ParamValue::IntList(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Float(x) => write!(f, "{x}"),
            ParamValue::Str(s) => write!(f, "{s}"),
            ParamValue::IntList(v) => write!(f, "{v:?}"),
        }
    }
}

/// Parameter bag, ordered by name for deterministic canonicalization (used by
/// the History fingerprint of §4.5 and by `Display`/serialization).
pub type ParamMap = BTreeMap<String, ParamValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_int_before_float_before_string() {
        assert_eq!(ParamValue::coerce_from_str("42"), ParamValue::Int(42));
        assert_eq!(ParamValue::coerce_from_str("4.5"), ParamValue::Float(4.5));
        assert_eq!(
            ParamValue::coerce_from_str("hello"),
            ParamValue::Str("hello".to_string())
        );
    }

    #[test]
    fn as_f64_coerces_string_numbers() {
        let v = ParamValue::Str("12.5".to_string());
        assert_eq!(v.as_f64(), Some(12.5));
    }
}
