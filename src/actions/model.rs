//! Action Model (C1): the discriminated `Action` record and its validator.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::kind::{schema_for, ActionKind, ParamType};
use super::value::{ParamMap, ParamValue};

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("unknown action kind: {0}")]
    UnknownKind(String),
    #[error("action is missing required parameter `{0}`")]
    MissingParam(&'static str),
    #[error("action has undeclared parameter `{0}`")]
    UndeclaredParam(String),
    #[error("parameter `{name}` could not be coerced to {expected:?}")]
    Coercion { name: String, expected: ParamType },
    #[error("parameter `{name}` value {value} is out of bounds [{min}, {max}]")]
    OutOfBounds { name: String, value: f64, min: f64, max: f64 },
    #[error("device operation failed: {0}")]
    Execution(String),
}

/// One discrete action the agent emits or executes (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub params: ParamMap,
    pub reasoning: String,
    pub confidence: f64,
    pub timestamp: u64,
    pub screenshot_before: Option<String>,
    pub screenshot_after: Option<String>,
}

// `ActionKind` needs Serialize/Deserialize too; derive via its string form.
impl Serialize for ActionKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActionKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ActionKind::from_name(&s).ok_or_else(|| serde::de::Error::custom(format!("unknown action kind `{s}`")))
    }
}

impl Action {
    pub fn new(kind: ActionKind, params: ParamMap) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Action {
            kind,
            params,
            reasoning: String::new(),
            confidence: 1.0,
            timestamp,
            screenshot_before: None,
            screenshot_after: None,
        }
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }
}

/// Validation never throws; it returns every diagnostic found (§3, §4.1).
pub fn validate(action: &Action) -> (bool, Vec<String>) {
    let mut diagnostics = Vec::new();
    let schema = schema_for(action.kind);

    for spec in schema.params {
        if spec.required && !action.params.contains_key(spec.name) {
            diagnostics.push(format!("missing required parameter `{}`", spec.name));
        }
    }

    let declared: Vec<&str> = schema.params.iter().map(|p| p.name).collect();
    for name in action.params.keys() {
        if !declared.contains(&name.as_str()) {
            diagnostics.push(format!("undeclared parameter `{name}`"));
        }
    }

    for spec in schema.params {
        let Some(value) = action.params.get(spec.name) else { continue };
        let type_ok = match (&spec.ty, value) {
            (ParamType::Integer, ParamValue::Int(_)) => true,
            (ParamType::Integer, ParamValue::Str(s)) => s.trim().parse::<i64>().is_ok(),
            (ParamType::Float, ParamValue::Float(_)) => true,
            (ParamType::Float, ParamValue::Int(_)) => true,
            (ParamType::Float, ParamValue::Str(s)) => s.trim().parse::<f64>().is_ok(),
            (ParamType::String, ParamValue::Str(_)) => true,
            (ParamType::IntList, ParamValue::IntList(_)) => true,
            _ => false,
        };
        if !type_ok {
            diagnostics.push(format!("parameter `{}` has wrong type for {:?}", spec.name, spec.ty));
            continue;
        }
        if let Some(bounds) = spec.bounds {
            if let Some(n) = value.as_f64() {
                if n < bounds.min || n > bounds.max {
                    diagnostics.push(format!(
                        "parameter `{}` value {} out of bounds [{}, {}]",
                        spec.name, n, bounds.min, bounds.max
                    ));
                }
            }
        }
    }

    (diagnostics.is_empty(), diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn params(pairs: &[(&str, ParamValue)]) -> ParamMap {
        let mut m = BTreeMap::new();
        for (k, v) in pairs {
            m.insert(k.to_string(), v.clone());
        }
        m
    }

    #[test]
    fn valid_click_passes() {
        let action = Action::new(
            ActionKind::Click,
            params(&[("x", ParamValue::Int(10)), ("y", ParamValue::Int(20))]),
        );
        let (ok, diags) = validate(&action);
        assert!(ok, "{diags:?}");
    }

    #[test]
    fn missing_required_param_fails() {
        let action = Action::new(ActionKind::Click, params(&[("x", ParamValue::Int(10))]));
        let (ok, diags) = validate(&action);
        assert!(!ok);
        assert!(diags.iter().any(|d| d.contains("y")));
    }

    #[test]
    fn undeclared_param_is_flagged() {
        let action = Action::new(
            ActionKind::Back,
            params(&[("bogus", ParamValue::Int(1))]),
        );
        let (ok, diags) = validate(&action);
        assert!(!ok);
        assert!(diags.iter().any(|d| d.contains("bogus")));
    }

    #[test]
    fn out_of_bounds_coordinate_is_flagged() {
        let action = Action::new(
            ActionKind::Click,
            params(&[("x", ParamValue::Int(5000)), ("y", ParamValue::Int(20))]),
        );
        let (ok, diags) = validate(&action);
        assert!(!ok);
        assert!(diags.iter().any(|d| d.contains("out of bounds")));
    }

    #[test]
    fn string_coercible_to_declared_int_type_passes() {
        let action = Action::new(
            ActionKind::Click,
            params(&[("x", ParamValue::Str("10".into())), ("y", ParamValue::Int(20))]),
        );
        let (ok, _) = validate(&action);
        assert!(ok);
    }
}
