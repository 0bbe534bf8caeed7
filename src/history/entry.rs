//! `HistoryEntry` and its deterministic fingerprint.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::actions::{Action, ActionKind, ParamMap};

/// One recorded step: the action taken and a copy of its parameters at the
/// time, independent of the live `Action` (which may carry screenshots).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub step: u32,
    pub kind: ActionKind,
    pub params: ParamMap,
    pub reasoning: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HistoryEntry {
    pub fn from_action(step: u32, action: &Action) -> HistoryEntry {
        HistoryEntry {
            step,
            kind: action.kind,
            params: action.params.clone(),
            reasoning: action.reasoning.clone(),
            timestamp: chrono::Utc::now(),
        }
    }

    /// A deterministic 16-hex-char fingerprint of `kind` plus canonicalized
    /// params, used by the loop detector. `ParamMap` is a `BTreeMap`, so
    /// iteration order is already canonical regardless of insertion order —
    /// mirroring the Python original's `json.dumps(..., sort_keys=True)`
    /// before hashing.
    pub fn fingerprint(&self) -> String {
        let mut hasher = DefaultHasher::new();
        self.kind.hash(&mut hasher);
        for (key, value) in &self.params {
            key.hash(&mut hasher);
            value.to_string().hash(&mut hasher);
        }
        format!("{:016x}", hasher.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn fingerprint_is_deterministic_and_order_independent() {
        let mut params_a = BTreeMap::new();
        params_a.insert("x".to_string(), crate::actions::ParamValue::Int(1));
        params_a.insert("y".to_string(), crate::actions::ParamValue::Int(2));
        let action_a = Action::new(ActionKind::Click, params_a);

        let mut params_b = BTreeMap::new();
        params_b.insert("y".to_string(), crate::actions::ParamValue::Int(2));
        params_b.insert("x".to_string(), crate::actions::ParamValue::Int(1));
        let action_b = Action::new(ActionKind::Click, params_b);

        let entry_a = HistoryEntry::from_action(1, &action_a);
        let entry_b = HistoryEntry::from_action(2, &action_b);
        assert_eq!(entry_a.fingerprint(), entry_b.fingerprint());
    }

    #[test]
    fn fingerprint_differs_on_param_change() {
        let mut params = BTreeMap::new();
        params.insert("x".to_string(), crate::actions::ParamValue::Int(1));
        let entry_a = HistoryEntry::from_action(1, &Action::new(ActionKind::Click, params.clone()));
        params.insert("x".to_string(), crate::actions::ParamValue::Int(2));
        let entry_b = HistoryEntry::from_action(1, &Action::new(ActionKind::Click, params));
        assert_ne!(entry_a.fingerprint(), entry_b.fingerprint());
    }
}
