//! JSON sub-parser: `{"action": NAME, "params": {...}, "reasoning"?, "confidence"?}`.
//!
//! Grounded in `original_source/backend/app/agent/protocol_adapter.py`'s
//! `UniversalAdapter.parse_action` (direct parse, then a brace-scan fallback
//! over the raw text).

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::actions::kind::ActionKind;
use crate::actions::model::Action;
use crate::actions::value::ParamValue;

static JSON_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

pub fn parse(text: &str) -> Option<Action> {
    if let Some(action) = try_parse(text.trim()) {
        return Some(action);
    }
    let m = JSON_BLOCK.find(text)?;
    try_parse(m.as_str())
}

fn try_parse(candidate: &str) -> Option<Action> {
    let value: Value = serde_json::from_str(candidate).ok()?;
    let obj = value.as_object()?;
    let name = obj.get("action")?.as_str()?;
    let kind = ActionKind::from_name(name)?;

    let mut params = BTreeMap::new();
    if let Some(Value::Object(raw_params)) = obj.get("params") {
        for (k, v) in raw_params {
            if let Some(pv) = json_to_param(v) {
                params.insert(k.clone(), pv);
            }
        }
    }

    let reasoning = obj.get("reasoning").and_then(Value::as_str).unwrap_or_default();
    let mut action = Action::new(kind, params).with_reasoning(reasoning);
    if let Some(conf) = obj.get("confidence").and_then(Value::as_f64) {
        action.confidence = conf;
    }
    Some(action)
}

fn json_to_param(v: &Value) -> Option<ParamValue> {
    match v {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(ParamValue::Int(i))
            } else {
                n.as_f64().map(ParamValue::Float)
            }
        }
        Value::String(s) => Some(ParamValue::Str(s.clone())),
        Value::Array(items) => {
            let ints: Option<Vec<i64>> = items.iter().map(|x| x.as_i64()).collect();
            ints.map(ParamValue::IntList)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_top_level_json_object() {
        let action = parse(r#"{"action":"click","params":{"x":500,"y":500}}"#).unwrap();
        assert_eq!(action.kind, ActionKind::Click);
        assert_eq!(action.param("x").unwrap().as_i64(), Some(500));
    }

    #[test]
    fn extracts_json_embedded_in_prose() {
        let text = r#"Here is my action: {"action":"back","params":{}} done."#;
        let action = parse(text).unwrap();
        assert_eq!(action.kind, ActionKind::Back);
    }

    #[test]
    fn unknown_action_name_fails() {
        assert!(parse(r#"{"action":"teleport","params":{}}"#).is_none());
    }

    #[test]
    fn non_json_text_returns_none() {
        assert!(parse("no braces here").is_none());
    }
}
