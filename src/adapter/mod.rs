//! Protocol Adapter (C4): pluggable per-model-family grammar, coordinate
//! scale, and system prompt.
//!
//! Modeled as a closed tagged enum dispatched by pattern matching rather than
//! a trait-object hierarchy, per the "Closed-set variants replacing
//! inheritance" design note — grounded in
//! `original_source/backend/app/agent/protocol_adapter.py`'s `ProtocolAdapter`
//! ABC with exactly these three concrete subclasses.

mod prompts;

use crate::actions::{parser, Action, ActionKind, ParamValue};

/// One of the three shipped model-family adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolAdapter {
    Universal,
    Autoglm,
    Gelab,
}

impl ProtocolAdapter {
    /// Auto-detect from a model identifier string (§4.4).
    pub fn detect(model_id: &str) -> ProtocolAdapter {
        let lower = model_id.to_ascii_lowercase();
        if lower.contains("autoglm") || lower.contains("glm") {
            ProtocolAdapter::Autoglm
        } else if lower.contains("gelab") {
            ProtocolAdapter::Gelab
        } else {
            ProtocolAdapter::Universal
        }
    }

    pub fn coordinate_scale(&self) -> i64 {
        match self {
            ProtocolAdapter::Universal => 1000,
            ProtocolAdapter::Autoglm => 999,
            ProtocolAdapter::Gelab => 1000,
        }
    }

    /// Canonical output-side thinking bracket. Always the plain English form
    /// (§9 open-question decision), even though `autoglm` tolerates the
    /// Chinese `熟虑…全景` pair on the input side.
    pub fn thinking_prefix(&self) -> &'static str {
        match self {
            ProtocolAdapter::Autoglm => "<think>",
            ProtocolAdapter::Universal | ProtocolAdapter::Gelab => "",
        }
    }

    pub fn thinking_suffix(&self) -> &'static str {
        match self {
            ProtocolAdapter::Autoglm => "</think>",
            ProtocolAdapter::Universal | ProtocolAdapter::Gelab => "",
        }
    }

    /// Literals whose first appearance marks the thinking→action transition
    /// in a live stream (consumed by the Step Executor's streaming splitter).
    pub fn action_markers(&self) -> &'static [&'static str] {
        match self {
            ProtocolAdapter::Universal => &["{\"action\"", "{'action'"],
            ProtocolAdapter::Autoglm => &["do(action=", "finish(message=", "finish("],
            ProtocolAdapter::Gelab => &["<action"],
        }
    }

    /// The base system prompt plus this adapter's action-grammar description.
    pub fn adapt_system_prompt(&self, base: &str, lang: &str) -> String {
        let grammar = match self {
            ProtocolAdapter::Universal => prompts::universal_grammar(lang),
            ProtocolAdapter::Autoglm => prompts::autoglm_grammar(lang),
            ProtocolAdapter::Gelab => prompts::gelab_grammar(lang),
        };
        format!("{base}\n\n{grammar}")
    }

    /// Parse raw model text, biased to this adapter's primary grammar but
    /// falling through the full composite parser chain of C3.
    pub fn parse_action(&self, raw: &str) -> Option<Action> {
        match self {
            ProtocolAdapter::Autoglm => {
                // Tolerate either bracket pair on the input side (§9).
                parser::parse_with_brackets(raw, Some("<think>"), Some("</think>"))
                    .or_else(|| parser::parse_with_brackets(raw, Some("熟虑"), Some("全景")))
                    .or_else(|| parser::parse(raw))
            }
            ProtocolAdapter::Universal | ProtocolAdapter::Gelab => parser::parse(raw),
        }
    }

    /// Canonical textual form this adapter would accept back (round-trip
    /// tests, R1).
    pub fn format_action(&self, action: &Action) -> String {
        match self {
            ProtocolAdapter::Universal => format_universal(action),
            ProtocolAdapter::Autoglm => format_autoglm(action),
            ProtocolAdapter::Gelab => format_gelab(action),
        }
    }
}

fn format_universal(action: &Action) -> String {
    let params: serde_json::Map<String, serde_json::Value> = action
        .params
        .iter()
        .map(|(k, v)| (k.clone(), param_to_json(v)))
        .collect();
    serde_json::json!({ "action": action.kind.as_str(), "params": params }).to_string()
}

fn param_to_json(v: &ParamValue) -> serde_json::Value {
    match v {
        ParamValue::Int(i) => serde_json::json!(i),
        ParamValue::Float(f) => serde_json::json!(f),
        ParamValue::Str(s) => serde_json::json!(s),
        ParamValue::IntList(list) => serde_json::json!(list),
    }
}

fn format_autoglm(action: &Action) -> String {
    match action.kind {
        ActionKind::Finish => {
            let message = action.param("message").map(|v| v.to_string()).unwrap_or_default();
            format!(r#"finish(message="{message}")"#)
        }
        ActionKind::Click => call_with_element("Tap", action),
        ActionKind::LongClick => call_with_element("LongPress", action),
        ActionKind::DoubleClick => call_with_element("DoubleTap", action),
        ActionKind::ScrollUp => r#"do(action="Swipe", direction="up")"#.to_string(),
        ActionKind::ScrollDown => r#"do(action="Swipe", direction="down")"#.to_string(),
        ActionKind::ScrollLeft => r#"do(action="Swipe", direction="left")"#.to_string(),
        ActionKind::ScrollRight => r#"do(action="Swipe", direction="right")"#.to_string(),
        ActionKind::Type => {
            let text = action.param("text").map(|v| v.to_string()).unwrap_or_default();
            format!(r#"do(action="Type", text="{text}")"#)
        }
        ActionKind::Back => r#"do(action="Back")"#.to_string(),
        ActionKind::Home => r#"do(action="Home")"#.to_string(),
        ActionKind::Recent => r#"do(action="Recent")"#.to_string(),
        ActionKind::Wait => {
            let duration = action.param("duration").map(|v| v.to_string()).unwrap_or_else(|| "1".into());
            format!(r#"do(action="Wait", duration="{duration} seconds")"#)
        }
        ActionKind::LaunchApp => {
            let app = action.param("app").map(|v| v.to_string()).unwrap_or_default();
            format!(r#"do(action="Launch", app="{app}")"#)
        }
        other => format!(r#"do(action="{}")"#, capitalize(other.as_str())),
    }
}

fn call_with_element(name: &str, action: &Action) -> String {
    let x = action.param("x").map(|v| v.to_string()).unwrap_or_else(|| "0".into());
    let y = action.param("y").map(|v| v.to_string()).unwrap_or_else(|| "0".into());
    format!(r#"do(action="{name}", element=[{x},{y}])"#)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn format_gelab(action: &Action) -> String {
    let mut parts = vec![format!(r#"<action type="{}">"#, action.kind.as_str())];
    for (key, value) in &action.params {
        parts.push(format!("<{key}>{value}</{key}>"));
    }
    parts.push("</action>".to_string());
    parts.join("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn detects_autoglm_from_model_id() {
        assert_eq!(ProtocolAdapter::detect("autoglm-phone-9b"), ProtocolAdapter::Autoglm);
        assert_eq!(ProtocolAdapter::detect("glm-4v"), ProtocolAdapter::Autoglm);
    }

    #[test]
    fn detects_gelab_and_defaults_to_universal() {
        assert_eq!(ProtocolAdapter::detect("gelab-v1"), ProtocolAdapter::Gelab);
        assert_eq!(ProtocolAdapter::detect("gpt-4o"), ProtocolAdapter::Universal);
    }

    #[test]
    fn autoglm_round_trips_a_click() {
        let mut params = BTreeMap::new();
        params.insert("x".to_string(), ParamValue::Int(10));
        params.insert("y".to_string(), ParamValue::Int(20));
        let action = Action::new(ActionKind::Click, params);
        let formatted = ProtocolAdapter::Autoglm.format_action(&action);
        let parsed = ProtocolAdapter::Autoglm.parse_action(&formatted).unwrap();
        assert_eq!(parsed.kind, ActionKind::Click);
        assert_eq!(parsed.param("x").unwrap().as_i64(), Some(10));
        assert_eq!(parsed.param("y").unwrap().as_i64(), Some(20));
    }

    #[test]
    fn universal_round_trips_finish() {
        let mut params = BTreeMap::new();
        params.insert("message".to_string(), ParamValue::Str("done".to_string()));
        let action = Action::new(ActionKind::Finish, params);
        let formatted = ProtocolAdapter::Universal.format_action(&action);
        let parsed = ProtocolAdapter::Universal.parse_action(&formatted).unwrap();
        assert_eq!(parsed.kind, ActionKind::Finish);
    }

    #[test]
    fn gelab_round_trips_back() {
        let action = Action::new(ActionKind::Back, BTreeMap::new());
        let formatted = ProtocolAdapter::Gelab.format_action(&action);
        let parsed = ProtocolAdapter::Gelab.parse_action(&formatted).unwrap();
        assert_eq!(parsed.kind, ActionKind::Back);
    }

    #[test]
    fn autoglm_tolerates_chinese_thinking_brackets_on_input() {
        let raw = "熟虑 thinking about it 全景 finish(message=\"ok\")";
        let parsed = ProtocolAdapter::Autoglm.parse_action(raw).unwrap();
        assert_eq!(parsed.kind, ActionKind::Finish);
    }

    #[test]
    fn adapt_system_prompt_includes_grammar() {
        let prompt = ProtocolAdapter::Autoglm.adapt_system_prompt("base instructions", "en");
        assert!(prompt.contains("base instructions"));
        assert!(prompt.contains("do(action="));
    }
}
