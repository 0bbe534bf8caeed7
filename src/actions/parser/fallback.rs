//! Coordinate-and-intent fallback sub-parser: the last resort when nothing
//! else matched. Scans for any coordinate pair and infers intent from verbs.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::actions::kind::ActionKind;
use crate::actions::model::Action;
use crate::actions::value::ParamValue;

static COORD_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\(\[]\s*(-?\d+)\s*,\s*(-?\d+)\s*[\)\]]").unwrap());
static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"["“]([^"”]+)["”]"#).unwrap());
static TAP_VERB: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)tap|click|touch|press|点击|单击").unwrap());
static SWIPE_VERB: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)swipe|drag|滑动|滑").unwrap());
static INPUT_VERB: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)type|input|enter|输入").unwrap());

pub fn parse(text: &str) -> Option<Action> {
    if let Some(caps) = QUOTED.captures(text) {
        if INPUT_VERB.is_match(text) {
            let mut params = BTreeMap::new();
            params.insert("text".to_string(), ParamValue::Str(caps[1].to_string()));
            return Some(Action::new(ActionKind::Type, params));
        }
    }

    let coords = COORD_PAIR.captures(text);

    if SWIPE_VERB.is_match(text) {
        let kind = infer_swipe_direction(text).unwrap_or(ActionKind::ScrollUp);
        return Some(Action::new(kind, BTreeMap::new()));
    }

    if let Some(caps) = coords {
        let x: i64 = caps[1].parse().ok()?;
        let y: i64 = caps[2].parse().ok()?;
        let mut params = BTreeMap::new();
        params.insert("x".to_string(), ParamValue::Int(x));
        params.insert("y".to_string(), ParamValue::Int(y));
        // Default to click whether or not a tap verb is present, per §4.3(5).
        let _ = TAP_VERB.is_match(text);
        return Some(Action::new(ActionKind::Click, params));
    }

    None
}

fn infer_swipe_direction(text: &str) -> Option<ActionKind> {
    let lower = text.to_ascii_lowercase();
    if lower.contains("up") || text.contains('上') {
        Some(ActionKind::ScrollUp)
    } else if lower.contains("down") || text.contains('下') {
        Some(ActionKind::ScrollDown)
    } else if lower.contains("left") || text.contains('左') {
        Some(ActionKind::ScrollLeft)
    } else if lower.contains("right") || text.contains('右') {
        Some(ActionKind::ScrollRight)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_alone_default_to_click() {
        let action = parse("target is [320, 480]").unwrap();
        assert_eq!(action.kind, ActionKind::Click);
    }

    #[test]
    fn swipe_verb_with_direction_word() {
        let action = parse("swipe down the list").unwrap();
        assert_eq!(action.kind, ActionKind::ScrollDown);
    }

    #[test]
    fn input_verb_with_quoted_text_becomes_type() {
        let action = parse(r#"input "hello world" into the field"#).unwrap();
        assert_eq!(action.kind, ActionKind::Type);
        assert_eq!(action.param("text").unwrap().as_str(), Some("hello world"));
    }

    #[test]
    fn nothing_recognizable_returns_none() {
        assert!(parse("nothing useful here").is_none());
    }
}
