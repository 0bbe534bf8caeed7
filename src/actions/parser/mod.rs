//! Action Parser (C3): a composite of ordered sub-parsers, first success wins.
//!
//! Order is the behaviorally authoritative one recorded in the spec's open
//! questions: `structured → xml → json → natural → coord-fallback`.

mod fallback;
mod json;
mod natural;
mod structured;
mod xml;

use once_cell::sync::Lazy;
use regex::Regex;

use super::model::Action;

static ANSWER_WRAPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<answer>(.*?)</answer>").unwrap());

/// Parse raw model text into an `Action`, trying every sub-parser in order.
/// Pure: the same input always yields the same result.
pub fn parse(raw_text: &str) -> Option<Action> {
    parse_with_brackets(raw_text, None, None)
}

/// Parse raw model text, first stripping an adapter-specific thinking bracket
/// pair (e.g. the `autoglm` Chinese `熟虑…全景` delimiters) in addition to the
/// generic `<answer>...</answer>` wrapper every adapter may emit.
pub fn parse_with_brackets(raw_text: &str, prefix: Option<&str>, suffix: Option<&str>) -> Option<Action> {
    let unwrapped = strip_answer_wrapper(raw_text);
    let stripped = strip_thinking_bracket(&unwrapped, prefix, suffix);

    structured::parse(&stripped)
        .or_else(|| xml::parse(&stripped))
        .or_else(|| json::parse(&stripped))
        .or_else(|| natural::parse(&stripped))
        .or_else(|| fallback::parse(&stripped))
}

fn strip_answer_wrapper(text: &str) -> String {
    if let Some(caps) = ANSWER_WRAPPER.captures(text) {
        caps[1].to_string()
    } else {
        text.to_string()
    }
}

fn strip_thinking_bracket(text: &str, prefix: Option<&str>, suffix: Option<&str>) -> String {
    let Some(prefix) = prefix.filter(|p| !p.is_empty()) else {
        return text.to_string();
    };
    let Some(start) = text.find(prefix) else {
        return text.to_string();
    };
    let after_prefix = start + prefix.len();
    match suffix.filter(|s| !s.is_empty()).and_then(|s| text[after_prefix..].find(s)) {
        Some(rel_end) => {
            let mut out = String::with_capacity(text.len());
            out.push_str(&text[..start]);
            out.push_str(&text[after_prefix + rel_end + suffix.unwrap().len()..]);
            out
        }
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::kind::ActionKind;

    #[test]
    fn structured_wins_over_natural_language() {
        let action = parse(r#"I think I should tap around (1,2) but: do(action="Tap", element=[10,20])"#).unwrap();
        assert_eq!(action.kind, ActionKind::Click);
        assert_eq!(action.param("x").unwrap().as_i64(), Some(10));
    }

    #[test]
    fn strips_answer_wrapper_before_parsing() {
        let action = parse(r#"<answer>finish(message="ok")</answer>"#).unwrap();
        assert_eq!(action.kind, ActionKind::Finish);
    }

    #[test]
    fn strips_thinking_bracket_pair() {
        let raw = "熟虑 I am considering my options 全景 finish(message=\"done\")";
        let action = parse_with_brackets(raw, Some("熟虑"), Some("全景")).unwrap();
        assert_eq!(action.kind, ActionKind::Finish);
    }

    #[test]
    fn falls_through_every_subparser_to_none() {
        assert!(parse("completely unrelated prose with no signal").is_none());
    }

    #[test]
    fn falls_back_to_natural_language_when_structured_absent() {
        let action = parse("我需要点击坐标 (500, 400) 上的按钮").unwrap();
        assert_eq!(action.kind, ActionKind::Click);
    }
}
