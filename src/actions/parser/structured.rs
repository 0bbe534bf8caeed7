//! Structured-call sub-parser: `NAME(k1=v1, k2=v2, ...)`.
//!
//! Grounded in the reference crate's `actions/handler.rs::parse_action` char-
//! by-char state machine (quoted-string and nested-bracket aware scanning);
//! generalized here from the reference's `do`/`finish`-only wrappers to any
//! `NAME` resolvable by `ActionKind::from_name`.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::actions::kind::{schema_for, ActionKind};
use crate::actions::model::Action;
use crate::actions::value::ParamValue;

static CALL_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*\s*\(").unwrap());

enum CallArg {
    Named(String, ParamValue),
    Positional(ParamValue),
}

/// Try every top-level `NAME(` occurrence in `text` until one parses cleanly.
pub fn parse(text: &str) -> Option<Action> {
    let bytes = text.as_bytes();
    let mut search_from = 0usize;
    while let Some(m) = CALL_START.find_at(text, search_from) {
        let name_end = m.as_str().trim_end().len() + m.start();
        let name = text[m.start()..name_end].to_string();
        let open_paren = m.end() - 1;
        debug_assert_eq!(bytes.get(open_paren), Some(&b'('));
        if let Some(close_paren) = matching_paren(text, open_paren) {
            let args_str = &text[open_paren + 1..close_paren];
            if let Some(action) = parse_call(&name, args_str) {
                return Some(action);
            }
        }
        search_from = m.end();
    }
    None
}

/// Scan forward from an opening `(` at byte index `open` to its matching `)`,
/// respecting quoted strings (with backslash-escaping of the same quote) and
/// nested `(`/`[` brackets.
fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let chars: Vec<char> = text.chars().collect();
    // Map char index back from byte index.
    let open_char_idx = text[..open].chars().count();
    let mut depth = 0i32;
    let mut i = open_char_idx;
    let mut in_quote: Option<char> = None;
    while i < chars.len() {
        let c = chars[i];
        if let Some(q) = in_quote {
            if c == '\\' {
                i += 2;
                continue;
            }
            if c == q {
                in_quote = None;
            }
            i += 1;
            continue;
        }
        match c {
            '\'' | '"' => in_quote = Some(c),
            '(' | '[' => depth += 1,
            ')' | ']' => {
                depth -= 1;
                if depth == 0 && c == ')' {
                    let byte_idx: usize = chars[..i].iter().map(|c| c.len_utf8()).sum();
                    return Some(byte_idx);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn parse_args(args_str: &str) -> Option<Vec<CallArg>> {
    let chars: Vec<char> = args_str.chars().collect();
    let mut args = Vec::new();
    let mut i = 0usize;
    while i < chars.len() {
        while i < chars.len() && (chars[i].is_whitespace() || chars[i] == ',') {
            i += 1;
        }
        if i >= chars.len() {
            break;
        }
        let start = i;
        // Identifier followed by `=` => named argument.
        let mut j = i;
        while j < chars.len() && (chars[j].is_alphanumeric() || chars[j] == '_') {
            j += 1;
        }
        let mut k = j;
        while k < chars.len() && chars[k].is_whitespace() {
            k += 1;
        }
        if j > start && k < chars.len() && chars[k] == '=' {
            let key: String = chars[start..j].iter().collect();
            let (value, next) = parse_value(&chars, k + 1)?;
            args.push(CallArg::Named(key, value));
            i = next;
        } else {
            let (value, next) = parse_value(&chars, start)?;
            args.push(CallArg::Positional(value));
            i = next;
        }
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        if i < chars.len() && chars[i] == ',' {
            i += 1;
        }
    }
    Some(args)
}

/// Parse one value starting at `start`, returning the value and the index
/// just past it. Handles quoted strings, `[...]` int lists, and bare tokens.
fn parse_value(chars: &[char], start: usize) -> Option<(ParamValue, usize)> {
    let mut i = start;
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    if i >= chars.len() {
        return None;
    }
    match chars[i] {
        '\'' | '"' => {
            let quote = chars[i];
            let mut s = String::new();
            i += 1;
            while i < chars.len() && chars[i] != quote {
                if chars[i] == '\\' && i + 1 < chars.len() && chars[i + 1] == quote {
                    s.push(quote);
                    i += 2;
                } else {
                    s.push(chars[i]);
                    i += 1;
                }
            }
            i += 1; // closing quote
            Some((ParamValue::Str(s), i))
        }
        '[' => {
            let mut items = Vec::new();
            i += 1;
            loop {
                while i < chars.len() && (chars[i].is_whitespace() || chars[i] == ',') {
                    i += 1;
                }
                if i >= chars.len() || chars[i] == ']' {
                    break;
                }
                let start_tok = i;
                while i < chars.len() && chars[i] != ',' && chars[i] != ']' {
                    i += 1;
                }
                let tok: String = chars[start_tok..i].iter().collect();
                if let Ok(n) = tok.trim().parse::<i64>() {
                    items.push(n);
                }
            }
            if i < chars.len() && chars[i] == ']' {
                i += 1;
            }
            Some((ParamValue::IntList(items), i))
        }
        _ => {
            let start_tok = i;
            while i < chars.len() && chars[i] != ',' && chars[i] != ')' {
                i += 1;
            }
            let tok: String = chars[start_tok..i].iter().collect();
            Some((ParamValue::coerce_from_str(tok.trim()), i))
        }
    }
}

fn parse_call(name: &str, args_str: &str) -> Option<Action> {
    let args = parse_args(args_str)?;
    let lname = name.trim().to_ascii_lowercase();

    let (kind, skip): (ActionKind, &[&str]) = if lname == "do" {
        let action_str = args.iter().find_map(|a| match a {
            CallArg::Named(k, v) if k == "action" => v.as_str().map(|s| s.to_string()),
            _ => None,
        })?;
        (ActionKind::from_name(&action_str)?, &["action"])
    } else if lname == "finish" {
        (ActionKind::Finish, &[])
    } else {
        (ActionKind::from_name(&lname)?, &[])
    };

    build_action(kind, args, skip)
}

fn build_action(kind: ActionKind, args: Vec<CallArg>, skip: &[&str]) -> Option<Action> {
    let schema = schema_for(kind);
    let mut params = BTreeMap::new();

    for arg in args {
        match arg {
            CallArg::Named(key, value) if skip.contains(&key.as_str()) => { let _ = value; }
            CallArg::Named(key, value) if key == "element" => {
                if let Some(list) = value.as_int_list() {
                    if list.len() >= 2 {
                        params.insert("x".to_string(), ParamValue::Int(list[0]));
                        params.insert("y".to_string(), ParamValue::Int(list[1]));
                    }
                } else {
                    params.insert(key, value);
                }
            }
            CallArg::Named(key, value) => {
                params.insert(key, value);
            }
            CallArg::Positional(value) => {
                params.insert(schema.positional_default.to_string(), value);
            }
        }
    }

    // `do(action="Swipe", direction="up")` denotes a directional scroll,
    // distinct from the four-coordinate `swipe(x1,y1,x2,y2)` form.
    if kind == ActionKind::Swipe {
        if let Some(ParamValue::Str(direction)) = params.get("direction").cloned() {
            if !params.contains_key("x1") {
                let scroll_kind = match direction.to_ascii_lowercase().as_str() {
                    "up" => Some(ActionKind::ScrollUp),
                    "down" => Some(ActionKind::ScrollDown),
                    "left" => Some(ActionKind::ScrollLeft),
                    "right" => Some(ActionKind::ScrollRight),
                    _ => None,
                };
                if let Some(scroll_kind) = scroll_kind {
                    return Some(Action::new(scroll_kind, BTreeMap::new()));
                }
            }
        }
    }

    Some(Action::new(kind, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_do_tap() {
        let action = parse(r#"do(action="Tap", element=[500,500])"#).unwrap();
        assert_eq!(action.kind, ActionKind::Click);
        assert_eq!(action.param("x").unwrap().as_i64(), Some(500));
        assert_eq!(action.param("y").unwrap().as_i64(), Some(500));
    }

    #[test]
    fn parses_finish_with_message() {
        let action = parse(r#"finish(message="done")"#).unwrap();
        assert_eq!(action.kind, ActionKind::Finish);
        assert_eq!(action.param("message").unwrap().as_str(), Some("done"));
    }

    #[test]
    fn parses_directional_swipe_as_scroll() {
        let action = parse(r#"do(action="Swipe", direction="up")"#).unwrap();
        assert_eq!(action.kind, ActionKind::ScrollUp);
    }

    #[test]
    fn parses_direct_call_without_do_wrapper() {
        let action = parse(r#"click(x=100, y=200)"#).unwrap();
        assert_eq!(action.kind, ActionKind::Click);
    }

    #[test]
    fn ignores_surrounding_prose() {
        let text = r#"I will tap the button now. do(action="Tap", element=[10,20]) is my plan."#;
        let action = parse(text).unwrap();
        assert_eq!(action.kind, ActionKind::Click);
        assert_eq!(action.param("x").unwrap().as_i64(), Some(10));
    }

    #[test]
    fn handles_escaped_quotes_in_text_param() {
        let action = parse(r#"do(action="Type", text="say \"hi\"")"#).unwrap();
        assert_eq!(action.param("text").unwrap().as_str(), Some("say \"hi\""));
    }

    #[test]
    fn positional_form_binds_default_param() {
        let action = parse(r#"wait(5)"#).unwrap();
        assert_eq!(action.kind, ActionKind::Wait);
        assert_eq!(action.param("duration").unwrap().as_i64(), Some(5));
    }

    #[test]
    fn unknown_name_fails_this_subparser() {
        assert!(parse(r#"teleport(x=1, y=2)"#).is_none());
    }
}
