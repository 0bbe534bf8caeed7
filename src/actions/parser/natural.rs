//! Natural-language sub-parser: a ranked regex table over free English/Chinese
//! text. Tried after the structured/XML/JSON grammars fail.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::actions::kind::ActionKind;
use crate::actions::model::Action;
use crate::actions::value::ParamValue;

static COORD_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\(\[]?\s*(-?\d+)\s*,\s*(-?\d+)\s*[\)\]]?").unwrap());

static BACK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(go\s+back|press\s+back|back\s+button)\b|返回|后退").unwrap());
static HOME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(go\s+home|press\s+home|home\s+screen)\b|回到主页|主屏幕").unwrap());
static WAIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)wait\s+(?:for\s+)?(\d+(?:\.\d+)?)|等待\s*(\d+(?:\.\d+)?)").unwrap());
static TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)(?:type|input|enter)\s+["“]([^"”]+)["”]|输入\s*["“]([^"”]+)["”]"#).unwrap());
static SWIPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)swipe\s+(up|down|left|right)|向(上|下|左|右)滑动|(上|下|左|右)滑").unwrap()
});
static LONG_CLICK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)long[\s_-]?(?:press|click)|长按").unwrap());
static CLICK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(click|tap|press)\b|点击|单击|按").unwrap());
static FINISH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)task\s+(?:is\s+)?(?:complete|finished|done)|任务完成|已完成").unwrap());

pub fn parse(text: &str) -> Option<Action> {
    if BACK.is_match(text) {
        return Some(Action::new(ActionKind::Back, BTreeMap::new()));
    }
    if HOME.is_match(text) {
        return Some(Action::new(ActionKind::Home, BTreeMap::new()));
    }
    if FINISH.is_match(text) {
        return Some(Action::new(ActionKind::Finish, BTreeMap::new()));
    }
    if let Some(caps) = WAIT.captures(text) {
        let raw = caps.get(1).or_else(|| caps.get(2))?.as_str();
        let mut params = BTreeMap::new();
        params.insert("duration".to_string(), ParamValue::coerce_from_str(raw));
        return Some(Action::new(ActionKind::Wait, params));
    }
    if let Some(caps) = TYPE.captures(text) {
        let text_value = caps.get(1).or_else(|| caps.get(2))?.as_str().to_string();
        let mut params = BTreeMap::new();
        params.insert("text".to_string(), ParamValue::Str(text_value));
        return Some(Action::new(ActionKind::Type, params));
    }
    if let Some(caps) = SWIPE.captures(text) {
        let direction_word = caps
            .get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .map(|m| m.as_str())?;
        let kind = match direction_word {
            "up" | "上" => ActionKind::ScrollUp,
            "down" | "下" => ActionKind::ScrollDown,
            "left" | "左" => ActionKind::ScrollLeft,
            "right" | "右" => ActionKind::ScrollRight,
            _ => return None,
        };
        return Some(Action::new(kind, BTreeMap::new()));
    }
    if LONG_CLICK.is_match(text) {
        if let Some(caps) = COORD_PAIR.captures(text) {
            let (x, y) = (caps[1].parse().ok()?, caps[2].parse().ok()?);
            let mut params = BTreeMap::new();
            params.insert("x".to_string(), ParamValue::Int(x));
            params.insert("y".to_string(), ParamValue::Int(y));
            return Some(Action::new(ActionKind::LongClick, params));
        }
    }
    if CLICK.is_match(text) {
        if let Some(caps) = COORD_PAIR.captures(text) {
            let (x, y) = (caps[1].parse().ok()?, caps[2].parse().ok()?);
            let mut params = BTreeMap::new();
            params.insert("x".to_string(), ParamValue::Int(x));
            params.insert("y".to_string(), ParamValue::Int(y));
            return Some(Action::new(ActionKind::Click, params));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_click_with_coordinates_in_chinese() {
        let action = parse("我需要点击坐标 (500, 400) 上的按钮").unwrap();
        assert_eq!(action.kind, ActionKind::Click);
        assert_eq!(action.param("x").unwrap().as_i64(), Some(500));
        assert_eq!(action.param("y").unwrap().as_i64(), Some(400));
    }

    #[test]
    fn extracts_click_with_coordinates_in_english() {
        let action = parse("I should tap on (120, 80) to continue").unwrap();
        assert_eq!(action.kind, ActionKind::Click);
        assert_eq!(action.param("x").unwrap().as_i64(), Some(120));
    }

    #[test]
    fn recognizes_back_without_coordinates() {
        let action = parse("Let's go back to the previous screen").unwrap();
        assert_eq!(action.kind, ActionKind::Back);
    }

    #[test]
    fn recognizes_swipe_direction_in_chinese() {
        let action = parse("向上滑动查看更多内容").unwrap();
        assert_eq!(action.kind, ActionKind::ScrollUp);
    }

    #[test]
    fn no_recognizable_verb_returns_none() {
        assert!(parse("The weather is nice today").is_none());
    }
}
