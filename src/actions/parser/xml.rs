//! XML sub-parser: `<action type="NAME"> <p1>v1</p1> ... </action>`.
//!
//! Grounded in `original_source/backend/app/agent/protocol_adapter.py`'s
//! `GelabAdapter.parse_action` regex pair.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::actions::kind::ActionKind;
use crate::actions::model::Action;
use crate::actions::value::ParamValue;

static ACTION_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)<action\s+type="(\w+)"[^>]*>(.*?)</action>"#).unwrap());
static PARAM_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(\w+)>([^<]*)</\1>").unwrap());

pub fn parse(text: &str) -> Option<Action> {
    let caps = ACTION_TAG.captures(text)?;
    let name = &caps[1];
    let inner = &caps[2];
    let kind = ActionKind::from_name(name)?;

    let mut params = BTreeMap::new();
    for pc in PARAM_TAG.captures_iter(inner) {
        let key = pc[1].to_string();
        let value = ParamValue::coerce_from_str(pc[2].trim());
        params.insert(key, value);
    }

    Some(Action::new(kind, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_click_xml() {
        let action = parse(r#"<action type="click"><x>500</x><y>500</y></action>"#).unwrap();
        assert_eq!(action.kind, ActionKind::Click);
        assert_eq!(action.param("x").unwrap().as_i64(), Some(500));
        assert_eq!(action.param("y").unwrap().as_i64(), Some(500));
    }

    #[test]
    fn parses_back_with_no_params() {
        let action = parse(r#"<action type="back"></action>"#).unwrap();
        assert_eq!(action.kind, ActionKind::Back);
        assert!(action.params.is_empty());
    }

    #[test]
    fn unknown_tag_name_fails() {
        assert!(parse(r#"<action type="teleport"></action>"#).is_none());
    }

    #[test]
    fn no_xml_present_returns_none() {
        assert!(parse("just plain text").is_none());
    }
}
