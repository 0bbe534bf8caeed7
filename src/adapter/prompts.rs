//! Per-adapter action-grammar prompt fragments, appended to the base system
//! prompt by `ProtocolAdapter::adapt_system_prompt`.
//!
//! Density and register here are grounded in the reference crate's
//! `config/prompts.rs` (`SYSTEM_PROMPT_ZH`/`SYSTEM_PROMPT_EN`: long,
//! structured, numbered-rule prompts). This expansion keys the same style on
//! `(adapter, lang)` instead of `lang` alone, since the grammar itself differs
//! per adapter, not just the language.

pub fn universal_grammar(lang: &str) -> &'static str {
    if lang == "en" {
        r#"Return your action as JSON: {"action": "<kind>", "params": {...}, "reasoning": "optional"}.
Coordinates use a 0-1000 normalized grid, origin top-left.
Supported kinds: click {x,y}; long_click {x,y,duration?}; swipe {x1,y1,x2,y2,duration?};
type {text}; clear; back; home; recent; wait {duration?}; finish {message?}; launch_app {app}."#
    } else {
        r#"请以 JSON 格式返回动作：{"action": "<动作类型>", "params": {...}, "reasoning": "可选"}。
坐标使用 0-1000 归一化网格，原点在左上角。
支持的类型：click {x,y}；long_click {x,y,duration?}；swipe {x1,y1,x2,y2,duration?}；
type {text}；clear；back；home；recent；wait {duration?}；finish {message?}；launch_app {app}。"#
    }
}

pub fn autoglm_grammar(lang: &str) -> &'static str {
    if lang == "en" {
        r#"Respond with one action call using a 0-999 normalized grid, origin top-left:
do(action="Tap", element=[x,y])
do(action="LongPress", element=[x,y])
do(action="Swipe", direction="up"|"down"|"left"|"right")
do(action="Type", text="...")
do(action="Back")
do(action="Home")
do(action="Wait", duration="2 seconds")
do(action="Launch", app="app name")
finish(message="...")
Wrap your reasoning in <think>...</think> immediately before the call."#
    } else {
        r#"请使用 0-999 归一化网格（原点左上角）返回一个动作调用：
do(action="Tap", element=[x,y])
do(action="LongPress", element=[x,y])
do(action="Swipe", direction="up"|"down"|"left"|"right")
do(action="Type", text="...")
do(action="Back")
do(action="Home")
do(action="Wait", duration="2 seconds")
do(action="Launch", app="应用名称")
finish(message="...")
请将思考过程包裹在 <think>...</think> 中，紧接着给出调用。"#
    }
}

pub fn gelab_grammar(lang: &str) -> &'static str {
    if lang == "en" {
        r#"Return one <action> element using a 0-1000 normalized grid, origin top-left:
<action type="click"><x>500</x><y>500</y></action>
<action type="long_click"><x>500</x><y>500</y><duration>1000</duration></action>
<action type="swipe"><x1>500</x1><y1>800</y1><x2>500</x2><y2>200</y2></action>
<action type="type"><text>...</text></action>
<action type="back"></action>
<action type="home"></action>
<action type="finish"><message>...</message></action>"#
    } else {
        r#"请使用 0-1000 归一化网格（原点左上角）返回一个 <action> 元素：
<action type="click"><x>500</x><y>500</y></action>
<action type="long_click"><x>500</x><y>500</y><duration>1000</duration></action>
<action type="swipe"><x1>500</x1><y1>800</y1><x2>500</x2><y2>200</y2></action>
<action type="type"><text>...</text></action>
<action type="back"></action>
<action type="home"></action>
<action type="finish"><message>...</message></action>"#
    }
}
