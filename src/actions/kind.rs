//! Closed action vocabulary and per-kind parameter schema (C1).

use std::fmt;

/// The closed set of action kinds the agent can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
    Click,
    LongClick,
    DoubleClick,
    Swipe,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
    Type,
    Clear,
    Back,
    Home,
    Recent,
    Wait,
    Finish,
    Fail,
    LaunchApp,
    PressKey,
    Screenshot,
    Think,
    Plan,
}

impl ActionKind {
    /// All kinds in the closed set, used by `describe_all` and alias resolution.
    pub const ALL: &'static [ActionKind] = &[
        ActionKind::Click,
        ActionKind::LongClick,
        ActionKind::DoubleClick,
        ActionKind::Swipe,
        ActionKind::ScrollUp,
        ActionKind::ScrollDown,
        ActionKind::ScrollLeft,
        ActionKind::ScrollRight,
        ActionKind::Type,
        ActionKind::Clear,
        ActionKind::Back,
        ActionKind::Home,
        ActionKind::Recent,
        ActionKind::Wait,
        ActionKind::Finish,
        ActionKind::Fail,
        ActionKind::LaunchApp,
        ActionKind::PressKey,
        ActionKind::Screenshot,
        ActionKind::Think,
        ActionKind::Plan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Click => "click",
            ActionKind::LongClick => "long_click",
            ActionKind::DoubleClick => "double_click",
            ActionKind::Swipe => "swipe",
            ActionKind::ScrollUp => "scroll_up",
            ActionKind::ScrollDown => "scroll_down",
            ActionKind::ScrollLeft => "scroll_left",
            ActionKind::ScrollRight => "scroll_right",
            ActionKind::Type => "type",
            ActionKind::Clear => "clear",
            ActionKind::Back => "back",
            ActionKind::Home => "home",
            ActionKind::Recent => "recent",
            ActionKind::Wait => "wait",
            ActionKind::Finish => "finish",
            ActionKind::Fail => "fail",
            ActionKind::LaunchApp => "launch_app",
            ActionKind::PressKey => "press_key",
            ActionKind::Screenshot => "screenshot",
            ActionKind::Think => "think",
            ActionKind::Plan => "plan",
        }
    }

    /// Resolve a kind from its canonical name or a known vendor alias.
    ///
    /// Unknown names return `None` rather than defaulting to `Click`, so a
    /// composite parser can retry with the next sub-parser (§4.3).
    pub fn from_name(name: &str) -> Option<ActionKind> {
        let lower = name.trim().to_ascii_lowercase();
        let canonical = match lower.as_str() {
            "click" | "tap" | "touch" | "press" => ActionKind::Click,
            "long_click" | "longclick" | "long_press" | "longpress" => ActionKind::LongClick,
            "double_click" | "doubleclick" | "double_tap" => ActionKind::DoubleClick,
            "swipe" | "drag" => ActionKind::Swipe,
            "scroll_up" | "scrollup" => ActionKind::ScrollUp,
            "scroll_down" | "scrolldown" => ActionKind::ScrollDown,
            "scroll_left" | "scrollleft" => ActionKind::ScrollLeft,
            "scroll_right" | "scrollright" => ActionKind::ScrollRight,
            "type" | "input" | "input_text" | "text" => ActionKind::Type,
            "clear" | "clear_text" => ActionKind::Clear,
            "back" | "return" | "exit" => ActionKind::Back,
            "home" => ActionKind::Home,
            "recent" | "recents" | "overview" => ActionKind::Recent,
            "wait" | "sleep" => ActionKind::Wait,
            "finish" | "done" | "complete" => ActionKind::Finish,
            "fail" | "failed" | "abort" => ActionKind::Fail,
            "launch_app" | "launch" | "open_app" | "start_app" | "open" => ActionKind::LaunchApp,
            "press_key" | "presskey" | "key" => ActionKind::PressKey,
            "screenshot" => ActionKind::Screenshot,
            "think" | "thinking" => ActionKind::Think,
            "plan" => ActionKind::Plan,
            _ => return None,
        };
        Some(canonical)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Primitive parameter type used by a `ParameterSchema` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Integer,
    Float,
    String,
    IntList,
}

/// Inclusive numeric bounds, checked after type coercion.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

/// One parameter's schema entry.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub ty: ParamType,
    pub required: bool,
    pub bounds: Option<Bounds>,
}

impl ParamSpec {
    const fn required(name: &'static str, ty: ParamType) -> Self {
        ParamSpec { name, ty, required: true, bounds: None }
    }

    const fn optional(name: &'static str, ty: ParamType) -> Self {
        ParamSpec { name, ty, required: false, bounds: None }
    }

    const fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.bounds = Some(Bounds { min, max });
        self
    }
}

/// The full parameter schema for one action kind.
#[derive(Debug, Clone)]
pub struct ParameterSchema {
    pub kind: ActionKind,
    pub params: &'static [ParamSpec],
    /// Parameter name a bare positional value binds to, e.g. `NAME("x")`.
    pub positional_default: &'static str,
}

/// Parameter schema for every kind in the closed set (§4.1).
pub fn schema_for(kind: ActionKind) -> ParameterSchema {
    use ActionKind::*;
    use ParamType::*;

    // Upper bound is the widest `coordinate_scale` any adapter declares
    // (§3: normalized range is `[0, S]`, S up to 1000 on Universal/Gelab);
    // the adapter-specific scale is what actually maps these to pixels.
    const XY: &[ParamSpec] = &[
        ParamSpec::required("x", Integer).with_bounds(0.0, 1000.0),
        ParamSpec::required("y", Integer).with_bounds(0.0, 1000.0),
    ];
    const XY_DURATION: &[ParamSpec] = &[
        ParamSpec::required("x", Integer).with_bounds(0.0, 1000.0),
        ParamSpec::required("y", Integer).with_bounds(0.0, 1000.0),
        ParamSpec::optional("duration", Integer).with_bounds(0.0, 60_000.0),
    ];
    const SWIPE: &[ParamSpec] = &[
        ParamSpec::required("x1", Integer).with_bounds(0.0, 1000.0),
        ParamSpec::required("y1", Integer).with_bounds(0.0, 1000.0),
        ParamSpec::required("x2", Integer).with_bounds(0.0, 1000.0),
        ParamSpec::required("y2", Integer).with_bounds(0.0, 1000.0),
        ParamSpec::optional("duration", Integer).with_bounds(0.0, 60_000.0),
    ];
    const NONE: &[ParamSpec] = &[];
    const TYPE_TEXT: &[ParamSpec] = &[ParamSpec::required("text", String)];
    const WAIT: &[ParamSpec] = &[ParamSpec::optional("duration", Float).with_bounds(0.0, 3600.0)];
    const FINISH: &[ParamSpec] = &[ParamSpec::optional("message", String)];
    const LAUNCH: &[ParamSpec] = &[ParamSpec::required("app", String)];
    const KEY: &[ParamSpec] = &[ParamSpec::required("key", String)];
    const FREE_TEXT: &[ParamSpec] = &[ParamSpec::optional("message", String)];

    let (params, positional_default) = match kind {
        Click => (XY, "value"),
        LongClick => (XY_DURATION, "value"),
        DoubleClick => (XY, "value"),
        Swipe => (SWIPE, "direction"),
        ScrollUp | ScrollDown | ScrollLeft | ScrollRight => (NONE, "value"),
        Type => (TYPE_TEXT, "text"),
        Clear => (NONE, "value"),
        Back | Home | Recent | Screenshot => (NONE, "value"),
        Wait => (WAIT, "duration"),
        Finish => (FINISH, "message"),
        Fail => (FREE_TEXT, "message"),
        LaunchApp => (LAUNCH, "app"),
        PressKey => (KEY, "key"),
        Think | Plan => (FREE_TEXT, "message"),
    };

    ParameterSchema { kind, params, positional_default }
}

/// Human-readable listing of every kind, its parameters, and purpose —
/// used as the un-adapted base of the system prompt (§4.4/§4.6).
pub fn describe_all() -> String {
    let mut out = String::new();
    for kind in ActionKind::ALL {
        let schema = schema_for(*kind);
        out.push_str(kind.as_str());
        out.push_str(": ");
        let params: Vec<String> = schema
            .params
            .iter()
            .map(|p| {
                if p.required {
                    p.name.to_string()
                } else {
                    format!("{}?", p.name)
                }
            })
            .collect();
        out.push_str(&params.join(", "));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_canonical_kind() {
        assert_eq!(ActionKind::from_name("tap"), Some(ActionKind::Click));
        assert_eq!(ActionKind::from_name("open_app"), Some(ActionKind::LaunchApp));
        assert_eq!(ActionKind::from_name("return"), Some(ActionKind::Back));
    }

    #[test]
    fn unknown_name_returns_none() {
        assert_eq!(ActionKind::from_name("teleport"), None);
    }

    #[test]
    fn schema_for_click_requires_xy() {
        let schema = schema_for(ActionKind::Click);
        assert!(schema.params.iter().all(|p| p.required));
        assert_eq!(schema.params.len(), 2);
    }

    #[test]
    fn describe_all_lists_every_kind() {
        let described = describe_all();
        for kind in ActionKind::ALL {
            assert!(described.contains(kind.as_str()));
        }
    }
}
