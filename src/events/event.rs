//! `StepEvent` (§3/§6): the tagged union streamed to clients.

use serde::{Deserialize, Serialize};

use crate::actions::Action;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepEvent {
    Plan { plan: String },
    Thinking { chunk: String },
    Action { step: u32, action: Action },
    Step {
        step: u32,
        thinking: String,
        action: Option<Action>,
        success: bool,
        finished: bool,
        message: String,
        screenshot: Option<String>,
    },
    Warning { message: String },
    Error { message: String },
    Done { message: String, steps: u32, success: bool },
    Cancelled { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_a_type_tag() {
        let event = StepEvent::Warning { message: "looping".to_string() };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"warning""#));
    }

    #[test]
    fn round_trips_through_json() {
        let event = StepEvent::Done { message: "ok".to_string(), steps: 3, success: true };
        let json = serde_json::to_string(&event).unwrap();
        let back: StepEvent = serde_json::from_str(&json).unwrap();
        matches!(back, StepEvent::Done { steps: 3, success: true, .. });
    }
}
