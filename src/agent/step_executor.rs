//! Step Executor (C8): one capture→compose→stream→parse→dispatch→record
//! cycle, grounded in the reference crate's `agent/phone_agent.rs::execute_step`
//! (capture→compose→request→parse→dispatch→append→return) generalized with
//! the streaming splitter of §4.8 step 5, which that reference method never
//! needed since its model client was non-streaming end-to-end.

use std::time::Duration;

use tokio::time::sleep;

use crate::actions::{self, validate, Action, ActionKind};
use crate::context::ContextBuilder;
use crate::device::DeviceInterface;
use crate::events::{EventSink, StepEvent};

use super::session::SessionContext;
use super::splitter::StreamSplitter;
use crate::llm::{LlmClient, ModelError};

const POST_TAP_MS: u64 = 1000;
const POST_SWIPE_MS: u64 = 500;
const POST_TYPE_MS: u64 = 500;
const POST_LAUNCH_MS: u64 = 2000;

pub struct StepOutcome {
    pub finished: bool,
    pub success: bool,
}

/// Run exactly one step cycle, emitting every `StepEvent` for it through
/// `sink` and mutating `session`'s history/step counter in place.
pub async fn execute_step(
    session: &mut SessionContext,
    device: &dyn DeviceInterface,
    llm: &LlmClient,
    sink: &dyn EventSink,
) -> StepOutcome {
    sleep(Duration::from_millis(session.config.ui_settle_ms)).await;

    let step = session.step_count + 1;

    let (screenshot, width, height) = match device.screenshot().await {
        Ok(shot) => shot,
        Err(e) => {
            let _ = sink.emit(StepEvent::Error { message: format!("screenshot failed: {e}") }).await;
            emit_terminal_step(sink, step, String::new(), None, false, format!("screenshot failed: {e}"), None).await;
            return StepOutcome { finished: true, success: false };
        }
    };

    let current_app = device.current_app().await.unwrap_or_default();

    let builder = ContextBuilder::new(session.adapter, session.config.lang.clone())
        .with_max_history_entries(session.config.max_context_entries);
    let messages = builder.build_messages(
        &session.task,
        &session.history,
        &session.config.base_system_prompt,
        &current_app,
        &screenshot,
        step,
    );

    let mut rx = llm.stream(&messages, session.cancel.clone()).await;
    let mut splitter = StreamSplitter::new(session.adapter.action_markers());
    let mut thinking_acc = String::new();
    let mut stream_error = None;

    loop {
        tokio::select! {
            _ = session.cancel.cancelled() => {
                let _ = sink.emit(StepEvent::Cancelled { message: "session cancelled mid-stream".to_string() }).await;
                return StepOutcome { finished: true, success: false };
            }
            chunk = rx.recv() => match chunk {
                Some(Ok(text)) => {
                    if let Some(thinking) = splitter.push(&text) {
                        thinking_acc.push_str(&thinking);
                        let _ = sink.emit(StepEvent::Thinking { chunk: thinking }).await;
                    }
                }
                Some(Err(e)) => {
                    stream_error = Some(model_error_message(&e));
                    break;
                }
                None => break,
            },
        }
    }

    let (final_thinking, raw_action) = splitter.finish();
    if let Some(t) = final_thinking {
        let _ = sink.emit(StepEvent::Thinking { chunk: t.clone() }).await;
        thinking_acc.push_str(&t);
    }

    if let Some(err) = stream_error {
        let _ = sink.emit(StepEvent::Error { message: err.clone() }).await;
        let _ = sink
            .emit(StepEvent::Step {
                step,
                thinking: thinking_acc,
                action: None,
                success: false,
                finished: false,
                message: err,
                screenshot: Some(screenshot),
            })
            .await;
        session.step_count = step;
        return StepOutcome { finished: false, success: false };
    }

    let Some(mut action) = session.adapter.parse_action(&raw_action) else {
        emit_terminal_step(
            sink,
            step,
            thinking_acc,
            None,
            false,
            "cannot parse action".to_string(),
            Some(screenshot),
        )
        .await;
        return StepOutcome { finished: true, success: false };
    };
    action.reasoning = thinking_acc.clone();

    let (valid, diagnostics) = validate(&action);
    if !valid {
        let message = format!("action validation failed: {}", diagnostics.join("; "));
        session.history.add_entry(&action);
        emit_terminal_step(sink, step, thinking_acc, Some(action), false, message, Some(screenshot)).await;
        session.step_count = step;
        return StepOutcome { finished: true, success: false };
    }

    let _ = sink.emit(StepEvent::Action { step, action: action.clone() }).await;

    let (success, finished, message) = dispatch(device, &action, width, height, session.adapter.coordinate_scale()).await;

    session.history.add_entry(&action);
    session.step_count = step;

    let _ = sink
        .emit(StepEvent::Step {
            step,
            thinking: thinking_acc,
            action: Some(action),
            success,
            finished,
            message,
            screenshot: Some(screenshot),
        })
        .await;

    StepOutcome { finished, success }
}

/// §5 mandates the exact message `"model error: timeout"` on an idle-timeout;
/// every other `ModelError` is reported the same way, prefixed for
/// consistency with the taxonomy in §7 item 2.
fn model_error_message(err: &ModelError) -> String {
    match err {
        ModelError::Timeout => "model error: timeout".to_string(),
        other => format!("model error: {other}"),
    }
}

async fn emit_terminal_step(
    sink: &dyn EventSink,
    step: u32,
    thinking: String,
    action: Option<Action>,
    success: bool,
    message: String,
    screenshot: Option<String>,
) {
    let _ = sink
        .emit(StepEvent::Step { step, thinking, action, success, finished: true, message, screenshot })
        .await;
}

/// Dispatch a parsed action to the device, per the per-kind rules of §4.8
/// step 8. `ActionKind` is a closed set (C1), so every variant is handled
/// here directly — there is no residual "unknown kind" arm.
async fn dispatch(
    device: &dyn DeviceInterface,
    action: &Action,
    width: u32,
    height: u32,
    scale: i64,
) -> (bool, bool, String) {
    match action.kind {
        ActionKind::Finish => {
            let message = action.param("message").and_then(|v| v.as_str()).unwrap_or("task finished").to_string();
            (true, true, message)
        }
        ActionKind::Fail => {
            let message = action.param("message").and_then(|v| v.as_str()).unwrap_or("task failed").to_string();
            (false, true, message)
        }
        ActionKind::Click => {
            let (x, y) = pixel_xy(action, scale, width, height);
            ok_or(device.tap(x, y).await, POST_TAP_MS, "tapped").await
        }
        ActionKind::LongClick => {
            let (x, y) = pixel_xy(action, scale, width, height);
            let duration = action.param("duration").and_then(|v| v.as_i64()).unwrap_or(1000) as u64;
            ok_or(device.long_press(x, y, duration).await, POST_TAP_MS, "long-pressed").await
        }
        ActionKind::DoubleClick => {
            let (x, y) = pixel_xy(action, scale, width, height);
            ok_or(device.double_tap(x, y).await, POST_TAP_MS, "double-tapped").await
        }
        ActionKind::Swipe => {
            let x1 = action.param("x1").and_then(|v| v.as_i64()).unwrap_or(0);
            let y1 = action.param("y1").and_then(|v| v.as_i64()).unwrap_or(0);
            let x2 = action.param("x2").and_then(|v| v.as_i64()).unwrap_or(0);
            let y2 = action.param("y2").and_then(|v| v.as_i64()).unwrap_or(0);
            let (px1, py1) = actions::to_pixel(x1, y1, scale, width, height);
            let (px2, py2) = actions::to_pixel(x2, y2, scale, width, height);
            let duration = action.param("duration").and_then(|v| v.as_i64()).map(|d| d as u64);
            ok_or(
                device.swipe(px1 as i32, py1 as i32, px2 as i32, py2 as i32, duration).await,
                POST_SWIPE_MS,
                "swiped",
            )
            .await
        }
        ActionKind::ScrollUp | ActionKind::ScrollDown | ActionKind::ScrollLeft | ActionKind::ScrollRight => {
            let (sx1, sy1, sx2, sy2) = scroll_endpoints(action.kind, width, height);
            ok_or(device.swipe(sx1, sy1, sx2, sy2, None).await, POST_SWIPE_MS, "scrolled").await
        }
        ActionKind::Type => {
            let text = action.param("text").and_then(|v| v.as_str()).unwrap_or_default();
            ok_or(device.type_text(text).await, POST_TYPE_MS, "typed").await
        }
        ActionKind::Clear => ok_or(device.clear_text().await, 0, "cleared").await,
        ActionKind::Back => ok_or(device.back().await, 0, "went back").await,
        ActionKind::Home => ok_or(device.home().await, 0, "went home").await,
        ActionKind::Recent => ok_or(device.recent().await, 0, "opened recents").await,
        ActionKind::PressKey => {
            let key = action.param("key").and_then(|v| v.as_str()).unwrap_or_default();
            ok_or(device.press_key(key).await, 0, "pressed key").await
        }
        ActionKind::LaunchApp => {
            let app = action.param("app").and_then(|v| v.as_str()).unwrap_or_default();
            match device.launch_app(app).await {
                Ok(package) => {
                    sleep(Duration::from_millis(POST_LAUNCH_MS)).await;
                    (true, false, format!("launched {package}"))
                }
                Err(e) => (false, false, e.to_string()),
            }
        }
        ActionKind::Wait => {
            let secs = action.param("duration").and_then(|v| v.as_f64()).unwrap_or(1.0).max(0.0);
            sleep(Duration::from_secs_f64(secs)).await;
            (true, false, format!("waited {secs}s"))
        }
        ActionKind::Screenshot => (true, false, "screenshot already captured this step".to_string()),
        ActionKind::Think | ActionKind::Plan => {
            let message = action.param("message").and_then(|v| v.as_str()).unwrap_or_default().to_string();
            (true, false, message)
        }
    }
}

async fn ok_or(result: Result<(), crate::adb::AdbError>, post_sleep_ms: u64, ok_message: &str) -> (bool, bool, String) {
    match result {
        Ok(()) => {
            if post_sleep_ms > 0 {
                sleep(Duration::from_millis(post_sleep_ms)).await;
            }
            (true, false, ok_message.to_string())
        }
        Err(e) => (false, false, e.to_string()),
    }
}

fn pixel_xy(action: &Action, scale: i64, width: u32, height: u32) -> (i32, i32) {
    let x = action.param("x").and_then(|v| v.as_i64()).unwrap_or(0);
    let y = action.param("y").and_then(|v| v.as_i64()).unwrap_or(0);
    let (px, py) = actions::to_pixel(x, y, scale, width, height);
    (px as i32, py as i32)
}

/// A content-area swipe standing in for the four directionless scroll
/// kinds, since the device contract only exposes an endpoint-based `swipe`.
fn scroll_endpoints(kind: ActionKind, width: u32, height: u32) -> (i32, i32, i32, i32) {
    let cx = (width / 2) as i32;
    let cy = (height / 2) as i32;
    let top = (height as f64 * 0.2) as i32;
    let bottom = (height as f64 * 0.8) as i32;
    let left = (width as f64 * 0.2) as i32;
    let right = (width as f64 * 0.8) as i32;
    match kind {
        ActionKind::ScrollUp => (cx, bottom, cx, top),
        ActionKind::ScrollDown => (cx, top, cx, bottom),
        ActionKind::ScrollLeft => (right, cy, left, cy),
        ActionKind::ScrollRight => (left, cy, right, cy),
        _ => (cx, cy, cx, cy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ParamValue;
    use std::collections::BTreeMap;

    #[test]
    fn scroll_up_swipes_bottom_to_top() {
        let (_, y1, _, y2) = scroll_endpoints(ActionKind::ScrollUp, 1080, 2400);
        assert!(y1 > y2);
    }

    #[test]
    fn scroll_left_swipes_right_to_left() {
        let (x1, _, x2, _) = scroll_endpoints(ActionKind::ScrollLeft, 1080, 2400);
        assert!(x1 > x2);
    }

    #[test]
    fn timeout_error_message_matches_mandated_text() {
        assert_eq!(model_error_message(&ModelError::Timeout), "model error: timeout");
    }

    #[test]
    fn pixel_xy_reads_declared_params() {
        let mut params = BTreeMap::new();
        params.insert("x".to_string(), ParamValue::Int(500));
        params.insert("y".to_string(), ParamValue::Int(500));
        let action = Action::new(ActionKind::Click, params);
        let (x, y) = pixel_xy(&action, 1000, 1080, 2400);
        assert_eq!((x, y), (540, 1200));
    }

    #[test]
    fn validate_accepts_max_coordinate_on_scale_1000_adapters() {
        let mut params = BTreeMap::new();
        params.insert("x".to_string(), ParamValue::Int(1000));
        params.insert("y".to_string(), ParamValue::Int(1000));
        let action = Action::new(ActionKind::Click, params);
        let (ok, diags) = validate(&action);
        assert!(ok, "{diags:?}");
    }
}
