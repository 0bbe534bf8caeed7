//! Agent Loop (C9): drives repeated Step Executor cycles until the task
//! finishes, the step cap is reached, or the session is cancelled.
//!
//! Grounded in the reference crate's `agent/phone_agent.rs::run`/`step` for
//! the max-steps bound and first-step/subsequent-step split, generalized
//! with the cooperative `tokio_util::sync::CancellationToken` cancellation
//! and `StepEvent` stream emission that method lacks (that generalization is
//! itself grounded in `agent/executor.rs::ExecutorWrapper`'s control-channel
//! loop and in the codex-rs adapter's cancellation style).

use std::sync::Arc;

use crate::adapter::ProtocolAdapter;
use crate::device::DeviceInterface;
use crate::events::{EventSink, StepEvent};
use crate::llm::LlmClient;

use super::session::{SessionConfig, SessionContext};
use super::step_executor::execute_step;

/// Run one session to completion, emitting every `StepEvent` through `sink`.
/// Initial-state invariants (§4.9): `step_count == 0` and `history` is empty
/// at entry; this function alone owns the session's lifetime.
pub async fn run(
    task: impl Into<String>,
    adapter: ProtocolAdapter,
    config: SessionConfig,
    device: Arc<dyn DeviceInterface>,
    llm: Arc<LlmClient>,
    sink: Arc<dyn EventSink>,
) {
    let history = config.new_history_manager();
    let mut session = SessionContext::new(task, adapter, config, history);

    if let Err(e) = device.screenshot().await {
        let _ = sink.emit(StepEvent::Error { message: format!("initial screenshot failed: {e}") }).await;
        return;
    }

    loop {
        if session.is_cancelled() {
            let _ = sink.emit(StepEvent::Cancelled { message: "session cancelled".to_string() }).await;
            return;
        }

        if session.step_count >= session.config.max_steps {
            let _ = sink
                .emit(StepEvent::Done {
                    message: "max steps reached".to_string(),
                    steps: session.step_count,
                    success: false,
                })
                .await;
            return;
        }

        if let Some(reason) = session.history.check_loop() {
            let _ = sink.emit(StepEvent::Warning { message: reason }).await;
        }

        let outcome = execute_step(&mut session, device.as_ref(), llm.as_ref(), sink.as_ref()).await;

        if outcome.finished {
            let _ = sink
                .emit(StepEvent::Done {
                    message: if outcome.success { "task finished".to_string() } else { "task stopped".to_string() },
                    steps: session.step_count,
                    success: outcome.success,
                })
                .await;
            return;
        }
    }
}
