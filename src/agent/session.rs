//! `SessionContext` (C9 support): per-session mutable state threaded through
//! the Agent Loop and Step Executor. One instance per `run(task, device_id)`
//! invocation; never shared between sessions (§5 concurrency model).

use tokio_util::sync::CancellationToken;

use crate::adapter::ProtocolAdapter;
use crate::history::{HistoryManager, LoopDetector};

/// Tunables for one session, distinct from the ambient process-wide
/// `RuntimeConfig` (C12) that constructs it — this is the subset the Step
/// Executor and Agent Loop actually consult per step.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub max_steps: u32,
    pub lang: String,
    pub base_system_prompt: String,
    pub max_context_entries: usize,
    pub ui_settle_ms: u64,
    pub max_history: usize,
    pub loop_window_size: usize,
    pub similarity_threshold: usize,
    pub max_repetitions: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            max_steps: 20,
            lang: "en".to_string(),
            base_system_prompt: crate::actions::describe_all(),
            max_context_entries: 10,
            ui_settle_ms: 500,
            max_history: 50,
            loop_window_size: 5,
            similarity_threshold: 3,
            max_repetitions: 2,
        }
    }
}

impl SessionConfig {
    pub fn new_history_manager(&self) -> HistoryManager {
        HistoryManager::new(
            self.max_history,
            LoopDetector::new(self.loop_window_size, self.similarity_threshold, self.max_repetitions),
        )
    }
}

pub struct SessionContext {
    pub task: String,
    pub step_count: u32,
    pub history: HistoryManager,
    pub adapter: ProtocolAdapter,
    pub config: SessionConfig,
    pub cancel: CancellationToken,
}

impl SessionContext {
    pub fn new(task: impl Into<String>, adapter: ProtocolAdapter, config: SessionConfig, history: HistoryManager) -> Self {
        SessionContext {
            task: task.into(),
            step_count: 0,
            history,
            adapter,
            config,
            cancel: CancellationToken::new(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_zero_steps_and_empty_history() {
        let config = SessionConfig::default();
        let history = config.new_history_manager();
        let session = SessionContext::new("open settings", ProtocolAdapter::Universal, config, history);
        assert_eq!(session.step_count, 0);
        assert!(session.history.all().is_empty());
        assert!(!session.is_cancelled());
    }
}
