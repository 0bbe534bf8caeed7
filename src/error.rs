//! Crate-level error type composing every component error.

use thiserror::Error;

use crate::actions::ActionError;
use crate::adb::AdbError;
use crate::llm::ModelError;

/// Top-level error returned by the Agent Loop and bootstrap entry points.
///
/// Each taxonomy entry is either a distinct variant or, for `Fatal`,
/// the same `Device` variant raised before any `HistoryEntry` exists —
/// distinguished structurally rather than by a separate type.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("device error: {0}")]
    Device(#[from] AdbError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("action error: {0}")]
    Action(#[from] ActionError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("task cancelled")]
    Cancelled,

    #[error("max steps ({0}) reached without a finish action")]
    MaxStepsReached(u32),
}

pub type Result<T> = std::result::Result<T, AgentError>;
