//! LLM Streaming Client errors (C7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("stream error: {0}")]
    Stream(String),
    #[error("stream idle timeout exceeded")]
    Timeout,
    #[error("API error: {0}")]
    ApiError(String),
    #[error("failed to parse response: {0}")]
    ParseError(String),
    #[error("max retries exceeded after {0} attempts: {1}")]
    MaxRetriesExceeded(u32, String),
    #[error("request cancelled")]
    Cancelled,
}

impl ModelError {
    /// Retry on network errors, 5xx/429, and timeouts — not on parse errors.
    pub fn is_retryable(&self) -> bool {
        match self {
            ModelError::RequestFailed(_) | ModelError::Timeout => true,
            ModelError::ApiError(msg) => {
                msg.contains("500")
                    || msg.contains("502")
                    || msg.contains("503")
                    || msg.contains("504")
                    || msg.contains("429")
                    || msg.to_lowercase().contains("timeout")
                    || msg.to_lowercase().contains("rate limit")
            }
            ModelError::ParseError(_) | ModelError::MaxRetriesExceeded(_, _) | ModelError::Stream(_) | ModelError::Cancelled => false,
        }
    }
}
