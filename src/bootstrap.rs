//! Process Bootstrap (C12): load `.env`, install the `tracing` subscriber,
//! read the environment-variable mapping of §6 into one `RuntimeConfig`, and
//! construct the adapter/device/client graph every entry point needs.
//!
//! Grounded in the reference crate's `main.rs` (`dotenvy::dotenv()` then
//! `tracing_subscriber::fmt::init()` then a flat `env::var(...).unwrap_or_else`
//! chain), extended with the additional `AGENT_*`/`MODEL_*` names §6
//! introduces that the reference crate's own env-var set lacked.

use std::env;
use std::sync::Arc;

use crate::adapter::ProtocolAdapter;
use crate::agent::SessionConfig;
use crate::device::AdbDevice;
use crate::history::LoopDetector;
use crate::llm::{LlmClient, ModelConfig};

/// Every environment-driven knob this crate reads, aggregated once at
/// process start and never held as a global (§3 "Ambient data model
/// additions").
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub base_url: String,
    pub api_key: String,
    pub model_name: String,
    pub device_id: Option<String>,
    pub lang: String,
    pub max_steps: u32,
    pub max_context_messages: usize,
    pub max_history: usize,
    pub loop_window_size: usize,
    pub similarity_threshold: usize,
    pub max_repetitions: u32,
    pub timeout_s: u64,
    pub max_retries: u32,
    pub retry_delay_secs: u64,
    pub protocol: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            base_url: "http://localhost:8000/v1".to_string(),
            api_key: "EMPTY".to_string(),
            model_name: "autoglm-phone-9b".to_string(),
            device_id: None,
            lang: "cn".to_string(),
            max_steps: 20,
            max_context_messages: 10,
            max_history: 50,
            loop_window_size: 5,
            similarity_threshold: 3,
            max_repetitions: 2,
            timeout_s: 120,
            max_retries: 3,
            retry_delay_secs: 2,
            protocol: "auto".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Read the §6 environment-variable mapping; absence of every variable
    /// still yields a runnable default configuration.
    pub fn from_env() -> Self {
        let defaults = RuntimeConfig::default();
        RuntimeConfig {
            base_url: env::var("MODEL_BASE_URL").unwrap_or(defaults.base_url),
            api_key: env::var("MODEL_API_KEY").unwrap_or(defaults.api_key),
            model_name: env::var("MODEL_NAME").unwrap_or(defaults.model_name),
            device_id: env::var("ADB_DEVICE_ID").ok(),
            lang: env::var("AGENT_LANG").unwrap_or(defaults.lang),
            max_steps: parse_env_or("AGENT_MAX_STEPS", defaults.max_steps),
            max_context_messages: parse_env_or("AGENT_MAX_CONTEXT_MESSAGES", defaults.max_context_messages),
            max_history: parse_env_or("AGENT_MAX_HISTORY", defaults.max_history),
            loop_window_size: parse_env_or("AGENT_LOOP_WINDOW_SIZE", defaults.loop_window_size),
            similarity_threshold: parse_env_or("AGENT_SIMILARITY_THRESHOLD", defaults.similarity_threshold),
            max_repetitions: parse_env_or("AGENT_MAX_REPETITIONS", defaults.max_repetitions),
            timeout_s: parse_env_or("MODEL_TIMEOUT_S", defaults.timeout_s),
            max_retries: parse_env_or("MODEL_MAX_RETRIES", defaults.max_retries),
            retry_delay_secs: parse_env_or("MODEL_RETRY_DELAY_SECS", defaults.retry_delay_secs),
            protocol: env::var("AGENT_PROTOCOL").unwrap_or(defaults.protocol),
        }
    }

    /// Resolve the configured adapter, falling back to model-id detection
    /// when `AGENT_PROTOCOL` is `auto` or unrecognized.
    pub fn resolve_adapter(&self) -> ProtocolAdapter {
        match self.protocol.to_ascii_lowercase().as_str() {
            "universal" => ProtocolAdapter::Universal,
            "autoglm" => ProtocolAdapter::Autoglm,
            "gelab" => ProtocolAdapter::Gelab,
            _ => ProtocolAdapter::detect(&self.model_name),
        }
    }

    pub fn model_config(&self) -> ModelConfig {
        ModelConfig::default()
            .with_base_url(self.base_url.clone())
            .with_api_key(self.api_key.clone())
            .with_model_name(self.model_name.clone())
            .with_max_retries(self.max_retries)
            .with_retry_delay(self.retry_delay_secs)
            .with_timeout_secs(self.timeout_s)
    }

    pub fn session_config(&self, base_system_prompt: impl Into<String>) -> SessionConfig {
        SessionConfig {
            max_steps: self.max_steps,
            lang: self.lang.clone(),
            base_system_prompt: base_system_prompt.into(),
            max_context_entries: self.max_context_messages,
            ui_settle_ms: 500,
            max_history: self.max_history,
            loop_window_size: self.loop_window_size,
            similarity_threshold: self.similarity_threshold,
            max_repetitions: self.max_repetitions,
        }
    }

    pub fn loop_detector(&self) -> LoopDetector {
        LoopDetector::new(self.loop_window_size, self.similarity_threshold, self.max_repetitions)
    }
}

fn parse_env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Load `.env` (if present) and install the global `tracing` subscriber.
/// Idempotent-ish in practice since `tracing_subscriber::fmt().try_init()`
/// tolerates being called once per process, matching the reference crate's
/// `main.rs` initialization order.
pub fn init() {
    let _ = dotenvy::dotenv();
    let _ = tracing_subscriber::fmt::try_init();
}

/// Construct the adapter/device/client graph this process will drive one or
/// more sessions with.
pub fn build_components(config: &RuntimeConfig) -> (ProtocolAdapter, Arc<AdbDevice>, Arc<LlmClient>) {
    let adapter = config.resolve_adapter();
    let device = Arc::new(AdbDevice::new(config.device_id.clone()));
    let llm = Arc::new(LlmClient::new(config.model_config()));
    (adapter, device, llm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_runnable() {
        let config = RuntimeConfig::default();
        assert_eq!(config.max_steps, 20);
        assert_eq!(config.resolve_adapter(), ProtocolAdapter::Autoglm);
    }

    #[test]
    fn explicit_protocol_overrides_model_id_detection() {
        let mut config = RuntimeConfig::default();
        config.protocol = "universal".to_string();
        config.model_name = "autoglm-phone-9b".to_string();
        assert_eq!(config.resolve_adapter(), ProtocolAdapter::Universal);
    }
}
