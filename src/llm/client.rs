//! LLM Streaming Client (C7): drives a chat-completions endpoint and yields
//! incremental text chunks over an `mpsc` channel.
//!
//! Grounded in `mylinyuzhi-codex/codex-rs/core/src/adapters/http.rs`'s
//! streaming pattern (`reqwest` byte stream adapted via
//! `eventsource_stream::Eventsource`, consumed under
//! `tokio::time::timeout(idle_timeout, stream.next())`, fed into an
//! `mpsc::channel` from a spawned task). Request construction, retry count,
//! and backoff shape come from the reference crate's
//! `model/client.rs::ModelClient::request`/`is_retryable_error`.

use std::time::Duration;

use eventsource_stream::Eventsource;
use futures::StreamExt;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;

use crate::context::ChatMessage;

use super::config::ModelConfig;
use super::error::ModelError;

#[derive(Debug, Deserialize)]
struct ChatCompletionChunk {
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize, Default)]
struct Delta {
    content: Option<String>,
}

pub struct LlmClient {
    config: ModelConfig,
    client: Client,
}

impl LlmClient {
    pub fn new(config: ModelConfig) -> Self {
        LlmClient { config, client: Client::new() }
    }

    pub fn with_defaults() -> Self {
        LlmClient::new(ModelConfig::default())
    }

    /// Open a streaming chat-completions request, retrying connection
    /// attempts per `max_retries`, and return a channel of incremental text
    /// chunks. The channel closes after a terminal `Err` or normal
    /// completion; no partial `Action` is ever implied by a chunk alone.
    pub async fn stream(
        &self,
        messages: &[ChatMessage],
        cancel: CancellationToken,
    ) -> mpsc::Receiver<Result<String, ModelError>> {
        let (tx, rx) = mpsc::channel(32);
        let body = self.build_body(messages);
        let url = format!("{}/chat/completions", self.config.base_url);
        let client = self.client.clone();
        let config = self.config.clone();

        tokio::spawn(async move {
            let mut last_error = None;
            let max_attempts = config.max_retries + 1;

            for attempt in 1..=max_attempts {
                if cancel.is_cancelled() {
                    let _ = tx.send(Err(ModelError::Cancelled)).await;
                    return;
                }

                match open_stream(&client, &url, &config, &body).await {
                    Ok(response_stream) => {
                        run_sse_loop(response_stream, &tx, config.timeout_secs, cancel.clone()).await;
                        return;
                    }
                    Err(e) => {
                        if !e.is_retryable() || attempt == max_attempts {
                            last_error = Some(e);
                            break;
                        }
                        tracing::warn!(attempt, max_attempts, error = %e, "model request failed, retrying");
                        sleep(Duration::from_secs(config.retry_delay_secs)).await;
                        last_error = Some(e);
                    }
                }
            }

            let message = last_error.map(|e| e.to_string()).unwrap_or_else(|| "unknown error".to_string());
            let _ = tx.send(Err(ModelError::MaxRetriesExceeded(config.max_retries, message))).await;
        });

        rx
    }

    fn build_body(&self, messages: &[ChatMessage]) -> Value {
        let mut body = json!({
            "messages": messages,
            "model": self.config.model_name,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "top_p": self.config.top_p,
            "frequency_penalty": self.config.frequency_penalty,
            "stream": true,
        });
        if let Value::Object(ref mut map) = body {
            for (key, value) in &self.config.extra_body {
                map.insert(key.clone(), value.clone());
            }
        }
        body
    }
}

async fn open_stream(
    client: &Client,
    url: &str,
    config: &ModelConfig,
    body: &Value,
) -> Result<impl futures::Stream<Item = reqwest::Result<bytes::Bytes>>, ModelError> {
    let response = client
        .post(url)
        .bearer_auth(&config.api_key)
        .json(body)
        .send()
        .await?;

    if !response.status().is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(ModelError::ApiError(text));
    }

    Ok(response.bytes_stream())
}

async fn run_sse_loop<S>(
    stream: S,
    tx: &mpsc::Sender<Result<String, ModelError>>,
    timeout_secs: u64,
    cancel: CancellationToken,
) where
    S: futures::Stream<Item = reqwest::Result<bytes::Bytes>> + Unpin,
{
    let idle_timeout = Duration::from_secs(timeout_secs);
    let mut events = stream.eventsource();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                let _ = tx.send(Err(ModelError::Cancelled)).await;
                return;
            }
            outcome = timeout(idle_timeout, events.next()) => {
                match outcome {
                    Err(_) => {
                        let _ = tx.send(Err(ModelError::Timeout)).await;
                        return;
                    }
                    Ok(None) => return,
                    Ok(Some(Err(e))) => {
                        let _ = tx.send(Err(ModelError::Stream(e.to_string()))).await;
                        return;
                    }
                    Ok(Some(Ok(event))) => {
                        if event.data.trim() == "[DONE]" || event.data.trim().is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<ChatCompletionChunk>(&event.data) {
                            Ok(chunk) => {
                                for choice in chunk.choices {
                                    if let Some(content) = choice.delta.content {
                                        if !content.is_empty() && tx.send(Ok(content)).await.is_err() {
                                            return;
                                        }
                                    }
                                }
                            }
                            Err(e) => {
                                let _ = tx.send(Err(ModelError::ParseError(e.to_string()))).await;
                                return;
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_body_sets_stream_flag() {
        let client = LlmClient::with_defaults();
        let body = client.build_body(&[ChatMessage::system("hi")]);
        assert_eq!(body["stream"], json!(true));
        assert_eq!(body["model"], json!("autoglm-phone-9b"));
    }
}
