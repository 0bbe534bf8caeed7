//! Streaming agent CLI entry point (C12 Process Bootstrap).
//!
//! Runs one task against an attached adb device, printing every `StepEvent`
//! to stdout as the `data: <json>\n\n` envelope of §6 — the same framing an
//! HTTP handler built on top of `SseEventSink` would write to a response
//! body. Run with: `cargo run --bin mobile-agent -- "open settings"`.

use std::env;

use mobile_agent::bootstrap::{self, RuntimeConfig};
use mobile_agent::config::get_system_prompt;
use mobile_agent::events::{EventSink, SseEventSink};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bootstrap::init();

    let task = env::args().nth(1).ok_or_else(|| anyhow::anyhow!("usage: agent-cli <task>"))?;

    let config = RuntimeConfig::from_env();
    let (adapter, device, llm) = bootstrap::build_components(&config);
    let base_prompt = get_system_prompt(&config.lang);
    let session_config = config.session_config(base_prompt);

    let (sink, mut lines) = SseEventSink::channel(32);
    let sink: std::sync::Arc<dyn EventSink> = std::sync::Arc::new(sink);

    let run_task = mobile_agent::agent::run(task, adapter, session_config, device, llm, sink);
    let printer = tokio::spawn(async move {
        while let Some(line) = lines.recv().await {
            print!("{line}");
        }
    });

    run_task.await;
    let _ = printer.await;
    Ok(())
}
