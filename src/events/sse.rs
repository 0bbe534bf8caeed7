//! SSE Event Sink (C14): serializes each `StepEvent` as a `data: <json>\n\n`
//! envelope onto an `mpsc::Sender<String>` line channel. The receiving half
//! is handed to whatever HTTP framework the embedding application uses as
//! its response body stream; this crate does not depend on one.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::event::StepEvent;
use super::sink::{EventSink, SinkError};

#[derive(Debug, Clone)]
pub struct SseEventSink {
    lines: mpsc::Sender<String>,
}

impl SseEventSink {
    /// Returns the sink plus the receiver of formatted SSE lines.
    pub fn channel(buffer: usize) -> (SseEventSink, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(buffer);
        (SseEventSink { lines: tx }, rx)
    }

    pub fn format(event: &StepEvent) -> String {
        format!("data: {}\n\n", serde_json::to_string(event).expect("StepEvent always serializes"))
    }
}

#[async_trait]
impl EventSink for SseEventSink {
    async fn emit(&self, event: StepEvent) -> Result<(), SinkError> {
        self.lines.send(Self::format(&event)).await.map_err(|_| SinkError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_the_data_envelope() {
        let event = StepEvent::Warning { message: "repeating action".to_string() };
        let line = SseEventSink::format(&event);
        assert!(line.starts_with("data: "));
        assert!(line.ends_with("\n\n"));
        assert!(line.contains(r#""type":"warning""#));
    }

    #[tokio::test]
    async fn emit_delivers_the_formatted_line() {
        let (sink, mut rx) = SseEventSink::channel(4);
        sink.emit(StepEvent::Cancelled { message: "stopped".to_string() }).await.unwrap();
        let line = rx.recv().await.unwrap();
        assert!(line.contains("cancelled"));
    }
}
