//! Event Sink (C11): abstract, async_trait-dispatched contract for
//! delivering `StepEvent`s to a client, mirroring `DeviceInterface`.

use async_trait::async_trait;

use super::event::StepEvent;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("event sink closed")]
    Closed,
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: StepEvent) -> Result<(), SinkError>;
}

/// The sending half of an `mpsc::channel<StepEvent>` is itself a trivial
/// `EventSink` (§4.11).
#[async_trait]
impl EventSink for tokio::sync::mpsc::Sender<StepEvent> {
    async fn emit(&self, event: StepEvent) -> Result<(), SinkError> {
        self.send(event).await.map_err(|_| SinkError::Closed)
    }
}
