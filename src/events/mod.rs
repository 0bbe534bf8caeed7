//! StepEvent (§3/§6), Event Sink (C11), and the SSE Event Sink (C14).

mod event;
mod sink;
mod sse;

pub use event::StepEvent;
pub use sink::{EventSink, SinkError};
pub use sse::SseEventSink;
