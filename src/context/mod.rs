//! Context Builder (C6) and its shared chat-message types.

pub mod builder;
pub mod message;

pub use builder::ContextBuilder;
pub use message::{ChatMessage, Content, ImageUrl, MessagePart, Role};
