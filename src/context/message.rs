//! OpenAI-chat-completions-compatible message types (C6), shared by the
//! Context Builder and the LLM Streaming Client.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One part of a possibly-multimodal message content array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessagePart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

impl MessagePart {
    pub fn text(text: impl Into<String>) -> MessagePart {
        MessagePart::Text { text: text.into() }
    }

    /// `data:image/png;base64,<...>` inline image part.
    pub fn image_png_base64(base64_data: impl Into<String>) -> MessagePart {
        MessagePart::ImageUrl {
            image_url: ImageUrl { url: format!("data:image/png;base64,{}", base64_data.into()) },
        }
    }
}

/// Content is either plain text or a multimodal parts array, matching the
/// OpenAI chat-completions content union.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Parts(Vec<MessagePart>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: Content,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> ChatMessage {
        ChatMessage { role: Role::System, content: Content::Text(text.into()) }
    }

    pub fn assistant(text: impl Into<String>) -> ChatMessage {
        ChatMessage { role: Role::Assistant, content: Content::Text(text.into()) }
    }

    pub fn user_text(text: impl Into<String>) -> ChatMessage {
        ChatMessage { role: Role::User, content: Content::Text(text.into()) }
    }

    pub fn user_with_image(text: impl Into<String>, screenshot_base64: impl Into<String>) -> ChatMessage {
        ChatMessage {
            role: Role::User,
            content: Content::Parts(vec![MessagePart::text(text), MessagePart::image_png_base64(screenshot_base64)]),
        }
    }
}
