//! Context Builder (C6): deterministic assembly of the ChatMessage list sent
//! to the LLM Streaming Client.
//!
//! Grounded in the reference crate's `model/client.rs::MessageBuilder`
//! (`create_system_message`, `create_user_message`, `remove_images_from_message`)
//! and `agent/phone_agent.rs::execute_step`'s inline first-step/subsequent-step
//! message assembly, factored out here as its own module — matching the shape
//! of `original_source/backend/app/agent/context_builder.py`'s `ContextBuilder`.

use chrono::Utc;
use serde_json::json;

use crate::adapter::ProtocolAdapter;
use crate::context::message::ChatMessage;
use crate::history::HistoryManager;

const DEFAULT_MAX_HISTORY_ENTRIES: usize = 10;

#[derive(Debug, Clone)]
pub struct ContextBuilder {
    pub adapter: ProtocolAdapter,
    pub lang: String,
    pub max_history_entries: usize,
}

impl ContextBuilder {
    pub fn new(adapter: ProtocolAdapter, lang: impl Into<String>) -> Self {
        ContextBuilder { adapter, lang: lang.into(), max_history_entries: DEFAULT_MAX_HISTORY_ENTRIES }
    }

    pub fn with_max_history_entries(mut self, n: usize) -> Self {
        self.max_history_entries = n;
        self
    }

    /// Rule 1: system message is the adapter-adapted base prompt plus the
    /// current date.
    pub fn build_system_prompt(&self, base_prompt: &str) -> String {
        let base = format!("{base_prompt}\n\nCurrent date: {}", Utc::now().format("%Y-%m-%d"));
        self.adapter.adapt_system_prompt(&base, &self.lang)
    }

    /// Assemble the full message list per rules 1-5 of §4.6.
    pub fn build_messages(
        &self,
        task: &str,
        history: &HistoryManager,
        base_prompt: &str,
        current_app: &str,
        screenshot_png_base64: &str,
        step: u32,
    ) -> Vec<ChatMessage> {
        let mut messages = Vec::new();

        // Rule 1: system message.
        messages.push(ChatMessage::system(self.build_system_prompt(base_prompt)));

        // Rule 3: initial-task message, always preserved first.
        messages.push(ChatMessage::user_text(format!("Task: {task}")));

        // Rule 2: trimmed history, action then observation per entry, no images.
        for entry in history.recent(self.max_history_entries) {
            let described = if entry.reasoning.is_empty() {
                format!("{}", entry.kind)
            } else {
                format!("{} ({})", entry.kind, entry.reasoning)
            };
            messages.push(ChatMessage::assistant(format!("Executed: {described}")));
            messages.push(ChatMessage::user_text(format!(
                "Result: step {} completed",
                entry.step
            )));
        }

        // Rule 4: current turn carries the only image in the list.
        let mut nudge = format!("step {step}");
        if step > 1 {
            nudge.push_str(" — do not repeat an already-completed step");
        }
        let observation = json!({ "current_app": current_app }).to_string();
        let current_text = format!("{nudge}\n{observation}");
        messages.push(ChatMessage::user_with_image(current_text, screenshot_png_base64));

        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::message::{Content, MessagePart, Role};
    use crate::history::HistoryManager;

    #[test]
    fn only_the_final_message_carries_an_image() {
        let builder = ContextBuilder::new(ProtocolAdapter::Universal, "en");
        let history = HistoryManager::default();
        let messages = builder.build_messages("open settings", &history, "base", "com.android.settings", "BASE64", 1);

        let image_bearing: Vec<_> = messages
            .iter()
            .filter(|m| matches!(&m.content, Content::Parts(parts) if parts.iter().any(|p| matches!(p, MessagePart::ImageUrl { .. }))))
            .collect();
        assert_eq!(image_bearing.len(), 1);
        assert!(matches!(messages.last().unwrap().role, Role::User));
    }

    #[test]
    fn initial_task_message_survives_regardless_of_history_length() {
        let builder = ContextBuilder::new(ProtocolAdapter::Universal, "en").with_max_history_entries(1);
        let history = HistoryManager::default();
        let messages = builder.build_messages("find the wifi toggle", &history, "base", "launcher", "BASE64", 1);
        assert!(matches!(&messages[1].content, Content::Text(t) if t.contains("find the wifi toggle")));
    }

    #[test]
    fn system_prompt_includes_base_and_date() {
        let builder = ContextBuilder::new(ProtocolAdapter::Universal, "en");
        let prompt = builder.build_system_prompt("Be a careful automation agent.");
        assert!(prompt.contains("Be a careful automation agent."));
        assert!(prompt.contains("Current date:"));
    }
}
