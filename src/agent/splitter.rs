//! Streaming splitter (§4.8 step 5, §9 Design Note "Streaming split state
//! machine"): separates "thinking" text from the trailing action call while
//! consuming an LLM stream incrementally.
//!
//! Modeled as an explicit three-state automaton rather than incremental
//! regex matching, per the design note, to guarantee ordering (I6) and
//! latency (P2) properties: thinking chunks are flushed as soon as possible,
//! and nothing after the first action-marker match is ever emitted as
//! thinking.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Reading,
    MaybeMarker,
    InAction,
}

pub struct StreamSplitter {
    markers: Vec<String>,
    state: State,
    buffer: String,
    raw_action: String,
    full_text: String,
}

impl StreamSplitter {
    pub fn new(markers: &[&str]) -> Self {
        StreamSplitter {
            markers: markers.iter().map(|m| m.to_string()).collect(),
            state: State::Reading,
            buffer: String::new(),
            raw_action: String::new(),
            full_text: String::new(),
        }
    }

    /// Feed one more chunk of text from the live stream. Returns the
    /// "thinking" text, if any, that is now safe to flush as a
    /// `thinking(chunk)` event.
    pub fn push(&mut self, chunk: &str) -> Option<String> {
        self.full_text.push_str(chunk);

        if self.state == State::InAction {
            self.raw_action.push_str(chunk);
            return None;
        }

        self.buffer.push_str(chunk);

        if let Some(pos) = self.find_marker() {
            let thinking = self.buffer[..pos].to_string();
            self.raw_action.push_str(&self.buffer[pos..]);
            self.buffer.clear();
            self.state = State::InAction;
            return if thinking.is_empty() { None } else { Some(thinking) };
        }

        // Hold back any suffix of `buffer` that is a proper prefix of some
        // marker, in case the marker completes on the next chunk.
        let safe_len = self.longest_pending_prefix_len();
        if safe_len < self.buffer.len() {
            let flush: String = self.buffer.drain(..self.buffer.len() - safe_len).collect();
            self.state = State::MaybeMarker;
            if !flush.is_empty() {
                return Some(flush);
            }
        }
        None
    }

    fn find_marker(&self) -> Option<usize> {
        self.markers.iter().filter_map(|m| self.buffer.find(m.as_str())).min()
    }

    /// Length of the longest suffix of `buffer` that is a proper prefix of
    /// any marker (and thus must be held back).
    fn longest_pending_prefix_len(&self) -> usize {
        let mut best = 0;
        for marker in &self.markers {
            let max_check = marker.len().saturating_sub(1).min(self.buffer.len());
            for len in (1..=max_check).rev() {
                let suffix = &self.buffer[self.buffer.len() - len..];
                if marker.starts_with(suffix) {
                    best = best.max(len);
                    break;
                }
            }
        }
        best
    }

    /// Call once the stream has ended. Returns the final thinking flush (if
    /// the buffer never matched a marker, it is also exposed via
    /// `raw_action` since a marker-less stream is still candidate parser
    /// input per §4.8 step 5).
    pub fn finish(mut self) -> (Option<String>, String) {
        if self.state == State::InAction {
            return (None, self.raw_action);
        }
        // No marker ever appeared: the whole stream is candidate raw_action
        // for the parser, even though it was already flushed as thinking.
        let remaining = std::mem::take(&mut self.buffer);
        let final_thinking = if remaining.is_empty() { None } else { Some(remaining) };
        (final_thinking, self.full_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flushes_thinking_before_marker_and_captures_action_after() {
        let mut splitter = StreamSplitter::new(&["do(action="]);
        let mut thinking = String::new();
        for chunk in ["I should tap the ", "button. ", "do(action=\"Tap\", ", "element=[1,2])"] {
            if let Some(t) = splitter.push(chunk) {
                thinking.push_str(&t);
            }
        }
        let (final_thinking, raw_action) = splitter.finish();
        assert!(final_thinking.is_none());
        assert_eq!(thinking.trim(), "I should tap the button.");
        assert_eq!(raw_action, r#"do(action="Tap", element=[1,2])"#);
    }

    #[test]
    fn holds_back_partial_marker_across_chunk_boundary() {
        let mut splitter = StreamSplitter::new(&["do(action="]);
        let mut thinking = String::new();
        // Split the marker itself mid-way across two chunks.
        for chunk in ["thinking text do(acti", "on=\"Back\")"] {
            if let Some(t) = splitter.push(chunk) {
                thinking.push_str(&t);
            }
        }
        let (_, raw_action) = splitter.finish();
        assert_eq!(thinking, "thinking text ");
        assert_eq!(raw_action, r#"do(action="Back")"#);
    }

    #[test]
    fn marker_less_stream_becomes_candidate_raw_action() {
        let mut splitter = StreamSplitter::new(&["do(action="]);
        let flushed = splitter.push("我需要点击坐标 (500, 400)");
        assert_eq!(flushed.as_deref(), Some("我需要点击坐标 (500, 400)"));
        let (final_thinking, raw_action) = splitter.finish();
        assert!(final_thinking.is_none());
        assert_eq!(raw_action, "我需要点击坐标 (500, 400)");
    }
}
