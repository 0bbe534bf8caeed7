//! Sliding-window loop detector (C5), grounded in
//! `original_source/backend/app/agent/history.py`'s `LoopDetector`.

use std::collections::{HashMap, VecDeque};

const DEFAULT_WINDOW_SIZE: usize = 5;
const DEFAULT_SIMILARITY_THRESHOLD: usize = 3;
const DEFAULT_MAX_REPETITIONS: u32 = 2;

#[derive(Debug, Clone)]
pub struct LoopDetector {
    window_size: usize,
    similarity_threshold: usize,
    max_repetitions: u32,
    fingerprints: VecDeque<String>,
    action_counts: HashMap<String, u32>,
}

impl Default for LoopDetector {
    fn default() -> Self {
        LoopDetector::new(DEFAULT_WINDOW_SIZE, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_MAX_REPETITIONS)
    }
}

impl LoopDetector {
    pub fn new(window_size: usize, similarity_threshold: usize, max_repetitions: u32) -> Self {
        LoopDetector {
            window_size,
            similarity_threshold,
            max_repetitions,
            fingerprints: VecDeque::with_capacity(window_size * 2),
            action_counts: HashMap::new(),
        }
    }

    /// Record a fingerprint. The ring buffer holds at most `2 * window_size`
    /// entries; `action_counts` is never decremented on eviction — it is a
    /// monotonically accumulating counter across the whole session (§9 open
    /// question decision), matching the Python original's unbounded dict.
    pub fn add_entry(&mut self, fingerprint: &str) {
        if self.fingerprints.len() == self.window_size * 2 {
            self.fingerprints.pop_front();
        }
        self.fingerprints.push_back(fingerprint.to_string());
        *self.action_counts.entry(fingerprint.to_string()).or_insert(0) += 1;
    }

    /// Three-method sequence, first positive wins: distinct-count check,
    /// exact-previous-window-equals-current-window check, per-fingerprint
    /// repetition-count check. Runs the distinct-count check for any length
    /// `>= window_size`, not just once the ring is full (L1/L3).
    pub fn detect_loop(&self) -> Option<String> {
        if self.fingerprints.len() < self.window_size {
            return None;
        }

        if self.check_distinct_count() {
            return Some("repeating action pattern".to_string());
        }
        if self.check_repeated_window() {
            return Some("sequence repetition".to_string());
        }
        self.check_repetition_counts()
    }

    fn check_distinct_count(&self) -> bool {
        let recent: Vec<&str> = self
            .fingerprints
            .iter()
            .rev()
            .take(self.window_size)
            .map(|s| s.as_str())
            .collect();
        let distinct: std::collections::HashSet<&str> = recent.iter().copied().collect();
        distinct.len() < self.similarity_threshold
    }

    fn check_repeated_window(&self) -> bool {
        let total = self.fingerprints.len();
        if total < self.window_size * 2 {
            return false;
        }
        let start_prev = total - self.window_size * 2;
        let start_curr = total - self.window_size;
        let prev: Vec<&String> = self.fingerprints.iter().skip(start_prev).take(self.window_size).collect();
        let curr: Vec<&String> = self.fingerprints.iter().skip(start_curr).take(self.window_size).collect();
        prev == curr
    }

    fn check_repetition_counts(&self) -> Option<String> {
        let threshold = self.max_repetitions * 3;
        self.action_counts
            .values()
            .copied()
            .find(|&count| count > threshold)
            .map(|count| format!("action repeated {count} times"))
    }

    pub fn reset(&mut self) {
        self.fingerprints.clear();
        self.action_counts.clear();
    }

    pub fn stats(&self) -> (usize, usize) {
        (self.fingerprints.len(), self.action_counts.len())
    }

    pub fn count_for(&self, fingerprint: &str) -> u32 {
        self.action_counts.get(fingerprint).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_loop_on_varied_fingerprints() {
        let mut detector = LoopDetector::default();
        for i in 0..20 {
            detector.add_entry(&format!("fp{i}"));
        }
        assert!(detector.detect_loop().is_none());
    }

    #[test]
    fn detects_immediate_repetition_via_distinct_count() {
        let mut detector = LoopDetector::new(5, 3, 2);
        for _ in 0..10 {
            detector.add_entry("same-fp");
        }
        assert_eq!(detector.detect_loop().as_deref(), Some("repeating action pattern"));
    }

    #[test]
    fn reports_loop_as_soon_as_window_size_entries_exist() {
        // L1/L3: the distinct-count check must run at exactly `window_size`
        // entries, not only once the ring buffer (2*window_size) is full.
        let mut detector = LoopDetector::new(5, 3, 2);
        for _ in 0..5 {
            detector.add_entry("same-fp");
        }
        assert_eq!(detector.detect_loop().as_deref(), Some("repeating action pattern"));
    }

    #[test]
    fn no_loop_reported_before_window_size_entries() {
        let mut detector = LoopDetector::new(5, 3, 2);
        for _ in 0..4 {
            detector.add_entry("same-fp");
        }
        assert!(detector.detect_loop().is_none());
    }

    #[test]
    fn three_distinct_fingerprints_at_threshold_three_is_not_a_loop() {
        let mut detector = LoopDetector::new(3, 3, 10);
        for fp in ["a", "b", "c"] {
            detector.add_entry(fp);
        }
        assert!(detector.detect_loop().is_none());
    }

    #[test]
    fn detects_repeated_window() {
        let mut detector = LoopDetector::new(3, 1, 10);
        for fp in ["a", "b", "c", "a", "b", "c"] {
            detector.add_entry(fp);
        }
        assert_eq!(detector.detect_loop().as_deref(), Some("sequence repetition"));
    }

    #[test]
    fn counters_never_decrement_on_eviction() {
        let mut detector = LoopDetector::new(2, 1, 2);
        for _ in 0..4 {
            detector.add_entry("x");
        }
        // The ring buffer (capacity window_size*2 = 4) has now fully evicted
        // every "x" entry, but the count must still reflect all 4 additions.
        for i in 0..4 {
            detector.add_entry(&format!("y{i}"));
        }
        assert_eq!(detector.count_for("x"), 4);
    }

    #[test]
    fn reset_clears_state() {
        let mut detector = LoopDetector::default();
        detector.add_entry("a");
        detector.reset();
        assert_eq!(detector.stats(), (0, 0));
    }
}
