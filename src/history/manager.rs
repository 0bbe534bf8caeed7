//! `HistoryManager` (C5): bounded FIFO history plus loop detection,
//! grounded in `original_source/backend/app/agent/history.py`'s
//! `HistoryManager`.

use super::entry::HistoryEntry;
use super::loop_detector::LoopDetector;
use crate::actions::Action;

const DEFAULT_MAX_HISTORY: usize = 50;

#[derive(Debug)]
pub struct HistoryManager {
    max_history: usize,
    entries: Vec<HistoryEntry>,
    step_counter: u32,
    loop_detector: LoopDetector,
}

impl Default for HistoryManager {
    fn default() -> Self {
        HistoryManager::new(DEFAULT_MAX_HISTORY, LoopDetector::default())
    }
}

impl HistoryManager {
    pub fn new(max_history: usize, loop_detector: LoopDetector) -> Self {
        HistoryManager {
            max_history,
            entries: Vec::new(),
            step_counter: 0,
            loop_detector,
        }
    }

    /// Append one action, evicting the oldest entry (FIFO) if the history is
    /// already at `max_history`.
    pub fn add_entry(&mut self, action: &Action) -> &HistoryEntry {
        self.step_counter += 1;
        let entry = HistoryEntry::from_action(self.step_counter, action);
        self.loop_detector.add_entry(&entry.fingerprint());
        if self.entries.len() >= self.max_history {
            self.entries.remove(0);
        }
        self.entries.push(entry);
        self.entries.last().expect("just pushed")
    }

    pub fn recent(&self, n: usize) -> &[HistoryEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn by_step(&self, step: u32) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.step == step)
    }

    pub fn last_action(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn last_n_actions(&self, n: usize) -> &[HistoryEntry] {
        self.recent(n)
    }

    /// `(looping?, reason?)` per §4.5 — the reason names which of the
    /// three checks fired (e.g. `"repeating action pattern"`).
    pub fn check_loop(&self) -> Option<String> {
        self.loop_detector.detect_loop()
    }

    pub fn reset_loop_detector(&mut self) {
        self.loop_detector.reset();
    }

    pub fn summary(&self) -> String {
        format!("{} step(s) recorded, {} retained", self.step_counter, self.entries.len())
    }

    /// Drop every retained entry and reset the step counter and loop
    /// detector, matching the original `HistoryManager.clear`.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.step_counter = 0;
        self.loop_detector.reset();
    }

    pub fn stats(&self) -> HistoryStats {
        HistoryStats {
            total_entries: self.entries.len(),
            step_counter: self.step_counter,
            max_history: self.max_history,
        }
    }

    /// Export the retained entries and step counter as a JSON mapping
    /// (`export_to_dict` in the original).
    pub fn export(&self) -> serde_json::Value {
        serde_json::json!({
            "max_history": self.max_history,
            "current_step": self.step_counter,
            "entries": self.entries,
        })
    }

    /// Import a mapping produced by `export`, rebuilding the loop
    /// detector's fingerprint ring from the restored entries (the original
    /// `import_from_dict`'s "reconstruct loop detector state" step).
    pub fn import(&mut self, data: &serde_json::Value) -> Result<(), serde_json::Error> {
        if let Some(max_history) = data.get("max_history").and_then(|v| v.as_u64()) {
            self.max_history = max_history as usize;
        }
        self.step_counter = data.get("current_step").and_then(|v| v.as_u64()).unwrap_or(0) as u32;
        self.entries = match data.get("entries") {
            Some(entries) => serde_json::from_value(entries.clone())?,
            None => Vec::new(),
        };

        self.loop_detector.reset();
        for entry in &self.entries {
            self.loop_detector.add_entry(&entry.fingerprint());
        }
        Ok(())
    }
}

/// Summary counters returned by `HistoryManager::stats` (the original's
/// `get_stats`, restricted to the fields this crate actually tracks at the
/// manager level — per-fingerprint counts live on `LoopDetector`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStats {
    pub total_entries: usize,
    pub step_counter: u32,
    pub max_history: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionKind;
    use std::collections::BTreeMap;

    #[test]
    fn fifo_eviction_caps_retained_entries() {
        let mut manager = HistoryManager::new(3, LoopDetector::default());
        for _ in 0..5 {
            manager.add_entry(&Action::new(ActionKind::Back, BTreeMap::new()));
        }
        assert_eq!(manager.all().len(), 3);
        // step_counter keeps incrementing even though old entries were evicted.
        assert_eq!(manager.last_action().unwrap().step, 5);
    }

    #[test]
    fn recent_returns_last_n_in_order() {
        let mut manager = HistoryManager::default();
        for _ in 0..3 {
            manager.add_entry(&Action::new(ActionKind::Home, BTreeMap::new()));
        }
        assert_eq!(manager.recent(2).len(), 2);
    }

    #[test]
    fn by_step_finds_entry_by_original_step_number() {
        let mut manager = HistoryManager::new(2, LoopDetector::default());
        for _ in 0..4 {
            manager.add_entry(&Action::new(ActionKind::Back, BTreeMap::new()));
        }
        assert!(manager.by_step(1).is_none());
        assert!(manager.by_step(4).is_some());
    }

    #[test]
    fn clear_resets_entries_step_counter_and_loop_detector() {
        let mut manager = HistoryManager::new(10, LoopDetector::new(2, 1, 2));
        for _ in 0..3 {
            manager.add_entry(&Action::new(ActionKind::Back, BTreeMap::new()));
        }
        manager.clear();
        assert!(manager.all().is_empty());
        assert_eq!(manager.stats().step_counter, 0);
        manager.add_entry(&Action::new(ActionKind::Home, BTreeMap::new()));
        assert_eq!(manager.last_action().unwrap().step, 1);
    }

    #[test]
    fn export_import_export_round_trips() {
        let mut manager = HistoryManager::new(10, LoopDetector::default());
        for kind in [ActionKind::Back, ActionKind::Home, ActionKind::Recent] {
            manager.add_entry(&Action::new(kind, BTreeMap::new()));
        }

        let exported_once = manager.export();
        let mut restored = HistoryManager::new(10, LoopDetector::default());
        restored.import(&exported_once).unwrap();
        let exported_twice = restored.export();

        assert_eq!(exported_once, exported_twice);
        assert_eq!(restored.all().len(), 3);
        assert_eq!(restored.last_action().unwrap().step, 3);
    }
}
