use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

/// Bounded log of recent upload activity, shown on the page and over HTTP.
/// Every entry is mirrored to `tracing`.
#[derive(Clone)]
pub struct ActivityLog {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    pub fn add(&self, level: &str, source: &str, message: &str) -> LogEntry {
        match level {
            "ERROR" => tracing::error!(source = %source, "{}", message),
            "WARN" => tracing::warn!(source = %source, "{}", message),
            "DEBUG" => tracing::debug!(source = %source, "{}", message),
            _ => tracing::info!(source = %source, "{}", message),
        }

        let entry = LogEntry {
            time: Local::now().format("%H:%M:%S").to_string(),
            level: level.to_string(),
            source: source.to_string(),
            message: message.to_string(),
        };

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.push_back(entry.clone());
        while entries.len() > self.capacity {
            entries.pop_front();
        }
        entry
    }

    pub fn info(&self, source: &str, message: &str) {
        self.add("INFO", source, message);
    }

    pub fn warn(&self, source: &str, message: &str) {
        self.add("WARN", source, message);
    }

    /// Oldest first
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_drops_oldest() {
        let log = ActivityLog::new(2);
        log.info("Upload", "first");
        log.info("Upload", "second");
        log.warn("Upload", "third");

        let entries = log.snapshot();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "second");
        assert_eq!(entries[1].level, "WARN");
    }

    #[test]
    fn test_clones_share_entries() {
        let log = ActivityLog::new(10);
        let other = log.clone();
        other.info("Decode", "shared");
        assert_eq!(log.snapshot().len(), 1);
    }
}
