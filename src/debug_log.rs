/// Append-only diagnostic log behind the "show debug info" affordance.
///
/// Lines are advisory: nothing in the pipeline reads them back to make a
/// decision. Every line is also emitted as a `tracing` debug event.
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};

#[derive(Debug, Clone)]
pub struct DebugEntry {
    pub at: DateTime<Local>,
    pub message: String,
}

/// Cheaply cloneable handle; clones share the same lines.
#[derive(Debug, Clone, Default)]
pub struct DebugLog {
    entries: Arc<Mutex<Vec<DebugEntry>>>,
}

impl DebugLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("{message}");
        let entry = DebugEntry {
            at: Local::now(),
            message,
        };
        // A poisoned lock only means another writer panicked mid-push.
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the message lines, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }

    /// Render the whole log for verbatim display.
    #[must_use]
    pub fn render(&self) -> String {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.is_empty() {
            return "No debug information available".to_string();
        }
        entries
            .iter()
            .map(|e| format!("[{}] {}", e.at.format("%H:%M:%S%.3f"), e.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_lines() {
        let log = DebugLog::new();
        let other = log.clone();
        log.push("first");
        other.push("second");
        assert_eq!(log.messages(), vec!["first", "second"]);
        assert_eq!(other.len(), 2);
    }

    #[test]
    fn test_render_empty() {
        let log = DebugLog::new();
        assert!(log.is_empty());
        assert_eq!(log.render(), "No debug information available");
    }

    #[test]
    fn test_render_lines() {
        let log = DebugLog::new();
        log.push("URL https://x failed: 404");
        let rendered = log.render();
        assert!(rendered.starts_with('['));
        assert!(rendered.ends_with("URL https://x failed: 404"));
    }
}
