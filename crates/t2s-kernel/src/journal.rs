//! The run journal.
//!
//! Every entry is recorded in order and also emitted as a `tracing` event,
//! so a subscriber sees the same lines a caller can inspect afterwards.

use t2s_types::{JournalEntry, Level};

/// Ordered log of what a run did.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.record(Level::Info, message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.record(Level::Warning, message.into());
    }

    pub fn severe(&mut self, message: impl Into<String>) {
        self.record(Level::Severe, message.into());
    }

    fn record(&mut self, level: Level, message: String) {
        match level {
            Level::Info => tracing::info!("{message}"),
            Level::Warning => tracing::warn!("{message}"),
            Level::Severe => tracing::error!("{message}"),
        }
        self.entries.push(JournalEntry { level, message });
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Entries at exactly `level`.
    pub fn at(&self, level: Level) -> impl Iterator<Item = &JournalEntry> + '_ {
        self.entries.iter().filter(move |e| e.level == level)
    }

    pub fn count(&self, level: Level) -> usize {
        self.at(level).count()
    }

    /// Messages only, in order; handy for assertions.
    pub fn messages(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.message.as_str()).collect()
    }

    pub fn into_entries(self) -> Vec<JournalEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order_with_levels() {
        let mut journal = Journal::new();
        journal.info("open file://x.html");
        journal.severe("no element selected");
        journal.warning("test 'a' is empty");

        assert_eq!(
            journal.messages(),
            vec!["open file://x.html", "no element selected", "test 'a' is empty"]
        );
        assert_eq!(journal.count(Level::Info), 1);
        assert_eq!(journal.count(Level::Severe), 1);
        assert_eq!(journal.count(Level::Warning), 1);
    }
}
