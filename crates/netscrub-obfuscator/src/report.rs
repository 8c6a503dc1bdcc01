//! Audit mapping of everything that was replaced

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

/// Raw matched text -> placeholder
pub type ReplacementReport = BTreeMap<String, String>;

/// Accumulates replacements across every call on one obfuscator.
/// Entries are only ever added.
#[derive(Debug, Default)]
pub struct Report {
    entries: Mutex<ReplacementReport>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, original: &str, placeholder: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.get(original).map(String::as_str) != Some(placeholder) {
            entries.insert(original.to_string(), placeholder.to_string());
        }
    }

    /// Copy of the mapping as it stands now
    pub fn snapshot(&self) -> ReplacementReport {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_snapshot() {
        let report = Report::new();
        assert!(report.is_empty());

        report.record("10-0-129-220", "x-ipv4-0000000001-x");
        report.record("10.0.129.220", "x-ipv4-0000000001-x");
        report.record("10.0.129.220", "x-ipv4-0000000001-x");

        let snapshot = report.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["10-0-129-220"], "x-ipv4-0000000001-x");
    }

    #[test]
    fn test_snapshot_is_detached() {
        let report = Report::new();
        report.record("192.168.1.10", "xxx.xxx.xxx.xxx");

        let before = report.snapshot();
        report.record("192.168.1.11", "xxx.xxx.xxx.xxx");

        assert_eq!(before.len(), 1);
        assert_eq!(report.len(), 2);
    }
}
