//! In-memory registry of uploads in flight

use log::debug;
use std::time::{Duration, Instant};

use super::record::UploadRecord;

/// Insertion-ordered registry mapping upload id to its progress record.
///
/// Entries are inserted when an upload is detected, mutated on progress
/// notifications, and removed when the underlying request reaches a terminal
/// outcome. Updates and removals for unknown ids are silent no-ops; a late
/// progress notification racing a completed request is expected, not an error.
#[derive(Debug, Default)]
pub struct UploadRegistry {
    records: Vec<UploadRecord>,
}

impl UploadRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Insert a new record. A record with a duplicate id is dropped.
    pub fn insert(&mut self, record: UploadRecord) {
        if self.get(&record.id).is_some() {
            debug!("Ignoring duplicate upload id: {}", record.id);
            return;
        }
        self.records.push(record);
    }

    /// Look up a record by id
    pub fn get(&self, id: &str) -> Option<&UploadRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Apply a progress notification to the record with the given id.
    ///
    /// Returns `false` (without touching anything) when the id is unknown.
    pub fn apply_progress(
        &mut self,
        id: &str,
        loaded: u64,
        total: u64,
        now: Instant,
        sample_interval: Duration,
    ) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.apply_progress(loaded, total, now, sample_interval);
                true
            }
            None => {
                debug!("Progress for unknown upload id: {}", id);
                false
            }
        }
    }

    /// Remove the record with the given id, returning it if present
    pub fn remove(&mut self, id: &str) -> Option<UploadRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    /// Number of uploads currently tracked
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no uploads are tracked
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clone the current records in insertion order
    pub fn snapshot(&self) -> Vec<UploadRecord> {
        self.records.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_INTERVAL: Duration = Duration::from_millis(500);

    fn record(id: &str, name: &str) -> UploadRecord {
        UploadRecord::new(id.to_string(), name.to_string(), 1000, Instant::now())
    }

    #[test]
    fn test_insert_and_snapshot_keep_insertion_order() {
        let mut registry = UploadRegistry::new();
        registry.insert(record("a", "first.bin"));
        registry.insert(record("b", "second.bin"));
        registry.insert(record("c", "third.bin"));

        let names: Vec<String> = registry.snapshot().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["first.bin", "second.bin", "third.bin"]);
    }

    #[test]
    fn test_duplicate_id_is_dropped() {
        let mut registry = UploadRegistry::new();
        registry.insert(record("a", "first.bin"));
        registry.insert(record("a", "imposter.bin"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").unwrap().name, "first.bin");
    }

    #[test]
    fn test_progress_for_unknown_id_is_noop() {
        let mut registry = UploadRegistry::new();
        registry.insert(record("a", "first.bin"));

        let applied =
            registry.apply_progress("missing", 100, 1000, Instant::now(), SAMPLE_INTERVAL);
        assert!(!applied);
        assert_eq!(registry.get("a").unwrap().loaded, 0);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut registry = UploadRegistry::new();
        registry.insert(record("a", "first.bin"));

        assert!(registry.remove("a").is_some());
        assert!(registry.remove("a").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_count_tracks_inserts_and_removals() {
        let mut registry = UploadRegistry::new();
        assert_eq!(registry.len(), 0);

        registry.insert(record("a", "first.bin"));
        registry.insert(record("b", "second.bin"));
        assert_eq!(registry.len(), 2);

        registry.remove("a");
        assert_eq!(registry.len(), 1);
        assert!(registry.get("a").is_none());
        assert!(registry.get("b").is_some());
    }
}
