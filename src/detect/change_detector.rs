use std::sync::Mutex;

use tracing::debug;

use crate::types::{fingerprint::Fingerprint, stock_snapshot::StockSnapshot};

#[derive(Debug, Default)]
pub struct ChangeDetector {
    last_fingerprint: Mutex<Option<Fingerprint>>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares against the previously stored fingerprint and stores the new
    /// one when it differs. The first non-empty snapshot always counts as a
    /// change.
    pub fn has_changed(&self, snapshot: &StockSnapshot) -> bool {
        if snapshot.is_empty() {
            return false;
        }

        let current = Fingerprint::of(snapshot);
        let mut last = self
            .last_fingerprint
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match last.as_ref() {
            Some(previous) if *previous == current => false,
            previous => {
                debug!(previous = ?previous, current = %current, "stock fingerprint changed");
                *last = Some(current);
                true
            }
        }
    }

    pub fn last_fingerprint(&self) -> Option<Fingerprint> {
        self.last_fingerprint
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn snapshot(name: &str) -> StockSnapshot {
        StockSnapshot::new(json!({ "normal_stock": { "items": [{ "name": name }] } }))
    }

    #[test]
    fn first_observation_is_a_change() {
        let detector = ChangeDetector::new();

        assert!(detector.has_changed(&snapshot("Spin")));
        assert!(detector.last_fingerprint().is_some());
    }

    #[test]
    fn identical_snapshot_is_unchanged_the_second_time() {
        let detector = ChangeDetector::new();

        assert!(detector.has_changed(&snapshot("Spin")));
        assert!(!detector.has_changed(&snapshot("Spin")));
    }

    #[test]
    fn different_snapshot_replaces_fingerprint() {
        let detector = ChangeDetector::new();
        detector.has_changed(&snapshot("Spin"));
        let before = detector.last_fingerprint();

        assert!(detector.has_changed(&snapshot("Dough")));
        assert_ne!(detector.last_fingerprint(), before);
        assert!(!detector.has_changed(&snapshot("Dough")));
        assert!(detector.has_changed(&snapshot("Spin")));
    }

    #[test]
    fn empty_snapshot_leaves_state_untouched() {
        let detector = ChangeDetector::new();

        assert!(!detector.has_changed(&StockSnapshot::new(json!({}))));
        assert!(detector.last_fingerprint().is_none());

        detector.has_changed(&snapshot("Spin"));
        let stored = detector.last_fingerprint();

        assert!(!detector.has_changed(&StockSnapshot::new(json!(null))));
        assert_eq!(detector.last_fingerprint(), stored);
    }
}
