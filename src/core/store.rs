//! Metric store: the last successfully fetched snapshot

use std::sync::{Arc, RwLock};

use crate::types::MetricSnapshot;

/// Holds the current snapshot; replaced atomically as a whole
#[derive(Debug, Default)]
pub struct MetricStore {
    current: RwLock<Option<Arc<MetricSnapshot>>>,
}

impl MetricStore {
    /// Empty store (nothing loaded yet)
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a new snapshot, returning the one it replaced
    pub fn replace(&self, snapshot: MetricSnapshot) -> Option<Arc<MetricSnapshot>> {
        let next = Arc::new(snapshot);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        guard.replace(next)
    }

    /// Current snapshot, or `None` before the first load
    pub fn current(&self) -> Option<Arc<MetricSnapshot>> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(generation: u64) -> MetricSnapshot {
        MetricSnapshot {
            generation,
            range_days: 30,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_before_first_load() {
        let store = MetricStore::new();
        assert!(store.current().is_none());
    }

    #[test]
    fn test_replace_swaps_whole_snapshot() {
        let store = MetricStore::new();
        assert!(store.replace(snapshot(1)).is_none());

        let held = store.current().unwrap();
        let previous = store.replace(snapshot(2)).unwrap();

        // A reader holding the old Arc still sees the old snapshot intact
        assert_eq!(held.generation, 1);
        assert_eq!(previous.generation, 1);
        assert_eq!(store.current().unwrap().generation, 2);
    }
}
