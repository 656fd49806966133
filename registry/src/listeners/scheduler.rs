// Unkeyed scheduler listener category

use super::SchedulerListener;
use crate::telemetry;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

const CATEGORY: &str = "scheduler";

/// Scheduler listeners in registration order.
///
/// Listeners are compared by `Arc` identity; the same instance may be added
/// more than once.
#[derive(Default)]
pub struct SchedulerListeners {
    listeners: Mutex<Vec<Arc<dyn SchedulerListener>>>,
}

impl SchedulerListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, listener: Arc<dyn SchedulerListener>) {
        let size = {
            let mut listeners = self.listeners.lock();
            listeners.push(listener);
            listeners.len()
        };
        debug!(category = CATEGORY, listener_count = size, "Listener added");
        telemetry::update_registry_size(CATEGORY, size);
    }

    /// Remove the first occurrence of `listener`. Returns whether one was removed.
    pub fn remove(&self, listener: &Arc<dyn SchedulerListener>) -> bool {
        let mut listeners = self.listeners.lock();
        let Some(pos) = listeners.iter().position(|l| Arc::ptr_eq(l, listener)) else {
            return false;
        };
        listeners.remove(pos);
        let size = listeners.len();
        drop(listeners);

        debug!(category = CATEGORY, listener_count = size, "Listener removed");
        telemetry::update_registry_size(CATEGORY, size);
        true
    }

    /// Snapshot in registration order
    pub fn list(&self) -> Vec<Arc<dyn SchedulerListener>> {
        self.listeners.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.listeners.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder;

    impl SchedulerListener for Recorder {}

    #[test]
    fn test_add_allows_duplicates() {
        let listeners = SchedulerListeners::new();
        let recorder: Arc<dyn SchedulerListener> = Arc::new(Recorder);
        listeners.add(recorder.clone());
        listeners.add(recorder.clone());
        assert_eq!(listeners.len(), 2);
    }

    #[test]
    fn test_remove_first_occurrence_only() {
        let listeners = SchedulerListeners::new();
        let a: Arc<dyn SchedulerListener> = Arc::new(Recorder);
        let b: Arc<dyn SchedulerListener> = Arc::new(Recorder);
        listeners.add(a.clone());
        listeners.add(b.clone());
        listeners.add(a.clone());

        assert!(listeners.remove(&a));
        let remaining = listeners.list();
        assert_eq!(remaining.len(), 2);
        assert!(Arc::ptr_eq(&remaining[0], &b));
        assert!(Arc::ptr_eq(&remaining[1], &a));
    }

    #[test]
    fn test_remove_unknown_listener() {
        let listeners = SchedulerListeners::new();
        listeners.add(Arc::new(Recorder));
        let stranger: Arc<dyn SchedulerListener> = Arc::new(Recorder);
        assert!(!listeners.remove(&stranger));
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn test_list_is_a_snapshot() {
        let listeners = SchedulerListeners::new();
        let a: Arc<dyn SchedulerListener> = Arc::new(Recorder);
        listeners.add(a.clone());
        let snapshot = listeners.list();
        listeners.remove(&a);
        assert_eq!(snapshot.len(), 1);
        assert!(listeners.is_empty());
    }
}
