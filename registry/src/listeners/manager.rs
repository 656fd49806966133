// Listener manager owned by a scheduler instance

use super::{JobListener, KeyedListeners, SchedulerListener, SchedulerListeners, TriggerListener};
use crate::config::Settings;
use crate::models::{JobKey, TriggerKey};
use std::sync::Arc;
use tracing::info;

/// Job listeners filtered by job key
pub type JobListeners = KeyedListeners<dyn JobListener, JobKey>;

/// Trigger listeners filtered by trigger key
pub type TriggerListeners = KeyedListeners<dyn TriggerListener, TriggerKey>;

/// Holds the three listener categories of one scheduler
///
/// Each category has its own lock; an operation on one category never
/// waits on another. Share it with `Arc<ListenerManager>`.
#[derive(Default)]
pub struct ListenerManager {
    job_listeners: JobListeners,
    trigger_listeners: TriggerListeners,
    scheduler_listeners: SchedulerListeners,
}

impl ListenerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager whose keyed categories are pre-sized for `capacity` listeners
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            job_listeners: KeyedListeners::with_capacity(capacity),
            trigger_listeners: KeyedListeners::with_capacity(capacity),
            scheduler_listeners: SchedulerListeners::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        info!(
            initial_capacity = settings.registry.initial_capacity,
            "Creating listener manager"
        );
        Self::with_capacity(settings.registry.initial_capacity)
    }

    pub fn job_listeners(&self) -> &JobListeners {
        &self.job_listeners
    }

    pub fn trigger_listeners(&self) -> &TriggerListeners {
        &self.trigger_listeners
    }

    pub fn scheduler_listeners(&self) -> &SchedulerListeners {
        &self.scheduler_listeners
    }

    /// Job listeners to notify for an event on `job`
    pub fn job_listeners_for(&self, job: &JobKey) -> Vec<Arc<dyn JobListener>> {
        self.job_listeners.matching(job)
    }

    /// Trigger listeners to notify for an event on `trigger`
    pub fn trigger_listeners_for(&self, trigger: &TriggerKey) -> Vec<Arc<dyn TriggerListener>> {
        self.trigger_listeners.matching(trigger)
    }

    /// All scheduler listeners; they are notified unconditionally
    pub fn scheduler_listeners_snapshot(&self) -> Vec<Arc<dyn SchedulerListener>> {
        self.scheduler_listeners.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::{GroupMatcher, MatcherRef};

    struct Named(&'static str);

    impl JobListener for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    impl TriggerListener for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    struct Watcher;

    impl SchedulerListener for Watcher {}

    #[test]
    fn test_categories_are_independent() {
        let manager = ListenerManager::new();
        let shared = Arc::new(Named("audit"));

        manager
            .job_listeners()
            .register(shared.clone(), Vec::new())
            .unwrap();
        manager
            .trigger_listeners()
            .register(shared, Vec::new())
            .unwrap();
        manager.scheduler_listeners().add(Arc::new(Watcher));

        assert!(manager.job_listeners().unregister("audit"));
        assert!(manager.job_listeners().is_empty());
        assert_eq!(manager.trigger_listeners().len(), 1);
        assert_eq!(manager.scheduler_listeners_snapshot().len(), 1);
    }

    #[test]
    fn test_engine_lookup_by_key() {
        let manager = ListenerManager::with_capacity(4);
        let reports: MatcherRef<JobKey> = Arc::new(GroupMatcher::group_equals("reports"));
        manager
            .job_listeners()
            .register_with_matcher(Arc::new(Named("reporting")), reports)
            .unwrap();
        manager
            .job_listeners()
            .register(Arc::new(Named("all-jobs")), Vec::new())
            .unwrap();

        let for_report = manager.job_listeners_for(&JobKey::new("reports", "daily"));
        assert_eq!(for_report.len(), 2);

        let for_billing = manager.job_listeners_for(&JobKey::new("billing", "daily"));
        assert_eq!(for_billing.len(), 1);
        assert_eq!(JobListener::name(for_billing[0].as_ref()), "all-jobs");

        assert!(manager
            .trigger_listeners_for(&TriggerKey::new("reports", "daily"))
            .is_empty());
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings::default();
        let manager = ListenerManager::from_settings(&settings);
        assert!(manager.job_listeners().is_empty());
        assert!(manager.scheduler_listeners().is_empty());
    }
}
