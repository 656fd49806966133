// Listener registry: job, trigger and scheduler listener categories
//
// Job and trigger listeners are keyed by name and filtered by matchers.
// Scheduler listeners are an unkeyed list notified unconditionally.

pub mod keyed;
pub mod manager;
pub mod scheduler;

pub use keyed::{KeyedListeners, NamedListener};
pub use manager::{JobListeners, ListenerManager, TriggerListeners};
pub use scheduler::SchedulerListeners;

use crate::models::{JobKey, TriggerKey};

/// Receives events about job executions
///
/// Only [`JobListener::name`] is required; the notification hooks default to
/// no-ops.
pub trait JobListener: Send + Sync {
    /// Unique, non-empty registration name
    fn name(&self) -> &str;

    fn job_to_be_executed(&self, _job: &JobKey) {}

    fn job_execution_vetoed(&self, _job: &JobKey) {}

    fn job_was_executed(&self, _job: &JobKey, _error: Option<&str>) {}
}

/// Receives events about trigger firings
pub trait TriggerListener: Send + Sync {
    /// Unique, non-empty registration name
    fn name(&self) -> &str;

    fn trigger_fired(&self, _trigger: &TriggerKey, _job: &JobKey) {}

    /// Returning true vetoes the job execution for this firing
    fn veto_job_execution(&self, _trigger: &TriggerKey, _job: &JobKey) -> bool {
        false
    }

    fn trigger_misfired(&self, _trigger: &TriggerKey) {}

    fn trigger_complete(&self, _trigger: &TriggerKey, _job: &JobKey) {}
}

/// Receives scheduler-wide events. Identified by reference, not by name.
pub trait SchedulerListener: Send + Sync {
    fn job_added(&self, _job: &JobKey) {}

    fn job_deleted(&self, _job: &JobKey) {}

    fn job_scheduled(&self, _trigger: &TriggerKey) {}

    fn job_unscheduled(&self, _trigger: &TriggerKey) {}

    fn scheduler_started(&self) {}

    fn scheduler_shutdown(&self) {}

    fn scheduler_error(&self, _message: &str) {}
}

impl NamedListener for dyn JobListener {
    const CATEGORY: &'static str = "job";

    fn listener_name(&self) -> &str {
        self.name()
    }
}

impl NamedListener for dyn TriggerListener {
    const CATEGORY: &'static str = "trigger";

    fn listener_name(&self) -> &str {
        self.name()
    }
}
