// Listener registry and ordered collections for the job scheduler

pub mod collections;
pub mod config;
pub mod errors;
pub mod listeners;
pub mod matchers;
pub mod models;
pub mod telemetry;

pub use collections::{OrderedSet, SetStrategy};
pub use errors::RegistryError;
pub use listeners::{JobListener, ListenerManager, SchedulerListener, TriggerListener};
pub use matchers::{Matcher, MatcherRef};
pub use models::{JobKey, TriggerKey};
