// Key models shared by the listener registry and its matchers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Group assigned to keys created without an explicit group
pub const DEFAULT_GROUP: &str = "DEFAULT";

/// A `(group, name)` identifier that matchers can inspect
pub trait GroupedKey: fmt::Debug + Send + Sync {
    fn group(&self) -> &str;
    fn name(&self) -> &str;
}

// ============================================================================
// Job Keys
// ============================================================================

/// JobKey uniquely identifies a job within the scheduler
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobKey {
    group: String,
    name: String,
}

impl JobKey {
    /// Create a key in the given group
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    /// Create a key in [`DEFAULT_GROUP`]
    pub fn in_default_group(name: impl Into<String>) -> Self {
        Self::new(DEFAULT_GROUP, name)
    }
}

impl GroupedKey for JobKey {
    fn group(&self) -> &str {
        &self.group
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.name)
    }
}

// ============================================================================
// Trigger Keys
// ============================================================================

/// TriggerKey uniquely identifies a trigger within the scheduler
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TriggerKey {
    group: String,
    name: String,
}

impl TriggerKey {
    /// Create a key in the given group
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    /// Create a key in [`DEFAULT_GROUP`]
    pub fn in_default_group(name: impl Into<String>) -> Self {
        Self::new(DEFAULT_GROUP, name)
    }
}

impl GroupedKey for TriggerKey {
    fn group(&self) -> &str {
        &self.group
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TriggerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.name)
    }
}
