// Name-keyed listener category with per-listener matcher lists

use crate::errors::RegistryError;
use crate::matchers::{any_match, same_matcher, EverythingMatcher, MatcherRef};
use crate::models::GroupedKey;
use crate::telemetry;
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, warn};

/// A listener that registers under a unique name
pub trait NamedListener: Send + Sync {
    /// Category label used in errors, logs and metrics
    const CATEGORY: &'static str;

    fn listener_name(&self) -> &str;
}

/// A registered listener together with its matcher list
struct Entry<L: ?Sized, K> {
    listener: Arc<L>,
    matchers: Vec<MatcherRef<K>>,
}

impl<L: ?Sized, K> Clone for Entry<L, K> {
    fn clone(&self) -> Self {
        Self {
            listener: Arc::clone(&self.listener),
            matchers: self.matchers.clone(),
        }
    }
}

/// Listeners keyed by name, each filtered by an OR-ed list of matchers
///
/// A listener and its matchers live in the same map entry behind a single
/// lock, so they are always created, replaced and removed together. Every
/// value handed out is a copy taken under the lock.
///
/// Invariant: every entry has a non-empty matcher list.
pub struct KeyedListeners<L: ?Sized, K> {
    entries: Mutex<IndexMap<String, Entry<L, K>>>,
}

impl<L, K> KeyedListeners<L, K>
where
    L: ?Sized + NamedListener,
    K: GroupedKey + 'static,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(IndexMap::with_capacity(capacity)),
        }
    }

    /// Register `listener`, replacing any listener and matchers under its name.
    ///
    /// An empty `matchers` list installs a single [`EverythingMatcher`]. A
    /// re-registered name keeps its original position in [`Self::list`].
    pub fn register(
        &self,
        listener: Arc<L>,
        matchers: Vec<MatcherRef<K>>,
    ) -> Result<(), RegistryError> {
        let name = listener.listener_name().to_string();
        if name.is_empty() {
            warn!(
                category = L::CATEGORY,
                "Rejected listener registration with empty name"
            );
            return Err(RegistryError::EmptyListenerName {
                category: L::CATEGORY,
            });
        }

        let matchers = if matchers.is_empty() {
            vec![EverythingMatcher::shared::<K>()]
        } else {
            matchers
        };
        let matcher_count = matchers.len();

        let size = {
            let mut entries = self.entries.lock();
            entries.insert(name.clone(), Entry { listener, matchers });
            entries.len()
        };

        debug!(
            category = L::CATEGORY,
            listener = %name,
            matcher_count = matcher_count,
            "Listener registered"
        );
        telemetry::update_registry_size(L::CATEGORY, size);
        Ok(())
    }

    /// Register `listener` with exactly one matcher, replacing any prior list
    pub fn register_with_matcher(
        &self,
        listener: Arc<L>,
        matcher: MatcherRef<K>,
    ) -> Result<(), RegistryError> {
        self.register(listener, vec![matcher])
    }

    /// Append `matcher` to the listener's list.
    /// Returns false if no listener is registered under `name`.
    pub fn add_matcher(&self, name: &str, matcher: MatcherRef<K>) -> bool {
        let mut entries = self.entries.lock();
        match entries.get_mut(name) {
            Some(entry) => {
                entry.matchers.push(matcher);
                debug!(
                    category = L::CATEGORY,
                    listener = name,
                    matcher_count = entry.matchers.len(),
                    "Matcher added"
                );
                true
            }
            None => false,
        }
    }

    /// Remove the first matcher equal to `matcher`.
    ///
    /// Returns `Ok(false)` if the name is unknown or no matcher is equal.
    /// Removing the only remaining matcher is rejected.
    pub fn remove_matcher(&self, name: &str, matcher: &MatcherRef<K>) -> Result<bool, RegistryError> {
        let mut entries = self.entries.lock();
        let Some(entry) = entries.get_mut(name) else {
            return Ok(false);
        };
        let Some(pos) = entry.matchers.iter().position(|m| same_matcher(m, matcher)) else {
            return Ok(false);
        };
        if entry.matchers.len() == 1 {
            warn!(
                category = L::CATEGORY,
                listener = name,
                "Rejected removal of last matcher"
            );
            return Err(RegistryError::LastMatcher {
                listener: name.to_string(),
            });
        }

        entry.matchers.remove(pos);
        debug!(
            category = L::CATEGORY,
            listener = name,
            matcher_count = entry.matchers.len(),
            "Matcher removed"
        );
        Ok(true)
    }

    /// Snapshot of the listener's matchers, or `None` if the name is unknown
    pub fn matchers(&self, name: &str) -> Option<Vec<MatcherRef<K>>> {
        self.entries
            .lock()
            .get(name)
            .map(|entry| entry.matchers.clone())
    }

    /// Replace the listener's whole matcher list.
    /// Returns `Ok(false)` if the name is unknown.
    pub fn set_matchers(
        &self,
        name: &str,
        matchers: Vec<MatcherRef<K>>,
    ) -> Result<bool, RegistryError> {
        if matchers.is_empty() {
            warn!(
                category = L::CATEGORY,
                listener = name,
                "Rejected empty matcher list"
            );
            return Err(RegistryError::EmptyMatcherList {
                listener: name.to_string(),
            });
        }

        let mut entries = self.entries.lock();
        match entries.get_mut(name) {
            Some(entry) => {
                debug!(
                    category = L::CATEGORY,
                    listener = name,
                    matcher_count = matchers.len(),
                    "Matchers replaced"
                );
                entry.matchers = matchers;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove the listener and its matchers. Returns whether it was registered.
    pub fn unregister(&self, name: &str) -> bool {
        let (removed, size) = {
            let mut entries = self.entries.lock();
            let removed = entries.shift_remove(name).is_some();
            (removed, entries.len())
        };

        if removed {
            debug!(category = L::CATEGORY, listener = name, "Listener unregistered");
            telemetry::update_registry_size(L::CATEGORY, size);
        }
        removed
    }

    /// Snapshot of all listeners in registration order
    pub fn list(&self) -> Vec<Arc<L>> {
        self.entries
            .lock()
            .values()
            .map(|entry| Arc::clone(&entry.listener))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<Arc<L>> {
        self.entries
            .lock()
            .get(name)
            .map(|entry| Arc::clone(&entry.listener))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.lock().contains_key(name)
    }

    /// Listeners with at least one matcher accepting `key`, in registration order
    ///
    /// Matchers run on a snapshot taken under the lock, outside of it.
    pub fn matching(&self, key: &K) -> Vec<Arc<L>> {
        let snapshot: Vec<Entry<L, K>> = self.entries.lock().values().cloned().collect();
        snapshot
            .into_iter()
            .filter(|entry| any_match(&entry.matchers, key))
            .map(|entry| entry.listener)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl<L, K> Default for KeyedListeners<L, K>
where
    L: ?Sized + NamedListener,
    K: GroupedKey + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
