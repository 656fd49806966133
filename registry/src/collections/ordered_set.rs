// Deduplicating container kept in ascending comparator order

use crate::config::Settings;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Shared ordering function. Elements comparing `Equal` are duplicates.
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Internal strategy of an [`OrderedSet`]
///
/// Both strategies yield the same elements in the same order; they only
/// differ in cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetStrategy {
    /// Backing vector is always sorted; positions are found by binary search.
    /// Logarithmic lookup, constant-time indexed access.
    #[default]
    Indexed,
    /// Duplicates found by linear scan; the vector is re-sorted after every
    /// mutation (once per batch for `add_all`).
    Linear,
}

/// A set of unique elements kept in ascending order under a comparator
///
/// - Uniqueness is decided by the comparator, not by `PartialEq`. When an
///   equal element is already present the existing one is kept.
/// - [`OrderedSet::first`] returns `None` on an empty set.
/// - [`OrderedSet::tail_from`] is inclusive: it keeps every element that is
///   not ordered strictly before the limit.
///
/// The set has no internal synchronization; wrap it in a lock to share it
/// between threads.
#[derive(Clone)]
pub struct OrderedSet<T> {
    items: Vec<T>,
    comparator: Comparator<T>,
    strategy: SetStrategy,
}

fn natural_order<T: Ord + 'static>() -> Comparator<T> {
    Arc::new(|a: &T, b: &T| a.cmp(b))
}

impl<T: Ord + 'static> OrderedSet<T> {
    /// Create an empty set using the natural ordering of `T`
    pub fn new() -> Self {
        Self::with_strategy(SetStrategy::default())
    }

    /// Create an empty set using the natural ordering and the given strategy
    pub fn with_strategy(strategy: SetStrategy) -> Self {
        Self::from_parts(natural_order(), strategy)
    }

    /// Create an empty set using the configured strategy
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_strategy(settings.ordered_set.strategy)
    }
}

impl<T: Ord + 'static> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedSet<T> {
    /// Create an empty set ordered by `comparator`
    pub fn with_comparator<F>(comparator: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self::with_comparator_and_strategy(comparator, SetStrategy::default())
    }

    pub fn with_comparator_and_strategy<F>(comparator: F, strategy: SetStrategy) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self::from_parts(Arc::new(comparator), strategy)
    }

    fn from_parts(comparator: Comparator<T>, strategy: SetStrategy) -> Self {
        Self {
            items: Vec::new(),
            comparator,
            strategy,
        }
    }

    /// Insert `item` unless an equal element is present.
    /// Returns true iff the set grew.
    pub fn add(&mut self, item: T) -> bool {
        match self.strategy {
            SetStrategy::Indexed => self.insert_sorted(item),
            SetStrategy::Linear => {
                let inserted = self.push_unsorted(item);
                self.resort();
                inserted
            }
        }
    }

    /// Insert every item not already present.
    /// Returns true iff at least one element was inserted.
    pub fn add_all<I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        let mut added = false;
        match self.strategy {
            SetStrategy::Indexed => {
                for item in items {
                    added |= self.insert_sorted(item);
                }
            }
            SetStrategy::Linear => {
                for item in items {
                    added |= self.push_unsorted(item);
                }
                self.resort();
            }
        }
        added
    }

    fn insert_sorted(&mut self, item: T) -> bool {
        let cmp = &self.comparator;
        match self.items.binary_search_by(|probe| cmp(probe, &item)) {
            Ok(_) => false,
            Err(pos) => {
                self.items.insert(pos, item);
                true
            }
        }
    }

    fn push_unsorted(&mut self, item: T) -> bool {
        let cmp = &self.comparator;
        if self.items.iter().any(|existing| cmp(existing, &item) == Ordering::Equal) {
            return false;
        }
        self.items.push(item);
        true
    }

    fn resort(&mut self) {
        let cmp = &self.comparator;
        self.items.sort_by(|a, b| cmp(a, b));
    }

    /// Smallest element, or `None` when empty
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// Largest element, or `None` when empty
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Element at `index` in ascending order
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &T) -> bool {
        let cmp = &self.comparator;
        match self.strategy {
            SetStrategy::Indexed => self.items.binary_search_by(|probe| cmp(probe, item)).is_ok(),
            SetStrategy::Linear => self
                .items
                .iter()
                .any(|existing| cmp(existing, item) == Ordering::Equal),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn strategy(&self) -> SetStrategy {
        self.strategy
    }

    pub fn comparator(&self) -> &Comparator<T> {
        &self.comparator
    }

    /// Number of leading elements ordered strictly before `limit`
    fn split_point(&self, limit: &T) -> usize {
        let cmp = &self.comparator;
        match self.strategy {
            SetStrategy::Indexed => self
                .items
                .partition_point(|item| cmp(item, limit) == Ordering::Less),
            SetStrategy::Linear => {
                let mut i = 0;
                while i < self.items.len() && cmp(&self.items[i], limit) == Ordering::Less {
                    i += 1;
                }
                i
            }
        }
    }
}

impl<T: Clone> OrderedSet<T> {
    /// New set holding every element at or after `limit`.
    ///
    /// The result shares this set's comparator and strategy; `self` is
    /// left untouched.
    pub fn tail_from(&self, limit: &T) -> OrderedSet<T> {
        let start = self.split_point(limit);
        OrderedSet {
            items: self.items[start..].to_vec(),
            comparator: Arc::clone(&self.comparator),
            strategy: self.strategy,
        }
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}

impl<T: Ord + 'static> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = OrderedSet::new();
        set.add_all(iter);
        set
    }
}

impl<T> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for OrderedSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRATEGIES: [SetStrategy; 2] = [SetStrategy::Indexed, SetStrategy::Linear];

    fn seeded(strategy: SetStrategy) -> OrderedSet<i32> {
        let mut set = OrderedSet::with_strategy(strategy);
        set.add_all(vec![5, 3, 8, 3, 1]);
        set
    }

    #[test]
    fn test_seeded_set_is_sorted_and_deduplicated() {
        for strategy in STRATEGIES {
            assert_eq!(seeded(strategy).to_vec(), vec![1, 3, 5, 8], "{:?}", strategy);
        }
    }

    #[test]
    fn test_from_iterator_uses_natural_order() {
        let set: OrderedSet<i32> = vec![5, 3, 8, 3, 1].into_iter().collect();
        assert_eq!(set.to_vec(), vec![1, 3, 5, 8]);
        assert_eq!(set.strategy(), SetStrategy::Indexed);
    }

    #[test]
    fn test_add_reports_insertion() {
        for strategy in STRATEGIES {
            let mut set = seeded(strategy);
            assert!(set.add(4));
            assert!(!set.add(4));
            assert!(!set.add(1));
            assert_eq!(set.to_vec(), vec![1, 3, 4, 5, 8]);
        }
    }

    #[test]
    fn test_add_all_reports_any_insertion() {
        for strategy in STRATEGIES {
            let mut set = seeded(strategy);
            assert!(!set.add_all(vec![1, 3, 8]));
            assert!(set.add_all(vec![1, 9, 9]));
            assert_eq!(set.to_vec(), vec![1, 3, 5, 8, 9]);
            assert!(!set.add_all(Vec::new()));
        }
    }

    #[test]
    fn test_first_on_empty_set_is_none() {
        for strategy in STRATEGIES {
            let set: OrderedSet<i32> = OrderedSet::with_strategy(strategy);
            assert_eq!(set.first(), None);
            assert_eq!(set.last(), None);
        }
    }

    #[test]
    fn test_first_returns_minimum() {
        for strategy in STRATEGIES {
            let set = seeded(strategy);
            assert_eq!(set.first(), Some(&1));
            assert_eq!(set.last(), Some(&8));
        }
    }

    #[test]
    fn test_first_distinguishes_zero_from_empty() {
        let mut set = OrderedSet::new();
        set.add(0);
        assert_eq!(set.first(), Some(&0));
    }

    #[test]
    fn test_tail_from_boundary_present_is_inclusive() {
        for strategy in STRATEGIES {
            let set = seeded(strategy);
            let tail = set.tail_from(&3);
            assert_eq!(tail.to_vec(), vec![3, 5, 8], "{:?}", strategy);
            assert_eq!(set.to_vec(), vec![1, 3, 5, 8]);
        }
    }

    #[test]
    fn test_tail_from_boundary_absent() {
        for strategy in STRATEGIES {
            let set = seeded(strategy);
            assert_eq!(set.tail_from(&4).to_vec(), vec![5, 8]);
            assert_eq!(set.tail_from(&2).to_vec(), vec![3, 5, 8]);
            assert_eq!(set.tail_from(&0).to_vec(), vec![1, 3, 5, 8]);
            assert!(set.tail_from(&9).is_empty());
        }
    }

    #[test]
    fn test_tail_from_keeps_comparator_and_strategy() {
        let mut set = OrderedSet::with_comparator_and_strategy(
            |a: &i32, b: &i32| b.cmp(a),
            SetStrategy::Linear,
        );
        set.add_all(vec![1, 2, 3, 4]);
        assert_eq!(set.to_vec(), vec![4, 3, 2, 1]);

        let mut tail = set.tail_from(&3);
        assert_eq!(tail.to_vec(), vec![3, 2, 1]);
        assert_eq!(tail.strategy(), SetStrategy::Linear);

        tail.add(5);
        tail.add(0);
        assert_eq!(tail.to_vec(), vec![5, 3, 2, 1, 0]);
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_custom_comparator_defines_equality() {
        for strategy in STRATEGIES {
            let mut set = OrderedSet::with_comparator_and_strategy(
                |a: &(u32, &'static str), b: &(u32, &'static str)| a.0.cmp(&b.0),
                strategy,
            );
            assert!(set.add((2, "first")));
            assert!(!set.add((2, "second")));
            assert!(set.add((1, "other")));
            assert_eq!(set.to_vec(), vec![(1, "other"), (2, "first")]);
        }
    }

    #[test]
    fn test_indexed_access_and_contains() {
        for strategy in STRATEGIES {
            let set = seeded(strategy);
            assert_eq!(set.get(0), Some(&1));
            assert_eq!(set.get(3), Some(&8));
            assert_eq!(set.get(4), None);
            assert!(set.contains(&5));
            assert!(!set.contains(&4));
        }
    }

    #[test]
    fn test_extend_and_iteration() {
        let mut set = OrderedSet::new();
        set.extend(vec!["c", "a", "b", "a"]);
        let collected: Vec<&str> = set.iter().copied().collect();
        assert_eq!(collected, vec!["a", "b", "c"]);
        let owned: Vec<&str> = set.into_iter().collect();
        assert_eq!(owned, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_debug_format() {
        let set = seeded(SetStrategy::Indexed);
        assert_eq!(format!("{:?}", set), "{1, 3, 5, 8}");
    }

    #[test]
    fn test_from_settings_uses_configured_strategy() {
        let mut settings = Settings::default();
        settings.ordered_set.strategy = SetStrategy::Linear;
        let set: OrderedSet<u64> = OrderedSet::from_settings(&settings);
        assert_eq!(set.strategy(), SetStrategy::Linear);
    }

    #[test]
    fn test_strategy_deserializes_lowercase() {
        let strategy: SetStrategy = serde_json::from_str(r#""linear""#).unwrap();
        assert_eq!(strategy, SetStrategy::Linear);
    }
}
