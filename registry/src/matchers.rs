// Key matchers used to filter which events a listener receives

use crate::models::GroupedKey;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Predicate over a key deciding whether an event is relevant to a listener
///
/// Implementations that want value equality (so that an equal but distinct
/// instance can be removed from a listener) override both [`Matcher::as_any`]
/// and [`Matcher::matcher_eq`]. Without them a matcher is only equal to
/// itself.
pub trait Matcher<K>: fmt::Debug + Send + Sync {
    /// Returns true if `key` is accepted by this matcher
    fn is_match(&self, key: &K) -> bool;

    /// Value equality against another matcher
    fn matcher_eq(&self, _other: &dyn Matcher<K>) -> bool {
        false
    }

    /// Downcast hook for [`Matcher::matcher_eq`]
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }
}

/// Shared handle to a matcher, as stored by the registry
pub type MatcherRef<K> = Arc<dyn Matcher<K>>;

/// Two handles are the same matcher if they share an allocation or compare equal
pub fn same_matcher<K>(a: &MatcherRef<K>, b: &MatcherRef<K>) -> bool {
    Arc::ptr_eq(a, b) || a.matcher_eq(b.as_ref())
}

/// OR across a matcher list; an empty list matches nothing
pub fn any_match<K>(matchers: &[MatcherRef<K>], key: &K) -> bool {
    matchers.iter().any(|m| m.is_match(key))
}

fn eq_by_value<M, K>(this: &M, other: &dyn Matcher<K>) -> bool
where
    M: PartialEq + 'static,
{
    other
        .as_any()
        .and_then(|any| any.downcast_ref::<M>())
        .is_some_and(|other| other == this)
}

/// Operators for comparing a key component against a fixed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringOperator {
    Equals,
    StartsWith,
    EndsWith,
    Contains,
    /// Accepts any value
    Anything,
}

impl StringOperator {
    pub fn evaluate(&self, value: &str, compare_to: &str) -> bool {
        match self {
            StringOperator::Equals => value == compare_to,
            StringOperator::StartsWith => value.starts_with(compare_to),
            StringOperator::EndsWith => value.ends_with(compare_to),
            StringOperator::Contains => value.contains(compare_to),
            StringOperator::Anything => true,
        }
    }
}

// ============================================================================
// Built-in Matchers
// ============================================================================

/// Accepts every key. Installed when a listener is registered without matchers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EverythingMatcher;

impl EverythingMatcher {
    pub fn shared<K: GroupedKey + 'static>() -> MatcherRef<K> {
        Arc::new(EverythingMatcher)
    }
}

impl<K: GroupedKey + 'static> Matcher<K> for EverythingMatcher {
    fn is_match(&self, _key: &K) -> bool {
        true
    }

    fn matcher_eq(&self, other: &dyn Matcher<K>) -> bool {
        eq_by_value(self, other)
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

/// Matches exactly one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMatcher<K> {
    key: K,
}

impl<K> KeyMatcher<K> {
    pub fn key_equals(key: K) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &K {
        &self.key
    }
}

impl<K> Matcher<K> for KeyMatcher<K>
where
    K: GroupedKey + PartialEq + 'static,
{
    fn is_match(&self, key: &K) -> bool {
        &self.key == key
    }

    fn matcher_eq(&self, other: &dyn Matcher<K>) -> bool {
        eq_by_value(self, other)
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

/// Matches on the key's group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMatcher {
    compare_to: String,
    operator: StringOperator,
}

impl GroupMatcher {
    pub fn new(operator: StringOperator, compare_to: impl Into<String>) -> Self {
        Self {
            compare_to: compare_to.into(),
            operator,
        }
    }

    pub fn group_equals(group: impl Into<String>) -> Self {
        Self::new(StringOperator::Equals, group)
    }

    pub fn group_starts_with(prefix: impl Into<String>) -> Self {
        Self::new(StringOperator::StartsWith, prefix)
    }

    pub fn group_ends_with(suffix: impl Into<String>) -> Self {
        Self::new(StringOperator::EndsWith, suffix)
    }

    pub fn group_contains(fragment: impl Into<String>) -> Self {
        Self::new(StringOperator::Contains, fragment)
    }

    pub fn any_group() -> Self {
        Self::new(StringOperator::Anything, "")
    }
}

impl<K: GroupedKey + 'static> Matcher<K> for GroupMatcher {
    fn is_match(&self, key: &K) -> bool {
        self.operator.evaluate(key.group(), &self.compare_to)
    }

    fn matcher_eq(&self, other: &dyn Matcher<K>) -> bool {
        eq_by_value(self, other)
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

/// Matches on the key's name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatcher {
    compare_to: String,
    operator: StringOperator,
}

impl NameMatcher {
    pub fn new(operator: StringOperator, compare_to: impl Into<String>) -> Self {
        Self {
            compare_to: compare_to.into(),
            operator,
        }
    }

    pub fn name_equals(name: impl Into<String>) -> Self {
        Self::new(StringOperator::Equals, name)
    }

    pub fn name_starts_with(prefix: impl Into<String>) -> Self {
        Self::new(StringOperator::StartsWith, prefix)
    }

    pub fn name_ends_with(suffix: impl Into<String>) -> Self {
        Self::new(StringOperator::EndsWith, suffix)
    }

    pub fn name_contains(fragment: impl Into<String>) -> Self {
        Self::new(StringOperator::Contains, fragment)
    }
}

impl<K: GroupedKey + 'static> Matcher<K> for NameMatcher {
    fn is_match(&self, key: &K) -> bool {
        self.operator.evaluate(key.name(), &self.compare_to)
    }

    fn matcher_eq(&self, other: &dyn Matcher<K>) -> bool {
        eq_by_value(self, other)
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

// ============================================================================
// Composite Matchers
// ============================================================================

/// Matches when both operands match
#[derive(Debug)]
pub struct AndMatcher<K> {
    left: MatcherRef<K>,
    right: MatcherRef<K>,
}

impl<K> AndMatcher<K> {
    pub fn new(left: MatcherRef<K>, right: MatcherRef<K>) -> Self {
        Self { left, right }
    }
}

impl<K> PartialEq for AndMatcher<K> {
    fn eq(&self, other: &Self) -> bool {
        same_matcher(&self.left, &other.left) && same_matcher(&self.right, &other.right)
    }
}

impl<K: GroupedKey + 'static> Matcher<K> for AndMatcher<K> {
    fn is_match(&self, key: &K) -> bool {
        self.left.is_match(key) && self.right.is_match(key)
    }

    fn matcher_eq(&self, other: &dyn Matcher<K>) -> bool {
        eq_by_value(self, other)
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

/// Matches when either operand matches
#[derive(Debug)]
pub struct OrMatcher<K> {
    left: MatcherRef<K>,
    right: MatcherRef<K>,
}

impl<K> OrMatcher<K> {
    pub fn new(left: MatcherRef<K>, right: MatcherRef<K>) -> Self {
        Self { left, right }
    }
}

impl<K> PartialEq for OrMatcher<K> {
    fn eq(&self, other: &Self) -> bool {
        same_matcher(&self.left, &other.left) && same_matcher(&self.right, &other.right)
    }
}

impl<K: GroupedKey + 'static> Matcher<K> for OrMatcher<K> {
    fn is_match(&self, key: &K) -> bool {
        self.left.is_match(key) || self.right.is_match(key)
    }

    fn matcher_eq(&self, other: &dyn Matcher<K>) -> bool {
        eq_by_value(self, other)
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

/// Inverts its operand
#[derive(Debug)]
pub struct NotMatcher<K> {
    operand: MatcherRef<K>,
}

impl<K> NotMatcher<K> {
    pub fn new(operand: MatcherRef<K>) -> Self {
        Self { operand }
    }
}

impl<K> PartialEq for NotMatcher<K> {
    fn eq(&self, other: &Self) -> bool {
        same_matcher(&self.operand, &other.operand)
    }
}

impl<K: GroupedKey + 'static> Matcher<K> for NotMatcher<K> {
    fn is_match(&self, key: &K) -> bool {
        !self.operand.is_match(key)
    }

    fn matcher_eq(&self, other: &dyn Matcher<K>) -> bool {
        eq_by_value(self, other)
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

/// Adapts a closure into a matcher. Only equal to itself.
pub struct FnMatcher<F> {
    predicate: F,
}

impl<F> FnMatcher<F> {
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<F> fmt::Debug for FnMatcher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMatcher").finish_non_exhaustive()
    }
}

impl<K, F> Matcher<K> for FnMatcher<F>
where
    F: Fn(&K) -> bool + Send + Sync,
{
    fn is_match(&self, key: &K) -> bool {
        (self.predicate)(key)
    }
}
