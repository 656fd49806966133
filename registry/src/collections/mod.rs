// Ordered containers used by engine-side queues (trigger fire times, job keys)

pub mod ordered_set;

pub use ordered_set::{Comparator, OrderedSet, SetStrategy};
