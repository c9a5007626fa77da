//! Newtype wrappers and type aliases for domain concepts.
//!
//! A newtype for dish identifiers prevents silent confusion with queue
//! levels and tick counts; plain aliases cover quantities that never mix.

use std::fmt;

/// Stable dish identifier: an index into the scheduler's append-only dish
/// arena. Dishes are retired in place and never removed, so an id stays
/// valid for the whole run and queue entries cannot dangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DishId(pub u32);

impl DishId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dish#{}", self.0)
    }
}

/// Feedback-queue level: 0 (lowest) up to `SchedPolicy::levels - 1`
/// (highest). Distinct from `Dish::priority`, which mirrors `level + 1`.
pub type QueueLevel = usize;

/// Simulated time in whole ticks.
pub type Tick = u64;
