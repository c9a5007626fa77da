//! Multilevel feedback queue set.
//!
//! Ordered levels of dish ids, level `levels - 1` highest. Admission,
//! promotion/demotion relocation, retirement, and runnable selection all
//! append to a level's tail, which is what makes level 0 behave as
//! round-robin (a level-0 demotion re-appends to its own tail) while the
//! higher levels preserve insertion order (FCFS).
//!
//! An arrived, unfinished dish lives in exactly one level at a time.
//! Queues may hold stale entries for dishes that are currently prepping
//! or in transit; selection skips those without removing them.

use std::collections::VecDeque;

use crate::types::{DishId, QueueLevel};

#[derive(Debug)]
pub struct FeedbackQueueSet {
    levels: Vec<VecDeque<DishId>>,
}

impl FeedbackQueueSet {
    pub fn new(levels: usize) -> Self {
        assert!(levels > 0, "queue set needs at least one level");
        FeedbackQueueSet {
            levels: (0..levels).map(|_| VecDeque::new()).collect(),
        }
    }

    pub fn nr_levels(&self) -> usize {
        self.levels.len()
    }

    /// Append a dish to the tail of `level`. Used on arrival.
    ///
    /// # Panics
    /// Panics if the level is out of range or the dish is already queued.
    pub fn admit(&mut self, id: DishId, level: QueueLevel) {
        assert!(level < self.levels.len(), "queue level {level} out of range");
        assert!(
            self.level_of(id).is_none(),
            "{id} is already queued; admit is for arrivals only"
        );
        self.levels[level].push_back(id);
    }

    /// The level currently holding `id`, if any.
    pub fn level_of(&self, id: DishId) -> Option<QueueLevel> {
        self.levels.iter().position(|q| q.contains(&id))
    }

    /// Atomically move `id` from whichever level holds it to the tail of
    /// `new_level`. Returns the level it came from. Relocating within the
    /// same level re-appends to the tail (the round-robin rotation at
    /// level 0).
    ///
    /// # Panics
    /// Panics if the dish is not queued anywhere; every arrived,
    /// unfinished dish must be.
    pub fn relocate(&mut self, id: DishId, new_level: QueueLevel) -> QueueLevel {
        assert!(
            new_level < self.levels.len(),
            "queue level {new_level} out of range"
        );
        let old_level = self
            .take(id)
            .unwrap_or_else(|| panic!("relocating {id}, which is not in any queue level"));
        self.levels[new_level].push_back(id);
        old_level
    }

    /// Remove `id` with no replacement. Used when a dish becomes done.
    ///
    /// # Panics
    /// Panics if the dish is not queued anywhere.
    pub fn retire(&mut self, id: DishId) {
        self.take(id)
            .unwrap_or_else(|| panic!("retiring {id}, which is not in any queue level"));
    }

    /// Scan levels from highest to lowest, in queue order within a level,
    /// and return the first dish `runnable` accepts, with its level.
    /// Entries `runnable` rejects are stale for this scan and stay queued.
    pub fn select_runnable(
        &self,
        runnable: impl Fn(DishId) -> bool,
    ) -> Option<(DishId, QueueLevel)> {
        for level in (0..self.levels.len()).rev() {
            for &id in &self.levels[level] {
                if runnable(id) {
                    return Some((id, level));
                }
            }
        }
        None
    }

    /// Every queued dish in scan order: highest level first, queue order
    /// within a level.
    pub fn iter_queue_order(&self) -> impl Iterator<Item = DishId> + '_ {
        self.levels.iter().rev().flat_map(|q| q.iter().copied())
    }

    /// Queue order of a single level (for tests and inspection).
    pub fn level_entries(&self, level: QueueLevel) -> Vec<DishId> {
        self.levels[level].iter().copied().collect()
    }

    fn take(&mut self, id: DishId) -> Option<QueueLevel> {
        for (level, queue) in self.levels.iter_mut().enumerate() {
            if let Some(pos) = queue.iter().position(|&d| d == id) {
                queue.remove(pos);
                return Some(level);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admit_places_at_tail_in_order() {
        let mut q = FeedbackQueueSet::new(10);
        q.admit(DishId(0), 4);
        q.admit(DishId(1), 4);
        assert_eq!(q.level_entries(4), vec![DishId(0), DishId(1)]);
        assert_eq!(q.level_of(DishId(1)), Some(4));
    }

    #[test]
    fn select_prefers_highest_level_then_queue_order() {
        let mut q = FeedbackQueueSet::new(10);
        q.admit(DishId(0), 2);
        q.admit(DishId(1), 8);
        q.admit(DishId(2), 8);
        assert_eq!(q.select_runnable(|_| true), Some((DishId(1), 8)));
    }

    #[test]
    fn select_skips_stale_entries_without_removing_them() {
        let mut q = FeedbackQueueSet::new(10);
        q.admit(DishId(0), 8);
        q.admit(DishId(1), 8);
        let picked = q.select_runnable(|id| id != DishId(0));
        assert_eq!(picked, Some((DishId(1), 8)));
        assert_eq!(q.level_entries(8), vec![DishId(0), DishId(1)]);
    }

    #[test]
    fn relocate_moves_to_new_tail_and_reports_old_level() {
        let mut q = FeedbackQueueSet::new(10);
        q.admit(DishId(0), 5);
        q.admit(DishId(1), 4);
        assert_eq!(q.relocate(DishId(0), 4), 5);
        assert_eq!(q.level_entries(4), vec![DishId(1), DishId(0)]);
        assert_eq!(q.level_of(DishId(0)), Some(4));
    }

    #[test]
    fn same_level_relocate_rotates_to_tail() {
        // The round-robin rotation at level 0: demotion floors at 0 and
        // re-appends the incumbent behind its peers.
        let mut q = FeedbackQueueSet::new(10);
        q.admit(DishId(0), 0);
        q.admit(DishId(1), 0);
        q.relocate(DishId(0), 0);
        assert_eq!(q.level_entries(0), vec![DishId(1), DishId(0)]);
    }

    #[test]
    fn retire_removes_without_replacement() {
        let mut q = FeedbackQueueSet::new(10);
        q.admit(DishId(0), 3);
        q.retire(DishId(0));
        assert_eq!(q.level_of(DishId(0)), None);
        assert_eq!(q.select_runnable(|_| true), None);
    }

    #[test]
    #[should_panic(expected = "not in any queue level")]
    fn retiring_an_unqueued_dish_panics() {
        let mut q = FeedbackQueueSet::new(10);
        q.retire(DishId(7));
    }

    #[test]
    #[should_panic(expected = "already queued")]
    fn double_admit_panics() {
        let mut q = FeedbackQueueSet::new(10);
        q.admit(DishId(0), 1);
        q.admit(DishId(0), 2);
    }
}
