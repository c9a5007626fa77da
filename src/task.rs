//! Recipe bursts: the unit of work a dish steps through.

use std::fmt;

/// The two burst types a recipe step can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Off-stove preparation (chopping, marinating, plating).
    Prep,
    /// On-stove work; requires exclusive use of the stove.
    Cook,
}

impl TaskKind {
    /// Label used in trace renderings.
    pub fn label(self) -> &'static str {
        match self {
            TaskKind::Prep => "Prep",
            TaskKind::Cook => "Cook",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One burst of work: a kind and the ticks of it still left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    pub kind: TaskKind,
    remaining: u32,
}

impl Task {
    pub fn new(kind: TaskKind, duration: u32) -> Self {
        Task {
            kind,
            remaining: duration,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_done(&self) -> bool {
        self.remaining == 0
    }

    /// Consume one tick of work.
    ///
    /// # Panics
    /// Panics if the burst is already finished. The control flow never
    /// steps a finished task; reaching this is a scheduling bug, not a
    /// recoverable condition.
    pub fn step(&mut self) {
        assert!(
            self.remaining > 0,
            "stepping a finished {} burst",
            self.kind
        );
        self.remaining -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_counts_down_to_done() {
        let mut task = Task::new(TaskKind::Cook, 2);
        assert!(!task.is_done());
        task.step();
        assert_eq!(task.remaining(), 1);
        task.step();
        assert!(task.is_done());
    }

    #[test]
    #[should_panic(expected = "stepping a finished")]
    fn double_stepping_a_finished_burst_panics() {
        let mut task = Task::new(TaskKind::Prep, 1);
        task.step();
        task.step();
    }

    #[test]
    fn zero_duration_burst_is_born_done() {
        let task = Task::new(TaskKind::Cook, 0);
        assert!(task.is_done());
    }
}
