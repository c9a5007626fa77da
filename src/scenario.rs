//! Scenario construction: the dish set and scheduling policy a run starts
//! from.
//!
//! Scenarios are built through [`ScenarioBuilder`], which validates the
//! whole configuration at `build()` time so a malformed setup fails before
//! the first tick rather than mid-run.

use crate::dish::{DishDef, PRIORITY_MAX, PRIORITY_MIN};
use crate::task::{Task, TaskKind};
use crate::types::Tick;

/// Scheduling policy knobs. The defaults describe the standard kitchen:
/// ten feedback levels, a per-level quantum table, and a two-tick stove
/// changeover.
#[derive(Debug, Clone)]
pub struct SchedPolicy {
    /// Number of feedback-queue levels.
    pub levels: usize,
    /// Quantum granted at each level, indexed by level (0 = lowest).
    pub quantum_by_level: Vec<u32>,
    /// Idle ticks between two different stove occupants.
    pub changeover_ticks: u32,
}

impl SchedPolicy {
    pub fn quantum_for_level(&self, level: usize) -> u32 {
        self.quantum_by_level[level]
    }

    /// # Panics
    /// Panics if the quantum table does not cover every level, or if the
    /// changeover is not the two ticks the stove state machine realizes.
    pub fn validate(&self) {
        assert!(self.levels > 0, "policy needs at least one queue level");
        assert_eq!(
            self.quantum_by_level.len(),
            self.levels,
            "quantum table must cover every queue level"
        );
        assert!(
            self.quantum_by_level.iter().all(|&q| q > 0),
            "every quantum must be positive"
        );
        assert_eq!(
            self.changeover_ticks, 2,
            "the stove state machine realizes a fixed 2-tick changeover"
        );
    }
}

impl Default for SchedPolicy {
    fn default() -> Self {
        SchedPolicy {
            levels: 10,
            // Indexed by level, lowest first: the highest level gets the
            // shortest quantum, the lowest the longest.
            quantum_by_level: vec![14, 12, 11, 10, 8, 7, 6, 4, 3, 2],
            changeover_ticks: 2,
        }
    }
}

/// A validated simulation input: dishes plus policy.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub dishes: Vec<DishDef>,
    pub policy: SchedPolicy,
}

impl Scenario {
    pub fn builder() -> ScenarioBuilder {
        ScenarioBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct ScenarioBuilder {
    dishes: Vec<DishDef>,
    policy: Option<SchedPolicy>,
}

impl ScenarioBuilder {
    pub fn dish(mut self, def: DishDef) -> Self {
        self.dishes.push(def);
        self
    }

    /// Convenience for tests and demos: add a dish from its recipe as
    /// `(kind, duration)` pairs.
    pub fn add_dish(
        self,
        name: &str,
        arrival_time: Tick,
        priority: u8,
        recipe: &[(TaskKind, u32)],
    ) -> Self {
        self.dish(DishDef {
            name: name.to_owned(),
            arrival_time,
            priority,
            recipe: recipe
                .iter()
                .map(|&(kind, duration)| Task::new(kind, duration))
                .collect(),
        })
    }

    pub fn policy(mut self, policy: SchedPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// # Panics
    /// Panics on an empty dish set, a non-positive arrival time, a
    /// priority outside `[1,10]`, an empty recipe, or a duplicate name.
    pub fn build(self) -> Scenario {
        let policy = self.policy.unwrap_or_default();
        policy.validate();
        assert!(!self.dishes.is_empty(), "scenario needs at least one dish");
        for (i, def) in self.dishes.iter().enumerate() {
            assert!(
                def.arrival_time > 0,
                "dish {:?} must arrive at tick 1 or later",
                def.name
            );
            assert!(
                (PRIORITY_MIN..=PRIORITY_MAX).contains(&def.priority),
                "dish {:?} priority {} outside [{PRIORITY_MIN},{PRIORITY_MAX}]",
                def.name,
                def.priority
            );
            assert!(!def.recipe.is_empty(), "dish {:?} has no recipe", def.name);
            assert!(
                self.dishes[..i].iter().all(|d| d.name != def.name),
                "duplicate dish name {:?}",
                def.name
            );
        }
        Scenario {
            dishes: self.dishes,
            policy,
        }
    }
}
