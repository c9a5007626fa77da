//! Dish model: the scenario-level definition and the runtime record.

use crate::task::{Task, TaskKind};
use crate::types::Tick;

/// Lowest priority a dish may carry.
pub const PRIORITY_MIN: u8 = 1;
/// Highest priority a dish may carry.
pub const PRIORITY_MAX: u8 = 10;

/// The lifecycle state of a dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DishState {
    /// Arrival time not yet reached.
    NotArrived,
    /// Queued with a Cook burst up next, waiting for the stove.
    Ready,
    /// Working through a Prep burst off-stove.
    Prepping,
    /// Occupying the stove this tick.
    OnStove,
    /// Coming off the stove, in transit to a prep station. Costs one tick.
    Moving,
    /// Every burst consumed. Terminal.
    Done,
}

/// Definition of a dish for scenario creation.
#[derive(Debug, Clone)]
pub struct DishDef {
    /// Unique name; also names the dish's recipe file when loaded from disk.
    pub name: String,
    /// First tick the dish can be scheduled. Must be positive.
    pub arrival_time: Tick,
    /// Advisory priority in `[1,10]`; mutated by promotion/demotion later.
    pub priority: u8,
    /// Ordered bursts to work through.
    pub recipe: Vec<Task>,
}

/// A dish at runtime.
#[derive(Debug, Clone)]
pub struct Dish {
    pub name: String,
    pub arrival_time: Tick,
    priority: u8,
    /// Ticks spent queued in `Ready` without the stove.
    pub wait_time: u64,
    pub state: DishState,
    recipe: Vec<Task>,
}

impl Dish {
    pub fn new(def: &DishDef) -> Self {
        Dish {
            name: def.name.clone(),
            arrival_time: def.arrival_time,
            priority: def.priority.clamp(PRIORITY_MIN, PRIORITY_MAX),
            wait_time: 0,
            state: DishState::NotArrived,
            recipe: def.recipe.clone(),
        }
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }

    /// Set the priority, clamped into `[1,10]`.
    pub fn set_priority(&mut self, priority: u8) {
        self.priority = priority.clamp(PRIORITY_MIN, PRIORITY_MAX);
    }

    /// The first burst in recipe order with work remaining. This is the
    /// authoritative "what is this dish doing now" query.
    pub fn next_pending_task(&self) -> Option<&Task> {
        self.recipe.iter().find(|t| !t.is_done())
    }

    pub fn has_pending(&self) -> bool {
        self.next_pending_task().is_some()
    }

    /// Step the first pending burst one unit. Returns the kind stepped and
    /// whether that burst just finished.
    ///
    /// # Panics
    /// Panics if the recipe is exhausted; only the stepping phase calls
    /// this, and it checks for pending work first.
    pub fn step_pending(&mut self) -> (TaskKind, bool) {
        let idx = self
            .recipe
            .iter()
            .position(|t| !t.is_done())
            .unwrap_or_else(|| panic!("stepping dish {:?} with an exhausted recipe", self.name));
        let task = &mut self.recipe[idx];
        let kind = task.kind;
        task.step();
        (kind, task.is_done())
    }

    /// One tick spent queued without the stove.
    pub fn record_wait(&mut self) {
        self.wait_time += 1;
    }

    /// Trace rendering: `name(Cook - 3)`, `name(Prep - 1)`, or `name(Done)`
    /// once no burst is pending.
    pub fn rendering(&self) -> String {
        match self.next_pending_task() {
            Some(task) => format!("{}({} - {})", self.name, task.kind.label(), task.remaining()),
            None => format!("{}(Done)", self.name),
        }
    }
}
