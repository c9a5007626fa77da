//! Deterministic discrete-event simulator of a kitchen run as a
//! preemptive multilevel-feedback scheduler.
//!
//! Dishes are the workload: each carries a recipe of alternating `Prep`
//! and `Cook` bursts. Cook bursts need the single stove, the exclusive
//! resource; prep bursts run off-stove in parallel with whatever is
//! cooking. Ten feedback-queue levels decide who gets the stove next,
//! with demotion on leaving the stove mid-recipe and promotion when a
//! prep burst finishes. Swapping one dish for another costs two idle
//! stove ticks, one cleaning and one preheating.
//!
//! Build a [`Scenario`], hand it to a [`Scheduler`], and run it to get a
//! [`Trace`] with a per-tick record plus end-of-run summaries:
//!
//! ```
//! use stovesim::{PerfReport, Scenario, Scheduler, TaskKind};
//!
//! let scenario = Scenario::builder()
//!     .add_dish("omelette", 1, 9, &[(TaskKind::Prep, 2), (TaskKind::Cook, 3)])
//!     .build();
//! let trace = Scheduler::new(scenario).run();
//!
//! assert_eq!(trace.utilization(), 3);
//! assert_eq!(trace.occupancy("omelette").len(), 3);
//! let report = PerfReport::from_trace(&trace);
//! assert_eq!(report.total_time, trace.total_time());
//! ```
//!
//! Everything is single-threaded and deterministic: the same scenario
//! always yields the same trace.

pub mod dish;
pub mod engine;
pub mod loader;
pub mod queue;
pub mod report;
pub mod scenario;
pub mod stove;
pub mod task;
pub mod trace;
pub mod types;

pub use dish::{Dish, DishDef, DishState, PRIORITY_MAX, PRIORITY_MIN};
pub use engine::Scheduler;
pub use loader::{load_menu, LoadError};
pub use queue::FeedbackQueueSet;
pub use report::PerfReport;
pub use scenario::{SchedPolicy, Scenario, ScenarioBuilder};
pub use stove::{Stove, StoveStatus};
pub use task::{Task, TaskKind};
pub use trace::{DishSummary, Remark, TickSnapshot, Trace};
pub use types::{DishId, QueueLevel, Tick};
