//! The scheduler engine: drives the simulation one tick at a time.
//!
//! A tick runs in a fixed order: advance time, admit arrivals, decide who
//! holds the stove, advance the stove's hygiene machine, step every active
//! dish, then snapshot the tick into the trace. Arrivals always land
//! before dispatch, and dispatch before stepping, so a dish arriving at
//! tick `t` can be selected at tick `t` but never cooks before the stove
//! has preheated for it.
//!
//! Dispatch is two nested decisions. First the keep-running test: an
//! occupant that still wants the stove (state `Ready`) keeps it
//! unconditionally, so a cook burst is never preempted mid-flight.
//! Otherwise the occupant is unmounted (demoted one level if it still has
//! work, left untouched if its recipe is exhausted) and the queues are
//! scanned from the highest level down for the first runnable dish.

use tracing::debug;

use crate::dish::{Dish, DishState};
use crate::queue::FeedbackQueueSet;
use crate::scenario::{SchedPolicy, Scenario};
use crate::stove::{Stove, StoveStatus};
use crate::task::TaskKind;
use crate::trace::{DishSummary, Remark, TickSnapshot, Trace};
use crate::types::{DishId, Tick};

pub struct Scheduler {
    time: Tick,
    dishes: Vec<Dish>,
    queues: FeedbackQueueSet,
    stove: Stove,
    policy: SchedPolicy,
    /// Ticks left of the current occupant's quantum. Bookkeeping only:
    /// expiry is logged but never forces a reschedule, since a dish only
    /// leaves the stove at a burst boundary.
    quantum: u32,
    remaining: usize,
    trace: Trace,
}

impl Scheduler {
    pub fn new(scenario: Scenario) -> Self {
        scenario.policy.validate();
        let dishes: Vec<Dish> = scenario.dishes.iter().map(Dish::new).collect();
        let names = dishes.iter().map(|d| d.name.clone()).collect();
        let remaining = dishes.len();
        Scheduler {
            time: 0,
            dishes,
            queues: FeedbackQueueSet::new(scenario.policy.levels),
            stove: Stove::new(),
            policy: scenario.policy,
            quantum: 0,
            remaining,
            trace: Trace::new(names),
        }
    }

    pub fn time(&self) -> Tick {
        self.time
    }

    /// Dishes not yet done.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Run until every dish is done, consuming the scheduler.
    pub fn run(mut self) -> Trace {
        while self.remaining > 0 {
            self.proceed();
        }
        let summaries = self
            .dishes
            .iter()
            .map(|d| DishSummary {
                name: d.name.clone(),
                priority: d.priority(),
                wait_time: d.wait_time,
                state: d.state,
            })
            .collect();
        let (time, utilization) = (self.time, self.stove.utilization);
        self.trace.finish(summaries, time, utilization);
        self.trace
    }

    /// Advance the simulation one tick. Returns the number of dishes
    /// still unfinished.
    pub fn proceed(&mut self) -> usize {
        self.time += 1;
        self.quantum = self.quantum.saturating_sub(1);
        let mut remarks = Vec::new();

        self.admit_arrivals(&mut remarks);

        // Keep-running test, then dispatch. An occupant that went Moving
        // or exhausted its recipe last tick fails the test and is
        // unmounted inside schedule().
        let keep = self
            .stove
            .occupant
            .is_some_and(|id| self.dishes[id.index()].state == DishState::Ready);
        let selected = if keep {
            if self.quantum == 0 {
                debug!(time = self.time, "quantum expired, occupant keeps the stove");
            }
            self.stove.occupant
        } else {
            self.schedule()
        };

        self.transition_stove(selected, &mut remarks);

        if let Some(id) = self.stove.occupant {
            self.dishes[id.index()].state = DishState::OnStove;
            self.stove.utilization += 1;
        }

        self.step_dishes(&mut remarks);
        self.snapshot(remarks);
        self.remaining
    }

    fn admit_arrivals(&mut self, remarks: &mut Vec<Remark>) {
        for idx in 0..self.dishes.len() {
            let dish = &self.dishes[idx];
            if dish.state != DishState::NotArrived || dish.arrival_time != self.time {
                continue;
            }
            let id = DishId(idx as u32);
            let level = usize::from(self.dishes[idx].priority()) - 1;
            self.queues.admit(id, level);
            // A leading Cook burst queues for the stove right away; a
            // leading Prep burst starts at a prep station instead.
            self.dishes[idx].state = match self.dishes[idx].next_pending_task().map(|t| t.kind) {
                Some(TaskKind::Prep) => DishState::Prepping,
                _ => DishState::Ready,
            };
            debug!(
                time = self.time,
                dish = %self.dishes[idx].name,
                level,
                "arrived"
            );
            remarks.push(Remark::Arrived(id));
        }
    }

    /// Unmount the incumbent, demoting it if it still has work, then scan
    /// for the next dish that wants the stove.
    fn schedule(&mut self) -> Option<DishId> {
        if let Some(prev) = self.stove.occupant.take() {
            if self.dishes[prev.index()].has_pending() {
                let old_level = self
                    .queues
                    .level_of(prev)
                    .unwrap_or_else(|| panic!("stove occupant {prev} missing from the queue set"));
                let new_level = old_level.saturating_sub(1);
                self.queues.relocate(prev, new_level);
                self.dishes[prev.index()].set_priority(new_level as u8 + 1);
                debug!(
                    time = self.time,
                    dish = %self.dishes[prev.index()].name,
                    from = old_level,
                    to = new_level,
                    "demoted off the stove"
                );
            }
            // An exhausted incumbent keeps its level and priority; it is
            // retired in the stepping phase.
        }
        let picked = self
            .queues
            .select_runnable(|id| self.dishes[id.index()].state == DishState::Ready);
        if let Some((id, level)) = picked {
            self.quantum = self.policy.quantum_for_level(level);
            debug!(
                time = self.time,
                dish = %self.dishes[id.index()].name,
                level,
                quantum = self.quantum,
                "selected for the stove"
            );
        }
        picked.map(|(id, _)| id)
    }

    /// Advance the stove's hygiene machine toward mounting `selected`.
    /// A kept occupant short-circuits; with nobody waiting the stove sits
    /// in whatever state it is in.
    fn transition_stove(&mut self, selected: Option<DishId>, remarks: &mut Vec<Remark>) {
        let Some(next) = selected else { return };
        if self.stove.occupant == Some(next) {
            return;
        }
        debug_assert!(
            self.stove.is_idle(),
            "a displaced occupant must be unmounted before the stove transitions"
        );
        match self.stove.status {
            StoveStatus::Dirty => {
                self.stove.status = StoveStatus::Transitioning;
                remarks.push(Remark::CleaningStove);
            }
            StoveStatus::Transitioning => {
                self.stove.status = StoveStatus::Clean;
                remarks.push(Remark::PreheatingStove);
            }
            StoveStatus::Clean => {
                self.stove.occupant = Some(next);
                self.stove.status = StoveStatus::Dirty;
                debug!(
                    time = self.time,
                    dish = %self.dishes[next.index()].name,
                    "mounted"
                );
            }
        }
    }

    /// Step every active dish once, in arena order. Completion is
    /// detected before stepping, so a dish is reported done the tick
    /// after its last unit of work was consumed.
    fn step_dishes(&mut self, remarks: &mut Vec<Remark>) {
        for idx in 0..self.dishes.len() {
            let id = DishId(idx as u32);
            let state = self.dishes[idx].state;
            if matches!(state, DishState::NotArrived | DishState::Done) {
                continue;
            }
            if !self.dishes[idx].has_pending() {
                self.queues.retire(id);
                if self.stove.occupant == Some(id) {
                    self.stove.occupant = None;
                }
                self.dishes[idx].state = DishState::Done;
                self.remaining -= 1;
                debug!(time = self.time, dish = %self.dishes[idx].name, "done");
                remarks.push(Remark::Completed(id));
                continue;
            }
            match state {
                DishState::OnStove | DishState::Prepping => {
                    let (kind, finished) = self.dishes[idx].step_pending();
                    let next_kind = self.dishes[idx].next_pending_task().map(|t| t.kind);
                    self.dishes[idx].state = match (kind, next_kind) {
                        // More cook work, or another cook burst right
                        // behind: queue to keep the stove.
                        (TaskKind::Cook, Some(TaskKind::Cook)) => DishState::Ready,
                        // Leaving the stove for a prep station, or with
                        // nothing left at all: one tick in transit.
                        (TaskKind::Cook, Some(TaskKind::Prep)) | (TaskKind::Cook, None) => {
                            DishState::Moving
                        }
                        (TaskKind::Prep, Some(TaskKind::Cook)) => {
                            debug_assert!(finished);
                            self.promote(id);
                            DishState::Ready
                        }
                        (TaskKind::Prep, _) => DishState::Prepping,
                    };
                }
                DishState::Ready => {
                    // Queued without the stove for a whole tick, the
                    // changeover ticks included.
                    self.dishes[idx].record_wait();
                }
                DishState::Moving => {
                    // The transit tick itself does no work.
                    self.dishes[idx].state = DishState::Prepping;
                }
                DishState::NotArrived | DishState::Done => unreachable!(),
            }
        }
    }

    /// A prep burst finished with a cook burst up next: move one level up
    /// and mirror the level into the priority. At the top level this
    /// re-appends behind the dishes already queued there.
    fn promote(&mut self, id: DishId) {
        let old_level = self
            .queues
            .level_of(id)
            .unwrap_or_else(|| panic!("prepping dish {id} missing from the queue set"));
        let new_level = (old_level + 1).min(self.queues.nr_levels() - 1);
        self.queues.relocate(id, new_level);
        self.dishes[id.index()].set_priority(new_level as u8 + 1);
        debug!(
            time = self.time,
            dish = %self.dishes[id.index()].name,
            from = old_level,
            to = new_level,
            "promoted back to the stove queues"
        );
    }

    fn snapshot(&mut self, remarks: Vec<Remark>) {
        let ready = self
            .queues
            .iter_queue_order()
            .filter(|&id| {
                self.dishes[id.index()].state == DishState::Ready
                    && self.stove.occupant != Some(id)
            })
            .map(|id| (id, self.dishes[id.index()].rendering()))
            .collect();
        let prepping = self
            .dishes
            .iter()
            .enumerate()
            .filter(|(_, d)| matches!(d.state, DishState::Prepping | DishState::Moving))
            .map(|(idx, d)| (DishId(idx as u32), d.rendering()))
            .collect();
        self.trace.record(TickSnapshot {
            time: self.time,
            occupant: self.stove.occupant,
            ready,
            prepping,
            remarks,
        });
    }
}
