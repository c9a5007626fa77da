//! Run trace: one snapshot per tick plus end-of-run summaries.
//!
//! The engine records a [`TickSnapshot`] at the end of every tick and a
//! [`DishSummary`] per dish when the run ends. The trace owns the name
//! table, so snapshots can stay id-based while queries and the text
//! rendering speak in dish names.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::dish::DishState;
use crate::types::{DishId, Tick};

/// A notable event within a tick, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remark {
    Arrived(DishId),
    CleaningStove,
    PreheatingStove,
    Completed(DishId),
}

/// Everything observable about one tick, captured after stepping.
#[derive(Debug, Clone)]
pub struct TickSnapshot {
    pub time: Tick,
    pub occupant: Option<DishId>,
    /// Queued dishes waiting for the stove, in queue-scan order, with
    /// their rendering at snapshot time.
    pub ready: Vec<(DishId, String)>,
    /// Dishes at a prep station or in transit to one.
    pub prepping: Vec<(DishId, String)>,
    pub remarks: Vec<Remark>,
}

/// Per-dish figures at the end of the run.
#[derive(Debug, Clone)]
pub struct DishSummary {
    pub name: String,
    /// Priority at completion, after any promotions and demotions.
    pub priority: u8,
    pub wait_time: u64,
    pub state: DishState,
}

/// The full record of a run.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    snapshots: Vec<TickSnapshot>,
    names: Vec<String>,
    dishes: Vec<DishSummary>,
    total_time: Tick,
    utilization: u64,
}

impl Trace {
    pub(crate) fn new(names: Vec<String>) -> Self {
        Trace {
            names,
            ..Default::default()
        }
    }

    pub(crate) fn record(&mut self, snapshot: TickSnapshot) {
        if let Some(last) = self.snapshots.last() {
            assert!(
                snapshot.time == last.time + 1,
                "trace tick {} does not follow {}",
                snapshot.time,
                last.time
            );
        }
        self.snapshots.push(snapshot);
    }

    pub(crate) fn finish(&mut self, dishes: Vec<DishSummary>, total_time: Tick, utilization: u64) {
        self.dishes = dishes;
        self.total_time = total_time;
        self.utilization = utilization;
    }

    pub fn dish_name(&self, id: DishId) -> &str {
        self.names.get(id.index()).map_or("???", String::as_str)
    }

    pub fn snapshots(&self) -> &[TickSnapshot] {
        &self.snapshots
    }

    pub fn dishes(&self) -> &[DishSummary] {
        &self.dishes
    }

    /// Ticks from the first tick through the one where the last dish was
    /// reported done.
    pub fn total_time(&self) -> Tick {
        self.total_time
    }

    /// Ticks the stove spent cooking.
    pub fn utilization(&self) -> u64 {
        self.utilization
    }

    /// Name of the stove occupant at `time`, if any.
    pub fn occupant_at(&self, time: Tick) -> Option<&str> {
        self.snapshots
            .iter()
            .find(|s| s.time == time)
            .and_then(|s| s.occupant)
            .map(|id| self.dish_name(id))
    }

    /// The tick whose remarks reported `name` done.
    pub fn done_tick(&self, name: &str) -> Option<Tick> {
        self.snapshots.iter().find_map(|s| {
            s.remarks
                .iter()
                .any(|&r| matches!(r, Remark::Completed(id) if self.dish_name(id) == name))
                .then_some(s.time)
        })
    }

    /// Every tick `name` held the stove, in order.
    pub fn occupancy(&self, name: &str) -> Vec<Tick> {
        self.snapshots
            .iter()
            .filter(|s| {
                s.occupant
                    .is_some_and(|id| self.dish_name(id) == name)
            })
            .map(|s| s.time)
            .collect()
    }

    /// Recorded wait time of `name`.
    ///
    /// # Panics
    /// Panics if no dish with that name was simulated.
    pub fn wait_of(&self, name: &str) -> u64 {
        self.dishes
            .iter()
            .find(|d| d.name == name)
            .unwrap_or_else(|| panic!("no dish named {name:?} in this trace"))
            .wait_time
    }

    pub fn render_remark(&self, remark: Remark) -> String {
        match remark {
            Remark::Arrived(id) => format!("{} arrives", self.dish_name(id)),
            Remark::CleaningStove => "Cleaning the stove".to_owned(),
            Remark::PreheatingStove => "Preheating the stove".to_owned(),
            Remark::Completed(id) => format!("{} is done", self.dish_name(id)),
        }
    }

    /// Render the tick-by-tick trace as text.
    pub fn write_text(&self, out: &mut impl Write) -> io::Result<()> {
        for snapshot in &self.snapshots {
            let mut block = String::new();
            let _ = writeln!(block, "Time: {}", snapshot.time);
            let occupant = snapshot
                .occupant
                .map_or("(idle)", |id| self.dish_name(id));
            let _ = writeln!(block, "OnStove: {occupant}");
            let ready: Vec<&str> = snapshot.ready.iter().map(|(_, r)| r.as_str()).collect();
            let _ = writeln!(block, "Ready: {}", ready.join(" "));
            let prepping: Vec<&str> =
                snapshot.prepping.iter().map(|(_, r)| r.as_str()).collect();
            let _ = writeln!(block, "Prepping: {}", prepping.join(" "));
            if !snapshot.remarks.is_empty() {
                let remarks: Vec<String> = snapshot
                    .remarks
                    .iter()
                    .map(|&r| self.render_remark(r))
                    .collect();
                let _ = writeln!(block, "Remarks: {}", remarks.join("; "));
            }
            writeln!(out, "{block}")?;
        }
        Ok(())
    }

    /// Dump the text trace to stdout.
    pub fn dump(&self) {
        let stdout = io::stdout();
        let _ = self.write_text(&mut stdout.lock());
    }
}
