//! End-of-run performance report derived from a [`Trace`].

use std::fmt;

use crate::trace::Trace;

/// Aggregate performance figures for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PerfReport {
    /// Ticks from the first tick through the last completion report.
    pub total_time: u64,
    /// Ticks the stove spent cooking.
    pub utilization: u64,
    /// Ticks the stove sat without an occupant.
    pub idle_time: u64,
    /// Priority-weighted mean wait: sum(priority * wait) / sum(priority),
    /// using each dish's priority at completion.
    pub weighted_wait: f64,
}

impl PerfReport {
    pub fn from_trace(trace: &Trace) -> Self {
        let total_time = trace.total_time();
        let utilization = trace.utilization();
        let weight: u64 = trace.dishes().iter().map(|d| u64::from(d.priority)).sum();
        let weighted_sum: u64 = trace
            .dishes()
            .iter()
            .map(|d| u64::from(d.priority) * d.wait_time)
            .sum();
        let weighted_wait = if weight == 0 {
            0.0
        } else {
            weighted_sum as f64 / weight as f64
        };
        PerfReport {
            total_time,
            utilization,
            idle_time: total_time.saturating_sub(utilization),
            weighted_wait,
        }
    }
}

impl fmt::Display for PerfReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Performance report:")?;
        writeln!(f, "  total time        : {} ticks", self.total_time)?;
        writeln!(f, "  stove utilization : {} ticks", self.utilization)?;
        writeln!(f, "  stove idle        : {} ticks", self.idle_time)?;
        writeln!(f, "  weighted wait     : {:.2} ticks", self.weighted_wait)
    }
}
