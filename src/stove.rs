//! The single stove: the exclusive resource dishes compete for.
//!
//! The stove is modeled as an occupant slot plus a three-state hygiene
//! machine. Changing occupants walks `Dirty -> Transitioning -> Clean`,
//! one state per tick, which realizes the fixed two-tick changeover (one
//! cleaning tick, one preheating tick) between different dishes. The
//! stove starts cold (`Transitioning`), so the very first mount pays a
//! single preheating tick.

use crate::types::DishId;

/// Hygiene state of the burner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoveStatus {
    /// Used since the last cleaning; must be cleaned before a new dish.
    Dirty,
    /// Cleaned but not yet at temperature; one preheating tick to go.
    Transitioning,
    /// Ready to take a dish immediately.
    Clean,
}

#[derive(Debug)]
pub struct Stove {
    /// Dish currently mounted, if any.
    pub occupant: Option<DishId>,
    pub status: StoveStatus,
    /// Ticks spent with a dish mounted and cooking.
    pub utilization: u64,
}

impl Stove {
    pub fn new() -> Self {
        Stove {
            occupant: None,
            status: StoveStatus::Transitioning,
            utilization: 0,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.occupant.is_none()
    }
}

impl Default for Stove {
    fn default() -> Self {
        Stove::new()
    }
}
