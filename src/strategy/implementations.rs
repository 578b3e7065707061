// src/strategy/implementations.rs

use crate::strategy::optimization::ReorderParameters;
use crate::strategy::traits::{OrderContext, OrderPolicy};

// =========================================================================
// Reorder Point Policy (fixed quantity, minimum spacing)
// =========================================================================

/// Orders a fixed quantity whenever the inventory position (on hand plus
/// in transit) falls to or below the warning level, but never twice
/// within `min_order_interval_days`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderPointPolicy {
    warning_level: f64,
    reorder_quantity: u64,
    min_order_interval_days: i64,
}

impl ReorderPointPolicy {
    pub fn new(warning_level: f64, reorder_quantity: u64, min_order_interval_days: i64) -> Self {
        Self {
            warning_level,
            reorder_quantity,
            min_order_interval_days,
        }
    }

    pub fn from_parameters(params: &ReorderParameters, min_order_interval_days: i64) -> Self {
        Self::new(
            params.warning_level,
            params.reorder_quantity,
            min_order_interval_days,
        )
    }

    /// Threshold test: position <= warning level.
    pub fn should_order(&self, context: &OrderContext) -> bool {
        (context.inventory_position() as f64) <= self.warning_level
    }

    /// Interval guard: true for the first order of a run, or once enough
    /// days have passed since the last one.
    pub fn interval_elapsed(&self, context: &OrderContext) -> bool {
        match context.last_order_date {
            None => true,
            Some(last) => (context.date - last).num_days() >= self.min_order_interval_days,
        }
    }
}

impl OrderPolicy for ReorderPointPolicy {
    fn calculate_order(&self, context: &OrderContext) -> Option<u64> {
        if self.should_order(context) && self.interval_elapsed(context) {
            Some(self.reorder_quantity)
        } else {
            None
        }
    }
}
