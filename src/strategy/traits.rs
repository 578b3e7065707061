// src/strategy/traits.rs

use chrono::NaiveDate;
use std::fmt::Debug;

/// What a policy gets to see on a given day, after that day's demand and
/// arrivals have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderContext {
    pub date: NaiveDate,
    /// Stock on hand at the end of the day.
    pub stock_level: i64,
    /// Quantity ordered but arriving strictly after `date`.
    pub pending_quantity: u64,
    /// Date of the most recent order in this run, if any.
    pub last_order_date: Option<NaiveDate>,
}

impl OrderContext {
    /// On-hand plus in-transit stock.
    pub fn inventory_position(&self) -> i64 {
        self.stock_level
            .saturating_add(i64::try_from(self.pending_quantity).unwrap_or(i64::MAX))
    }
}

/// Decides whether to replenish on a given day.
///
/// Policies are immutable; anything that changes between days travels in
/// the [`OrderContext`], so one policy can drive many runs in parallel.
pub trait OrderPolicy: Debug + Send + Sync {
    /// Returns the quantity to order today, or `None` to hold.
    fn calculate_order(&self, context: &OrderContext) -> Option<u64>;
}
