// src/model/events.rs

use chrono::NaiveDate;
use serde::Serialize;

/// Committed stock for one calendar day of the run.
///
/// `stock_level` is what `inventory-flow` reports; the other fields say how
/// the day got there (`stock_level = previous - demand + received`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyState {
    pub date: NaiveDate,
    pub stock_level: i64,
    pub demand: u64,
    pub received: u64,
    /// Quantity still in transit after this day.
    pub on_order: u64,
}

/// A replenishment order placed when stock hit the warning level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderEvent {
    pub date: NaiveDate,
    pub quantity: u64,
}

/// The arrival paired with an [`OrderEvent`], one lead time later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeliveryEvent {
    pub date: NaiveDate,
    pub quantity: u64,
}
