// src/model/queues.rs

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

/// Deliveries that have been ordered but not yet received, keyed by
/// arrival date. Several deliveries landing on the same day are summed.
#[derive(Debug, Clone, Default)]
pub struct DeliverySchedule {
    arrivals: BTreeMap<NaiveDate, u64>,
}

impl DeliverySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step 1: Goods due on `date` arrive and leave the schedule.
    /// Call this after the day's demand has been applied.
    pub fn pop_arrival(&mut self, date: NaiveDate) -> u64 {
        self.arrivals.remove(&date).unwrap_or(0)
    }

    /// Step 2: A new delivery enters the pipeline.
    pub fn push_departure(&mut self, arrival: NaiveDate, quantity: u64) {
        *self.arrivals.entry(arrival).or_insert(0) += quantity;
    }

    /// Quantity due strictly after `date`. Anything arriving on `date`
    /// itself has already been received and is not counted.
    pub fn pending_after(&self, date: NaiveDate) -> u64 {
        self.arrivals
            .range((Excluded(date), Unbounded))
            .map(|(_, qty)| *qty)
            .sum()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn arrivals_on_the_same_day_are_summed() {
        let mut schedule = DeliverySchedule::new();
        schedule.push_departure(day(5), 100);
        schedule.push_departure(day(5), 40);
        assert_eq!(schedule.pending_after(day(4)), 140);
        assert_eq!(schedule.pop_arrival(day(5)), 140);
        assert_eq!(schedule.pop_arrival(day(5)), 0);
    }

    #[test]
    fn pending_excludes_the_day_itself() {
        let mut schedule = DeliverySchedule::new();
        schedule.push_departure(day(5), 100);
        schedule.push_departure(day(9), 30);

        assert_eq!(schedule.pending_after(day(4)), 130);
        assert_eq!(schedule.pending_after(day(5)), 30);
        assert_eq!(schedule.pending_after(day(9)), 0);
    }

    #[test]
    fn popping_a_quiet_day_returns_zero() {
        let mut schedule = DeliverySchedule::new();
        schedule.push_departure(day(9), 30);
        assert_eq!(schedule.pop_arrival(day(8)), 0);
        assert_eq!(schedule.pending_after(day(8)), 30);
    }
}
