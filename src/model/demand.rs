// src/model/demand.rs

use crate::model::records::SalesRecord;
use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;

/// Days per "month" used for demand rates.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Daily demand and average sales rates for one SKU, built from its
/// sales history.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandProfile {
    daily: BTreeMap<NaiveDate, u64>,
    total_quantity: u64,
    avg_monthly_sales: f64,
}

impl DemandProfile {
    /// Aggregates the records belonging to `sku_id`; records for other
    /// SKUs are ignored.
    pub fn from_records<'a, I>(sku_id: &str, records: I) -> Self
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        let mut daily: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for record in records.into_iter().filter(|r| r.sku_id == sku_id) {
            let units = daily.entry(record.order_date).or_insert(0);
            *units = units.saturating_add(record.quantity);
        }

        let total_quantity = daily.values().fold(0u64, |acc, q| acc.saturating_add(*q));

        // Elapsed months over the observed range; a single day (or no
        // history at all) has no rate.
        let span_days = match (daily.keys().next(), daily.keys().next_back()) {
            (Some(first), Some(last)) => (*last - *first).num_days(),
            _ => 0,
        };
        let total_months = span_days as f64 / DAYS_PER_MONTH;
        let avg_monthly_sales = if total_months > 0.0 {
            total_quantity as f64 / total_months
        } else {
            0.0
        };

        Self {
            daily,
            total_quantity,
            avg_monthly_sales,
        }
    }

    /// Units sold on exactly `date`, 0 when there were no sales.
    pub fn daily_demand(&self, date: NaiveDate) -> u64 {
        self.daily.get(&date).copied().unwrap_or(0)
    }

    pub fn avg_monthly_sales(&self) -> f64 {
        self.avg_monthly_sales
    }

    pub fn avg_daily_sales(&self) -> f64 {
        self.avg_monthly_sales / DAYS_PER_MONTH
    }

    pub fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.daily.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.daily.keys().next_back().copied()
    }

    /// Every calendar day from the first to the last sale, inclusive.
    /// Empty when there is no history.
    pub fn date_range(&self) -> Vec<NaiveDate> {
        match (self.first_date(), self.last_date()) {
            (Some(first), Some(last)) => first
                .iter_days()
                .take_while(|d| *d <= last)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// `date + days`, saturating at the calendar's upper bound.
pub(crate) fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}
