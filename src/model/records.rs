// src/model/records.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One line of the sales table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub sku_id: String,
    pub order_date: NaiveDate,
    pub quantity: u64,
}

impl SalesRecord {
    pub fn new(sku_id: impl Into<String>, order_date: NaiveDate, quantity: u64) -> Self {
        Self {
            sku_id: sku_id.into(),
            order_date,
            quantity,
        }
    }
}

/// Replenishment parameters for a single SKU.
///
/// Lead times that could not be read from the source are kept as `None`
/// so the simulation can refuse them instead of running with no buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuControl {
    pub sku_id: String,
    pub average_lead_time_days: Option<f64>,
    pub maximum_lead_time_days: Option<f64>,
}

impl SkuControl {
    pub fn new(sku_id: impl Into<String>, average: f64, maximum: f64) -> Self {
        Self {
            sku_id: sku_id.into(),
            average_lead_time_days: Some(average),
            maximum_lead_time_days: Some(maximum),
        }
    }

    /// The lead time selected by `kind`, if the source had one.
    pub fn lead_time(&self, kind: LeadTimeType) -> Option<f64> {
        match kind {
            LeadTimeType::Average => self.average_lead_time_days,
            LeadTimeType::Maximum => self.maximum_lead_time_days,
        }
    }
}

/// Descriptive metadata, used for listings and report headers only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuItem {
    pub sku_id: String,
    pub name: String,
}

/// Which lead time column drives the reorder point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LeadTimeType {
    #[default]
    Average,
    Maximum,
}

impl LeadTimeType {
    pub fn label(&self) -> &'static str {
        match self {
            LeadTimeType::Average => "average lead time",
            LeadTimeType::Maximum => "maximum lead time",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_time_selects_the_requested_column() {
        let control = SkuControl::new("SKU-1", 5.0, 9.5);
        assert_eq!(control.lead_time(LeadTimeType::Average), Some(5.0));
        assert_eq!(control.lead_time(LeadTimeType::Maximum), Some(9.5));
    }

    #[test]
    fn missing_lead_time_stays_absent() {
        let control = SkuControl {
            sku_id: "SKU-1".to_string(),
            average_lead_time_days: None,
            maximum_lead_time_days: Some(3.0),
        };
        assert_eq!(control.lead_time(LeadTimeType::Average), None);
    }

    #[test]
    fn average_is_the_default_lead_time() {
        assert_eq!(LeadTimeType::default(), LeadTimeType::Average);
        assert_eq!(LeadTimeType::Maximum.label(), "maximum lead time");
    }
}
