// src/strategy/optimization.rs

//! Reorder-point parameters derived once per run from the demand rate and
//! the SKU's lead time.

use crate::model::demand::DemandProfile;
use crate::model::records::SkuControl;
use crate::simulation::config::{check_non_negative, SimulationConfig};
use crate::simulation::error::{SimulationError, SimulationResult};
use serde::Serialize;

/// Expected consumption during one lead-time window.
///
/// Formula: SafetyStock = AvgDailySales * LeadTime
pub fn safety_stock(avg_daily_sales: f64, lead_time_days: f64) -> f64 {
    avg_daily_sales * lead_time_days
}

/// The reorder trigger: safety stock plus a ratio on top.
///
/// Formula: WarningLevel = SafetyStock * (1 + WarningStockRatio)
pub fn warning_level(safety_stock: f64, warning_stock_ratio: f64) -> f64 {
    safety_stock * (1.0 + warning_stock_ratio)
}

/// Fixed order size, truncated to whole units.
///
/// Formula: ReorderQuantity = floor(AvgMonthlySales * ReorderMonths)
pub fn reorder_quantity(avg_monthly_sales: f64, reorder_months: f64) -> u64 {
    let raw = (avg_monthly_sales * reorder_months).floor();
    if raw <= 0.0 {
        0
    } else {
        raw as u64
    }
}

/// Calendar offset between order and delivery. Dates are whole days, so
/// a fractional lead time is rounded up.
pub fn delivery_offset_days(lead_time_days: f64) -> u64 {
    lead_time_days.ceil().max(0.0) as u64
}

/// Everything the run needs that does not change from day to day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReorderParameters {
    pub lead_time_days: f64,
    pub delivery_offset_days: u64,
    pub avg_monthly_sales: f64,
    pub avg_daily_sales: f64,
    pub safety_stock: f64,
    pub warning_level: f64,
    pub reorder_quantity: u64,
}

impl ReorderParameters {
    /// Computes the run constants.
    ///
    /// # Errors
    /// `InvalidParameter` when the selected lead time is absent, negative
    /// or not finite. A missing lead time is never treated as zero.
    pub fn derive(
        demand: &DemandProfile,
        control: &SkuControl,
        config: &SimulationConfig,
    ) -> SimulationResult<Self> {
        let lead_time_days = control.lead_time(config.lead_time_type).ok_or_else(|| {
            SimulationError::invalid(
                "lead_time",
                format!(
                    "SKU '{}' has no {} on record",
                    control.sku_id,
                    config.lead_time_type.label()
                ),
            )
        })?;
        check_non_negative("lead_time", lead_time_days)?;

        let avg_monthly_sales = demand.avg_monthly_sales();
        let avg_daily_sales = demand.avg_daily_sales();
        let safety = safety_stock(avg_daily_sales, lead_time_days);

        Ok(Self {
            lead_time_days,
            delivery_offset_days: delivery_offset_days(lead_time_days),
            avg_monthly_sales,
            avg_daily_sales,
            safety_stock: safety,
            warning_level: warning_level(safety, config.warning_stock_ratio),
            reorder_quantity: reorder_quantity(avg_monthly_sales, config.reorder_months),
        })
    }
}
