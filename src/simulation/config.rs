// src/simulation/config.rs

use crate::model::records::LeadTimeType;
use crate::simulation::error::{SimulationError, SimulationResult};
use serde::{Deserialize, Serialize};

/// Parameters of one reorder-point run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Stock on hand before the first day of history.
    pub initial_stock: i64,
    pub lead_time_type: LeadTimeType,
    /// Extra fraction on top of expected lead-time consumption.
    pub warning_stock_ratio: f64,
    /// Order size in months of average sales.
    pub reorder_months: f64,
    pub min_order_interval_days: i64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_stock: 500,
            lead_time_type: LeadTimeType::Average,
            warning_stock_ratio: 0.2,
            reorder_months: 3.0,
            min_order_interval_days: 7,
        }
    }
}

impl SimulationConfig {
    /// Rejects negative or non-finite parameters. The engine relies on this
    /// and does not re-check inside the loop.
    pub fn validate(&self) -> SimulationResult<()> {
        if self.initial_stock < 0 {
            return Err(SimulationError::invalid(
                "initial_stock",
                format!("must be >= 0, got {}", self.initial_stock),
            ));
        }
        check_non_negative("warning_stock_ratio", self.warning_stock_ratio)?;
        check_non_negative("reorder_months", self.reorder_months)?;
        if self.min_order_interval_days < 0 {
            return Err(SimulationError::invalid(
                "min_order_interval_days",
                format!("must be >= 0, got {}", self.min_order_interval_days),
            ));
        }
        Ok(())
    }
}

pub(crate) fn check_non_negative(name: &'static str, value: f64) -> SimulationResult<()> {
    if !value.is_finite() {
        return Err(SimulationError::invalid(name, format!("must be finite, got {}", value)));
    }
    if value < 0.0 {
        return Err(SimulationError::invalid(name, format!("must be >= 0, got {}", value)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_surface() {
        let config = SimulationConfig::default();
        assert_eq!(config.initial_stock, 500);
        assert_eq!(config.lead_time_type, LeadTimeType::Average);
        assert_eq!(config.warning_stock_ratio, 0.2);
        assert_eq!(config.reorder_months, 3.0);
        assert_eq!(config.min_order_interval_days, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn negative_values_are_rejected() {
        let cases = [
            SimulationConfig { initial_stock: -1, ..Default::default() },
            SimulationConfig { warning_stock_ratio: -0.1, ..Default::default() },
            SimulationConfig { reorder_months: -2.0, ..Default::default() },
            SimulationConfig { min_order_interval_days: -7, ..Default::default() },
        ];
        for config in cases {
            assert!(matches!(
                config.validate(),
                Err(SimulationError::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn nan_ratio_is_rejected() {
        let config = SimulationConfig {
            warning_stock_ratio: f64::NAN,
            ..Default::default()
        };
        match config.validate() {
            Err(SimulationError::InvalidParameter { name, .. }) => {
                assert_eq!(name, "warning_stock_ratio")
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn zero_everything_is_allowed() {
        let config = SimulationConfig {
            initial_stock: 0,
            lead_time_type: LeadTimeType::Maximum,
            warning_stock_ratio: 0.0,
            reorder_months: 0.0,
            min_order_interval_days: 0,
        };
        assert!(config.validate().is_ok());
    }
}
