// src/simulation/error.rs

use thiserror::Error;

/// Reasons a simulation run is refused. Nothing here aborts the process;
/// the caller can pick another SKU or fix the parameters and retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("unknown SKU '{0}': no inventory control record")]
    UnknownSku(String),

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl SimulationError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type SimulationResult<T> = Result<T, SimulationError>;
