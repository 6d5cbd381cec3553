use crate::entities::Side;
use thiserror::Error;

/// Errors raised by the simulation core
///
/// Invalid configuration is always raised before the first step runs.
/// The remaining variants abort an in-progress trial and are counted
/// separately by batch runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Numerical instability at step {step}: {quantity} = {value}")]
    NumericalInstability {
        step: usize,
        quantity: &'static str,
        value: f64,
    },

    #[error("Fill probability out of range at step {step} ({side} side): {probability:.4} >= 1")]
    ProbabilityOutOfRange {
        step: usize,
        side: Side,
        probability: f64,
    },

    #[error("Trial incomplete: {completed} of {expected} steps ran")]
    IncompleteTrial { completed: usize, expected: usize },
}

impl SimError {
    pub fn invalid(message: impl Into<String>) -> Self {
        SimError::InvalidConfig(message.into())
    }

    /// True for errors that are raised before any simulation step
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, SimError::InvalidConfig(_))
    }

    /// True for errors that abort a running trial
    pub fn is_trial_failure(&self) -> bool {
        matches!(
            self,
            SimError::NumericalInstability { .. }
                | SimError::ProbabilityOutOfRange { .. }
                | SimError::IncompleteTrial { .. }
        )
    }
}

pub type SimResult<T> = std::result::Result<T, SimError>;
