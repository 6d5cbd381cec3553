//! Batch Summary
//!
//! Reduction of many independent trials at one parameter point.

use super::TrialMetrics;
use crate::config::ParameterPoint;
use crate::values::Seed;
use serde::{Deserialize, Serialize};

/// A trial that aborted instead of completing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialFailure {
    pub seed: Seed,
    pub reason: String,
}

/// Aggregate statistics over the successful trials of one batch
///
/// Built once per parameter point and never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub parameters: ParameterPoint,
    pub trials_requested: usize,
    pub trials_succeeded: usize,
    pub trials_failed: usize,
    pub mean_pnl: f64,
    /// Sample standard deviation (n − 1)
    pub std_pnl: f64,
    /// mean / std; None when std is zero or fewer than two trials succeeded
    pub sharpe: Option<f64>,
    /// std / √n
    pub standard_error: f64,
    pub mean_final_inventory: f64,
    pub std_final_inventory: f64,
    pub mean_spread: f64,
    /// Trials where at least one step clamped a fill probability
    pub trials_with_clamping: usize,
    pub failures: Vec<TrialFailure>,
}

impl BatchSummary {
    /// Reduce trial outcomes into a summary
    pub fn from_outcomes(
        parameters: ParameterPoint,
        outcomes: Vec<Result<TrialMetrics, TrialFailure>>,
    ) -> Self {
        let trials_requested = outcomes.len();
        let mut metrics = Vec::with_capacity(trials_requested);
        let mut failures = Vec::new();

        for outcome in outcomes {
            match outcome {
                Ok(m) => metrics.push(m),
                Err(f) => failures.push(f),
            }
        }

        let pnls: Vec<f64> = metrics.iter().map(|m| m.pnl).collect();
        let inventories: Vec<f64> = metrics.iter().map(|m| m.final_inventory as f64).collect();
        let spreads: Vec<f64> = metrics.iter().map(|m| m.mean_spread).collect();

        let mean_pnl = mean(&pnls);
        let std_pnl = sample_std(&pnls);
        let sharpe = if pnls.len() >= 2 && std_pnl > 0.0 {
            Some(mean_pnl / std_pnl)
        } else {
            None
        };
        let standard_error = if pnls.is_empty() {
            0.0
        } else {
            std_pnl / (pnls.len() as f64).sqrt()
        };

        Self {
            parameters,
            trials_requested,
            trials_succeeded: metrics.len(),
            trials_failed: failures.len(),
            mean_pnl,
            std_pnl,
            sharpe,
            standard_error,
            mean_final_inventory: mean(&inventories),
            std_final_inventory: sample_std(&inventories),
            mean_spread: mean(&spreads),
            trials_with_clamping: metrics.iter().filter(|m| m.clamped_steps > 0).count(),
            failures,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.trials_failed == 0
    }
}

/// Mean of a slice; 0 for an empty slice
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation; 0 for fewer than two values
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
