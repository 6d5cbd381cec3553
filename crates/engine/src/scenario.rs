//! Scenario loading
//!
//! A scenario is a complete JSON description of a run:
//! - trial parameters (with an optional horizon T that fixes the step count)
//! - price process, quoting policy and fill model
//! - batch size and execution mode
//! - an optional (σ, γ, κ) grid for sweeps
//!
//! Every field has a default, so `{}` is a valid scenario.

use crate::models::ModelSelection;
use crate::simulation::{BatchConfig, BatchEvaluator, ParameterGrid, ParameterSweep};
use mmsim_core::{SimError, SimResult, TrialConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// What a scenario produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// One trial with its full step log
    Trial,
    /// One batch summary
    #[default]
    Batch,
    /// One batch summary per grid point
    Sweep,
}

impl std::str::FromStr for RunMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trial" => Ok(RunMode::Trial),
            "batch" => Ok(RunMode::Batch),
            "sweep" => Ok(RunMode::Sweep),
            other => Err(ConfigError::Parse(format!(
                "unknown mode '{other}' (expected trial, batch or sweep)"
            ))),
        }
    }
}

/// Root description of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_scenario_name")]
    pub name: String,

    #[serde(default)]
    pub mode: RunMode,

    #[serde(default)]
    pub trial: TrialConfig,

    /// Horizon T; when set, replaces `trial.steps` with T / dt
    #[serde(default)]
    pub horizon: Option<f64>,

    #[serde(default)]
    pub models: ModelSelection,

    #[serde(default)]
    pub batch: BatchConfig,

    /// Grid for sweep mode; the default grid is used when absent
    #[serde(default)]
    pub sweep: Option<ParameterGrid>,
}

fn default_scenario_name() -> String {
    "market-making".to_string()
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: default_scenario_name(),
            mode: RunMode::default(),
            trial: TrialConfig::default(),
            horizon: None,
            models: ModelSelection::default(),
            batch: BatchConfig::default(),
            sweep: None,
        }
    }
}

impl Scenario {
    /// Load a scenario from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse a scenario from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let scenario: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Trial config with the horizon applied
    pub fn trial_config(&self) -> SimResult<TrialConfig> {
        match self.horizon {
            Some(horizon) => self.trial.clone().with_horizon(horizon, self.trial.dt),
            None => Ok(self.trial.clone()),
        }
    }

    /// Grid for sweep mode
    pub fn grid(&self) -> ParameterGrid {
        self.sweep.clone().unwrap_or_default()
    }

    /// Check the trial parameters and build every model once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let config = self.trial_config()?;
        config.validate()?;
        self.models.build(&config)?;
        if self.batch.trials == 0 {
            return Err(SimError::invalid("batch needs at least one trial").into());
        }
        Ok(())
    }

    pub fn batch_evaluator(&self) -> SimResult<BatchEvaluator> {
        BatchEvaluator::new(self.trial_config()?, self.models, self.batch)
    }

    pub fn parameter_sweep(&self) -> SimResult<ParameterSweep> {
        ParameterSweep::new(self.trial_config()?, self.models, self.batch, &self.grid())
    }
}

/// Scenario loading errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error(transparent)]
    Invalid(#[from] SimError),
}
