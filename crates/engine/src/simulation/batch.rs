//! Batch Evaluator
//!
//! Runs independent trials at one parameter point and reduces their terminal
//! metrics. Trial k uses seed `base + k`; each trial owns its random
//! sources, so the summary is identical whether trials run in parallel or
//! one after another.

use super::TrialRunner;
use crate::fill::check_discretization;
use crate::models::{ModelSelection, ModelSet};
use log::{debug, info, warn};
use mmsim_core::{
    BatchSummary, Seed, SimError, SimResult, TrialConfig, TrialFailure, TrialMetrics, TrialResult,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// How a batch is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Trials per parameter point
    pub trials: usize,
    /// Fan trials out over the rayon pool
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            trials: 1000,
            parallel: true,
        }
    }
}

impl BatchConfig {
    /// Set trial count (builder pattern)
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Run trials on the calling thread
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Monte-Carlo evaluation at a single parameter point
#[derive(Debug, Clone)]
pub struct BatchEvaluator {
    config: TrialConfig,
    models: ModelSet,
    batch: BatchConfig,
}

impl BatchEvaluator {
    /// Validate the config and build the models once for every trial
    pub fn new(
        config: TrialConfig,
        selection: ModelSelection,
        batch: BatchConfig,
    ) -> SimResult<Self> {
        let evaluator = Self::prepare(config, selection, batch)?;
        check_discretization(&evaluator.models.fill, evaluator.config.dt);
        Ok(evaluator)
    }

    /// Same as `new` without the discretization warning
    pub(crate) fn prepare(
        config: TrialConfig,
        selection: ModelSelection,
        batch: BatchConfig,
    ) -> SimResult<Self> {
        config.validate()?;
        let models = selection.build(&config)?;
        Ok(Self {
            config,
            models,
            batch,
        })
    }

    pub fn config(&self) -> &TrialConfig {
        &self.config
    }

    pub fn models(&self) -> &ModelSet {
        &self.models
    }

    pub fn batch(&self) -> &BatchConfig {
        &self.batch
    }

    /// Seed of trial `k`: base seed + k, wrapping
    pub fn trial_seed(&self, k: usize) -> Seed {
        self.config.seed.wrapping_add(k as Seed)
    }

    /// Run trial `k` alone, keeping its full step log
    pub fn run_trial(&self, k: usize) -> SimResult<TrialResult> {
        TrialRunner::from_models(&self.config, &self.models, self.trial_seed(k))?.run()
    }

    /// Run the configured number of trials
    pub fn run_configured(&self) -> SimResult<BatchSummary> {
        self.run(self.batch.trials)
    }

    /// Run `n_trials` trials and summarize them
    ///
    /// Failed trials are listed in the summary rather than failing the batch.
    pub fn run(&self, n_trials: usize) -> SimResult<BatchSummary> {
        if n_trials == 0 {
            return Err(SimError::invalid("batch needs at least one trial"));
        }

        info!(
            "Running {} trials at {} ({}, {}, {}){}",
            n_trials,
            self.config.parameters(),
            self.models.process_name(),
            self.models.policy_name(),
            self.models.fill_name(),
            if self.batch.parallel { "" } else { " sequentially" }
        );

        let outcomes: Vec<Result<TrialMetrics, TrialFailure>> = if self.batch.parallel {
            (0..n_trials)
                .into_par_iter()
                .map(|k| self.evaluate(k))
                .collect()
        } else {
            (0..n_trials).map(|k| self.evaluate(k)).collect()
        };

        let summary = BatchSummary::from_outcomes(self.config.parameters(), outcomes);

        if !summary.all_succeeded() {
            warn!(
                "{} of {} trials failed at {}",
                summary.trials_failed,
                n_trials,
                summary.parameters
            );
        }
        if summary.trials_with_clamping > 0 {
            warn!(
                "{} of {} trials clamped a fill probability at {}; reduce dt or the intensity",
                summary.trials_with_clamping, summary.trials_succeeded, summary.parameters
            );
        }
        info!(
            "Batch complete: mean pnl {:.4} ± {:.4}, std {:.4}, final inventory std {:.3}",
            summary.mean_pnl,
            summary.standard_error,
            summary.std_pnl,
            summary.std_final_inventory
        );

        Ok(summary)
    }

    fn evaluate(&self, k: usize) -> Result<TrialMetrics, TrialFailure> {
        let seed = self.trial_seed(k);
        match self.run_trial(k) {
            Ok(result) => Ok(result.metrics()),
            Err(e) => {
                debug!("trial {} (seed {}) failed: {}", k, seed, e);
                Err(TrialFailure {
                    seed,
                    reason: e.to_string(),
                })
            }
        }
    }
}
