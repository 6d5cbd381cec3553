//! Parameter Sweep
//!
//! Evaluates a batch at every (σ, γ, κ) point of a grid. Points are visited
//! in σ-major, then γ, then κ order, and every point is validated before the
//! first trial runs.

use super::{BatchConfig, BatchEvaluator};
use crate::fill::check_discretization;
use crate::models::ModelSelection;
use log::info;
use mmsim_core::{BatchSummary, ParameterPoint, SimError, SimResult, TrialConfig};
use serde::{Deserialize, Serialize};

/// Cartesian grid of model parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterGrid {
    pub sigmas: Vec<f64>,
    pub gammas: Vec<f64>,
    pub kappas: Vec<f64>,
}

impl Default for ParameterGrid {
    fn default() -> Self {
        Self {
            sigmas: vec![0.1, 0.2, 0.3],
            gammas: vec![0.05, 0.1, 0.5],
            kappas: vec![1.0, 1.5, 2.0],
        }
    }
}

impl ParameterGrid {
    pub fn new(sigmas: Vec<f64>, gammas: Vec<f64>, kappas: Vec<f64>) -> Self {
        Self {
            sigmas,
            gammas,
            kappas,
        }
    }

    /// Number of grid points
    pub fn len(&self) -> usize {
        self.sigmas.len() * self.gammas.len() * self.kappas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All points in (σ, γ, κ) order
    pub fn points(&self) -> Vec<ParameterPoint> {
        let mut points = Vec::with_capacity(self.len());
        for &sigma in &self.sigmas {
            for &gamma in &self.gammas {
                for &kappa in &self.kappas {
                    points.push(ParameterPoint {
                        sigma,
                        gamma,
                        kappa,
                    });
                }
            }
        }
        points
    }
}

/// Batches over every point of a parameter grid
#[derive(Debug, Clone)]
pub struct ParameterSweep {
    evaluators: Vec<BatchEvaluator>,
}

impl ParameterSweep {
    /// Validate every grid point against `base` and build its models
    pub fn new(
        base: TrialConfig,
        selection: ModelSelection,
        batch: BatchConfig,
        grid: &ParameterGrid,
    ) -> SimResult<Self> {
        if grid.is_empty() {
            return Err(SimError::invalid("parameter grid has no points"));
        }

        let evaluators = grid
            .points()
            .iter()
            .map(|point| BatchEvaluator::prepare(base.at_point(point), selection, batch))
            .collect::<SimResult<Vec<_>>>()?;

        // Fill intensity and dt do not vary across the grid
        if let Some(first) = evaluators.first() {
            check_discretization(&first.models().fill, first.config().dt);
        }

        Ok(Self { evaluators })
    }

    pub fn len(&self) -> usize {
        self.evaluators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluators.is_empty()
    }

    pub fn points(&self) -> Vec<ParameterPoint> {
        self.evaluators
            .iter()
            .map(|e| e.config().parameters())
            .collect()
    }

    /// Run `n_trials` trials at every point, one fresh summary per point
    pub fn run(&self, n_trials: usize) -> SimResult<Vec<BatchSummary>> {
        let total = self.evaluators.len();
        let mut summaries = Vec::with_capacity(total);

        for (i, evaluator) in self.evaluators.iter().enumerate() {
            info!(
                "sweep point {}/{}: {}",
                i + 1,
                total,
                evaluator.config().parameters()
            );
            summaries.push(evaluator.run(n_trials)?);
        }

        Ok(summaries)
    }

    /// Run the trial count from the batch config at every point
    pub fn run_configured(&self) -> SimResult<Vec<BatchSummary>> {
        let trials = self.evaluators.first().map_or(0, |e| e.batch().trials);
        self.run(trials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_order() {
        let grid = ParameterGrid::new(vec![1.0, 2.0], vec![0.1], vec![1.0, 1.5]);
        let points = grid.points();

        assert_eq!(grid.len(), 4);
        assert_eq!(
            points
                .iter()
                .map(|p| (p.sigma, p.kappa))
                .collect::<Vec<_>>(),
            vec![(1.0, 1.0), (1.0, 1.5), (2.0, 1.0), (2.0, 1.5)]
        );
    }

    #[test]
    fn test_default_grid() {
        assert_eq!(ParameterGrid::default().len(), 27);
    }

    #[test]
    fn test_sweep_rejects_bad_point_before_running() {
        let grid = ParameterGrid::new(vec![2.0], vec![0.1, 0.0], vec![1.5]);
        let err = ParameterSweep::new(
            TrialConfig::default(),
            ModelSelection::default(),
            BatchConfig::default(),
            &grid,
        )
        .unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn test_empty_grid() {
        let grid = ParameterGrid::new(vec![], vec![0.1], vec![1.5]);
        assert!(
            ParameterSweep::new(
                TrialConfig::default(),
                ModelSelection::default(),
                BatchConfig::default(),
                &grid
            )
            .is_err()
        );
    }

    #[test]
    fn test_one_summary_per_point() {
        let grid = ParameterGrid::new(vec![1.0, 2.0], vec![0.1], vec![1.5]);
        let base = TrialConfig::from_horizon(0.25, 0.005).unwrap();
        let sweep = ParameterSweep::new(
            base,
            ModelSelection::default(),
            BatchConfig::default().sequential(),
            &grid,
        )
        .unwrap();

        let summaries = sweep.run(8).unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].parameters, grid.points()[0]);
        assert_eq!(summaries[1].parameters.sigma, 2.0);
        assert!(summaries.iter().all(|s| s.trials_requested == 8));
    }
}
