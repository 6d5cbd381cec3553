//! Trial configuration
//!
//! Immutable parameter set shared read-only by every trial of a batch.

use crate::error::{SimError, SimResult};
use crate::values::{Cash, Inventory, Price, Seed};
use serde::{Deserialize, Serialize};

/// What to do when `λ·dt` reaches 1 on a step
///
/// The single-Bernoulli-trial fill is only a faithful discretization of the
/// Poisson arrival process while `λ·dt ≪ 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityPolicy {
    /// Clamp to [0, 1] and flag the step
    #[default]
    Clamp,
    /// Abort the trial
    Reject,
}

/// The (σ, γ, κ) tuple a batch summary is keyed by
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterPoint {
    pub sigma: f64,
    pub gamma: f64,
    pub kappa: f64,
}

impl std::fmt::Display for ParameterPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "sigma={}, gamma={}, kappa={}",
            self.sigma, self.gamma, self.kappa
        )
    }
}

/// Configuration for a single trial
///
/// Invariant: `steps * dt` is the horizon T, `dt > 0`, `steps >= 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialConfig {
    /// Number of discrete steps N
    pub steps: usize,
    /// Time increment per step
    pub dt: f64,
    /// Initial mid price S0
    pub initial_price: Price,
    /// Mid price volatility σ
    pub sigma: f64,
    /// Risk aversion γ
    pub gamma: f64,
    /// Market depth κ (fill intensity decay per unit of half-spread)
    pub kappa: f64,
    /// Base fill intensity A
    pub intensity: f64,
    /// Seed for the trial's random sources
    pub seed: Seed,
    /// Starting cash
    pub initial_cash: Cash,
    /// Starting inventory
    pub initial_inventory: Inventory,
    /// Handling of fill probabilities at or above 1
    pub probability_policy: ProbabilityPolicy,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            steps: 200,
            dt: 0.005,
            initial_price: 100.0,
            sigma: 2.0,
            gamma: 0.1,
            kappa: 1.5,
            intensity: 140.0,
            seed: 42,
            initial_cash: 0.0,
            initial_inventory: 0,
            probability_policy: ProbabilityPolicy::Clamp,
        }
    }
}

impl TrialConfig {
    /// Build a configuration covering horizon `horizon` with step `dt`
    ///
    /// Fails if the horizon is not an integer multiple of `dt`.
    pub fn from_horizon(horizon: f64, dt: f64) -> SimResult<Self> {
        Self::default().with_horizon(horizon, dt)
    }

    /// Replace the time grid with one covering `horizon` in steps of `dt`
    pub fn with_horizon(mut self, horizon: f64, dt: f64) -> SimResult<Self> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::invalid(format!("dt must be positive, got {dt}")));
        }
        if !(horizon.is_finite() && horizon > 0.0) {
            return Err(SimError::invalid(format!(
                "horizon must be positive, got {horizon}"
            )));
        }

        let steps = (horizon / dt).round();
        if steps < 1.0 {
            return Err(SimError::invalid(format!(
                "horizon {horizon} is shorter than one step of {dt}"
            )));
        }
        if (steps * dt - horizon).abs() > 1e-9 * steps.max(1.0) {
            return Err(SimError::invalid(format!(
                "horizon {horizon} is not a multiple of dt {dt}"
            )));
        }

        self.steps = steps as usize;
        self.dt = dt;
        Ok(self)
    }

    /// Total horizon T = N·dt
    pub fn horizon(&self) -> f64 {
        self.steps as f64 * self.dt
    }

    /// Time remaining τ = T − i·dt at step `step`
    pub fn time_remaining(&self, step: usize) -> f64 {
        self.horizon() - step as f64 * self.dt
    }

    /// Wealth held before the first step
    pub fn initial_wealth(&self) -> f64 {
        self.initial_cash + self.initial_inventory as f64 * self.initial_price
    }

    pub fn parameters(&self) -> ParameterPoint {
        ParameterPoint {
            sigma: self.sigma,
            gamma: self.gamma,
            kappa: self.kappa,
        }
    }

    /// Check every invariant; called before any simulation step
    pub fn validate(&self) -> SimResult<()> {
        if self.steps < 1 {
            return Err(SimError::invalid("steps must be at least 1"));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::invalid(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        if !self.initial_price.is_finite() {
            return Err(SimError::invalid("initial price must be finite"));
        }
        if !(self.sigma.is_finite() && self.sigma >= 0.0) {
            return Err(SimError::invalid(format!(
                "sigma must be non-negative, got {}",
                self.sigma
            )));
        }
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(SimError::invalid(format!(
                "gamma must be positive, got {}",
                self.gamma
            )));
        }
        if !(self.kappa.is_finite() && self.kappa > 0.0) {
            return Err(SimError::invalid(format!(
                "kappa must be positive, got {}",
                self.kappa
            )));
        }
        if !(self.intensity.is_finite() && self.intensity >= 0.0) {
            return Err(SimError::invalid(format!(
                "fill intensity must be non-negative, got {}",
                self.intensity
            )));
        }
        if !self.initial_cash.is_finite() {
            return Err(SimError::invalid("initial cash must be finite"));
        }
        Ok(())
    }

    /// Set seed (builder pattern)
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = seed;
        self
    }

    /// Set volatility (builder pattern)
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set risk aversion (builder pattern)
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set market depth (builder pattern)
    pub fn with_kappa(mut self, kappa: f64) -> Self {
        self.kappa = kappa;
        self
    }

    /// Set base fill intensity (builder pattern)
    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity;
        self
    }

    /// Set starting cash and inventory (builder pattern)
    pub fn with_initial_position(mut self, cash: Cash, inventory: Inventory) -> Self {
        self.initial_cash = cash;
        self.initial_inventory = inventory;
        self
    }

    /// Set probability handling (builder pattern)
    pub fn with_probability_policy(mut self, policy: ProbabilityPolicy) -> Self {
        self.probability_policy = policy;
        self
    }

    /// Copy of this config moved to another (σ, γ, κ) point
    pub fn at_point(&self, point: &ParameterPoint) -> Self {
        Self {
            sigma: point.sigma,
            gamma: point.gamma,
            kappa: point.kappa,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_valid() {
        let config = TrialConfig::default();
        assert!(config.validate().is_ok());
        assert_relative_eq!(config.horizon(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_from_horizon() {
        let config = TrialConfig::from_horizon(1.0, 0.005).unwrap();
        assert_eq!(config.steps, 200);

        let config = TrialConfig::from_horizon(0.3, 0.1).unwrap();
        assert_eq!(config.steps, 3);
    }

    #[test]
    fn test_from_horizon_rejects_partial_step() {
        assert!(TrialConfig::from_horizon(1.0, 0.3).is_err());
        assert!(TrialConfig::from_horizon(0.001, 0.005).is_err());
        assert!(TrialConfig::from_horizon(1.0, 0.0).is_err());
    }

    #[test]
    fn test_time_remaining() {
        let config = TrialConfig::default();
        assert_relative_eq!(config.time_remaining(0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(config.time_remaining(100), 0.5, epsilon = 1e-12);
        assert_relative_eq!(config.time_remaining(199), 0.005, epsilon = 1e-12);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            TrialConfig {
                steps: 0,
                ..Default::default()
            },
            TrialConfig {
                dt: 0.0,
                ..Default::default()
            },
            TrialConfig {
                dt: -0.1,
                ..Default::default()
            },
            TrialConfig::default().with_gamma(0.0),
            TrialConfig::default().with_kappa(0.0),
            TrialConfig::default().with_sigma(-1.0),
            TrialConfig::default().with_intensity(f64::NAN),
        ];

        for config in bad {
            let err = config.validate().unwrap_err();
            assert!(err.is_invalid_config(), "{err}");
        }
    }

    #[test]
    fn test_at_point_keeps_grid() {
        let base = TrialConfig::default().with_seed(7);
        let point = ParameterPoint {
            sigma: 0.2,
            gamma: 0.5,
            kappa: 2.0,
        };
        let moved = base.at_point(&point);

        assert_eq!(moved.parameters(), point);
        assert_eq!(moved.steps, base.steps);
        assert_eq!(moved.seed, 7);
    }

    #[test]
    fn test_initial_wealth() {
        let config = TrialConfig::default().with_initial_position(50.0, 2);
        assert_relative_eq!(config.initial_wealth(), 250.0);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: TrialConfig =
            serde_json::from_str(r#"{"sigma": 0.3, "probability_policy": "reject"}"#).unwrap();

        assert_eq!(config.sigma, 0.3);
        assert_eq!(config.steps, 200);
        assert_eq!(config.probability_policy, ProbabilityPolicy::Reject);
    }
}
