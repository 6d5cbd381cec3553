//! Mid-price processes
//!
//! Each process seeds its own `StdRng` once per `simulate` call, so a path is
//! a pure function of (parameters, steps, dt, seed).

mod arithmetic;
mod geometric;

pub use arithmetic::ArithmeticBrownian;
pub use geometric::GeometricBrownian;

use mmsim_core::{PricePath, Seed, SimError, SimResult, TrialConfig};
use mmsim_ports::PriceProcess;
use serde::{Deserialize, Serialize};

/// Which price process a scenario uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceProcessKind {
    /// S[i] = S[i-1] + σ√dt·Z
    #[default]
    Arithmetic,
    /// S[i] = S[i-1]·exp(−½σ²dt + σ√dt·Z)
    Geometric,
}

impl PriceProcessKind {
    /// Build the configured process from a trial config
    pub fn build(self, config: &TrialConfig) -> SimResult<ProcessVariant> {
        Ok(match self {
            PriceProcessKind::Arithmetic => ProcessVariant::Arithmetic(ArithmeticBrownian::new(
                config.initial_price,
                config.sigma,
            )?),
            PriceProcessKind::Geometric => ProcessVariant::Geometric(GeometricBrownian::new(
                config.initial_price,
                config.sigma,
            )?),
        })
    }
}

/// Configured price process
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProcessVariant {
    Arithmetic(ArithmeticBrownian),
    Geometric(GeometricBrownian),
}

impl PriceProcess for ProcessVariant {
    fn simulate(&self, steps: usize, dt: f64, seed: Seed) -> SimResult<PricePath> {
        match self {
            ProcessVariant::Arithmetic(p) => p.simulate(steps, dt, seed),
            ProcessVariant::Geometric(p) => p.simulate(steps, dt, seed),
        }
    }

    fn initial_price(&self) -> f64 {
        match self {
            ProcessVariant::Arithmetic(p) => p.initial_price(),
            ProcessVariant::Geometric(p) => p.initial_price(),
        }
    }

    fn name(&self) -> &str {
        match self {
            ProcessVariant::Arithmetic(p) => p.name(),
            ProcessVariant::Geometric(p) => p.name(),
        }
    }
}

/// Shared argument checks for `simulate`
pub(crate) fn check_grid(steps: usize, dt: f64) -> SimResult<()> {
    if steps < 1 {
        return Err(SimError::invalid("price path needs at least one step"));
    }
    if !(dt.is_finite() && dt > 0.0) {
        return Err(SimError::invalid(format!("dt must be positive, got {dt}")));
    }
    Ok(())
}

/// Shared volatility check for process construction
pub(crate) fn check_sigma(sigma: f64) -> SimResult<()> {
    if !(sigma.is_finite() && sigma >= 0.0) {
        return Err(SimError::invalid(format!(
            "sigma must be non-negative, got {sigma}"
        )));
    }
    Ok(())
}
