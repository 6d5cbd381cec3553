//! Fill models
//!
//! Order arrivals at distance δ from the reservation price follow a Poisson
//! process with intensity λ(δ) = A × exp(−κδ). Over one step of length dt a
//! side fills with probability λ·dt, drawn as one Bernoulli trial per side.
//! The approximation only holds while λ·dt ≪ 1.

mod asymmetric;
mod poisson;

pub use asymmetric::AsymmetricPoissonFill;
pub use poisson::PoissonFill;

use log::warn;
use mmsim_core::{FillOutcome, PositionState, QuoteRecord, SimError, SimResult, TrialConfig};
use mmsim_ports::FillModel;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Peak per-step probability above which the Bernoulli approximation is
/// considered coarse
pub const DISCRETIZATION_WARN_THRESHOLD: f64 = 0.1;

/// Exponential arrival intensity for one side of the book
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrivalIntensity {
    /// A: intensity at zero half-spread
    pub base: f64,
    /// κ: decay per unit of half-spread
    pub decay: f64,
}

impl ArrivalIntensity {
    pub fn new(base: f64, decay: f64) -> SimResult<Self> {
        if !(base.is_finite() && base >= 0.0) {
            return Err(SimError::invalid(format!(
                "fill intensity must be non-negative, got {base}"
            )));
        }
        if !(decay.is_finite() && decay > 0.0) {
            return Err(SimError::invalid(format!(
                "intensity decay must be positive, got {decay}"
            )));
        }
        Ok(Self { base, decay })
    }

    /// λ(δ) = A × exp(−κδ)
    pub fn rate(&self, half_spread: f64) -> f64 {
        self.base * (-self.decay * half_spread).exp()
    }
}

/// One Bernoulli draw per side, bid first
///
/// Both uniforms are always drawn so the random stream advances identically
/// whatever the probabilities are. A NaN probability never fills.
pub(crate) fn thin(
    quote: &QuoteRecord,
    position: PositionState,
    bid_probability: f64,
    ask_probability: f64,
    rng: &mut dyn RngCore,
) -> FillOutcome {
    let u_bid: f64 = rng.r#gen();
    let u_ask: f64 = rng.r#gen();

    let bid_filled = u_bid < bid_probability.clamp(0.0, 1.0);
    let ask_filled = u_ask < ask_probability.clamp(0.0, 1.0);

    if !bid_filled && !ask_filled {
        return FillOutcome::none(position, bid_probability, ask_probability);
    }
    FillOutcome::resolve(
        position,
        quote,
        bid_filled,
        ask_filled,
        bid_probability,
        ask_probability,
    )
}

/// Warn when the peak per-step probability makes the Bernoulli
/// approximation coarse; returns the peak probability
pub fn check_discretization(model: &dyn FillModel, dt: f64) -> f64 {
    let peak = model.peak_intensity() * dt;
    if peak >= DISCRETIZATION_WARN_THRESHOLD {
        warn!(
            "{}: peak fill probability A·dt = {:.3} (>= {}); thinning is coarse at this dt",
            model.name(),
            peak,
            DISCRETIZATION_WARN_THRESHOLD
        );
    }
    peak
}

/// Which fill model a scenario uses
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FillModelKind {
    /// Same (A, κ) on both sides, taken from the trial config
    #[default]
    Poisson,
    /// Separate (A, κ) per side
    AsymmetricPoisson {
        bid_intensity: f64,
        bid_kappa: f64,
        ask_intensity: f64,
        ask_kappa: f64,
    },
}

impl FillModelKind {
    pub fn build(self, config: &TrialConfig) -> SimResult<FillVariant> {
        Ok(match self {
            FillModelKind::Poisson => FillVariant::Poisson(PoissonFill::new(
                ArrivalIntensity::new(config.intensity, config.kappa)?,
            )),
            FillModelKind::AsymmetricPoisson {
                bid_intensity,
                bid_kappa,
                ask_intensity,
                ask_kappa,
            } => FillVariant::AsymmetricPoisson(AsymmetricPoissonFill::new(
                ArrivalIntensity::new(bid_intensity, bid_kappa)?,
                ArrivalIntensity::new(ask_intensity, ask_kappa)?,
            )),
        })
    }
}

/// Configured fill model
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillVariant {
    Poisson(PoissonFill),
    AsymmetricPoisson(AsymmetricPoissonFill),
}

impl FillVariant {
    fn as_model(&self) -> &dyn FillModel {
        match self {
            FillVariant::Poisson(m) => m,
            FillVariant::AsymmetricPoisson(m) => m,
        }
    }
}

impl FillModel for FillVariant {
    fn intensities(&self, quote: &QuoteRecord) -> (f64, f64) {
        self.as_model().intensities(quote)
    }

    fn fill(
        &self,
        quote: &QuoteRecord,
        position: PositionState,
        dt: f64,
        rng: &mut dyn RngCore,
    ) -> FillOutcome {
        self.as_model().fill(quote, position, dt, rng)
    }

    fn peak_intensity(&self) -> f64 {
        self.as_model().peak_intensity()
    }

    fn name(&self) -> &str {
        self.as_model().name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rate() {
        let intensity = ArrivalIntensity::new(140.0, 1.5).unwrap();

        assert_relative_eq!(intensity.rate(0.0), 140.0);
        assert_relative_eq!(intensity.rate(1.0), 140.0 * (-1.5f64).exp());
        assert!(intensity.rate(2.0) < intensity.rate(1.0));
    }

    #[test]
    fn test_invalid_intensity() {
        assert!(ArrivalIntensity::new(-1.0, 1.5).is_err());
        assert!(ArrivalIntensity::new(140.0, 0.0).is_err());
        assert!(ArrivalIntensity::new(0.0, 1.5).is_ok());
    }

    #[test]
    fn test_thin_extremes() {
        let quote = QuoteRecord::symmetric(100.0, 1.0);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..100 {
            let always = thin(&quote, PositionState::default(), 1.0, 1.0, &mut rng);
            assert!(always.bid_filled && always.ask_filled);

            let never = thin(&quote, PositionState::default(), 0.0, f64::NAN, &mut rng);
            assert!(!never.bid_filled && !never.ask_filled);
        }
    }

    #[test]
    fn test_thin_consumes_two_draws() {
        let quote = QuoteRecord::symmetric(100.0, 1.0);
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);

        thin(&quote, PositionState::default(), 0.0, 0.0, &mut a);
        let _: f64 = b.r#gen();
        let _: f64 = b.r#gen();

        assert_eq!(a.r#gen::<u64>(), b.r#gen::<u64>());
    }

    #[test]
    fn test_kind_from_json() {
        let kind: FillModelKind = serde_json::from_str(
            r#"{"type":"asymmetric_poisson","bid_intensity":100,"bid_kappa":1.0,"ask_intensity":150,"ask_kappa":2.0}"#,
        )
        .unwrap();
        let model = kind.build(&TrialConfig::default()).unwrap();
        assert_eq!(model.name(), "asymmetric_poisson");
        assert_relative_eq!(model.peak_intensity(), 150.0);

        let kind: FillModelKind = serde_json::from_str(r#"{"type":"poisson"}"#).unwrap();
        assert_eq!(kind, FillModelKind::Poisson);
    }

    #[test]
    fn test_discretization_peak() {
        let model = FillModelKind::Poisson.build(&TrialConfig::default()).unwrap();
        // A = 140, dt = 0.005
        assert_relative_eq!(check_discretization(&model, 0.005), 0.7, epsilon = 1e-12);
    }
}
