//! Symmetric Poisson fills
//!
//! One arrival intensity for both sides. With half-spreads δ_b, δ_a measured
//! from the reservation price:
//!
//! p_bid = A × exp(−κδ_b) × dt
//! p_ask = A × exp(−κδ_a) × dt

use super::{ArrivalIntensity, thin};
use mmsim_core::{FillOutcome, PositionState, QuoteRecord};
use mmsim_ports::FillModel;
use rand::RngCore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoissonFill {
    intensity: ArrivalIntensity,
}

impl PoissonFill {
    pub fn new(intensity: ArrivalIntensity) -> Self {
        Self { intensity }
    }
}

impl FillModel for PoissonFill {
    fn intensities(&self, quote: &QuoteRecord) -> (f64, f64) {
        (
            self.intensity.rate(quote.bid_half_spread),
            self.intensity.rate(quote.ask_half_spread),
        )
    }

    fn fill(
        &self,
        quote: &QuoteRecord,
        position: PositionState,
        dt: f64,
        rng: &mut dyn RngCore,
    ) -> FillOutcome {
        let (lambda_bid, lambda_ask) = self.intensities(quote);
        thin(quote, position, lambda_bid * dt, lambda_ask * dt, rng)
    }

    fn peak_intensity(&self) -> f64 {
        self.intensity.base
    }

    fn name(&self) -> &str {
        "poisson"
    }
}
