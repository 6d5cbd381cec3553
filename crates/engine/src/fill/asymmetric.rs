//! Side-specific Poisson fills
//!
//! Buy and sell flow arrive with their own (A, κ). Each side's intensity is
//! evaluated at that side's half-spread from the reservation price.

use super::{ArrivalIntensity, thin};
use mmsim_core::{FillOutcome, PositionState, QuoteRecord};
use mmsim_ports::FillModel;
use rand::RngCore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsymmetricPoissonFill {
    bid: ArrivalIntensity,
    ask: ArrivalIntensity,
}

impl AsymmetricPoissonFill {
    pub fn new(bid: ArrivalIntensity, ask: ArrivalIntensity) -> Self {
        Self { bid, ask }
    }
}

impl FillModel for AsymmetricPoissonFill {
    fn intensities(&self, quote: &QuoteRecord) -> (f64, f64) {
        (
            self.bid.rate(quote.bid_half_spread),
            self.ask.rate(quote.ask_half_spread),
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
        self.bid.base.max(self.ask.base)
    }

    fn name(&self) -> &str {
        "asymmetric_poisson"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_side_specific_rates() {
        let model = AsymmetricPoissonFill::new(
            ArrivalIntensity::new(100.0, 1.0).unwrap(),
            ArrivalIntensity::new(50.0, 2.0).unwrap(),
        );
        let (bid, ask) = model.intensities(&QuoteRecord::new(100.0, 0.5, 0.25));

        assert_relative_eq!(bid, 100.0 * (-0.5f64).exp());
        assert_relative_eq!(ask, 50.0 * (-0.5f64).exp());
        assert_relative_eq!(model.peak_intensity(), 100.0);
    }

    #[test]
    fn test_silent_side_never_fills() {
        let model = AsymmetricPoissonFill::new(
            ArrivalIntensity::new(0.0, 1.0).unwrap(),
            ArrivalIntensity::new(200.0, 1.0).unwrap(),
        );
        let quote = QuoteRecord::symmetric(100.0, 0.0);
        let mut rng = StdRng::seed_from_u64(8);

        for _ in 0..200 {
            let outcome = model.fill(&quote, PositionState::default(), 0.01, &mut rng);
            assert!(!outcome.bid_filled);
            assert!(outcome.ask_filled);
            assert_eq!(outcome.inventory, -1);
        }
    }
}
