//! Fill Model Protocol
//!
//! Probabilistic execution of resting quotes over one time step.

use mmsim_core::{FillOutcome, PositionState, QuoteRecord};
use rand::RngCore;

/// Fill model interface
///
/// Each side is an independent thinned Poisson process: over `dt` the side
/// fills with probability `λ·dt`, approximated by a single Bernoulli draw.
/// That approximation needs `λ·dt ≪ 1`; implementations report the raw,
/// unclamped probabilities in the outcome so callers can detect when it
/// breaks down.
pub trait FillModel: Send + Sync {
    /// Arrival intensities (λ_bid, λ_ask) for the given quote
    fn intensities(&self, quote: &QuoteRecord) -> (f64, f64);

    /// Decide this step's fills; at most one per side
    ///
    /// All randomness comes from `rng`, owned by the calling trial.
    fn fill(
        &self,
        quote: &QuoteRecord,
        position: PositionState,
        dt: f64,
        rng: &mut dyn RngCore,
    ) -> FillOutcome;

    /// Largest base intensity A over both sides (λ at zero half-spread)
    fn peak_intensity(&self) -> f64;

    /// Get the model name for logging/debugging
    fn name(&self) -> &str;
}
