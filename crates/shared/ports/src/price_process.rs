use mmsim_core::{PricePath, Seed, SimResult};

/// Port for mid-price path generation
///
/// Implementations must seed their random source exactly once per call from
/// `seed` and hold no generator between calls, so identical arguments
/// always reproduce the identical path.
pub trait PriceProcess: Send + Sync {
    /// Simulate `steps` increments of size `dt`; the path has `steps + 1` points
    fn simulate(&self, steps: usize, dt: f64, seed: Seed) -> SimResult<PricePath>;

    /// Initial price S0
    fn initial_price(&self) -> f64;

    /// Get the process name for logging/debugging
    fn name(&self) -> &str;
}
