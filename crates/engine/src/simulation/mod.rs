//! Simulation drivers
//!
//! - `trial`: one sequential trial over a price path
//! - `batch`: independent trials at one parameter point, reduced to a summary
//! - `sweep`: batches over a (σ, γ, κ) grid

mod batch;
mod sweep;
mod trial;

pub use batch::{BatchConfig, BatchEvaluator};
pub use sweep::{ParameterGrid, ParameterSweep};
pub use trial::{FILL_STREAM, TrialRunner, TrialState};
