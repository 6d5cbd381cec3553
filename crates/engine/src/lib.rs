//! Market-making simulation engine
//!
//! Simulates a single market maker quoting around a stochastic mid price:
//!
//! - `process`: mid-price paths (arithmetic and geometric Brownian motion)
//! - `quoting`: inventory-aware, asymmetric and symmetric quoting policies
//! - `fill`: Poisson-intensity fill models
//! - `simulation`: single trials, Monte-Carlo batches and parameter sweeps
//! - `scenario`: JSON run descriptions for the `mmsim` binary
//!
//! # Example
//!
//! ```no_run
//! use mmsim_core::TrialConfig;
//! use mmsim_engine::{BatchConfig, BatchEvaluator, ModelSelection};
//!
//! let evaluator = BatchEvaluator::new(
//!     TrialConfig::default(),
//!     ModelSelection::default(),
//!     BatchConfig::default(),
//! )?;
//! let summary = evaluator.run(1000)?;
//! println!("mean pnl {:.2} ± {:.2}", summary.mean_pnl, summary.standard_error);
//! # Ok::<(), mmsim_core::SimError>(())
//! ```

pub mod fill;
pub mod models;
pub mod process;
pub mod quoting;
pub mod scenario;
pub mod simulation;

pub use fill::{ArrivalIntensity, AsymmetricPoissonFill, FillModelKind, FillVariant, PoissonFill};
pub use models::{ModelSelection, ModelSet};
pub use process::{ArithmeticBrownian, GeometricBrownian, PriceProcessKind, ProcessVariant};
pub use quoting::{
    AsymmetricInventory, GeometricInventoryAware, InventoryAware, PolicyKind, PolicyVariant,
    RiskParams, SymmetricSpread,
};
pub use scenario::{ConfigError, RunMode, Scenario};
pub use simulation::{
    BatchConfig, BatchEvaluator, ParameterGrid, ParameterSweep, TrialRunner, TrialState,
};

// Re-export the ports so callers need a single dependency
pub use mmsim_ports::{FillModel, PriceProcess, QuotingPolicy};
