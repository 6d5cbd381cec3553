//! mmsim Core Domain
//!
//! Pure domain types for the market-making simulator.
//! This crate contains no randomness, no I/O, and is 100% unit testable.

pub mod config;
pub mod entities;
pub mod error;
pub mod values;

// Re-export commonly used types at crate root
pub use config::{ParameterPoint, ProbabilityPolicy, TrialConfig};
pub use entities::{
    // Aggregation
    BatchSummary,
    // Execution
    FillOutcome,
    // Position tracking
    PositionLedger,
    PositionState,
    // Price paths and quotes
    PricePath,
    QuoteRecord,
    Side,
    // Trial output
    StepRecord,
    TrialFailure,
    TrialMetrics,
    TrialResult,
};
pub use error::{SimError, SimResult};
pub use values::{Cash, Inventory, Price, Seed};
