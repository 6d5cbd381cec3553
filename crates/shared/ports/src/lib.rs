//! mmsim Ports
//!
//! Capability traits for the three pluggable parts of a trial.
//! The engine ships a closed set of implementations for each; the traits
//! define the boundary the trial runner is written against.

mod execution;
mod price_process;
mod quoting;

pub use execution::FillModel;
pub use price_process::PriceProcess;
pub use quoting::QuotingPolicy;
