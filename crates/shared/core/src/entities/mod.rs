mod fill;
mod ledger;
mod path;
mod quote;
mod side;
mod summary;
mod trial;

pub use fill::FillOutcome;
pub use ledger::{PositionLedger, PositionState};
pub use path::PricePath;
pub use quote::QuoteRecord;
pub use side::Side;
pub use summary::{BatchSummary, TrialFailure};
pub use trial::{StepRecord, TrialMetrics, TrialResult};
