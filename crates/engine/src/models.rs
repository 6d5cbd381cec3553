//! Model selection
//!
//! Chooses one variant of each port at configuration time and builds them
//! against a trial config.

use crate::fill::{FillModelKind, FillVariant};
use crate::process::{PriceProcessKind, ProcessVariant};
use crate::quoting::{PolicyKind, PolicyVariant};
use mmsim_core::{SimResult, TrialConfig};
use mmsim_ports::{FillModel, PriceProcess, QuotingPolicy};
use serde::{Deserialize, Serialize};

/// Serializable choice of price process, policy and fill model
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSelection {
    pub process: PriceProcessKind,
    pub policy: PolicyKind,
    pub fill: FillModelKind,
}

impl ModelSelection {
    /// Set price process (builder pattern)
    pub fn with_process(mut self, process: PriceProcessKind) -> Self {
        self.process = process;
        self
    }

    /// Set quoting policy (builder pattern)
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Set fill model (builder pattern)
    pub fn with_fill(mut self, fill: FillModelKind) -> Self {
        self.fill = fill;
        self
    }

    /// Build all three models for `config`
    pub fn build(&self, config: &TrialConfig) -> SimResult<ModelSet> {
        Ok(ModelSet {
            process: self.process.build(config)?,
            policy: self.policy.build(config)?,
            fill: self.fill.build(config)?,
        })
    }
}

/// Configured models for one parameter point
///
/// Read-only once built, so one set is shared by every trial of a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelSet {
    pub process: ProcessVariant,
    pub policy: PolicyVariant,
    pub fill: FillVariant,
}

impl ModelSet {
    pub fn process_name(&self) -> &str {
        self.process.name()
    }

    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }

    pub fn fill_name(&self) -> &str {
        self.fill.name()
    }
}
