//! Trial output
//!
//! The per-step log of one completed trial and the terminal metrics derived
//! from it.

use crate::error::{SimError, SimResult};
use crate::values::{Cash, Inventory, Price, Seed};
use serde::{Deserialize, Serialize};

/// Full observable state at one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step index i
    pub step: usize,
    /// τ = T − i·dt
    pub time_remaining: f64,
    pub mid_price: Price,
    pub reservation_price: Price,
    pub bid_price: Price,
    pub ask_price: Price,
    /// Inventory after this step's fills
    pub inventory: Inventory,
    /// Cash after this step's fills
    pub cash: Cash,
    /// cash + inventory × mid
    pub wealth: f64,
    pub bid_filled: bool,
    pub ask_filled: bool,
    /// A fill probability on this step was clamped to 1
    pub probability_clamped: bool,
}

impl StepRecord {
    pub fn spread(&self) -> f64 {
        self.ask_price - self.bid_price
    }
}

/// Terminal metrics of one trial, the unit a batch reduces over
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialMetrics {
    pub seed: Seed,
    /// Terminal wealth minus starting wealth
    pub pnl: f64,
    pub terminal_wealth: f64,
    pub final_inventory: Inventory,
    pub final_cash: Cash,
    /// Mean quoted spread (ask − bid) over the trial
    pub mean_spread: f64,
    pub bid_fills: usize,
    pub ask_fills: usize,
    pub clamped_steps: usize,
}

/// Ordered step log of one completed trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    seed: Seed,
    initial_wealth: f64,
    records: Vec<StepRecord>,
}

impl TrialResult {
    pub fn new(seed: Seed, initial_wealth: f64, records: Vec<StepRecord>) -> SimResult<Self> {
        if records.is_empty() {
            return Err(SimError::IncompleteTrial {
                completed: 0,
                expected: 1,
            });
        }
        Ok(Self {
            seed,
            initial_wealth,
            records,
        })
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Last step of the trial
    pub fn terminal(&self) -> &StepRecord {
        &self.records[self.records.len() - 1]
    }

    /// Cash plus inventory valued at the last recorded mid
    pub fn terminal_wealth(&self) -> f64 {
        self.terminal().wealth
    }

    pub fn pnl(&self) -> f64 {
        self.terminal_wealth() - self.initial_wealth
    }

    pub fn mean_spread(&self) -> f64 {
        self.records.iter().map(StepRecord::spread).sum::<f64>() / self.records.len() as f64
    }

    pub fn metrics(&self) -> TrialMetrics {
        let terminal = self.terminal();

        TrialMetrics {
            seed: self.seed,
            pnl: self.pnl(),
            terminal_wealth: terminal.wealth,
            final_inventory: terminal.inventory,
            final_cash: terminal.cash,
            mean_spread: self.mean_spread(),
            bid_fills: self.records.iter().filter(|r| r.bid_filled).count(),
            ask_fills: self.records.iter().filter(|r| r.ask_filled).count(),
            clamped_steps: self
                .records
                .iter()
                .filter(|r| r.probability_clamped)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(step: usize, mid: f64, inventory: i64, cash: f64, bid_filled: bool) -> StepRecord {
        StepRecord {
            step,
            time_remaining: 1.0 - step as f64 * 0.5,
            mid_price: mid,
            reservation_price: mid,
            bid_price: mid - 1.0,
            ask_price: mid + 1.0,
            inventory,
            cash,
            wealth: cash + inventory as f64 * mid,
            bid_filled,
            ask_filled: false,
            probability_clamped: false,
        }
    }

    #[test]
    fn test_metrics_from_terminal_record() {
        let records = vec![record(0, 100.0, 1, -99.0, true), record(1, 102.0, 1, -99.0, false)];
        let result = TrialResult::new(9, 0.0, records).unwrap();
        let metrics = result.metrics();

        assert_eq!(metrics.seed, 9);
        assert_eq!(metrics.final_inventory, 1);
        assert_eq!(metrics.bid_fills, 1);
        assert_eq!(metrics.ask_fills, 0);
        assert_relative_eq!(metrics.terminal_wealth, 3.0);
        assert_relative_eq!(metrics.pnl, 3.0);
        assert_relative_eq!(metrics.mean_spread, 2.0);
    }

    #[test]
    fn test_pnl_nets_initial_wealth() {
        let records = vec![record(0, 100.0, 2, 50.0, false)];
        let result = TrialResult::new(1, 250.0, records).unwrap();

        assert_relative_eq!(result.terminal_wealth(), 250.0);
        assert_relative_eq!(result.pnl(), 0.0);
    }

    #[test]
    fn test_empty_trial_rejected() {
        assert!(matches!(
            TrialResult::new(0, 0.0, Vec::new()),
            Err(SimError::IncompleteTrial { .. })
        ));
    }
}
