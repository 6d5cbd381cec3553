//! Position Ledger
//!
//! Cash and inventory held by the market maker during one trial.

use crate::values::{Cash, Inventory, Price};
use serde::{Deserialize, Serialize};

/// Snapshot of cash and inventory
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionState {
    pub cash: Cash,
    /// Positive = long, negative = short
    pub inventory: Inventory,
}

impl PositionState {
    pub fn new(cash: Cash, inventory: Inventory) -> Self {
        Self { cash, inventory }
    }

    /// Marked-to-market wealth: cash + inventory × mid
    pub fn wealth(&self, mid_price: Price) -> f64 {
        self.cash + self.inventory as f64 * mid_price
    }
}

/// Sole owner of a trial's position state
///
/// Inventory is unbounded in both directions: a negative value is a short
/// position, which market making produces routinely.
#[derive(Debug, Clone, Default)]
pub struct PositionLedger {
    state: PositionState,
}

impl PositionLedger {
    pub fn new(cash: Cash, inventory: Inventory) -> Self {
        Self {
            state: PositionState::new(cash, inventory),
        }
    }

    /// Apply signed deltas to inventory and cash
    pub fn update(&mut self, delta_inventory: Inventory, delta_cash: Cash) {
        self.state.inventory += delta_inventory;
        self.state.cash += delta_cash;
    }

    pub fn state(&self) -> PositionState {
        self.state
    }

    pub fn inventory(&self) -> Inventory {
        self.state.inventory
    }

    pub fn cash(&self) -> Cash {
        self.state.cash
    }

    pub fn wealth(&self, mid_price: Price) -> f64 {
        self.state.wealth(mid_price)
    }
}
