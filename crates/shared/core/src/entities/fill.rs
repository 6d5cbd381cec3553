//! Fill Outcome
//!
//! Result of one step of fill simulation: at most one bid fill and one ask
//! fill, each priced at the quote that was hit.

use super::{PositionState, QuoteRecord, Side};
use crate::values::{Cash, Inventory};
use serde::{Deserialize, Serialize};

/// What the fill model decided for one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillOutcome {
    pub bid_filled: bool,
    pub ask_filled: bool,
    /// λ_bid·dt before clamping
    pub bid_probability: f64,
    /// λ_ask·dt before clamping
    pub ask_probability: f64,
    /// Signed inventory change (−1, 0 or +1)
    pub delta_inventory: Inventory,
    /// Cash change: −bid for a bid fill, +ask for an ask fill
    pub delta_cash: Cash,
    /// Inventory after the fills
    pub inventory: Inventory,
    /// Cash after the fills
    pub cash: Cash,
}

impl FillOutcome {
    /// Resolve fill decisions against the quote and the prior position
    pub fn resolve(
        before: PositionState,
        quote: &QuoteRecord,
        bid_filled: bool,
        ask_filled: bool,
        bid_probability: f64,
        ask_probability: f64,
    ) -> Self {
        let mut delta_inventory = 0;
        let mut delta_cash = 0.0;

        if bid_filled {
            delta_inventory += Side::Bid.inventory_delta();
            delta_cash -= quote.bid_price;
        }
        if ask_filled {
            delta_inventory += Side::Ask.inventory_delta();
            delta_cash += quote.ask_price;
        }

        Self {
            bid_filled,
            ask_filled,
            bid_probability,
            ask_probability,
            delta_inventory,
            delta_cash,
            inventory: before.inventory + delta_inventory,
            cash: before.cash + delta_cash,
        }
    }

    /// Outcome with no fills on either side
    pub fn none(before: PositionState, bid_probability: f64, ask_probability: f64) -> Self {
        Self {
            bid_filled: false,
            ask_filled: false,
            bid_probability,
            ask_probability,
            delta_inventory: 0,
            delta_cash: 0.0,
            inventory: before.inventory,
            cash: before.cash,
        }
    }

    /// Either side's raw probability reached 1 and had to be clamped
    pub fn probability_clamped(&self) -> bool {
        self.bid_probability >= 1.0 || self.ask_probability >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quote() -> QuoteRecord {
        QuoteRecord::new(100.0, 0.5, 0.5)
    }

    #[test]
    fn test_bid_fill_buys() {
        let outcome =
            FillOutcome::resolve(PositionState::default(), &quote(), true, false, 0.2, 0.2);

        assert_eq!(outcome.delta_inventory, 1);
        assert_eq!(outcome.inventory, 1);
        assert_relative_eq!(outcome.cash, -99.5);
    }

    #[test]
    fn test_ask_fill_sells() {
        let before = PositionState::new(10.0, 2);
        let outcome = FillOutcome::resolve(before, &quote(), false, true, 0.2, 0.2);

        assert_eq!(outcome.inventory, 1);
        assert_relative_eq!(outcome.cash, 110.5);
    }

    #[test]
    fn test_both_sides_fill() {
        let outcome =
            FillOutcome::resolve(PositionState::default(), &quote(), true, true, 0.2, 0.2);

        assert_eq!(outcome.delta_inventory, 0);
        assert!(outcome.bid_filled && outcome.ask_filled);
        // Round trip earns the full spread
        assert_relative_eq!(outcome.delta_cash, 1.0);
    }

    #[test]
    fn test_clamp_flag() {
        let before = PositionState::default();
        assert!(!FillOutcome::none(before, 0.3, 0.99).probability_clamped());
        assert!(FillOutcome::none(before, 1.0, 0.1).probability_clamped());
        assert!(FillOutcome::none(before, 0.1, 3.5).probability_clamped());
    }
}
