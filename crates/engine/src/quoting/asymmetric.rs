//! Inventory-skewed quoting
//!
//! Keeps the arithmetic reservation price but splits the inventory-risk part
//! of the spread unevenly:
//!
//! bid_half = (1 + 2q) × γσ²τ / 2 + (1/γ) ln(1 + γ/κ)
//! ask_half = (1 − 2q) × γσ²τ / 2 + (1/γ) ln(1 + γ/κ)
//!
//! A long book pushes the bid away and pulls the ask in. The two halves
//! still sum to the arithmetic spread. For large |q| one half-spread goes
//! negative and the quote can cross the reservation price; that is left to
//! the caller to observe.

use super::RiskParams;
use mmsim_core::{Inventory, Price};
use mmsim_ports::QuotingPolicy;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsymmetricInventory {
    params: RiskParams,
}

impl AsymmetricInventory {
    pub fn new(params: RiskParams) -> Self {
        Self { params }
    }
}

impl QuotingPolicy for AsymmetricInventory {
    fn reservation_price(
        &self,
        mid_price: Price,
        inventory: Inventory,
        time_remaining: f64,
    ) -> Price {
        self.params
            .reservation_price(mid_price, inventory, time_remaining)
    }

    fn half_spreads(&self, _mid: Price, inventory: Inventory, time_remaining: f64) -> (f64, f64) {
        let risk = self.params.inventory_risk(time_remaining);
        let execution = self.params.execution_term();
        let skew = 2.0 * inventory as f64;

        (
            (1.0 + skew) * risk / 2.0 + execution,
            (1.0 - skew) * risk / 2.0 + execution,
        )
    }

    fn name(&self) -> &str {
        "asymmetric_inventory"
    }
}
