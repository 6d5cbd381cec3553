//! Avellaneda-Stoikov under geometric price dynamics
//!
//! With dS = σS dW, the variance of the terminal price scales as
//! S² × (1 − e^{−σ²τ}) instead of σ²τ:
//!
//! r = S − q × γ × S²(1 − e^{−σ²τ})
//! spread = γ × S²(1 − e^{−σ²τ}) + (2/γ) × ln(1 + γ/κ)

use super::RiskParams;
use mmsim_core::{Inventory, Price};
use mmsim_ports::QuotingPolicy;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricInventoryAware {
    params: RiskParams,
}

impl GeometricInventoryAware {
    pub fn new(params: RiskParams) -> Self {
        Self { params }
    }

    /// S²(1 − e^{−σ²τ})
    fn variance_scale(&self, mid_price: Price, time_remaining: f64) -> f64 {
        let sigma = self.params.sigma;
        mid_price * mid_price * (1.0 - (-sigma * sigma * time_remaining).exp())
    }
}

impl QuotingPolicy for GeometricInventoryAware {
    fn reservation_price(
        &self,
        mid_price: Price,
        inventory: Inventory,
        time_remaining: f64,
    ) -> Price {
        let risk = self.params.gamma * self.variance_scale(mid_price, time_remaining);
        mid_price - inventory as f64 * risk
    }

    fn half_spreads(
        &self,
        mid_price: Price,
        _inventory: Inventory,
        time_remaining: f64,
    ) -> (f64, f64) {
        let spread = self.params.gamma * self.variance_scale(mid_price, time_remaining)
            + 2.0 * self.params.execution_term();
        (spread / 2.0, spread / 2.0)
    }

    fn name(&self) -> &str {
        "geometric_inventory_aware"
    }
}
