//! Avellaneda-Stoikov Optimal Market Making
//!
//! **Reservation Price** (where you'd be indifferent to trading):
//! r = S − q × γ × σ² × τ
//!
//! **Optimal Spread**:
//! spread = γσ²τ + (2/γ) × ln(1 + γ/κ), split evenly around r
//!
//! Where:
//! - γ = risk aversion parameter
//! - q = current inventory (positive = long)
//! - σ = volatility
//! - τ = time remaining
//! - κ = market depth

use super::RiskParams;
use mmsim_core::{Inventory, Price};
use mmsim_ports::QuotingPolicy;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InventoryAware {
    params: RiskParams,
}

impl InventoryAware {
    pub fn new(params: RiskParams) -> Self {
        Self { params }
    }
}

impl QuotingPolicy for InventoryAware {
    fn reservation_price(
        &self,
        mid_price: Price,
        inventory: Inventory,
        time_remaining: f64,
    ) -> Price {
        self.params
            .reservation_price(mid_price, inventory, time_remaining)
    }

    fn half_spreads(&self, _mid: Price, _inventory: Inventory, time_remaining: f64) -> (f64, f64) {
        let half = self.params.optimal_spread(time_remaining) / 2.0;
        (half, half)
    }

    fn name(&self) -> &str {
        "inventory_aware"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn policy() -> InventoryAware {
        InventoryAware::new(RiskParams::new(0.1, 2.0, 1.5).unwrap())
    }

    #[test]
    fn test_flat_inventory_quotes_around_mid() {
        let p = policy();
        assert_eq!(p.reservation_price(100.0, 0, 1.0), 100.0);
        assert_ne!(p.reservation_price(100.0, 1, 1.0), 100.0);
    }

    #[test]
    fn test_reference_values() {
        let p = policy();
        let quote = p.quote(100.0, 3, 0.5);

        // R = 100 − 3 × 0.1 × 4 × 0.5
        assert_relative_eq!(quote.reservation_price, 99.4, epsilon = 1e-12);
        let spread = 0.1 * 4.0 * 0.5 + 20.0 * (1.0 + 0.1 / 1.5f64).ln();
        assert_relative_eq!(quote.spread(), spread, epsilon = 1e-12);
        assert_relative_eq!(quote.bid_half_spread, quote.ask_half_spread);
    }

    #[test]
    fn test_long_inventory_lowers_quotes() {
        let p = policy();
        let flat = p.quote(100.0, 0, 1.0);
        let long = p.quote(100.0, 5, 1.0);

        assert!(long.bid_price < flat.bid_price);
        assert!(long.ask_price < flat.ask_price);
    }

    #[test]
    fn test_spread_narrows_toward_close() {
        let p = policy();
        assert!(p.quote(100.0, 0, 0.0).spread() < p.quote(100.0, 0, 1.0).spread());
        // At τ = 0 only the execution term remains
        let execution = RiskParams::new(0.1, 2.0, 1.5).unwrap().execution_term();
        assert_relative_eq!(
            p.quote(100.0, 7, 0.0).spread(),
            2.0 * execution,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_half_spreads_sum_to_optimal_spread() {
        for gamma in [0.01, 0.1, 1.0] {
            for kappa in [0.5, 1.5, 10.0] {
                let params = RiskParams::new(gamma, 2.0, kappa).unwrap();
                let p = InventoryAware::new(params);
                for tau in [0.0, 0.3, 1.0] {
                    for q in [-10, 0, 10] {
                        let (bid, ask) = p.half_spreads(100.0, q, tau);
                        assert_relative_eq!(bid + ask, params.optimal_spread(tau), epsilon = 1e-12);
                        assert_relative_eq!(bid, ask);
                    }
                }
            }
        }
    }
}
