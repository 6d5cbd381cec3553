//! Inventory-blind baseline
//!
//! Quotes the arithmetic optimal spread evenly around the mid price and
//! ignores inventory entirely. Used as the control when measuring what
//! inventory awareness buys.

use super::RiskParams;
use mmsim_core::{Inventory, Price};
use mmsim_ports::QuotingPolicy;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetricSpread {
    params: RiskParams,
}

impl SymmetricSpread {
    pub fn new(params: RiskParams) -> Self {
        Self { params }
    }
}

impl QuotingPolicy for SymmetricSpread {
    fn reservation_price(&self, mid_price: Price, _inventory: Inventory, _tau: f64) -> Price {
        mid_price
    }

    fn half_spreads(&self, _mid: Price, _inventory: Inventory, time_remaining: f64) -> (f64, f64) {
        let half = self.params.optimal_spread(time_remaining) / 2.0;
        (half, half)
    }

    fn name(&self) -> &str {
        "symmetric"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reservation_is_mid() {
        let policy = SymmetricSpread::new(RiskParams::new(0.1, 2.0, 1.5).unwrap());

        for q in [-50, -1, 0, 1, 50] {
            for tau in [0.0, 0.5, 1.0] {
                assert_eq!(policy.reservation_price(101.5, q, tau), 101.5);
            }
        }
    }

    #[test]
    fn test_spread_matches_inventory_aware() {
        let params = RiskParams::new(0.1, 2.0, 1.5).unwrap();
        let policy = SymmetricSpread::new(params);

        let quote = policy.quote(100.0, 4, 0.25);
        assert_relative_eq!(quote.spread(), params.optimal_spread(0.25), epsilon = 1e-12);
    }

    #[test]
    fn test_half_spreads_sum_to_optimal_spread() {
        for gamma in [0.01, 0.1, 1.0] {
            for kappa in [0.5, 1.5, 10.0] {
                let params = RiskParams::new(gamma, 2.0, kappa).unwrap();
                let policy = SymmetricSpread::new(params);
                for tau in [0.0, 0.3, 1.0] {
                    let (bid, ask) = policy.half_spreads(100.0, 3, tau);
                    assert_relative_eq!(bid + ask, params.optimal_spread(tau), epsilon = 1e-12);
                    assert_relative_eq!(bid, ask);
                }
            }
        }
    }
}
