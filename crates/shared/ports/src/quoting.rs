//! Quoting Policy Protocol
//!
//! Core trait for per-step quote generation.

use mmsim_core::{Inventory, Price, QuoteRecord};

/// Quoting policy interface
///
/// Policies are pure functions of their fixed parameters and the arguments:
/// no state changes between calls, so one instance serves every step of
/// every trial.
pub trait QuotingPolicy: Send + Sync {
    /// Inventory-risk-adjusted fair value used as the quoting center
    ///
    /// # Arguments
    /// * `mid_price` - Current mid price S
    /// * `inventory` - Signed inventory q
    /// * `time_remaining` - τ = T − t
    fn reservation_price(&self, mid_price: Price, inventory: Inventory, time_remaining: f64)
    -> Price;

    /// (bid half-spread, ask half-spread) measured from the reservation price
    fn half_spreads(
        &self,
        mid_price: Price,
        inventory: Inventory,
        time_remaining: f64,
    ) -> (f64, f64);

    /// Full quote: bid = R − bid half, ask = R + ask half
    fn quote(&self, mid_price: Price, inventory: Inventory, time_remaining: f64) -> QuoteRecord {
        let reservation = self.reservation_price(mid_price, inventory, time_remaining);
        let (bid_half, ask_half) = self.half_spreads(mid_price, inventory, time_remaining);
        QuoteRecord::new(reservation, bid_half, ask_half)
    }

    /// Get the policy name for logging/debugging
    fn name(&self) -> &str;
}
