//! Quote Types
//!
//! Two-sided quote produced by a quoting policy for one step.

use crate::values::Price;
use serde::{Deserialize, Serialize};

/// Quote derived from (mid, inventory, time remaining) at one step
///
/// Half-spreads are measured from the reservation price, not the mid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub reservation_price: Price,
    pub bid_half_spread: f64,
    pub ask_half_spread: f64,
    pub bid_price: Price,
    pub ask_price: Price,
}

impl QuoteRecord {
    /// bid = R − bid half-spread, ask = R + ask half-spread
    pub fn new(reservation_price: Price, bid_half_spread: f64, ask_half_spread: f64) -> Self {
        Self {
            reservation_price,
            bid_half_spread,
            ask_half_spread,
            bid_price: reservation_price - bid_half_spread,
            ask_price: reservation_price + ask_half_spread,
        }
    }

    /// Same half-spread on both sides of the reservation price
    pub fn symmetric(reservation_price: Price, half_spread: f64) -> Self {
        Self::new(reservation_price, half_spread, half_spread)
    }

    /// Quoted spread: ask − bid
    pub fn spread(&self) -> f64 {
        self.ask_price - self.bid_price
    }

    /// Check if quote is crossed
    pub fn is_crossed(&self) -> bool {
        self.bid_price >= self.ask_price
    }

    /// First field that is NaN or infinite, if any
    pub fn first_non_finite(&self) -> Option<(&'static str, f64)> {
        [
            ("reservation_price", self.reservation_price),
            ("bid_half_spread", self.bid_half_spread),
            ("ask_half_spread", self.ask_half_spread),
            ("bid_price", self.bid_price),
            ("ask_price", self.ask_price),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
    }
}
