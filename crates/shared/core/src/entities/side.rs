use serde::{Deserialize, Serialize};

/// Quote side (Bid or Ask)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Resting buy quote, filled by incoming sells
    Bid,
    /// Resting sell quote, filled by incoming buys
    Ask,
}

impl Side {
    /// Inventory change when a quote on this side is filled
    pub fn inventory_delta(&self) -> i64 {
        match self {
            Side::Bid => 1,
            Side::Ask => -1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Bid => write!(f, "bid"),
            Side::Ask => write!(f, "ask"),
        }
    }
}
