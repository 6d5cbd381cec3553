use crate::error::{SimError, SimResult};
use crate::values::Price;
use serde::{Deserialize, Serialize};

/// Simulated mid-price path of N+1 prices
///
/// The first entry is S0. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePath {
    prices: Vec<Price>,
}

impl PricePath {
    /// Wrap a generated path; needs at least S0 and one step
    pub fn new(prices: Vec<Price>) -> SimResult<Self> {
        if prices.len() < 2 {
            return Err(SimError::invalid(format!(
                "price path needs at least 2 points, got {}",
                prices.len()
            )));
        }
        Ok(Self { prices })
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Price> {
        self.prices.get(index).copied()
    }

    pub fn terminal(&self) -> Price {
        self.prices[self.prices.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Price> {
        self.prices.iter()
    }
}

impl std::ops::Index<usize> for PricePath {
    type Output = Price;

    fn index(&self, index: usize) -> &Self::Output {
        &self.prices[index]
    }
}
