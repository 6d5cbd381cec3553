//! Quoting policies
//!
//! All policies quote around a reservation price R with half-spreads
//! measured from R. They differ in how inventory moves R and how the total
//! spread is split between the two sides.
//!
//! Shared terms (Avellaneda & Stoikov 2008):
//! - inventory risk: γσ²τ
//! - execution term: (1/γ) × ln(1 + γ/κ)

mod asymmetric;
mod avellaneda_stoikov;
mod geometric;
mod symmetric;

pub use asymmetric::AsymmetricInventory;
pub use avellaneda_stoikov::InventoryAware;
pub use geometric::GeometricInventoryAware;
pub use symmetric::SymmetricSpread;

use mmsim_core::{Inventory, Price, SimError, SimResult, TrialConfig};
use mmsim_ports::QuotingPolicy;
use serde::{Deserialize, Serialize};

/// Risk parameters shared by every policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskParams {
    /// Risk aversion γ
    pub gamma: f64,
    /// Mid price volatility σ
    pub sigma: f64,
    /// Market depth κ
    pub kappa: f64,
}

impl RiskParams {
    /// Validated parameters; γ and κ must be positive, σ non-negative
    pub fn new(gamma: f64, sigma: f64, kappa: f64) -> SimResult<Self> {
        if !(gamma.is_finite() && gamma > 0.0) {
            return Err(SimError::invalid(format!(
                "gamma must be positive, got {gamma}"
            )));
        }
        if !(kappa.is_finite() && kappa > 0.0) {
            return Err(SimError::invalid(format!(
                "kappa must be positive, got {kappa}"
            )));
        }
        if !(sigma.is_finite() && sigma >= 0.0) {
            return Err(SimError::invalid(format!(
                "sigma must be non-negative, got {sigma}"
            )));
        }
        Ok(Self {
            gamma,
            sigma,
            kappa,
        })
    }

    pub fn from_config(config: &TrialConfig) -> SimResult<Self> {
        Self::new(config.gamma, config.sigma, config.kappa)
    }

    /// γσ²τ
    pub fn inventory_risk(&self, time_remaining: f64) -> f64 {
        self.gamma * self.sigma * self.sigma * time_remaining
    }

    /// (1/γ) × ln(1 + γ/κ)
    pub fn execution_term(&self) -> f64 {
        (1.0 + self.gamma / self.kappa).ln() / self.gamma
    }

    /// Full arithmetic spread: γσ²τ + (2/γ) × ln(1 + γ/κ)
    pub fn optimal_spread(&self, time_remaining: f64) -> f64 {
        self.inventory_risk(time_remaining) + 2.0 * self.execution_term()
    }

    /// Arithmetic reservation price: S − qγσ²τ
    pub fn reservation_price(
        &self,
        mid_price: Price,
        inventory: Inventory,
        time_remaining: f64,
    ) -> Price {
        mid_price - inventory as f64 * self.inventory_risk(time_remaining)
    }
}

/// Which quoting policy a scenario uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Avellaneda-Stoikov with arithmetic price dynamics
    #[default]
    InventoryAware,
    /// Avellaneda-Stoikov with geometric price dynamics
    GeometricInventoryAware,
    /// Inventory-skewed split of the arithmetic spread
    Asymmetric,
    /// R = S baseline with the arithmetic spread
    Symmetric,
}

impl PolicyKind {
    pub fn build(self, config: &TrialConfig) -> SimResult<PolicyVariant> {
        let params = RiskParams::from_config(config)?;
        Ok(match self {
            PolicyKind::InventoryAware => {
                PolicyVariant::InventoryAware(InventoryAware::new(params))
            }
            PolicyKind::GeometricInventoryAware => {
                PolicyVariant::GeometricInventoryAware(GeometricInventoryAware::new(params))
            }
            PolicyKind::Asymmetric => PolicyVariant::Asymmetric(AsymmetricInventory::new(params)),
            PolicyKind::Symmetric => PolicyVariant::Symmetric(SymmetricSpread::new(params)),
        })
    }
}

/// Configured quoting policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolicyVariant {
    InventoryAware(InventoryAware),
    GeometricInventoryAware(GeometricInventoryAware),
    Asymmetric(AsymmetricInventory),
    Symmetric(SymmetricSpread),
}

impl PolicyVariant {
    fn as_policy(&self) -> &dyn QuotingPolicy {
        match self {
            PolicyVariant::InventoryAware(p) => p,
            PolicyVariant::GeometricInventoryAware(p) => p,
            PolicyVariant::Asymmetric(p) => p,
            PolicyVariant::Symmetric(p) => p,
        }
    }
}

impl QuotingPolicy for PolicyVariant {
    fn reservation_price(
        &self,
        mid_price: Price,
        inventory: Inventory,
        time_remaining: f64,
    ) -> Price {
        self.as_policy()
            .reservation_price(mid_price, inventory, time_remaining)
    }

    fn half_spreads(
        &self,
        mid_price: Price,
        inventory: Inventory,
        time_remaining: f64,
    ) -> (f64, f64) {
        self.as_policy()
            .half_spreads(mid_price, inventory, time_remaining)
    }

    fn name(&self) -> &str {
        self.as_policy().name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_execution_term() {
        let params = RiskParams::new(0.1, 2.0, 1.5).unwrap();
        assert_relative_eq!(params.execution_term(), 10.0 * (1.0 + 0.1 / 1.5f64).ln());
        assert_relative_eq!(params.inventory_risk(0.5), 0.1 * 4.0 * 0.5);
    }

    #[test]
    fn test_rejects_bad_params() {
        assert!(RiskParams::new(0.0, 2.0, 1.5).unwrap_err().is_invalid_config());
        assert!(RiskParams::new(-0.1, 2.0, 1.5).is_err());
        assert!(RiskParams::new(0.1, 2.0, 0.0).is_err());
        assert!(RiskParams::new(0.1, -2.0, 1.5).is_err());
        assert!(RiskParams::new(0.1, 0.0, 1.5).is_ok());
    }

    #[test]
    fn test_kind_dispatch() {
        let config = TrialConfig::default();

        for (kind, name) in [
            (PolicyKind::InventoryAware, "inventory_aware"),
            (PolicyKind::GeometricInventoryAware, "geometric_inventory_aware"),
            (PolicyKind::Asymmetric, "asymmetric_inventory"),
            (PolicyKind::Symmetric, "symmetric"),
        ] {
            let policy = kind.build(&config).unwrap();
            assert_eq!(policy.name(), name);
        }
    }

    #[test]
    fn test_kind_rejects_invalid_config() {
        let config = TrialConfig::default().with_gamma(0.0);
        assert!(PolicyKind::Symmetric.build(&config).is_err());
    }
}
