//! Geometric Brownian motion
//!
//! S[i] = S[i-1] × exp(−½σ²dt + σ√dt × Z[i-1])
//!
//! The −½σ²dt drift makes E[S[i] | S[i-1]] = S[i-1]. Paths stay strictly
//! positive when S0 > 0.

use super::{check_grid, check_sigma};
use mmsim_core::{Price, PricePath, Seed, SimError, SimResult};
use mmsim_ports::PriceProcess;
use rand::prelude::*;
use rand_distr::StandardNormal;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricBrownian {
    initial_price: Price,
    sigma: f64,
}

impl GeometricBrownian {
    pub fn new(initial_price: Price, sigma: f64) -> SimResult<Self> {
        if !(initial_price.is_finite() && initial_price > 0.0) {
            return Err(SimError::invalid(format!(
                "geometric process needs a positive initial price, got {initial_price}"
            )));
        }
        check_sigma(sigma)?;
        Ok(Self {
            initial_price,
            sigma,
        })
    }
}

impl PriceProcess for GeometricBrownian {
    fn simulate(&self, steps: usize, dt: f64, seed: Seed) -> SimResult<PricePath> {
        check_grid(steps, dt)?;

        let mut rng = StdRng::seed_from_u64(seed);
        let drift = -0.5 * self.sigma * self.sigma * dt;
        let scale = self.sigma * dt.sqrt();

        let mut prices = Vec::with_capacity(steps + 1);
        let mut current = self.initial_price;
        prices.push(current);
        for _ in 0..steps {
            let z: f64 = rng.sample(StandardNormal);
            current *= (drift + scale * z).exp();
            prices.push(current);
        }

        PricePath::new(prices)
    }

    fn initial_price(&self) -> f64 {
        self.initial_price
    }

    fn name(&self) -> &str {
        "geometric_brownian"
    }
}
