//! Arithmetic Brownian motion
//!
//! S[i] = S[i-1] + σ × √dt × Z[i-1],  Z ~ N(0, 1) i.i.d.
//!
//! Prices can go negative; that is part of the model, not an error.

use super::{check_grid, check_sigma};
use mmsim_core::{Price, PricePath, Seed, SimError, SimResult};
use mmsim_ports::PriceProcess;
use rand::prelude::*;
use rand_distr::StandardNormal;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArithmeticBrownian {
    initial_price: Price,
    sigma: f64,
}

impl ArithmeticBrownian {
    pub fn new(initial_price: Price, sigma: f64) -> SimResult<Self> {
        if !initial_price.is_finite() {
            return Err(SimError::invalid("initial price must be finite"));
        }
        check_sigma(sigma)?;
        Ok(Self {
            initial_price,
            sigma,
        })
    }
}

impl PriceProcess for ArithmeticBrownian {
    fn simulate(&self, steps: usize, dt: f64, seed: Seed) -> SimResult<PricePath> {
        check_grid(steps, dt)?;

        let mut rng = StdRng::seed_from_u64(seed);
        let scale = self.sigma * dt.sqrt();

        let mut prices = Vec::with_capacity(steps + 1);
        let mut current = self.initial_price;
        prices.push(current);
        for _ in 0..steps {
            let z: f64 = rng.sample(StandardNormal);
            current += scale * z;
            prices.push(current);
        }

        PricePath::new(prices)
    }

    fn initial_price(&self) -> f64 {
        self.initial_price
    }

    fn name(&self) -> &str {
        "arithmetic_brownian"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_path_shape() {
        let process = ArithmeticBrownian::new(100.0, 2.0).unwrap();
        let path = process.simulate(200, 0.005, 42).unwrap();

        assert_eq!(path.len(), 201);
        assert_eq!(path[0], 100.0);
    }

    #[test]
    fn test_first_increment_uses_first_draw() {
        let process = ArithmeticBrownian::new(100.0, 2.0).unwrap();
        let path = process.simulate(5, 0.005, 42).unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let z0: f64 = rng.sample(StandardNormal);
        assert_relative_eq!(path[1], 100.0 + 2.0 * 0.005f64.sqrt() * z0, epsilon = 1e-12);
    }

    #[test]
    fn test_seed_determinism() {
        let process = ArithmeticBrownian::new(100.0, 2.0).unwrap();

        let a = process.simulate(50, 0.01, 7).unwrap();
        let b = process.simulate(50, 0.01, 7).unwrap();
        let c = process.simulate(50, 0.01, 8).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_zero_volatility_is_flat() {
        let process = ArithmeticBrownian::new(100.0, 0.0).unwrap();
        let path = process.simulate(10, 0.1, 3).unwrap();
        assert!(path.iter().all(|&p| p == 100.0));
    }

    #[test]
    fn test_invalid_grid() {
        let process = ArithmeticBrownian::new(100.0, 2.0).unwrap();

        assert!(process.simulate(0, 0.01, 1).unwrap_err().is_invalid_config());
        assert!(process.simulate(10, 0.0, 1).unwrap_err().is_invalid_config());
        assert!(process.simulate(10, -0.1, 1).unwrap_err().is_invalid_config());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(ArithmeticBrownian::new(100.0, -1.0).is_err());
        assert!(ArithmeticBrownian::new(f64::NAN, 1.0).is_err());
    }
}
