//! Price sequences fed to the position math.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};

pub trait PricePathGenerator {
    /// Produces the starting price followed by `steps` further prices.
    fn generate(&mut self, steps: usize) -> Vec<f64>;
}

/// Evenly spaced prices from `start` to `end`, both included.
#[derive(Debug, Clone, Copy)]
pub struct LinearPriceGrid {
    pub start: f64,
    pub end: f64,
}

impl LinearPriceGrid {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

impl PricePathGenerator for LinearPriceGrid {
    fn generate(&mut self, steps: usize) -> Vec<f64> {
        if steps == 0 {
            return vec![self.start];
        }

        let step = (self.end - self.start) / steps as f64;
        (0..=steps)
            .map(|i| {
                if i == steps {
                    self.end
                } else {
                    self.start + step * i as f64
                }
            })
            .collect()
    }
}

/// A fixed, caller-supplied path.
#[derive(Debug, Clone)]
pub struct DeterministicPricePath {
    pub prices: Vec<f64>,
}

impl DeterministicPricePath {
    pub fn new(prices: Vec<f64>) -> Self {
        Self { prices }
    }
}

impl PricePathGenerator for DeterministicPricePath {
    fn generate(&mut self, _steps: usize) -> Vec<f64> {
        self.prices.clone()
    }
}

pub struct GeometricBrownianMotion {
    pub initial_price: f64,
    pub drift: f64,      // annualized drift (mu)
    pub volatility: f64, // annualized volatility (sigma)
    pub time_step: f64,  // time step in years (dt) e.g. 1/365 for daily
    rng: StdRng,
}

impl GeometricBrownianMotion {
    pub fn new(initial_price: f64, drift: f64, volatility: f64, time_step: f64) -> Self {
        Self {
            initial_price,
            drift,
            volatility,
            time_step,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Makes the generated paths reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl PricePathGenerator for GeometricBrownianMotion {
    fn generate(&mut self, steps: usize) -> Vec<f64> {
        let mut prices = Vec::with_capacity(steps + 1);
        prices.push(self.initial_price);

        let dt = self.time_step;
        let drift_term = (self.drift - 0.5 * self.volatility.powi(2)) * dt;
        let vol_term = self.volatility * dt.sqrt();

        let mut current_price = self.initial_price;
        for _ in 0..steps {
            let z: f64 = StandardNormal.sample(&mut self.rng);
            current_price *= (drift_term + vol_term * z).exp();
            prices.push(current_price);
        }

        prices
    }
}
