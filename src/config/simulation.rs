//! Price model configuration.

use serde::Deserialize;

/// Random-walk price model settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed RNG seed for reproducible runs (random when absent).
    pub seed: Option<u64>,
    /// Centre of the randomized starting price.
    pub initial_price: f64,
    /// Width of the band the starting price is drawn from.
    pub initial_spread: f64,
    /// Width of the uniform per-tick price change.
    pub volatility: f64,
    /// Constant added to every tick.
    pub drift: f64,
    /// Price never drops below this value.
    pub floor_price: f64,
    /// Optional upper clamp. Unbounded when absent.
    pub ceiling_price: Option<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            initial_price: 50_000.0,
            initial_spread: 1_000.0,
            volatility: 50.0,
            drift: 0.1,
            floor_price: 45_000.0,
            ceiling_price: None,
        }
    }
}
