use std::time::Duration;

use thiserror::Error;

use crate::domain::{Algorithm, GridError};

pub const DEFAULT_CANVAS_WIDTH: u32 = 900;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 512;
pub const DEFAULT_CELL_SIZE: u32 = 15;
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(200);
pub const DEFAULT_SEED_PROBABILITY: f64 = 0.2;

/// Invalid simulation settings, reported at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("seed probability {0} must be between 0.0 and 1.0")]
    InvalidProbability(f64),
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,
}

/// Settings fixed for the lifetime of a simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Delay between two generations.
    pub tick_interval: Duration,
    /// Probability that a cell starts alive when the grid is randomized.
    pub seed_probability: f64,
    /// Optional RNG seed for reproducible grids.
    pub rng_seed: Option<u64>,
    pub algorithm: Algorithm,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::from_canvas(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT, DEFAULT_CELL_SIZE)
    }
}

impl SimulationConfig {
    /// Derive the grid size from a pixel canvas and a cell size in pixels.
    /// Partial cells at the right and bottom edges are dropped.
    pub fn from_canvas(canvas_width: u32, canvas_height: u32, cell_size: u32) -> Self {
        let cell_size = cell_size.max(1);
        Self {
            width: (canvas_width / cell_size) as usize,
            height: (canvas_height / cell_size) as usize,
            tick_interval: DEFAULT_TICK_INTERVAL,
            seed_probability: DEFAULT_SEED_PROBABILITY,
            rng_seed: None,
            algorithm: Algorithm::default(),
        }
    }

    pub fn with_dimensions(mut self, height: usize, width: usize) -> Self {
        self.height = height;
        self.width = width;
        self
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn with_seed_probability(mut self, probability: f64) -> Self {
        self.seed_probability = probability;
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.height == 0 || self.width == 0 {
            return Err(GridError::InvalidDimensions {
                height: self.height,
                width: self.width,
            }
            .into());
        }
        if !(0.0..=1.0).contains(&self.seed_probability) {
            return Err(ConfigError::InvalidProbability(self.seed_probability));
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}
