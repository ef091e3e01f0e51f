// Domain layer - grid, rule engine, patterns
pub mod domain;

// Application layer - shared state, tick loop, configuration
pub mod application;

// Infrastructure layer - macroquad input and rendering glue
pub mod input;
pub mod rendering;

// Re-exports for convenience
pub use application::{
    ConfigError, FrameSink, LoopStatus, SimulationConfig, SimulationLoop, SimulationState,
    Snapshot,
};
pub use domain::{Algorithm, Cell, Grid, GridError, Pattern, RuleEngine, presets};
pub use input::InputEvent;
