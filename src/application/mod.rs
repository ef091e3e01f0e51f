mod config;
mod sim_loop;
mod snapshot;
mod state;

pub use config::{
    ConfigError, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_CELL_SIZE,
    DEFAULT_SEED_PROBABILITY, DEFAULT_TICK_INTERVAL, SimulationConfig,
};
pub use sim_loop::{FrameSink, LoopStatus, SimulationLoop};
pub use snapshot::Snapshot;
pub use state::SimulationState;
