mod algorithm;
mod cell;
mod engine;
mod grid;
mod patterns;

pub use algorithm::Algorithm;
pub use cell::Cell;
pub use engine::RuleEngine;
pub use grid::{Generation, Grid, GridError};
pub use patterns::{Pattern, presets};
