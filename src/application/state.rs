use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use super::config::{ConfigError, SimulationConfig};
use super::snapshot::Snapshot;
use crate::domain::{Cell, Grid, RuleEngine};

/// Everything a generation step touches, guarded by one lock.
struct World {
    grid: Grid,
    elapsed_ticks: u64,
    rng: StdRng,
}

/// SimulationState orchestrates the simulation.
///
/// Shared between the simulation loop and the input side. Grid transitions
/// (`tick`, `toggle_cell`, `reinitialize`) and snapshots each run under a
/// single lock; the pause flag is atomic and read without it.
pub struct SimulationState {
    world: Mutex<World>,
    paused: AtomicBool,
    engine: RuleEngine,
    seed_probability: f64,
    tick_interval: Duration,
}

impl SimulationState {
    /// Create a randomly seeded, running simulation
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let state = Self {
            world: Mutex::new(World {
                grid: Grid::new(config.height, config.width)?,
                elapsed_ticks: 0,
                rng,
            }),
            paused: AtomicBool::new(false),
            engine: RuleEngine::new(config.algorithm),
            seed_probability: config.seed_probability,
            tick_interval: config.tick_interval,
        };
        state.reinitialize(true);

        info!(
            height = config.height,
            width = config.width,
            algorithm = config.algorithm.name(),
            seed_probability = config.seed_probability,
            "Simulation state created",
        );
        Ok(state)
    }

    fn lock(&self) -> MutexGuard<'_, World> {
        // The grid is valid after every completed write, so a poisoned lock is still usable
        self.world.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn advance(&self, world: &mut World) -> bool {
        if self.is_paused() {
            return false;
        }
        self.engine.advance(&mut world.grid);
        world.elapsed_ticks += 1;
        trace!(tick = world.elapsed_ticks, "Generation advanced");
        true
    }

    fn capture(&self, world: &World) -> Snapshot {
        let (height, width) = world.grid.dimensions();
        Snapshot::new(
            height,
            width,
            world.grid.cells(),
            world.elapsed_ticks,
            self.is_paused(),
        )
    }

    /// Advance one generation unless paused. Returns whether the grid advanced.
    pub fn tick(&self) -> bool {
        self.advance(&mut self.lock())
    }

    /// Tick and copy the result in one critical section, so no edit lands in between
    pub fn tick_and_snapshot(&self) -> Snapshot {
        let mut world = self.lock();
        self.advance(&mut world);
        self.capture(&world)
    }

    /// Validated delay between two generations
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Release);
        debug!(paused, "Pause state set");
    }

    /// Flip the pause flag, returning the new value
    pub fn toggle_pause(&self) -> bool {
        let paused = !self.paused.fetch_xor(true, Ordering::AcqRel);
        debug!(paused, "Pause toggled");
        paused
    }

    /// Reseed every cell and reset the tick counter. The pause flag is left alone.
    pub fn reinitialize(&self, random: bool) {
        let mut world = self.lock();
        let World { grid, elapsed_ticks, rng } = &mut *world;
        if random {
            grid.fill(|| rng.random_bool(self.seed_probability));
        } else {
            grid.fill(|| false);
        }
        *elapsed_ticks = 0;
        info!(random, population = grid.population(), "Grid reinitialized");
    }

    /// Flip a single cell. Coordinates outside the grid are ignored.
    pub fn toggle_cell(&self, row: usize, col: usize) -> bool {
        let mut world = self.lock();
        match world.grid.get(row, col) {
            Ok(alive) => {
                let alive = Cell::from(alive).toggle().is_alive();
                // Bounds were just checked under the same lock
                let _ = world.grid.set(row, col, alive);
                debug!(row, col, alive, "Cell toggled");
                true
            }
            Err(err) => {
                debug!(%err, "Ignoring toggle outside the grid");
                false
            }
        }
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.lock().grid.get(row, col).unwrap_or(false)
    }

    /// Count of live cells, computed on demand
    pub fn population(&self) -> usize {
        self.lock().grid.population()
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.lock().elapsed_ticks
    }

    /// Consistent copy of the grid and counters
    pub fn snapshot(&self) -> Snapshot {
        self.capture(&self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Algorithm, presets};

    fn seeded(height: usize, width: usize) -> SimulationState {
        let config = SimulationConfig::default()
            .with_dimensions(height, width)
            .with_rng_seed(7);
        SimulationState::new(&config).unwrap()
    }

    fn empty(height: usize, width: usize) -> SimulationState {
        let state = seeded(height, width);
        state.reinitialize(false);
        state
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = SimulationConfig::default().with_dimensions(0, 3);
        assert!(SimulationState::new(&config).is_err());
    }

    #[test]
    fn test_starts_running_and_seeded() {
        let state = seeded(40, 40);
        assert!(!state.is_paused());
        assert_eq!(state.elapsed_ticks(), 0);
        assert!(state.population() > 0);
    }

    #[test]
    fn test_clear_empties_every_size() {
        for (h, w) in [(1, 1), (1, 7), (5, 1), (13, 29)] {
            let state = seeded(h, w);
            state.tick();
            state.reinitialize(false);
            assert_eq!(state.population(), 0);
            assert_eq!(state.elapsed_ticks(), 0);
        }
    }

    #[test]
    fn test_reinitialize_keeps_pause_flag() {
        let state = seeded(10, 10);
        state.set_paused(true);
        state.reinitialize(true);
        assert!(state.is_paused());
        state.set_paused(false);
        state.reinitialize(false);
        assert!(!state.is_paused());
    }

    #[test]
    fn test_tick_advances_counter() {
        let state = empty(10, 10);
        assert!(state.tick());
        assert!(state.tick());
        assert_eq!(state.elapsed_ticks(), 2);
    }

    #[test]
    fn test_paused_tick_is_noop() {
        let state = seeded(20, 20);
        state.tick();
        state.set_paused(true);
        let population = state.population();
        let before = state.snapshot();
        for _ in 0..5 {
            assert!(!state.tick());
        }
        assert_eq!(state.population(), population);
        assert_eq!(state.elapsed_ticks(), 1);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_toggle_pause_flips() {
        let state = seeded(3, 3);
        assert!(state.toggle_pause());
        assert!(state.is_paused());
        assert!(!state.toggle_pause());
        assert!(!state.is_paused());
    }

    #[test]
    fn test_toggle_cell_flips_exactly_one() {
        let state = seeded(8, 9);
        let before = state.snapshot();

        assert!(state.toggle_cell(3, 4));
        let after = state.snapshot();
        for row in 0..8 {
            for col in 0..9 {
                let flipped = (row, col) == (3, 4);
                assert_eq!(after.is_alive(row, col) != before.is_alive(row, col), flipped);
            }
        }

        assert!(state.toggle_cell(3, 4));
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_toggle_cell_out_of_range_ignored() {
        let state = seeded(4, 4);
        let before = state.snapshot();
        assert!(!state.toggle_cell(4, 0));
        assert!(!state.toggle_cell(0, 100));
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_tick_runs_rule_engine() {
        let state = empty(6, 6);
        for (row, col) in presets::blinker().cells {
            state.toggle_cell(row + 2, col + 1);
        }
        state.tick();
        let snapshot = state.snapshot();
        assert_eq!(snapshot.iter_alive().collect::<Vec<_>>(), vec![(1, 2), (2, 2), (3, 2)]);
        assert_eq!(snapshot.elapsed_ticks, 1);
        assert_eq!(snapshot.population, 3);
    }

    #[test]
    fn test_random_population_matches_probability() {
        let (height, width, trials) = (64, 64, 50);
        let probability = 0.2;
        let config = SimulationConfig::default()
            .with_dimensions(height, width)
            .with_seed_probability(probability)
            .with_rng_seed(0xC0FF_EE00);
        let state = SimulationState::new(&config).unwrap();

        let total: usize = (0..trials)
            .map(|_| {
                state.reinitialize(true);
                state.population()
            })
            .sum();
        let mean = total as f64 / trials as f64;
        let expected = probability * (height * width) as f64;
        assert!((mean - expected).abs() < 20.0, "mean {mean} vs expected {expected}");
    }

    #[test]
    fn test_zero_tick_interval_rejected() {
        let config = SimulationConfig::default().with_tick_interval(Duration::ZERO);
        assert_eq!(
            SimulationState::new(&config).err(),
            Some(ConfigError::ZeroTickInterval)
        );
        let config = SimulationConfig::default().with_tick_interval(Duration::from_millis(40));
        assert_eq!(
            SimulationState::new(&config).unwrap().tick_interval(),
            Duration::from_millis(40)
        );
    }

    #[test]
    fn test_tick_and_snapshot_reports_that_tick() {
        let state = empty(6, 6);
        for (row, col) in presets::blinker().cells {
            state.toggle_cell(row + 2, col + 1);
        }
        let snapshot = state.tick_and_snapshot();
        assert_eq!(snapshot.elapsed_ticks, 1);
        assert_eq!(snapshot.iter_alive().collect::<Vec<_>>(), vec![(1, 2), (2, 2), (3, 2)]);

        state.set_paused(true);
        let paused = state.tick_and_snapshot();
        assert!(paused.paused);
        assert_eq!(paused.elapsed_ticks, 1);
        assert_eq!(paused.population, 3);
    }

    #[test]
    fn test_serial_and_parallel_states_agree() {
        let build = |algorithm| {
            let config = SimulationConfig::default()
                .with_dimensions(20, 30)
                .with_rng_seed(21)
                .with_algorithm(algorithm);
            SimulationState::new(&config).unwrap()
        };
        let (serial, parallel) = (build(Algorithm::Serial), build(Algorithm::Parallel));
        for _ in 0..6 {
            assert_eq!(serial.tick_and_snapshot(), parallel.tick_and_snapshot());
        }
    }

    #[test]
    fn test_same_seed_same_grid() {
        assert_eq!(seeded(16, 16).snapshot(), seeded(16, 16).snapshot());
    }
}
