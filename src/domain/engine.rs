use rayon::prelude::*;

use super::grid::Generation;
use super::{Algorithm, Cell, Grid};

/// Computes the next generation of a [`Grid`] under Conway's rule.
///
/// Every read during a pass goes to the current buffer and every write to
/// the next buffer, so all cells update simultaneously. The swap happens
/// once, after the whole pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RuleEngine {
    algorithm: Algorithm,
}

impl RuleEngine {
    pub const fn new(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }

    /// Fill `grid`'s next buffer from its current buffer. Does not swap.
    pub fn step(&self, grid: &mut Grid) {
        let width = grid.width();
        let (generation, next) = grid.split_buffers();

        match self.algorithm {
            Algorithm::Serial => next
                .chunks_mut(width)
                .enumerate()
                .for_each(|(row, out)| evolve_row(generation, row, out)),
            Algorithm::Parallel => next
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(row, out)| evolve_row(generation, row, out)),
        }
    }

    /// Step, then promote the computed generation to current
    pub fn advance(&self, grid: &mut Grid) {
        self.step(grid);
        grid.swap();
    }
}

fn evolve_row(generation: Generation<'_>, row: usize, out: &mut [bool]) {
    out.iter_mut().enumerate().for_each(|(col, cell)| {
        let current = Cell::from(generation.is_alive(row, col));
        *cell = current
            .evolve(generation.count_alive_neighbors(row, col))
            .is_alive();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presets;

    fn grid_with(height: usize, width: usize, cells: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(height, width).unwrap();
        for &(row, col) in cells {
            grid.set(row, col, true).unwrap();
        }
        grid
    }

    fn alive(grid: &Grid) -> Vec<(usize, usize)> {
        grid.iter_alive().collect()
    }

    #[test]
    fn test_dead_grid_stays_dead() {
        for algorithm in Algorithm::all() {
            let mut grid = Grid::new(7, 5).unwrap();
            RuleEngine::new(algorithm).advance(&mut grid);
            assert_eq!(grid.population(), 0);
        }
    }

    #[test]
    fn test_block_is_still_life() {
        let cells = [(3, 3), (3, 4), (4, 3), (4, 4)];
        let mut grid = grid_with(8, 8, &cells);
        RuleEngine::default().advance(&mut grid);
        assert_eq!(alive(&grid), cells.to_vec());
    }

    #[test]
    fn test_blinker_oscillates() {
        let mut grid = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let engine = RuleEngine::new(Algorithm::Serial);
        engine.advance(&mut grid);
        assert_eq!(alive(&grid), vec![(1, 2), (2, 2), (3, 2)]);
        engine.advance(&mut grid);
        assert_eq!(alive(&grid), vec![(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_glider_translates_after_four_steps() {
        let mut grid = Grid::new(12, 12).unwrap();
        presets::glider().place_on(&mut grid, 1, 1);
        let start = alive(&grid);

        let engine = RuleEngine::default();
        for _ in 0..4 {
            engine.advance(&mut grid);
        }

        let expected: Vec<_> = start.iter().map(|&(r, c)| (r + 1, c + 1)).collect();
        assert_eq!(alive(&grid), expected);
    }

    #[test]
    fn test_glider_crosses_the_edge() {
        let mut grid = Grid::new(8, 8).unwrap();
        presets::glider().place_on(&mut grid, 6, 6);
        let start = grid.population();

        let engine = RuleEngine::default();
        for _ in 0..32 {
            engine.advance(&mut grid);
        }

        // 32 steps move the glider 8 cells: once around the torus
        assert_eq!(grid.population(), start);
        let mut expected = Grid::new(8, 8).unwrap();
        presets::glider().place_on(&mut expected, 6, 6);
        assert_eq!(alive(&grid), alive(&expected));
    }

    #[test]
    fn test_step_reads_only_current_generation() {
        // A row-by-row in-place update would let (0,1) see its already updated neighbor
        let mut grid = grid_with(6, 6, &[(0, 0), (0, 1), (0, 2)]);
        RuleEngine::new(Algorithm::Serial).step(&mut grid);
        assert_eq!(grid.population(), 3);
        grid.swap();
        assert_eq!(alive(&grid), vec![(0, 1), (1, 1), (5, 1)]);
    }

    #[test]
    fn test_serial_and_parallel_agree() {
        let mut serial = Grid::new(31, 17).unwrap();
        let mut toggle = false;
        serial.fill(|| {
            toggle = !toggle;
            toggle
        });
        let mut parallel = Grid::new(31, 17).unwrap();
        for (row, col) in serial.iter_alive() {
            parallel.set(row, col, true).unwrap();
        }

        for _ in 0..5 {
            RuleEngine::new(Algorithm::Serial).advance(&mut serial);
            RuleEngine::new(Algorithm::Parallel).advance(&mut parallel);
            assert_eq!(serial.cells(), parallel.cells());
        }
    }
}
