//! Step throughput: serial vs row-parallel rule engine

use std::time::Instant;

use anyhow::{Result, ensure};
use life_engine::{Algorithm, Grid, RuleEngine, presets};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_grid(size: usize, rng: &mut StdRng) -> Result<Grid> {
    let mut grid = Grid::new(size, size)?;
    grid.fill(|| rng.random_bool(0.2));
    Ok(grid)
}

fn benchmark(algorithm: Algorithm, size: usize, iterations: u32) -> Result<f64> {
    let mut rng = StdRng::seed_from_u64(size as u64);
    let mut grid = random_grid(size, &mut rng)?;
    let engine = RuleEngine::new(algorithm);

    let start = Instant::now();
    for _ in 0..iterations {
        engine.advance(&mut grid);
    }
    Ok(start.elapsed().as_secs_f64() * 1000.0 / iterations as f64)
}

/// Every preset keeps its population over 256 generations on a 64x64 torus
fn preset_sanity_check() -> Result<()> {
    let engine = RuleEngine::default();
    for pattern in presets::all_patterns() {
        let mut grid = Grid::new(64, 64)?;
        pattern.place_on(&mut grid, 0, 0);
        for _ in 0..256 {
            engine.advance(&mut grid);
        }
        ensure!(
            grid.population() == pattern.cells.len(),
            "{} lost cells after 256 generations",
            pattern.name
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    preset_sanity_check()?;

    println!("=== Game of Life Step Benchmark ===\n");

    let sizes = [64, 256, 512, 1024, 2048];
    let iterations = 20;

    println!("{:>10} {:>12} {:>12} {:>10}", "Size", "Serial", "Parallel", "Speedup");
    println!("{:-<48}", "");

    for size in sizes {
        let serial_ms = benchmark(Algorithm::Serial, size, iterations)?;
        let parallel_ms = benchmark(Algorithm::Parallel, size, iterations)?;

        println!(
            "{:>10} {:>12.3} {:>12.3} {:>9.1}x",
            format!("{}x{}", size, size),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms
        );
    }

    Ok(())
}
