use std::sync::{Arc, mpsc};

use anyhow::{Context, Result};
use macroquad::prelude::*;
use tracing::{error, info};

use life_engine::{
    SimulationConfig, SimulationLoop, SimulationState, Snapshot,
    application::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_CELL_SIZE},
    input, rendering,
};

fn window_conf() -> Conf {
    Conf {
        window_title: "Game of Life".to_owned(),
        window_width: DEFAULT_CANVAS_WIDTH as i32,
        window_height: DEFAULT_CANVAS_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        error!("{err:#}");
    }
}

async fn run() -> Result<()> {
    let config = SimulationConfig::default();
    let cell_size = DEFAULT_CELL_SIZE as f32;
    let state = Arc::new(
        SimulationState::new(&config).context("invalid simulation configuration")?,
    );

    // The loop hands each tick's snapshot over; the render loop keeps the latest
    let (frame_tx, frame_rx) = mpsc::channel();
    let mut sim_loop = SimulationLoop::spawn(Arc::clone(&state), move |snapshot: Snapshot| {
        let _ = frame_tx.send(snapshot);
    })
    .context("failed to start simulation loop")?;

    info!("Space: pause, C: clear, R: randomize, click: toggle cell, Esc: quit");
    let mut frame = state.snapshot();

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        for event in input::poll_events(cell_size, (frame.height, frame.width)) {
            input::dispatch(&state, event);
        }

        if let Some(latest) = frame_rx.try_iter().last() {
            frame = latest;
        }

        rendering::draw_frame(&frame, cell_size);
        next_frame().await;
    }

    sim_loop.stop();
    info!(elapsed_ticks = state.elapsed_ticks(), "Game of Life stopped");
    Ok(())
}
