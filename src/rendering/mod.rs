use macroquad::prelude::*;

use crate::application::Snapshot;

const FONT_SIZE: f32 = 20.0;
const ALIVE_COLOR: Color = BLACK;
const TEXT_COLOR: Color = GRAY;

/// Draw every live cell of the snapshot as a filled square
pub fn draw_grid(snapshot: &Snapshot, cell_size: f32) {
    for (row, col) in snapshot.iter_alive() {
        draw_rectangle(
            col as f32 * cell_size,
            row as f32 * cell_size,
            cell_size,
            cell_size,
            ALIVE_COLOR,
        );
    }
}

/// Elapsed ticks and population in the top-left corner, "Paused" centred
pub fn draw_overlay(snapshot: &Snapshot) {
    draw_text(
        &format!("Elapsed time: {}", snapshot.elapsed_ticks),
        10.0,
        20.0,
        FONT_SIZE,
        TEXT_COLOR,
    );
    draw_text(
        &format!("Population:   {}", snapshot.population),
        10.0,
        35.0,
        FONT_SIZE,
        TEXT_COLOR,
    );

    if snapshot.paused {
        let label = "Paused";
        let size = measure_text(label, None, FONT_SIZE as u16, 1.0);
        draw_text(
            label,
            (screen_width() - size.width) / 2.0,
            screen_height() / 2.0,
            FONT_SIZE,
            TEXT_COLOR,
        );
    }
}

/// Render a full frame
pub fn draw_frame(snapshot: &Snapshot, cell_size: f32) {
    clear_background(WHITE);
    draw_grid(snapshot, cell_size);
    draw_overlay(snapshot);
}
