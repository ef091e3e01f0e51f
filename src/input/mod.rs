use macroquad::prelude::*;

use crate::application::SimulationState;

/// Platform-agnostic control events fed into the simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    TogglePause,
    ClearGrid,
    RandomizeGrid,
    ToggleCell { row: usize, col: usize },
}

/// Apply an event to the state. Editing events only take effect while paused.
/// Returns whether the event changed anything.
pub fn dispatch(state: &SimulationState, event: InputEvent) -> bool {
    match event {
        InputEvent::TogglePause => {
            state.toggle_pause();
            true
        }
        _ if !state.is_paused() => false,
        InputEvent::ClearGrid => {
            state.reinitialize(false);
            true
        }
        InputEvent::RandomizeGrid => {
            state.reinitialize(true);
            true
        }
        InputEvent::ToggleCell { row, col } => state.toggle_cell(row, col),
    }
}

/// Convert a pixel position to (row, col), or None when it falls outside the grid
pub fn pixel_to_cell(
    x: f32,
    y: f32,
    cell_size: f32,
    (height, width): (usize, usize),
) -> Option<(usize, usize)> {
    if x < 0.0 || y < 0.0 || cell_size <= 0.0 {
        return None;
    }
    let (row, col) = ((y / cell_size) as usize, (x / cell_size) as usize);
    (row < height && col < width).then_some((row, col))
}

/// Poll macroquad for this frame's key presses and clicks
pub fn poll_events(cell_size: f32, dimensions: (usize, usize)) -> Vec<InputEvent> {
    let keys = [
        (KeyCode::Space, InputEvent::TogglePause),
        (KeyCode::C, InputEvent::ClearGrid),
        (KeyCode::R, InputEvent::RandomizeGrid),
    ];

    let mut events: Vec<_> = keys
        .iter()
        .filter(|(key, _)| is_key_pressed(*key))
        .map(|(_, event)| *event)
        .collect();

    if is_mouse_button_pressed(MouseButton::Left) {
        let (x, y) = mouse_position();
        if let Some((row, col)) = pixel_to_cell(x, y, cell_size, dimensions) {
            events.push(InputEvent::ToggleCell { row, col });
        }
    }

    events
}
