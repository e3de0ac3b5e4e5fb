//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the component renderers
//!
//! # Example
//!
//! ```rust
//! use shlichus_board::app::AppState;
//! use shlichus_board::domain::Session;
//! use shlichus_board::ui::{render, Theme};
//!
//! let state = AppState::new("https://api.test", Session::default(), Theme::default());
//! render(&state, 24, 80); // Renders to stdout
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Renders the board to stdout for a pane of `rows` x `cols`.
///
/// Prints ANSI-styled output with explicit cursor positioning. Does not
/// clear the screen; the host does that before each render.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    components::render_board(&viewmodel, &state.theme, cols, rows);
}
