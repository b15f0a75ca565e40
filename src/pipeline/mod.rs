//! Pipeline
//!
//! Connects the truncation engine to the terminal.
//!
//! # Data Flow
//!
//! ```text
//! crossterm Resize ──► terminal width signal ──► component effect ──► pass
//!                                                                      │
//!                       MeasureContainer ◄── ContainerStyle ◄──────────┘
//! ```
//!
//! 1. **terminal** - size and cell-height signals, resize routing
//! 2. **pass** - one truncation from container acquisition to release

pub mod pass;
pub mod terminal;

pub use pass::{run_pass, try_run_pass, PassOptions};
pub use terminal::{
    cell_height, cell_height_signal, detect_cell_metrics, detect_terminal_size, handle_resize, set_cell_height,
    set_terminal_size, terminal_height, terminal_width, terminal_width_signal,
};
