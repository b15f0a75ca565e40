//! Terminal state signals.
//!
//! Reactive signals for the terminal size and the pixel height of one cell
//! row. Components that follow the terminal read [`terminal_width_signal`]
//! and [`cell_height_signal`] inside their effect, so a resize or a new cell
//! height re-runs them.

use std::cell::RefCell;
use std::io;

use crossterm::event::Event;
use spark_signals::{signal, Signal};

use crate::layout::DEFAULT_LINE_HEIGHT;

// =============================================================================
// Terminal Size Signals
// =============================================================================

thread_local! {
    static TERMINAL_WIDTH: RefCell<Signal<u16>> = RefCell::new(signal(80));
    static TERMINAL_HEIGHT: RefCell<Signal<u16>> = RefCell::new(signal(24));
    static CELL_HEIGHT: RefCell<Signal<f32>> = RefCell::new(signal(DEFAULT_LINE_HEIGHT));
}

/// Get the current terminal width.
pub fn terminal_width() -> u16 {
    TERMINAL_WIDTH.with(|w| w.borrow().get())
}

/// Get the current terminal height.
pub fn terminal_height() -> u16 {
    TERMINAL_HEIGHT.with(|h| h.borrow().get())
}

/// Set the terminal size (called on resize events).
///
/// Unchanged dimensions are not written back, so dependents only re-run on
/// a real change.
pub fn set_terminal_size(width: u16, height: u16) {
    TERMINAL_WIDTH.with(|w| {
        let w = w.borrow();
        if w.get() != width {
            w.set(width);
        }
    });
    TERMINAL_HEIGHT.with(|h| {
        let h = h.borrow();
        if h.get() != height {
            h.set(height);
        }
    });
}

/// Get the terminal width signal for reactive tracking.
pub fn terminal_width_signal() -> Signal<u16> {
    TERMINAL_WIDTH.with(|w| w.borrow().clone())
}

// =============================================================================
// Cell Metrics
// =============================================================================

/// Pixel height of one terminal row.
pub fn cell_height() -> f32 {
    CELL_HEIGHT.with(|c| c.borrow().get())
}

/// Set the pixel height of one terminal row. Non-positive or non-finite
/// values are ignored.
pub fn set_cell_height(px: f32) {
    if !px.is_finite() || px <= 0.0 {
        tracing::debug!(px, "ignoring invalid cell height");
        return;
    }
    CELL_HEIGHT.with(|c| {
        let c = c.borrow();
        if c.get() != px {
            c.set(px);
        }
    });
}

/// Get the cell height signal. Components without a line height prop read it
/// inside their effect.
pub fn cell_height_signal() -> Signal<f32> {
    CELL_HEIGHT.with(|c| c.borrow().clone())
}

/// Row height in pixels from a reported window size, if the terminal
/// reports pixel dimensions at all.
fn row_height_px(rows: u16, height_px: u16) -> Option<f32> {
    (rows > 0 && height_px > 0).then(|| f32::from(height_px) / f32::from(rows))
}

// =============================================================================
// Terminal Detection
// =============================================================================

/// Detect and set the actual terminal size from the environment.
///
/// Uses crossterm to query the terminal dimensions.
pub fn detect_terminal_size() {
    match crossterm::terminal::size() {
        Ok((width, height)) => set_terminal_size(width, height),
        Err(err) => tracing::debug!(%err, "terminal size unavailable, keeping defaults"),
    }
}

/// Detect the pixel height of one row and store it.
///
/// Terminals that report no pixel size keep the current value (16px unless
/// set otherwise). Returns the cell height in effect afterwards.
pub fn detect_cell_metrics() -> io::Result<f32> {
    let size = crossterm::terminal::window_size()?;
    match row_height_px(size.rows, size.height) {
        Some(px) => set_cell_height(px),
        None => tracing::debug!(
            rows = size.rows,
            height_px = size.height,
            "terminal reports no pixel size"
        ),
    }
    Ok(cell_height())
}

/// Apply a resize event to the terminal signals.
///
/// Returns `true` if the event was a resize.
pub fn handle_resize(event: &Event) -> bool {
    match *event {
        Event::Resize(width, height) => {
            tracing::trace!(width, height, "terminal resized");
            set_terminal_size(width, height);
            true
        }
        _ => false,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use crossterm::event::{KeyCode, KeyEvent};
    use spark_signals::effect;

    #[test]
    fn test_terminal_size() {
        set_terminal_size(120, 40);
        assert_eq!(terminal_width(), 120);
        assert_eq!(terminal_height(), 40);
    }

    #[test]
    fn test_resize_event_updates_size() {
        set_terminal_size(80, 24);
        assert!(handle_resize(&Event::Resize(100, 30)));
        assert_eq!(terminal_width(), 100);
        assert_eq!(terminal_height(), 30);
    }

    #[test]
    fn test_non_resize_event_ignored() {
        set_terminal_size(80, 24);
        let key = Event::Key(KeyEvent::from(KeyCode::Char('q')));
        assert!(!handle_resize(&key));
        assert_eq!(terminal_width(), 80);
    }

    #[test]
    fn test_width_signal_tracks_resize() {
        set_terminal_size(80, 24);
        let runs = Rc::new(Cell::new(0));
        let seen = Rc::new(Cell::new(0u16));

        let width = terminal_width_signal();
        let (runs_in, seen_in) = (runs.clone(), seen.clone());
        let stop = effect(move || {
            seen_in.set(width.get());
            runs_in.set(runs_in.get() + 1);
        });

        assert_eq!(runs.get(), 1);
        set_terminal_size(60, 24);
        assert_eq!(runs.get(), 2);
        assert_eq!(seen.get(), 60);

        // Same size again: no re-run.
        set_terminal_size(60, 24);
        assert_eq!(runs.get(), 2);

        stop();
    }

    #[test]
    fn test_cell_height_rejects_invalid() {
        set_cell_height(18.0);
        set_cell_height(0.0);
        set_cell_height(f32::NAN);
        assert_eq!(cell_height(), 18.0);
        set_cell_height(DEFAULT_LINE_HEIGHT);
    }

    #[test]
    fn test_row_height_from_window_size() {
        assert_eq!(row_height_px(24, 480), Some(20.0));
        assert_eq!(row_height_px(24, 0), None);
        assert_eq!(row_height_px(0, 480), None);
    }
}
