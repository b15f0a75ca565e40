//! # spark-ellipsis
//!
//! Height-bounded text truncation for terminal UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity
//! and [taffy](https://github.com/DioxusLabs/taffy) for measurement.
//!
//! ## Architecture
//!
//! Text is cut to fit a number of rows by binary-searching the cut point
//! against a measurement oracle: an offscreen container that replicates the
//! display container's style and reports how tall a candidate string is.
//!
//! ```text
//! props/signals → effect → pass → MeasureContainer (taffy) → engine → TruncationResult
//! ```
//!
//! The marker can sit at the start, in the middle or at the end, and an
//! optional action label ("more" / "less") is reserved room in every
//! candidate.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Position, WrapMode, TruncationResult, Trigger)
//! - [`engine`] - The truncation search
//! - [`layout`] - Cell widths, wrapping, height budget, measurement container
//! - [`pipeline`] - Truncation pass and terminal signals
//! - [`primitives`] - The reactive ellipsis component
//! - [`config`] - TOML defaults

pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod primitives;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::EllipsisError;

pub use config::{EllipsisConfig, StyleConfig};

pub use engine::{truncate_to_height, truncate_with_stats, Measure, TruncateOptions, TruncationStats};

pub use layout::{
    compute_max_height, measure_text_height, px_to_num, string_width, wrap_text, ContainerStyle,
    MeasureContainer, TextMetrics,
};

pub use pipeline::{
    detect_cell_metrics, detect_terminal_size, handle_resize, run_pass, set_terminal_size,
    terminal_width, PassOptions,
};

pub use primitives::{text_ellipsis, ActionCallback, EllipsisHandle, EllipsisProps, PropValue};
