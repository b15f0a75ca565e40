//! Error types.

use thiserror::Error;

/// Errors surfaced by spark-ellipsis.
///
/// `MeasurementUnavailable` never reaches callers of a truncation pass: the
/// pass recovers by returning the content unchanged.
#[derive(Debug, Error)]
pub enum EllipsisError {
    #[error("container cannot be measured (width {width} columns, line height {line_height}px)")]
    MeasurementUnavailable { width: u16, line_height: f32 },

    #[error("unknown ellipsis position {0:?}, expected start, middle or end")]
    InvalidPosition(String),

    #[error("measurement layout failed: {0}")]
    Layout(#[from] taffy::TaffyError),

    #[error("invalid ellipsis config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
