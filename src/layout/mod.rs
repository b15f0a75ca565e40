//! Layout Module - The measurement oracle.
//!
//! # Architecture
//!
//! 1. [`text_measure`] - cell widths, wrapping, line counting
//! 2. [`metrics`] - container style and the height budget
//! 3. [`container`] - Taffy-backed offscreen container answering
//!    "how tall is this string in that box?"
//! 4. [`surface`] - registry of live containers, so a pass can prove it left
//!    nothing behind
//!
//! # Example
//!
//! ```ignore
//! use spark_ellipsis::layout::{ContainerStyle, MeasureContainer};
//!
//! let style = ContainerStyle::default().with_width(40);
//! let mut container = MeasureContainer::acquire(&style)?;
//! let height = container.try_measure("The quick brown fox")?;
//! ```

pub mod container;
pub mod metrics;
pub mod surface;
pub mod text_measure;

pub use container::MeasureContainer;
pub use metrics::{compute_max_height, px_to_num, ContainerStyle, TextMetrics, DEFAULT_LINE_HEIGHT};
pub use surface::{live_surface_count, surfaces_attached_total};
pub use text_measure::*;
