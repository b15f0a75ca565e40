//! Truncation Engine - Height-bounded text cutting.
//!
//! The engine knows nothing about containers or terminals. It asks a
//! [`Measure`] how tall each candidate string is and binary-searches the
//! cut point:
//!
//! ```text
//! content ──► fits? ──yes──► unchanged
//!               │
//!               no
//!               ▼
//!        search cut (start | middle | end)
//!               │
//!               ▼
//!        prefix/suffix + marker(s)
//! ```
//!
//! Any `FnMut(&str) -> f32` is a measure, which keeps the search testable
//! without a layout tree.

mod truncate;

pub use truncate::*;
