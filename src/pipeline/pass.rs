//! Truncation Pass - One measurement-driven truncation, start to finish.
//!
//! ```text
//! acquire container ──► budget from rows + metrics ──► engine ──► drop container
//!        │                                                  │
//!        └─ unavailable ──► content unchanged ◄── layout failed
//! ```
//!
//! The container is a guard: it leaves the offscreen surface when the pass
//! returns, whichever way it returns.

use crate::engine::{truncate_with_stats, TruncateOptions, TruncationStats};
use crate::error::EllipsisError;
use crate::layout::{ContainerStyle, MeasureContainer};
use crate::types::{Position, TruncationResult};

/// Inputs of one pass besides the content and the container style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassOptions<'a> {
    /// Visible line budget.
    pub rows: u16,
    pub dots: &'a str,
    /// Action label the pass reserves room for.
    pub action: &'a str,
    pub position: Position,
}

impl Default for PassOptions<'_> {
    fn default() -> Self {
        Self {
            rows: 1,
            dots: "...",
            action: "",
            position: Position::End,
        }
    }
}

/// Run one pass, reporting the engine's statistics.
///
/// Fails if the container cannot be acquired or if laying out a candidate
/// failed. The engine itself cannot fail.
pub fn try_run_pass(
    content: &str,
    options: &PassOptions<'_>,
    style: &ContainerStyle,
) -> Result<(TruncationResult, TruncationStats), EllipsisError> {
    let mut container = MeasureContainer::acquire(style)?;
    pass_in(&mut container, content, options)
}

fn pass_in(
    container: &mut MeasureContainer,
    content: &str,
    options: &PassOptions<'_>,
) -> Result<(TruncationResult, TruncationStats), EllipsisError> {
    let max_height = container.style().metrics().max_height(options.rows);
    let engine_options = TruncateOptions::new(max_height)
        .marker(options.dots)
        .action_suffix(options.action)
        .position(options.position);

    let outcome = truncate_with_stats(content, &engine_options, container);
    // A failed layout voids the cut.
    match container.take_failure() {
        Some(err) => Err(err),
        None => Ok(outcome),
    }
}

/// Run one pass. If the container is unmeasurable or a layout fails, the
/// content is left unchanged.
pub fn run_pass(content: &str, options: &PassOptions<'_>, style: &ContainerStyle) -> TruncationResult {
    match try_run_pass(content, options, style) {
        Ok((result, _)) => result,
        Err(err @ EllipsisError::MeasurementUnavailable { .. }) => {
            tracing::debug!(%err, "skipping truncation pass");
            TruncationResult::unchanged(content)
        }
        Err(err) => {
            tracing::warn!(%err, "truncation pass failed, content left unchanged");
            TruncationResult::unchanged(content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::AssertUnwindSafe;

    use crate::engine::{truncate_to_height, Measure};
    use crate::layout::surface::reset_surfaces;
    use crate::layout::{live_surface_count, surfaces_attached_total};
    use crate::types::WrapMode;

    /// 20 columns, 16px lines, no padding: 1 row budgets 24px.
    fn style() -> ContainerStyle {
        ContainerStyle {
            wrap: WrapMode::Char,
            ..ContainerStyle::default()
        }
        .with_width(20)
    }

    const LONG: &str = "The quick brown fox jumps over the lazy dog";

    #[test]
    fn test_fitting_content_unchanged() {
        reset_surfaces();
        let result = run_pass("short", &PassOptions::default(), &style());
        assert_eq!(result, TruncationResult::unchanged("short"));
        assert_eq!(live_surface_count(), 0);
        assert_eq!(surfaces_attached_total(), 1);
    }

    #[test]
    fn test_end_truncates_to_one_row() {
        reset_surfaces();
        let result = run_pass(LONG, &PassOptions::default(), &style());
        // 17 chars + "..." fill the 20 columns.
        assert_eq!(result.text, "The quick brown f...");
        assert!(result.truncated);
        assert_eq!(live_surface_count(), 0);
    }

    #[test]
    fn test_two_rows() {
        reset_surfaces();
        let options = PassOptions { rows: 2, ..PassOptions::default() };
        let result = run_pass(LONG, &options, &style());
        assert_eq!(result.text, "The quick brown fox jumps over the la...");
    }

    #[test]
    fn test_action_label_reserves_room() {
        reset_surfaces();
        let options = PassOptions { action: " more", ..PassOptions::default() };
        let result = run_pass(LONG, &options, &style());
        assert_eq!(result.text, "The quick br...");
        assert!(!result.text.contains("more"));
    }

    #[test]
    fn test_start_and_middle() {
        reset_surfaces();
        let start = PassOptions { position: Position::Start, ..PassOptions::default() };
        assert_eq!(run_pass(LONG, &start, &style()).text, "...over the lazy dog");

        let middle = PassOptions { position: Position::Middle, ..PassOptions::default() };
        let text = run_pass(LONG, &middle, &style()).text;
        assert_eq!(text, "The qui......azy dog");
        assert_eq!(live_surface_count(), 0);
    }

    #[test]
    fn test_unmeasurable_style_leaves_content() {
        reset_surfaces();
        let result = run_pass(LONG, &PassOptions::default(), &ContainerStyle::default());
        assert_eq!(result, TruncationResult::unchanged(LONG));
        assert_eq!(live_surface_count(), 0);
        assert_eq!(surfaces_attached_total(), 0);
    }

    #[test]
    fn test_try_run_pass_reports_error_and_stats() {
        reset_surfaces();
        let err = try_run_pass(LONG, &PassOptions::default(), &ContainerStyle::default());
        assert!(matches!(err, Err(EllipsisError::MeasurementUnavailable { .. })));

        let (result, stats) = try_run_pass(LONG, &PassOptions::default(), &style()).unwrap();
        assert!(result.truncated);
        assert!(stats.measurements > 1);
    }

    #[test]
    fn test_trailing_space_fits_one_row() {
        reset_surfaces();
        let word = ContainerStyle::default().with_width(5);
        let result = run_pass("hello ", &PassOptions::default(), &word);
        assert_eq!(result, TruncationResult::unchanged("hello "));
    }

    #[test]
    fn test_layout_failure_is_reported() {
        reset_surfaces();
        let mut container = MeasureContainer::acquire(&style()).unwrap();
        container.record_failure(EllipsisError::Layout(taffy::TaffyError::InvalidInputNode(
            taffy::NodeId::from(7u64),
        )));

        let outcome = pass_in(&mut container, LONG, &PassOptions::default());
        assert!(matches!(outcome, Err(EllipsisError::Layout(_))));

        // The failure is consumed: the next pass in the same container succeeds.
        let (result, _) = pass_in(&mut container, LONG, &PassOptions::default()).unwrap();
        assert_eq!(result.text, "The quick brown f...");
        drop(container);
        assert_eq!(live_surface_count(), 0);
    }

    #[test]
    fn test_panicking_measure_releases_surface() {
        reset_surfaces();
        let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| {
            let mut container = MeasureContainer::acquire(&style()).unwrap();
            let mut measure = move |text: &str| {
                if text.len() < 30 {
                    panic!("measure failed on {text:?}");
                }
                container.measure(text)
            };
            truncate_to_height(LONG, &TruncateOptions::new(24.0), &mut measure)
        }));

        assert!(outcome.is_err());
        assert_eq!(surfaces_attached_total(), 1);
        assert_eq!(live_surface_count(), 0);
    }

    #[test]
    fn test_one_surface_per_pass() {
        reset_surfaces();
        for rows in 1..=3 {
            let options = PassOptions { rows, ..PassOptions::default() };
            run_pass(LONG, &options, &style());
        }
        assert_eq!(surfaces_attached_total(), 3);
        assert_eq!(live_surface_count(), 0);
    }
}
