//! Measurement Container - Headless replica of a display container.
//!
//! Builds a two-node Taffy tree from a [`ContainerStyle`]:
//!
//! ```text
//! root  (fixed width, padding, height auto)
//!  └── text leaf  (measure function: wrapped lines × line height)
//! ```
//!
//! The tree is built once per truncation pass and reused for every candidate:
//! only the leaf's text context changes between measurements. The container
//! holds a surface in the offscreen registry and releases it on drop, so it
//! is released on every exit path of a pass.
//!
//! A failed layout makes the candidate count as overflowing and is kept
//! until [`MeasureContainer::take_failure`], so the pass can report it
//! instead of returning a cut it never measured.

use taffy::{
    AvailableSpace, Dimension, Display, FlexDirection, LengthPercentage, NodeId, Rect, Size, Style,
    TaffyTree,
};

use crate::engine::Measure;
use crate::error::EllipsisError;
use crate::types::WrapMode;

use super::metrics::ContainerStyle;
use super::surface::{attach_surface, detach_surface};
use super::text_measure::count_lines;

/// Build the root style: the display container's geometry with its height
/// left to the content.
fn build_root_style(style: &ContainerStyle) -> Style {
    Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Column,
        size: Size {
            width: Dimension::Length(f32::from(style.width)),
            height: Dimension::Auto,
        },
        min_size: Size::auto(),
        max_size: Size::auto(),
        padding: Rect {
            top: LengthPercentage::Length(style.padding_top),
            right: LengthPercentage::Length(f32::from(style.padding_right)),
            bottom: LengthPercentage::Length(style.padding_bottom),
            left: LengthPercentage::Length(f32::from(style.padding_left)),
        },
        ..Default::default()
    }
}

/// Offscreen container measuring candidate strings under a fixed style.
pub struct MeasureContainer {
    tree: TaffyTree<String>,
    root: NodeId,
    text: NodeId,
    style: ContainerStyle,
    surface: usize,
    measurements: usize,
    failure: Option<EllipsisError>,
}

impl MeasureContainer {
    /// Build the container and attach it to the offscreen surface.
    ///
    /// Fails with `MeasurementUnavailable` when the style has no text columns
    /// or no line height, i.e. the display container is not laid out yet.
    pub fn acquire(style: &ContainerStyle) -> Result<Self, EllipsisError> {
        if !style.is_measurable() {
            return Err(EllipsisError::MeasurementUnavailable {
                width: style.width,
                line_height: style.line_height,
            });
        }

        let mut tree: TaffyTree<String> = TaffyTree::new();
        // Sub-pixel heights must reach the budget comparison unrounded.
        tree.disable_rounding();

        let text = tree.new_leaf_with_context(Style::default(), String::new())?;
        let root = tree.new_with_children(build_root_style(style), &[text])?;

        let surface = attach_surface();
        tracing::trace!(surface, width = style.width, "measurement container attached");

        Ok(Self {
            tree,
            root,
            text,
            style: style.clone(),
            surface,
            measurements: 0,
            failure: None,
        })
    }

    /// Lay out `text` and return the container's outer height in pixels.
    pub fn try_measure(&mut self, text: &str) -> Result<f32, EllipsisError> {
        self.measurements += 1;

        self.tree.set_node_context(self.text, Some(text.to_string()))?;
        self.tree.mark_dirty(self.text)?;

        let columns = usize::from(self.style.content_width());
        let line_height = self.style.line_height;
        let wrap: WrapMode = self.style.wrap;

        let mut measure_fn = |known_dimensions: Size<Option<f32>>,
                              _available_space: Size<AvailableSpace>,
                              _node_id: NodeId,
                              context: Option<&mut String>,
                              _style: &Style| {
            let Some(content) = context else {
                return Size::ZERO;
            };
            let lines = count_lines(content, columns, wrap);
            Size {
                width: known_dimensions.width.unwrap_or(columns as f32),
                height: known_dimensions
                    .height
                    .unwrap_or(lines as f32 * line_height),
            }
        };

        let available = Size {
            width: AvailableSpace::Definite(f32::from(self.style.width)),
            height: AvailableSpace::MaxContent,
        };
        self.tree
            .compute_layout_with_measure(self.root, available, &mut measure_fn)?;

        Ok(self.tree.layout(self.root)?.size.height)
    }

    pub fn style(&self) -> &ContainerStyle {
        &self.style
    }

    pub fn surface_id(&self) -> usize {
        self.surface
    }

    /// Candidates measured so far.
    pub fn measurements(&self) -> usize {
        self.measurements
    }

    /// First measurement failure since the last call, if any.
    pub fn take_failure(&mut self) -> Option<EllipsisError> {
        self.failure.take()
    }

    /// Keep `err` unless an earlier failure is pending.
    pub(crate) fn record_failure(&mut self, err: EllipsisError) {
        tracing::warn!(%err, surface = self.surface, "candidate measurement failed");
        if self.failure.is_none() {
            self.failure = Some(err);
        }
    }
}

impl Measure for MeasureContainer {
    fn measure(&mut self, text: &str) -> f32 {
        // Candidates after a failure count as overflowing.
        if self.failure.is_some() {
            return f32::INFINITY;
        }
        match self.try_measure(text) {
            Ok(height) => height,
            Err(err) => {
                self.record_failure(err);
                f32::INFINITY
            }
        }
    }
}

impl Drop for MeasureContainer {
    fn drop(&mut self) {
        detach_surface(self.surface);
        tracing::trace!(
            surface = self.surface,
            measurements = self.measurements,
            "measurement container detached"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::surface::{is_attached, live_surface_count, reset_surfaces};

    fn style(width: u16) -> ContainerStyle {
        ContainerStyle {
            padding_top: 2.0,
            padding_bottom: 2.0,
            line_height: 16.0,
            ..ContainerStyle::default()
        }
        .with_width(width)
    }

    #[test]
    fn test_single_line_height() {
        reset_surfaces();
        let mut container = MeasureContainer::acquire(&style(10)).unwrap();
        assert_eq!(container.try_measure("hello").unwrap(), 20.0);
    }

    #[test]
    fn test_wrapped_height() {
        reset_surfaces();
        let mut container = MeasureContainer::acquire(&style(8)).unwrap();
        // "hello" / "world"
        assert_eq!(container.try_measure("hello world").unwrap(), 36.0);
    }

    #[test]
    fn test_empty_text_is_padding_only() {
        reset_surfaces();
        let mut container = MeasureContainer::acquire(&style(8)).unwrap();
        assert_eq!(container.try_measure("").unwrap(), 4.0);
    }

    #[test]
    fn test_reused_across_candidates() {
        reset_surfaces();
        let mut container = MeasureContainer::acquire(&style(5)).unwrap();
        assert_eq!(container.measure("abcdefghij"), 36.0);
        assert_eq!(container.measure("abc"), 20.0);
        assert_eq!(container.measure("abcdefghijk"), 52.0);
        assert_eq!(container.measurements(), 3);
        assert_eq!(live_surface_count(), 1);
    }

    #[test]
    fn test_horizontal_padding_narrows_text() {
        reset_surfaces();
        let narrow = ContainerStyle {
            padding_left: 2,
            padding_right: 3,
            line_height: 10.0,
            ..ContainerStyle::default()
        }
        .with_width(10);
        let mut container = MeasureContainer::acquire(&narrow).unwrap();
        // 5 text columns: "hello" / "world"
        assert_eq!(container.try_measure("hello world").unwrap(), 20.0);
    }

    #[test]
    fn test_char_wrap_mode() {
        reset_surfaces();
        let chars = ContainerStyle {
            wrap: WrapMode::Char,
            line_height: 10.0,
            ..ContainerStyle::default()
        }
        .with_width(5);
        let mut container = MeasureContainer::acquire(&chars).unwrap();
        // "hello" / " worl" / "d"
        assert_eq!(container.try_measure("hello world").unwrap(), 30.0);
    }

    #[test]
    fn test_fractional_line_height_not_rounded() {
        reset_surfaces();
        let frac = ContainerStyle {
            line_height: 15.5,
            ..ContainerStyle::default()
        }
        .with_width(4);
        let mut container = MeasureContainer::acquire(&frac).unwrap();
        assert_eq!(container.try_measure("abcdefgh").unwrap(), 31.0);
        assert_eq!(container.try_measure("abc").unwrap(), 15.5);
    }

    #[test]
    fn test_detached_on_drop() {
        reset_surfaces();
        let container = MeasureContainer::acquire(&style(10)).unwrap();
        let id = container.surface_id();
        assert!(is_attached(id));
        drop(container);
        assert!(!is_attached(id));
        assert_eq!(live_surface_count(), 0);
    }

    #[test]
    fn test_trailing_space_measures_one_line() {
        reset_surfaces();
        let mut container = MeasureContainer::acquire(&style(5)).unwrap();
        assert_eq!(container.try_measure("hello ").unwrap(), 20.0);
        assert_eq!(container.try_measure("hello").unwrap(), 20.0);
    }

    #[test]
    fn test_failure_overflows_until_taken() {
        reset_surfaces();
        let mut container = MeasureContainer::acquire(&style(10)).unwrap();
        assert!(container.take_failure().is_none());

        container.record_failure(EllipsisError::Layout(taffy::TaffyError::InvalidInputNode(
            NodeId::from(99u64),
        )));
        container.record_failure(EllipsisError::InvalidPosition("later".to_string()));
        assert_eq!(container.measure("hello"), f32::INFINITY);
        assert_eq!(container.measurements(), 0);

        assert!(matches!(
            container.take_failure(),
            Some(EllipsisError::Layout(taffy::TaffyError::InvalidInputNode(_)))
        ));
        assert!(container.take_failure().is_none());
        assert_eq!(container.measure("hello"), 20.0);
    }

    #[test]
    fn test_unmeasurable_style_attaches_nothing() {
        reset_surfaces();
        let result = MeasureContainer::acquire(&ContainerStyle::default());
        assert!(matches!(
            result,
            Err(EllipsisError::MeasurementUnavailable { width: 0, .. })
        ));
        assert_eq!(live_surface_count(), 0);
    }
}
