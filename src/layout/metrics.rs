//! Container style and the height budget.
//!
//! Horizontal geometry is in terminal columns, vertical geometry in pixels.
//! Keeping heights in pixels lets the half-row slack of the budget stay
//! smaller than one line, so a fragment one full line too tall is rejected.

use crate::types::WrapMode;

/// Cell height used when the terminal reports no pixel size.
pub const DEFAULT_LINE_HEIGHT: f32 = 16.0;

/// Computed style of a display container.
///
/// The measurement container copies this verbatim; only its height is left
/// unconstrained.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerStyle {
    /// Outer width in columns. 0 means the container is not laid out yet.
    pub width: u16,
    pub padding_left: u16,
    pub padding_right: u16,
    /// Vertical padding in pixels.
    pub padding_top: f32,
    pub padding_bottom: f32,
    /// Line height in pixels.
    pub line_height: f32,
    pub wrap: WrapMode,
}

impl Default for ContainerStyle {
    fn default() -> Self {
        Self {
            width: 0,
            padding_left: 0,
            padding_right: 0,
            padding_top: 0.0,
            padding_bottom: 0.0,
            line_height: DEFAULT_LINE_HEIGHT,
            wrap: WrapMode::Word,
        }
    }
}

impl ContainerStyle {
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Columns left for text once horizontal padding is removed.
    pub fn content_width(&self) -> u16 {
        self.width
            .saturating_sub(self.padding_left.saturating_add(self.padding_right))
    }

    /// A container with no text columns or no line height cannot be measured.
    pub fn is_measurable(&self) -> bool {
        self.content_width() > 0 && self.line_height.is_finite() && self.line_height > 0.0
    }

    pub fn metrics(&self) -> TextMetrics {
        TextMetrics::from_style(self)
    }
}

/// The three style values the height budget depends on, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    pub line_height: f32,
    pub padding_top: f32,
    pub padding_bottom: f32,
}

impl TextMetrics {
    pub fn from_style(style: &ContainerStyle) -> Self {
        Self {
            line_height: style.line_height,
            padding_top: style.padding_top,
            padding_bottom: style.padding_bottom,
        }
    }

    pub fn max_height(&self, rows: u16) -> f32 {
        compute_max_height(rows, self.line_height, self.padding_top, self.padding_bottom)
    }
}

/// Tallest container height that still counts as `rows` lines.
///
/// `ceil((rows + 0.5) * line_height + padding_top + padding_bottom)`. The
/// extra half row absorbs sub-pixel rounding of the measured height.
pub fn compute_max_height(rows: u16, line_height: f32, padding_top: f32, padding_bottom: f32) -> f32 {
    ((f32::from(rows) + 0.5) * line_height + padding_top + padding_bottom).ceil()
}

/// Leading unsigned decimal of a CSS-like length.
///
/// `"16px"` is 16, `"1.5em"` is 1.5; anything without a leading number
/// (`""`, `"auto"`, `"-4px"`) is 0.
pub fn px_to_num(value: &str) -> f32 {
    let bytes = value.as_bytes();
    let mut end = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if bytes.get(end) == Some(&b'.') {
        end += 1 + bytes[end + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
    }
    value[..end].parse().unwrap_or(0.0)
}
