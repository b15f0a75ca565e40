//! Primitive types - Props and callbacks.
//!
//! These types define the interface for component props.
//! Props support static values, signals, and getters for reactivity.

use std::rc::Rc;

use spark_signals::Signal;

use crate::config::EllipsisConfig;
use crate::layout::ContainerStyle;
use crate::types::Position;

// =============================================================================
// Callback Types
// =============================================================================

/// Action click callback, called with the new expanded state.
///
/// Rc so the callback can be cloned into closures.
pub type ActionCallback = Rc<dyn Fn(bool)>;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// Reading a `Signal` or a signal-reading `Getter` inside an effect makes the
/// effect depend on it.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value (for immediate reads).
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }

    pub fn is_reactive(&self) -> bool {
        !matches!(self, PropValue::Static(_))
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

impl From<&str> for PropValue<String> {
    fn from(value: &str) -> Self {
        PropValue::Static(value.to_string())
    }
}

// =============================================================================
// Ellipsis Props
// =============================================================================

/// Properties for the ellipsis component.
///
/// # Example
///
/// ```ignore
/// use spark_ellipsis::primitives::{text_ellipsis, EllipsisProps};
///
/// let handle = text_ellipsis(EllipsisProps {
///     content: "A long paragraph...".into(),
///     rows: 2.into(),
///     expand_text: " more".to_string(),
///     collapse_text: " less".to_string(),
///     ..Default::default()
/// });
/// ```
#[derive(Clone)]
pub struct EllipsisProps {
    /// Full, untruncated text.
    pub content: PropValue<String>,
    /// Visible line budget.
    pub rows: PropValue<u16>,
    pub position: PropValue<Position>,
    /// Container width in columns. Follows the terminal width when `None`.
    pub width: Option<PropValue<u16>>,
    /// Line height in pixels. Follows the terminal cell height when `None`.
    pub line_height: Option<PropValue<f32>>,
    pub dots: String,
    /// Label shown after truncated text.
    pub expand_text: String,
    /// Label shown after expanded text.
    pub collapse_text: String,
    /// Container style; its `width` and `line_height` are replaced by the
    /// props of the same name.
    pub style: ContainerStyle,
    pub on_click_action: Option<ActionCallback>,
}

impl Default for EllipsisProps {
    fn default() -> Self {
        Self {
            content: PropValue::default(),
            rows: PropValue::Static(1),
            position: PropValue::default(),
            width: None,
            line_height: None,
            dots: "...".to_string(),
            expand_text: String::new(),
            collapse_text: String::new(),
            style: ContainerStyle::default(),
            on_click_action: None,
        }
    }
}

impl EllipsisProps {
    /// Props carrying the configured defaults, with empty content.
    ///
    /// A configured style width or line height pins that value; otherwise
    /// the component follows the terminal.
    pub fn from_config(config: &EllipsisConfig) -> Self {
        let style = config.container_style();
        let width = (style.width > 0).then_some(PropValue::Static(style.width));
        let line_height = config
            .style
            .as_ref()
            .and_then(|s| s.line_height.as_ref())
            .map(|_| PropValue::Static(style.line_height));

        Self {
            rows: PropValue::Static(config.rows),
            position: PropValue::Static(config.position),
            width,
            line_height,
            dots: config.dots.clone(),
            expand_text: config.expand_text.clone(),
            collapse_text: config.collapse_text.clone(),
            style,
            ..Self::default()
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
