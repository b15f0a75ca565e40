//! Ellipsis Primitive - Text clamped to a number of rows.
//!
//! Runs a truncation pass on mount and again whenever the content, rows,
//! position, container width or line height change. Toggling the expanded state swaps
//! between the truncated text and the full content without measuring again.
//!
//! # Reactivity
//!
//! ```text
//! content ─────┐
//! rows ────────┤
//! position ────┼──► effect ──► pass ──► result
//! width ───────┤   (terminal width when no width prop is given)
//! line height ─┘   (terminal cell height when no line height prop is given)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use spark_ellipsis::primitives::{text_ellipsis, EllipsisProps};
//! use spark_signals::signal;
//!
//! let content = signal("A long paragraph ...".to_string());
//! let handle = text_ellipsis(EllipsisProps {
//!     content: content.clone().into(),
//!     rows: 2.into(),
//!     width: Some(40.into()),
//!     expand_text: " more".to_string(),
//!     collapse_text: " less".to_string(),
//!     ..Default::default()
//! });
//!
//! for line in handle.render_lines() {
//!     println!("{line}");
//! }
//!
//! // Re-truncates automatically
//! content.set("Something else entirely".to_string());
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::{effect, signal, Signal};

use crate::layout::{wrap_lines, ContainerStyle};
use crate::pipeline::pass::{run_pass, PassOptions};
use crate::pipeline::terminal::{cell_height_signal, terminal_width_signal};
use crate::types::{Position, Trigger, TruncationResult};

use super::types::{ActionCallback, EllipsisProps, PropValue};

// =============================================================================
// Pass Inputs
// =============================================================================

/// Reactive inputs as read by one effect run.
#[derive(Debug, Clone, PartialEq)]
struct PassInputs {
    content: String,
    rows: u16,
    position: Position,
    width: u16,
    line_height: f32,
}

impl PassInputs {
    /// Which inputs differ from the previous run.
    fn trigger_since(&self, previous: Option<&PassInputs>) -> Trigger {
        let Some(prev) = previous else {
            return Trigger::MOUNT;
        };

        let mut trigger = Trigger::NONE;
        if self.content != prev.content {
            trigger |= Trigger::CONTENT;
        }
        if self.rows != prev.rows {
            trigger |= Trigger::ROWS;
        }
        if self.position != prev.position {
            trigger |= Trigger::POSITION;
        }
        if self.width != prev.width {
            trigger |= Trigger::WIDTH;
        }
        if self.line_height != prev.line_height {
            trigger |= Trigger::LINE_HEIGHT;
        }
        trigger
    }
}

/// Marks a pass as running for as long as it lives.
struct PassGuard<'a>(&'a Cell<bool>);

impl<'a> PassGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        Some(Self(flag))
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

// =============================================================================
// Component State
// =============================================================================

struct EllipsisState {
    dots: String,
    expand_text: String,
    collapse_text: String,
    style: ContainerStyle,
    on_click_action: Option<ActionCallback>,

    inputs: RefCell<Option<PassInputs>>,
    result: RefCell<TruncationResult>,
    expanded: Signal<bool>,

    in_pass: Cell<bool>,
    passes: Cell<usize>,
    last_trigger: Cell<Trigger>,
}

impl EllipsisState {
    fn style_for(&self, inputs: &PassInputs) -> ContainerStyle {
        ContainerStyle {
            line_height: inputs.line_height,
            ..self.style.clone().with_width(inputs.width)
        }
    }

    /// Run a pass for `inputs` unless one is already running.
    fn update(&self, inputs: PassInputs) {
        let trigger = inputs.trigger_since(self.inputs.borrow().as_ref());
        if trigger.is_empty() {
            tracing::trace!("ellipsis inputs unchanged, pass skipped");
            return;
        }

        let Some(_guard) = PassGuard::enter(&self.in_pass) else {
            tracing::debug!(?trigger, "re-entrant ellipsis pass skipped");
            return;
        };

        let options = PassOptions {
            rows: inputs.rows,
            dots: &self.dots,
            // Truncated text is shown with the expand label.
            action: &self.expand_text,
            position: inputs.position,
        };
        let result = run_pass(&inputs.content, &options, &self.style_for(&inputs));

        tracing::debug!(
            ?trigger,
            truncated = result.truncated,
            width = inputs.width,
            line_height = inputs.line_height,
            rows = inputs.rows,
            "ellipsis pass"
        );

        *self.result.borrow_mut() = result;
        *self.inputs.borrow_mut() = Some(inputs);
        self.last_trigger.set(trigger);
        self.passes.set(self.passes.get() + 1);
    }
}

// =============================================================================
// Handle
// =============================================================================

/// Handle returned by [`text_ellipsis`].
///
/// Dropping the handle stops the effect.
pub struct EllipsisHandle {
    state: Rc<EllipsisState>,
    stop_effect: Option<Box<dyn FnOnce()>>,
}

impl EllipsisHandle {
    /// Text of the last pass (truncated or not).
    pub fn text(&self) -> String {
        self.state.result.borrow().text.clone()
    }

    /// Result of the last pass.
    pub fn result(&self) -> TruncationResult {
        self.state.result.borrow().clone()
    }

    /// Whether the last pass truncated, i.e. the action label is shown.
    pub fn has_action(&self) -> bool {
        self.state.result.borrow().truncated
    }

    pub fn expanded(&self) -> bool {
        self.state.expanded.get()
    }

    /// Expanded state as a signal, for dependents that redraw on toggle.
    pub fn expanded_signal(&self) -> Signal<bool> {
        self.state.expanded.clone()
    }

    /// Toggle between truncated and full text and notify `on_click_action`.
    ///
    /// Without an action label there is nothing to click: the state is left
    /// alone and the callback is not called. Returns the expanded state.
    pub fn click_action(&self) -> bool {
        if !self.has_action() {
            return self.expanded();
        }

        let expanded = !self.state.expanded.get();
        self.state.expanded.set(expanded);
        tracing::trace!(expanded, "ellipsis action clicked");

        if let Some(callback) = &self.state.on_click_action {
            callback(expanded);
        }
        expanded
    }

    /// The action label for the current state.
    pub fn action_text(&self) -> &str {
        if self.expanded() {
            &self.state.collapse_text
        } else {
            &self.state.expand_text
        }
    }

    /// Full content when expanded, the truncated text otherwise.
    pub fn display_text(&self) -> String {
        if self.expanded() {
            if let Some(inputs) = self.state.inputs.borrow().as_ref() {
                return inputs.content.clone();
            }
        }
        self.text()
    }

    /// Display text plus the action label, wrapped to the container.
    pub fn render_lines(&self) -> Vec<String> {
        let mut display = self.display_text();
        if self.has_action() {
            display.push_str(self.action_text());
        }

        let style = match self.state.inputs.borrow().as_ref() {
            Some(inputs) => self.state.style_for(inputs),
            None => self.state.style.clone().with_width(0),
        };
        wrap_lines(&display, usize::from(style.content_width()), style.wrap)
    }

    /// Number of passes run so far.
    pub fn pass_count(&self) -> usize {
        self.state.passes.get()
    }

    /// What caused the most recent pass.
    pub fn last_trigger(&self) -> Trigger {
        self.state.last_trigger.get()
    }

    /// Container width used by the most recent pass.
    pub fn width(&self) -> u16 {
        self.state
            .inputs
            .borrow()
            .as_ref()
            .map_or(0, |inputs| inputs.width)
    }

    /// Stop reacting to prop changes. The last result stays readable.
    pub fn unmount(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
    }
}

impl Drop for EllipsisHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

// =============================================================================
// Ellipsis Component
// =============================================================================

/// Create an ellipsis component.
///
/// The first pass runs before this returns.
pub fn text_ellipsis(props: EllipsisProps) -> EllipsisHandle {
    let EllipsisProps {
        content,
        rows,
        position,
        width,
        line_height,
        dots,
        expand_text,
        collapse_text,
        style,
        on_click_action,
    } = props;

    let state = Rc::new(EllipsisState {
        dots,
        expand_text,
        collapse_text,
        style,
        on_click_action,
        inputs: RefCell::new(None),
        result: RefCell::new(TruncationResult::default()),
        expanded: signal(false),
        in_pass: Cell::new(false),
        passes: Cell::new(0),
        last_trigger: Cell::new(Trigger::NONE),
    });

    let width = width.unwrap_or_else(|| PropValue::Signal(terminal_width_signal()));
    let line_height = line_height.unwrap_or_else(|| PropValue::Signal(cell_height_signal()));

    let effect_state = state.clone();
    let stop = effect(move || {
        // Read every input so each one is tracked.
        let inputs = PassInputs {
            content: content.get(),
            rows: rows.get(),
            position: position.get(),
            width: width.get(),
            line_height: line_height.get(),
        };
        effect_state.update(inputs);
    });

    EllipsisHandle {
        state,
        stop_effect: Some(Box::new(stop)),
    }
}

// =============================================================================
// Tests
// =============================================================================
