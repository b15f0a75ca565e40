//! Primitives - Reactive components.
//!
//! - [`text_ellipsis`] - Text clamped to a number of rows, with an optional
//!   expand/collapse action
//!
//! # Reactivity
//!
//! Props can be:
//! - Static values: `rows: 2.into()`
//! - Signals: `rows: rows_signal.into()` (stays connected!)
//! - Getters: `content: PropValue::Getter(Rc::new(move || ...))`
//!
//! Pass signals directly rather than their current value, or the component
//! stops following them:
//!
//! ```ignore
//! // CORRECT - signal stays connected
//! text_ellipsis(EllipsisProps { content: content_signal.into(), ..default });
//!
//! // WRONG - extracts value, breaks reactivity
//! text_ellipsis(EllipsisProps { content: content_signal.get().into(), ..default });
//! ```

mod ellipsis;
mod types;

pub use ellipsis::{text_ellipsis, EllipsisHandle};
pub use types::*;
