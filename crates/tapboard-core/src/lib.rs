//! # Fields, keystrokes, and the keyboard state machine
//!
//! Tapboard replaces the platform's soft keyboard with one the application
//! draws itself. This crate is the headless half: it knows which field is
//! focused, which layout that field wants, and how a keystroke edits a text
//! buffer. Rendering lives in `tapboard-ui`; windowing belongs to the host.
//!
//! The three pieces a host wires together:
//!
//! - [`FieldRegistry`] - mounted fields and forms, addressed by generational
//!   ids. A field's text is a [`Signal<String>`], so bindings hear about
//!   every committed keystroke.
//! - [`KeyboardManager`] - one per UI root. Feed it `focus_in`/`focus_out`
//!   and `key_press`; it runs the open/close state machine.
//! - [`TaskQueue`] - deferred one-shot effects (the close grace re-check and
//!   the scroll-into-view request), pumped from the host event loop.
//!
//! ```rust
//! use std::rc::Rc;
//! use tapboard_core::*;
//!
//! let registry = Rc::new(FieldRegistry::new());
//! let queue = Rc::new(TaskQueue::new());
//! let manager = KeyboardManager::new(registry.clone(), queue.clone());
//!
//! let name = registry.mount(Field::new(FieldKind::Text));
//! manager.focus_in(name);
//! assert_eq!(manager.state().phase().layout(), Some(KeyboardLayout::Text));
//!
//! manager.key_press(Keystroke::Char('h'));
//! manager.key_press(Keystroke::Char('i'));
//! assert_eq!(registry.value(name).unwrap().get(), "hi");
//! ```
//!
//! ## Editing is a pure function
//!
//! [`apply_keystroke`] maps `(value, selection, keystroke)` to an
//! [`EditOutcome`] with no carried-over state. The manager feeds it the
//! field's current buffer and commits the result through
//! [`FieldRegistry::commit`], which writes value and selection together and
//! publishes exactly one change notification.
//!
//! ## Nothing here is fatal
//!
//! A keystroke for an unmounted field, focus on a checkbox, a field with no
//! input metadata: each resolves to a silent no-op or a safe default
//! (layout falls back to `Text`). The error types exist for logging, not
//! for propagation.
//!
//! ## Threading
//!
//! Single-threaded by design. Everything is `Rc`/`RefCell`; all transitions
//! run inside the host's event handler, and the queue's deferred tasks run
//! when the host pumps [`TaskQueue::run_due`].

pub mod clock;
pub mod config;
pub mod editor;
pub mod error;
pub mod field;
pub mod input;
pub mod keyboard;
pub mod layout;
pub mod prelude;
pub mod schedule;
pub mod signal;
pub mod tracker;

pub use clock::*;
pub use config::*;
pub use editor::*;
pub use error::*;
pub use field::*;
pub use input::*;
pub use keyboard::*;
pub use layout::*;
pub use prelude::*;
pub use schedule::*;
pub use signal::*;
pub use tracker::*;
