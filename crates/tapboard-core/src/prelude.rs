pub use crate::clock::{Clock, SystemClock, TestClock};
pub use crate::config::KeyboardTiming;
pub use crate::editor::{EditOutcome, apply_keystroke};
pub use crate::error::KeyEventError;
pub use crate::field::{
    Field, FieldAttrs, FieldId, FieldKind, FieldRegistry, FocusTarget, FormId,
};
pub use crate::input::Keystroke;
pub use crate::keyboard::{KeyboardPhase, KeyboardState};
pub use crate::layout::{InputMode, KeyboardLayout, layout_for};
pub use crate::schedule::{TaskHandle, TaskQueue};
pub use crate::signal::{Signal, SubId, signal};
pub use crate::tracker::KeyboardManager;
