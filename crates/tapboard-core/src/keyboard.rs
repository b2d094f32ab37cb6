use crate::field::FieldId;
use crate::layout::KeyboardLayout;
use crate::signal::{Signal, signal};

/// What the host should render: nothing, or a layout bound to a target
/// field. There is no visible state without a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyboardPhase {
    Hidden,
    Visible {
        layout: KeyboardLayout,
        target: FieldId,
    },
}

impl KeyboardPhase {
    pub fn is_visible(&self) -> bool {
        matches!(self, KeyboardPhase::Visible { .. })
    }

    pub fn target(&self) -> Option<FieldId> {
        match self {
            KeyboardPhase::Visible { target, .. } => Some(*target),
            KeyboardPhase::Hidden => None,
        }
    }

    pub fn layout(&self) -> Option<KeyboardLayout> {
        match self {
            KeyboardPhase::Visible { layout, .. } => Some(*layout),
            KeyboardPhase::Hidden => None,
        }
    }
}

/// Two-state machine behind a signal. Created once per UI root; the manager
/// mutates it, everything else only reads or subscribes.
///
/// `open` on a visible keyboard swaps `(layout, target)` in one publish, so
/// moving focus from field A straight to field B never shows `Hidden` in
/// between. Both transitions are idempotent.
#[derive(Clone)]
pub struct KeyboardState {
    phase: Signal<KeyboardPhase>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self {
            phase: signal(KeyboardPhase::Hidden),
        }
    }

    pub fn phase(&self) -> KeyboardPhase {
        self.phase.get()
    }

    /// Reactive handle for render bindings.
    pub fn watch(&self) -> &Signal<KeyboardPhase> {
        &self.phase
    }

    pub fn open(&self, target: FieldId, layout: KeyboardLayout) {
        let next = KeyboardPhase::Visible { layout, target };
        if self.phase.get() == next {
            return;
        }
        self.phase.set(next);
    }

    pub fn close(&self) {
        if self.phase.get() == KeyboardPhase::Hidden {
            return;
        }
        self.phase.set(KeyboardPhase::Hidden);
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Field, FieldKind, FieldRegistry};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn two_fields() -> (FieldId, FieldId) {
        let reg = FieldRegistry::new();
        (
            reg.mount(Field::new(FieldKind::Text)),
            reg.mount(Field::new(FieldKind::Number)),
        )
    }

    #[test]
    fn test_open_then_close() {
        let (a, _) = two_fields();
        let state = KeyboardState::new();
        assert_eq!(state.phase(), KeyboardPhase::Hidden);

        state.open(a, KeyboardLayout::Text);
        assert_eq!(
            state.phase(),
            KeyboardPhase::Visible {
                layout: KeyboardLayout::Text,
                target: a
            }
        );

        state.close();
        assert_eq!(state.phase(), KeyboardPhase::Hidden);
    }

    #[test]
    fn test_transitions_are_idempotent() {
        let (a, _) = two_fields();
        let state = KeyboardState::new();
        let publishes = Rc::new(RefCell::new(0));

        let publishes_clone = publishes.clone();
        state.watch().subscribe(move |_| {
            *publishes_clone.borrow_mut() += 1;
        });

        state.close(); // already hidden
        state.open(a, KeyboardLayout::Text);
        state.open(a, KeyboardLayout::Text); // already current
        state.close();
        state.close();
        assert_eq!(*publishes.borrow(), 2);
    }

    #[test]
    fn test_field_switch_never_passes_through_hidden() {
        let (a, b) = two_fields();
        let state = KeyboardState::new();
        let observed = Rc::new(RefCell::new(Vec::new()));

        let observed_clone = observed.clone();
        state.watch().subscribe(move |p: &KeyboardPhase| {
            observed_clone.borrow_mut().push(*p);
        });

        state.open(a, KeyboardLayout::Text);
        state.open(b, KeyboardLayout::Numeric);

        assert_eq!(
            *observed.borrow(),
            vec![
                KeyboardPhase::Visible {
                    layout: KeyboardLayout::Text,
                    target: a
                },
                KeyboardPhase::Visible {
                    layout: KeyboardLayout::Numeric,
                    target: b
                },
            ]
        );
    }
}
