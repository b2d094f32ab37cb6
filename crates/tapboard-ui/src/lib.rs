#![allow(non_snake_case)]
//! Keyboard surface widgets.
//!
//! [`Keyboard`] turns the manager's current phase into a render-instruction
//! tree: a bottom sheet of key rows, every key tap wired back into the
//! manager. The widget itself is stateless; re-render it whenever the phase
//! signal fires.

pub mod layouts;
pub mod locals;
pub mod view;

pub use layouts::*;
pub use locals::*;
pub use view::*;

use std::rc::Rc;

use tapboard_core::{KeyboardManager, KeyboardPhase, KeyboardLayout};

/// Builds the keyboard for the manager's current phase; `None` while hidden.
pub fn Keyboard(manager: &Rc<KeyboardManager>) -> Option<View> {
    match manager.state().phase() {
        KeyboardPhase::Hidden => None,
        KeyboardPhase::Visible { layout, .. } => Some(KeyboardSheet(layout, manager)),
    }
}

/// The sheet for one layout, mirrored for the current [`Handedness`].
pub fn KeyboardSheet(layout: KeyboardLayout, manager: &Rc<KeyboardManager>) -> View {
    let hand = handedness(); // read once per render
    log::trace!("rendering {layout:?} keyboard ({hand:?})");

    let children = rows_for(layout)
        .into_iter()
        .map(|row| KeyRowView(row, hand, manager))
        .collect();

    let m = manager.clone();
    View::new(ViewKind::Sheet {
        on_pointer_down: Rc::new(move || m.keyboard_pointer_down()),
    })
    .with_children(children)
}

fn KeyRowView(mut row: KeyRow, hand: Handedness, manager: &Rc<KeyboardManager>) -> View {
    if hand == Handedness::Left {
        // mirror the whole row so Done/backspace/enter swap edges
        row.reverse();
    }
    View::new(ViewKind::Row).with_children(
        row.into_iter()
            .map(|spec| KeyButton(spec, manager))
            .collect(),
    )
}

/// One key. The tap marks the keyboard surface as the live focus target
/// before dispatching, so a pending grace-delay close sees the tap and
/// leaves the keyboard up.
pub fn KeyButton(spec: KeySpec, manager: &Rc<KeyboardManager>) -> View {
    let m = manager.clone();
    let action = spec.action;
    let on_tap = Rc::new(move || {
        m.keyboard_pointer_down();
        match action {
            KeyAction::Input(key) => m.key_press(key),
            KeyAction::Done | KeyAction::ToggleMode => m.close_now(),
        }
    });
    View::new(ViewKind::Key { spec, on_tap })
}
