use std::cell::RefCell;
use std::rc::Rc;

use crate::config::KeyboardTiming;
use crate::editor::{EditOutcome, apply_keystroke};
use crate::error::KeyEventError;
use crate::field::{FieldId, FieldRegistry, FocusTarget};
use crate::input::Keystroke;
use crate::keyboard::{KeyboardPhase, KeyboardState};
use crate::layout::layout_for;
use crate::schedule::{TaskHandle, TaskQueue};

/// Owns the keyboard for one UI root.
///
/// The host feeds it focus signals and key taps; it decides when the
/// keyboard opens, which layout it shows, where keystrokes land, and when a
/// blur really means "close". All transitions run synchronously in the
/// calling event handler; the only deferred work goes through the shared
/// [`TaskQueue`].
pub struct KeyboardManager {
    registry: Rc<FieldRegistry>,
    state: KeyboardState,
    queue: Rc<TaskQueue>,
    timing: KeyboardTiming,
    scroll_into_view: Option<Rc<dyn Fn(FieldId)>>,
    lock_scroll: Option<Rc<dyn Fn(bool)>>,
    pending: RefCell<Vec<TaskHandle>>,
}

impl KeyboardManager {
    pub fn new(registry: Rc<FieldRegistry>, queue: Rc<TaskQueue>) -> Self {
        Self {
            registry,
            state: KeyboardState::new(),
            queue,
            timing: KeyboardTiming::default(),
            scroll_into_view: None,
            lock_scroll: None,
            pending: RefCell::new(Vec::new()),
        }
    }

    pub fn timing(mut self, timing: KeyboardTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Host hook: scroll the given field into the vertical center of the
    /// space the keyboard leaves visible. Requested once per open, after
    /// `scroll_delay`.
    pub fn on_scroll_into_view(mut self, f: impl Fn(FieldId) + 'static) -> Self {
        self.scroll_into_view = Some(Rc::new(f));
        self
    }

    /// Host hook: suppress background scrolling while the keyboard is up.
    /// Called with `true` on show and `false` on hide.
    pub fn on_lock_scroll(mut self, f: impl Fn(bool) + 'static) -> Self {
        self.lock_scroll = Some(Rc::new(f));
        self
    }

    pub fn state(&self) -> &KeyboardState {
        &self.state
    }

    pub fn registry(&self) -> &Rc<FieldRegistry> {
        &self.registry
    }

    /// Focus entered a field. Eligible fields open (or retarget) the
    /// keyboard in one step; everything else is filtered here.
    pub fn focus_in(&self, id: FieldId) {
        self.registry.set_focus(Some(FocusTarget::Field(id)));
        if !self.registry.is_eligible(id) {
            log::trace!("focus on ineligible field {id:?}; no keyboard");
            return;
        }
        let Some(kind) = self.registry.kind(id) else {
            return;
        };
        let layout = layout_for(self.registry.input_mode(id), kind);

        let was_visible = self.state.phase().is_visible();
        self.state.open(id, layout);
        if !was_visible && let Some(lock) = &self.lock_scroll {
            lock(true);
        }

        if let Some(scroll) = self.scroll_into_view.clone() {
            let handle = self
                .queue
                .schedule(self.timing.scroll_delay, move || scroll(id));
            self.remember_task(handle);
        }
    }

    /// Focus left a field. The close is deferred by the grace delay and
    /// re-checked against live focus when it fires: a tap on the keyboard
    /// surface or a direct move to another editable field vetoes it. A newer
    /// `focus_in` supersedes the close through the same re-check; there is
    /// no cancellation path.
    pub fn focus_out(&self, id: FieldId) {
        self.registry.blur(id);

        let registry = self.registry.clone();
        let state = self.state.clone();
        let lock = self.lock_scroll.clone();
        let handle = self.queue.schedule(self.timing.close_grace, move || {
            match registry.focus() {
                Some(FocusTarget::Keyboard) => {}
                Some(FocusTarget::Field(f)) if registry.is_eligible(f) => {}
                _ => hide(&state, lock.as_deref()),
            }
        });
        self.remember_task(handle);
    }

    /// Host notice that a field's attributes changed. A target that became
    /// disabled or read-only under the open keyboard closes it immediately,
    /// skipping the grace delay.
    pub fn field_changed(&self, id: FieldId) {
        if self.state.phase().target() == Some(id) && !self.registry.is_eligible(id) {
            log::debug!("target field {id:?} became ineligible; closing now");
            self.registry.blur(id);
            hide(&self.state, self.lock_scroll.as_deref());
        }
    }

    /// The renderer reports any press on the keyboard surface before the key
    /// callback runs, so a pending close re-check sees the tap.
    pub fn keyboard_pointer_down(&self) {
        if self.state.phase().is_visible() {
            self.registry.set_focus(Some(FocusTarget::Keyboard));
        }
    }

    /// Applies one keystroke to the current target. A stale or missing
    /// target drops the keystroke silently; there is no error surface.
    pub fn key_press(&self, key: Keystroke) {
        if let Err(err) = self.route_key(key) {
            log::debug!("keystroke {key:?} dropped: {err}");
        }
    }

    fn route_key(&self, key: Keystroke) -> Result<(), KeyEventError> {
        let KeyboardPhase::Visible { target, .. } = self.state.phase() else {
            return Err(KeyEventError::NotOpen);
        };
        let sig = self
            .registry
            .value(target)
            .ok_or(KeyEventError::StaleTarget)?;
        let selection = self.registry.selection(target).unwrap_or(0..0);
        let multi_line = self.registry.multi_line(target);

        match apply_keystroke(&sig.get(), selection, key, multi_line) {
            EditOutcome::Edited { value, cursor } => {
                self.registry.commit(target, value, cursor);
            }
            EditOutcome::Submit => {
                self.registry.submit(target);
            }
            EditOutcome::Noop => {}
        }
        Ok(())
    }

    /// Explicit close (the Done key): blur the target first, then hide,
    /// preempting the grace-delay path entirely.
    pub fn close_now(&self) {
        if let Some(target) = self.state.phase().target() {
            self.registry.blur(target);
        }
        if self.registry.focus() == Some(FocusTarget::Keyboard) {
            self.registry.set_focus(None);
        }
        hide(&self.state, self.lock_scroll.as_deref());
    }

    fn remember_task(&self, handle: TaskHandle) {
        let mut pending = self.pending.borrow_mut();
        pending.retain(|h| !h.is_spent());
        pending.push(handle);
    }
}

impl Drop for KeyboardManager {
    fn drop(&mut self) {
        // the manager's deferred effects must not outlive it
        for h in self.pending.borrow().iter() {
            h.cancel();
        }
    }
}

fn hide(state: &KeyboardState, lock: Option<&dyn Fn(bool)>) {
    if state.phase().is_visible() {
        state.close();
        if let Some(lock) = lock {
            lock(false);
        }
    }
}
