use std::cell::{Cell, RefCell};
use std::ops::Range;
use std::rc::Rc;

use bitflags::bitflags;
use slotmap::{SlotMap, new_key_type};

use crate::layout::InputMode;
use crate::signal::{Signal, signal};

new_key_type! {
    /// Generational handle to a mounted editable field. A handle kept across
    /// the field's unmount stops resolving instead of aliasing a newer field.
    pub struct FieldId;
    /// Generational handle to a form with a submit capability.
    pub struct FormId;
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct FieldAttrs: u8 {
        const DISABLED   = 1 << 0;
        const READ_ONLY  = 1 << 1;
        const MULTI_LINE = 1 << 2;
    }
}

/// Declared control kind. Only the first four ever receive a keyboard; the
/// rest are focusable controls that must be filtered out at the tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Telephone,
    Checkbox,
    Radio,
    Submit,
    Button,
}

impl FieldKind {
    pub fn editable(self) -> bool {
        matches!(
            self,
            FieldKind::Text | FieldKind::Number | FieldKind::Email | FieldKind::Telephone
        )
    }
}

/// One mounted field. The host owns the entry; the manager only ever holds
/// the `FieldId`.
pub struct Field {
    pub value: Signal<String>,
    pub selection: Range<usize>,
    pub kind: FieldKind,
    pub mode: Option<InputMode>,
    pub attrs: FieldAttrs,
    pub form: Option<FormId>,
}

impl Field {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            value: signal(String::new()),
            selection: 0..0,
            kind,
            mode: None,
            attrs: FieldAttrs::empty(),
            form: None,
        }
    }

    pub fn mode(mut self, mode: InputMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn attrs(mut self, attrs: FieldAttrs) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn form(mut self, form: FormId) -> Self {
        self.form = Some(form);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.value.set(text.into());
        self
    }
}

struct Form {
    on_submit: Rc<dyn Fn()>,
}

/// Where live focus currently sits, as reported by the host. The keyboard
/// surface is a target of its own so the deferred close can tell a key tap
/// apart from focus truly leaving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusTarget {
    Field(FieldId),
    Keyboard,
}

/// Host-side collection of mounted fields and forms, plus live focus.
///
/// Uses interior mutability so change subscribers fired from
/// [`commit`](FieldRegistry::commit) can read the registry again without
/// tripping a borrow; everything still runs on the one UI thread.
#[derive(Default)]
pub struct FieldRegistry {
    fields: RefCell<SlotMap<FieldId, Field>>,
    forms: RefCell<SlotMap<FormId, Form>>,
    focus: Cell<Option<FocusTarget>>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&self, field: Field) -> FieldId {
        self.fields.borrow_mut().insert(field)
    }

    pub fn unmount(&self, id: FieldId) {
        self.fields.borrow_mut().remove(id);
        if self.focus.get() == Some(FocusTarget::Field(id)) {
            self.focus.set(None);
        }
    }

    pub fn contains(&self, id: FieldId) -> bool {
        self.fields.borrow().contains_key(id)
    }

    pub fn register_form(&self, on_submit: impl Fn() + 'static) -> FormId {
        self.forms.borrow_mut().insert(Form {
            on_submit: Rc::new(on_submit),
        })
    }

    pub fn remove_form(&self, id: FormId) {
        self.forms.borrow_mut().remove(id);
    }

    /// Clone of the field's value handle, for bindings and for editing.
    pub fn value(&self, id: FieldId) -> Option<Signal<String>> {
        self.fields.borrow().get(id).map(|f| f.value.clone())
    }

    pub fn selection(&self, id: FieldId) -> Option<Range<usize>> {
        self.fields.borrow().get(id).map(|f| f.selection.clone())
    }

    pub fn set_selection(&self, id: FieldId, selection: Range<usize>) {
        if let Some(f) = self.fields.borrow_mut().get_mut(id) {
            let len = f.value.get().len();
            f.selection = selection.start.min(len)..selection.end.min(len);
        }
    }

    pub fn kind(&self, id: FieldId) -> Option<FieldKind> {
        self.fields.borrow().get(id).map(|f| f.kind)
    }

    pub fn input_mode(&self, id: FieldId) -> Option<InputMode> {
        self.fields.borrow().get(id).and_then(|f| f.mode)
    }

    pub fn attrs(&self, id: FieldId) -> Option<FieldAttrs> {
        self.fields.borrow().get(id).map(|f| f.attrs)
    }

    pub fn set_attrs(&self, id: FieldId, attrs: FieldAttrs) {
        if let Some(f) = self.fields.borrow_mut().get_mut(id) {
            f.attrs = attrs;
        }
    }

    pub fn multi_line(&self, id: FieldId) -> bool {
        self.attrs(id)
            .is_some_and(|a| a.contains(FieldAttrs::MULTI_LINE))
    }

    /// Editable kind, not disabled, not read-only.
    pub fn is_eligible(&self, id: FieldId) -> bool {
        self.fields.borrow().get(id).is_some_and(|f| {
            f.kind.editable() && !f.attrs.intersects(FieldAttrs::DISABLED | FieldAttrs::READ_ONLY)
        })
    }

    pub fn focus(&self) -> Option<FocusTarget> {
        self.focus.get()
    }

    pub fn set_focus(&self, target: Option<FocusTarget>) {
        self.focus.set(target);
    }

    pub fn blur(&self, id: FieldId) {
        if self.focus.get() == Some(FocusTarget::Field(id)) {
            self.focus.set(None);
        }
    }

    /// Atomic "set value + selection, then notify": the selection lands
    /// before the value is published, so subscribers observe a consistent
    /// field. Exactly one notification per call.
    pub fn commit(&self, id: FieldId, value: String, cursor: usize) -> bool {
        let sig = {
            let mut fields = self.fields.borrow_mut();
            let Some(f) = fields.get_mut(id) else {
                return false;
            };
            let cursor = cursor.min(value.len());
            f.selection = cursor..cursor;
            f.value.clone()
        };
        sig.set(value);
        true
    }

    /// Invokes the submit capability of the field's owning form, if any.
    pub fn submit(&self, id: FieldId) -> bool {
        let cb = {
            let fields = self.fields.borrow();
            let forms = self.forms.borrow();
            fields
                .get(id)
                .and_then(|f| f.form)
                .and_then(|form| forms.get(form))
                .map(|form| form.on_submit.clone())
        };
        match cb {
            Some(cb) => {
                cb();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_handle_stops_resolving() {
        let reg = FieldRegistry::new();
        let id = reg.mount(Field::new(FieldKind::Text));
        assert!(reg.contains(id));

        reg.unmount(id);
        assert!(!reg.contains(id));
        assert!(reg.value(id).is_none());
        assert!(!reg.commit(id, "x".into(), 1));
    }

    #[test]
    fn test_commit_notifies_exactly_once() {
        let reg = FieldRegistry::new();
        let id = reg.mount(Field::new(FieldKind::Text));

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        reg.value(id).unwrap().subscribe(move |_| {
            count_clone.set(count_clone.get() + 1);
        });

        assert!(reg.commit(id, "hi".into(), 2));
        assert_eq!(count.get(), 1);
        assert_eq!(reg.selection(id), Some(2..2));
        assert_eq!(reg.value(id).unwrap().get(), "hi");
    }

    #[test]
    fn test_commit_clamps_cursor() {
        let reg = FieldRegistry::new();
        let id = reg.mount(Field::new(FieldKind::Text));
        reg.commit(id, "ab".into(), 99);
        assert_eq!(reg.selection(id), Some(2..2));
    }

    #[test]
    fn test_subscriber_may_read_registry_during_commit() {
        let reg = Rc::new(FieldRegistry::new());
        let id = reg.mount(Field::new(FieldKind::Text));

        let seen = Rc::new(RefCell::new(0..0));
        let reg2 = reg.clone();
        let seen2 = seen.clone();
        reg.value(id).unwrap().subscribe(move |_| {
            *seen2.borrow_mut() = reg2.selection(id).unwrap();
        });

        reg.commit(id, "abc".into(), 3);
        assert_eq!(*seen.borrow(), 3..3);
    }

    #[test]
    fn test_eligibility() {
        let reg = FieldRegistry::new();
        let text = reg.mount(Field::new(FieldKind::Text));
        let check = reg.mount(Field::new(FieldKind::Checkbox));
        let off = reg.mount(Field::new(FieldKind::Email).attrs(FieldAttrs::DISABLED));
        let frozen = reg.mount(Field::new(FieldKind::Text).attrs(FieldAttrs::READ_ONLY));

        assert!(reg.is_eligible(text));
        assert!(!reg.is_eligible(check));
        assert!(!reg.is_eligible(off));
        assert!(!reg.is_eligible(frozen));
    }

    #[test]
    fn test_submit_routes_through_owning_form() {
        let reg = FieldRegistry::new();
        let submitted = Rc::new(Cell::new(false));
        let submitted_clone = submitted.clone();
        let form = reg.register_form(move || submitted_clone.set(true));
        let id = reg.mount(Field::new(FieldKind::Text).form(form));
        let orphan = reg.mount(Field::new(FieldKind::Text));

        assert!(reg.submit(id));
        assert!(submitted.get());
        assert!(!reg.submit(orphan));
    }

    #[test]
    fn test_unmount_clears_focus() {
        let reg = FieldRegistry::new();
        let id = reg.mount(Field::new(FieldKind::Text));
        reg.set_focus(Some(FocusTarget::Field(id)));
        reg.unmount(id);
        assert_eq!(reg.focus(), None);
    }
}
