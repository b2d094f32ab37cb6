//! Ambient render parameters, scoped with a thread-local stack.
//!
//! The only local today is [`Handedness`]: the host reads its "left-hand
//! mode" preference from wherever it keeps settings and wraps the render
//! call in [`with_handedness`]. Widgets read it once per render via
//! [`handedness`]; it mirrors which screen edge the Done/backspace/enter
//! controls sit on and changes nothing about key semantics.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

/// Which hand the keyboard is laid out for. `Left` mirrors every row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Handedness {
    Left,
    #[default]
    Right,
}

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = RefCell::new(Vec::new());
}

pub fn with_handedness<R>(hand: Handedness, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<Handedness>(), Box::new(hand));
        f()
    })
}

pub fn handedness() -> Handedness {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<Handedness>())
                && let Some(h) = v.downcast_ref::<Handedness>()
            {
                return *h;
            }
        }
        Handedness::default()
    })
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // frame guard pops on unwind too
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(t: TypeId, v: Box<dyn Any>) {
    LOCALS_STACK.with(|st| {
        if let Some(top) = st.borrow_mut().last_mut() {
            top.insert(t, v);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_right_handed() {
        assert_eq!(handedness(), Handedness::Right);
    }

    #[test]
    fn test_override_is_scoped() {
        with_handedness(Handedness::Left, || {
            assert_eq!(handedness(), Handedness::Left);
            with_handedness(Handedness::Right, || {
                assert_eq!(handedness(), Handedness::Right);
            });
            assert_eq!(handedness(), Handedness::Left);
        });
        assert_eq!(handedness(), Handedness::Right);
    }
}
