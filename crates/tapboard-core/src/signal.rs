use std::cell::RefCell;
use std::rc::Rc;

pub type SubId = usize;

/// Observable value handle. Cloning shares the same underlying slot.
///
/// This is the change channel the keyboard manager writes through: a field's
/// text lives in a `Signal<String>`, and the keyboard phase in a
/// `Signal<KeyboardPhase>`, so host bindings hear about every committed
/// keystroke and every open/close without polling.
#[derive(Clone)]
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    value: T,
    subs: Vec<Option<Box<dyn Fn(&T)>>>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            subs: Vec::new(),
        })))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    pub fn set(&self, v: T) {
        self.0.borrow_mut().value = v;
        self.notify();
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        f(&mut self.0.borrow_mut().value);
        self.notify();
    }

    /// Subscribers may read this or other signals, but must not write back
    /// into the same signal from inside the callback.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let mut inner = self.0.borrow_mut();
        inner.subs.push(Some(Box::new(f)));
        inner.subs.len() - 1
    }

    pub fn unsubscribe(&self, id: SubId) {
        let mut inner = self.0.borrow_mut();
        if let Some(slot) = inner.subs.get_mut(id) {
            *slot = None;
        }
    }

    fn notify(&self) {
        // value write is finished before any subscriber runs
        let inner = self.0.borrow();
        for s in inner.subs.iter().flatten() {
            s(&inner.value);
        }
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(String::new());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = seen.clone();
        sig.subscribe(move |v: &String| {
            seen_clone.borrow_mut().push(v.clone());
        });

        sig.set("a".into());
        sig.set("ab".into());
        assert_eq!(*seen.borrow(), vec!["a".to_string(), "ab".to_string()]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let sig = signal(0);
        let count = Rc::new(RefCell::new(0));

        let count_clone = count.clone();
        let id = sig.subscribe(move |_| {
            *count_clone.borrow_mut() += 1;
        });

        sig.set(1);
        sig.unsubscribe(id);
        sig.set(2);
        assert_eq!(*count.borrow(), 1);
    }
}
