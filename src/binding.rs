//! Caller-owned two-way bindable values.
//!
//! A [`Binding`] holds the current value together with the callback the
//! owner wants to hear from when someone else proposes a replacement. The
//! popover reads and writes its alignment and presentation flag through
//! bindings so the host keeps the source of truth.

use std::fmt;

type ChangeCallback<T> = Box<dyn FnMut(&T)>;

pub struct Binding<T> {
    value: T,
    on_change: Option<ChangeCallback<T>>,
}

impl<T: Copy + PartialEq> Binding<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            on_change: None,
        }
    }

    pub fn with_on_change(mut self, on_change: impl FnMut(&T) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    pub fn get(&self) -> T {
        self.value
    }

    /// Store `value`, notifying the owner only when it differs from the
    /// current one. Returns whether anything changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&self.value);
        }
        true
    }
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("value", &self.value)
            .field("observed", &self.on_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn callback_fires_only_on_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut binding = Binding::new(1).with_on_change(move |v| sink.borrow_mut().push(*v));

        assert!(!binding.set(1));
        assert!(binding.set(2));
        assert!(!binding.set(2));
        assert!(binding.set(3));

        assert_eq!(binding.get(), 3);
        assert_eq!(*seen.borrow(), vec![2, 3]);
    }

    #[test]
    fn unobserved_binding_still_stores() {
        let mut binding = Binding::new(false);
        assert!(binding.set(true));
        assert!(binding.get());
    }
}
