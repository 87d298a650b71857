//! Push-based "keyboard will show / hide" notifications.
//!
//! A [`KeyboardNotifier`] stands in for the platform notification center.
//! Listeners attach with [`KeyboardNotifier::subscribe`] and stay attached for
//! exactly as long as the returned [`Subscription`] lives.
//!
//! Everything here is single-threaded; the notifier is shared by cloning and
//! is not `Send`.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardEvent {
    WillShow,
    WillHide,
}

type Listener = Box<dyn FnMut(KeyboardEvent)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
    notifying: bool,
    // ids dropped while `notify` had the listeners checked out
    removed: Vec<u64>,
}

#[derive(Clone, Default)]
pub struct KeyboardNotifier {
    registry: Rc<RefCell<Registry>>,
}

impl KeyboardNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl FnMut(KeyboardEvent) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));
        tracing::trace!(subscription = id, "keyboard listener attached");
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Deliver `event` to every attached listener, in subscription order.
    ///
    /// Listeners may subscribe or drop subscriptions while being notified;
    /// new listeners only see later events.
    pub fn notify(&self, event: KeyboardEvent) {
        let mut listeners = {
            let mut registry = self.registry.borrow_mut();
            registry.notifying = true;
            std::mem::take(&mut registry.listeners)
        };
        tracing::debug!(?event, listeners = listeners.len(), "keyboard notification");
        for (_, listener) in listeners.iter_mut() {
            listener(event);
        }
        let detached = {
            let mut registry = self.registry.borrow_mut();
            registry.notifying = false;
            let removed = std::mem::take(&mut registry.removed);
            let (kept, detached): (Vec<_>, Vec<_>) = listeners
                .into_iter()
                .partition(|(id, _)| !removed.contains(id));
            let added = std::mem::replace(&mut registry.listeners, kept);
            registry.listeners.extend(added);
            detached
        };
        // Listeners may own other subscriptions; drop them with the registry
        // released so those can detach too.
        drop(detached);
    }
}

impl fmt::Debug for KeyboardNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardNotifier")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Scoped attachment to a [`KeyboardNotifier`]. Dropping it detaches the
/// listener.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let Ok(mut registry) = registry.try_borrow_mut() else {
            return;
        };
        let detached = match registry.listeners.iter().position(|(id, _)| *id == self.id) {
            Some(index) => Some(registry.listeners.remove(index)),
            None => {
                if registry.notifying {
                    registry.removed.push(self.id);
                }
                None
            }
        };
        drop(registry);
        drop(detached);
        tracing::trace!(subscription = self.id, "keyboard listener detached");
    }
}
