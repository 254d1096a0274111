//! Keyboard dismissal of the shared overlay.

use std::rc::Rc;

use crate::dom::{Dom, ListenerId};
use crate::modal::ModalController;

/// Key that dismisses the overlay unless configured otherwise.
pub const ESCAPE: &str = "Escape";

/// A document-level key listener registration.
///
/// Dropping the subscription (or calling [`KeySubscription::unsubscribe`])
/// removes the listener. [`KeySubscription::forget`] keeps it registered for
/// the rest of the page's life.
pub struct KeySubscription<D: Dom> {
    dom: D,
    id: Option<ListenerId>,
}

impl<D: Dom> KeySubscription<D> {
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    /// Leave the listener in place with no way to remove it.
    pub fn forget(mut self) {
        self.id = None;
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.dom.remove_key_listener(id);
        }
    }
}

impl<D: Dom> Drop for KeySubscription<D> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Close `modal` whenever `key` is pressed anywhere on the page.
pub fn bind_dismiss_key<D: Dom>(dom: &D, modal: ModalController<D>, key: &str) -> KeySubscription<D> {
    let key = key.to_string();
    let id = dom.add_key_listener(Rc::new(move |pressed: &str| {
        if pressed == key {
            modal.close();
        }
    }));
    KeySubscription {
        dom: dom.clone(),
        id: Some(id),
    }
}

/// [`bind_dismiss_key`] for `Escape`.
pub fn bind_escape<D: Dom>(dom: &D, modal: ModalController<D>) -> KeySubscription<D> {
    bind_dismiss_key(dom, modal, ESCAPE)
}
