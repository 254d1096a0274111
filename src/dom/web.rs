//! Browser document backed by `web-sys`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, KeyboardEvent};

use super::{Dom, KeyListener, ListenerId};
use crate::error::{ClientError, Result};

struct WebDomInner {
    document: Document,
    // Closures must outlive their registration, so the document handle owns them.
    listeners: RefCell<HashMap<ListenerId, Closure<dyn FnMut(KeyboardEvent)>>>,
    next_listener: Cell<u64>,
}

impl Drop for WebDomInner {
    fn drop(&mut self) {
        for (_, closure) in self.listeners.borrow_mut().drain() {
            let _ = self
                .document
                .remove_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        }
    }
}

/// Handle onto the page's `document`.
#[derive(Clone)]
pub struct WebDom {
    inner: Rc<WebDomInner>,
}

impl WebDom {
    pub fn new() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(ClientError::NoWindow)?;
        Ok(Self {
            inner: Rc::new(WebDomInner {
                document,
                listeners: RefCell::new(HashMap::new()),
                next_listener: Cell::new(0),
            }),
        })
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.inner.document.get_element_by_id(id)
    }
}

impl Dom for WebDom {
    fn contains(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn set_class_name(&self, id: &str, class_name: &str) -> bool {
        self.element(id)
            .map(|el| el.set_class_name(class_name))
            .is_some()
    }

    fn class_name(&self, id: &str) -> Option<String> {
        self.element(id).map(|el| el.class_name())
    }

    fn add_class(&self, id: &str, class: &str) -> bool {
        self.element(id)
            .map(|el| {
                let _ = el.class_list().add_1(class);
            })
            .is_some()
    }

    fn remove_class(&self, id: &str, class: &str) -> bool {
        self.element(id)
            .map(|el| {
                let _ = el.class_list().remove_1(class);
            })
            .is_some()
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id)
            .map(|el| el.class_list().contains(class))
            .unwrap_or(false)
    }

    fn set_text(&self, id: &str, text: &str) -> bool {
        self.element(id)
            .map(|el| el.set_text_content(Some(text)))
            .is_some()
    }

    fn text(&self, id: &str) -> Option<String> {
        self.element(id).map(|el| el.text_content().unwrap_or_default())
    }

    fn set_inner_html(&self, id: &str, html: &str) -> bool {
        self.element(id).map(|el| el.set_inner_html(html)).is_some()
    }

    fn inner_html(&self, id: &str) -> Option<String> {
        self.element(id).map(|el| el.inner_html())
    }

    fn add_key_listener(&self, listener: KeyListener) -> ListenerId {
        let id = ListenerId(self.inner.next_listener.get());
        self.inner.next_listener.set(id.0 + 1);

        let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            listener(&event.key());
        }) as Box<dyn FnMut(KeyboardEvent)>);

        if let Err(e) = self
            .inner
            .document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
        {
            tracing::warn!("Failed to bind keydown listener: {:?}", e);
        }

        self.inner.listeners.borrow_mut().insert(id, closure);
        id
    }

    fn remove_key_listener(&self, id: ListenerId) {
        if let Some(closure) = self.inner.listeners.borrow_mut().remove(&id) {
            let _ = self
                .inner
                .document
                .remove_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        }
    }
}
