//! In-memory document used by the headless probe and by tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{ids, Dom, KeyListener, ListenerId};

#[derive(Debug, Clone, Default, PartialEq)]
struct MemoryElement {
    classes: Vec<String>,
    text: String,
    inner_html: String,
}

#[derive(Default)]
struct MemoryDomState {
    elements: HashMap<String, MemoryElement>,
    listeners: Vec<(ListenerId, KeyListener)>,
    next_listener: u64,
}

/// A flat id → element table with document-level key listeners.
#[derive(Clone, Default)]
pub struct MemoryDom {
    state: Rc<RefCell<MemoryDomState>>,
}

impl MemoryDom {
    /// Empty document: every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Document carrying every element of the dashboard contract, with the
    /// count slots showing `0` like the server-rendered markup does.
    pub fn with_dashboard_elements() -> Self {
        let dom = Self::new();
        for id in ids::ALL {
            dom.insert(id);
        }
        for id in [
            ids::COUNT_ONLINE,
            ids::COUNT_OFFLINE,
            ids::COUNT_UNKNOWN,
            ids::COUNT_TESTING,
        ] {
            dom.set_text(id, "0");
        }
        dom
    }

    /// Add an empty element. Existing elements are left untouched.
    pub fn insert(&self, id: &str) {
        self.state
            .borrow_mut()
            .elements
            .entry(id.to_string())
            .or_default();
    }

    pub fn remove(&self, id: &str) {
        self.state.borrow_mut().elements.remove(id);
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Deliver a `keydown` to every registered listener.
    pub fn press_key(&self, key: &str) {
        // Listeners may write back into the document, so release the borrow first.
        let listeners: Vec<KeyListener> = self
            .state
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(key);
        }
    }

    fn with_element<R>(&self, id: &str, f: impl FnOnce(&mut MemoryElement) -> R) -> Option<R> {
        self.state.borrow_mut().elements.get_mut(id).map(f)
    }
}

impl Dom for MemoryDom {
    fn contains(&self, id: &str) -> bool {
        self.state.borrow().elements.contains_key(id)
    }

    fn set_class_name(&self, id: &str, class_name: &str) -> bool {
        self.with_element(id, |el| {
            el.classes = class_name.split_whitespace().map(str::to_string).collect();
        })
        .is_some()
    }

    fn class_name(&self, id: &str) -> Option<String> {
        self.with_element(id, |el| el.classes.join(" "))
    }

    fn add_class(&self, id: &str, class: &str) -> bool {
        self.with_element(id, |el| {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        })
        .is_some()
    }

    fn remove_class(&self, id: &str, class: &str) -> bool {
        self.with_element(id, |el| el.classes.retain(|c| c != class))
            .is_some()
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.with_element(id, |el| el.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn set_text(&self, id: &str, text: &str) -> bool {
        self.with_element(id, |el| el.text = text.to_string())
            .is_some()
    }

    fn text(&self, id: &str) -> Option<String> {
        self.with_element(id, |el| el.text.clone())
    }

    fn set_inner_html(&self, id: &str, html: &str) -> bool {
        self.with_element(id, |el| el.inner_html = html.to_string())
            .is_some()
    }

    fn inner_html(&self, id: &str) -> Option<String> {
        self.with_element(id, |el| el.inner_html.clone())
    }

    fn add_key_listener(&self, listener: KeyListener) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let id = ListenerId(state.next_listener);
        state.next_listener += 1;
        state.listeners.push((id, listener));
        id
    }

    fn remove_key_listener(&self, id: ListenerId) {
        self.state
            .borrow_mut()
            .listeners
            .retain(|(existing, _)| *existing != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_missing_element_reports_absence() {
        let dom = MemoryDom::new();
        assert!(!dom.set_text("nope", "x"));
        assert!(!dom.add_class("nope", "show"));
        assert!(!dom.has_class("nope", "show"));
        assert_eq!(dom.text("nope"), None);
    }

    #[test]
    fn test_class_list_semantics() {
        let dom = MemoryDom::new();
        dom.insert("el");
        dom.set_class_name("el", "a  b");
        dom.add_class("el", "b");
        dom.add_class("el", "c");
        assert_eq!(dom.class_name("el").as_deref(), Some("a b c"));
        dom.remove_class("el", "a");
        assert_eq!(dom.class_name("el").as_deref(), Some("b c"));
    }

    #[test]
    fn test_dashboard_elements_seeded() {
        let dom = MemoryDom::with_dashboard_elements();
        for id in ids::ALL {
            assert!(dom.contains(id), "{id} missing");
        }
        assert_eq!(dom.text(ids::COUNT_TESTING).as_deref(), Some("0"));
    }

    #[test]
    fn test_key_listener_add_remove() {
        let dom = MemoryDom::new();
        let hits = Rc::new(Cell::new(0));
        let hits_clone = hits.clone();
        let id = dom.add_key_listener(Rc::new(move |_| hits_clone.set(hits_clone.get() + 1)));

        dom.press_key("a");
        dom.remove_key_listener(id);
        dom.press_key("a");

        assert_eq!(hits.get(), 1);
        assert_eq!(dom.listener_count(), 0);
    }
}
