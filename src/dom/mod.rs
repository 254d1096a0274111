//! Document seam.
//!
//! The core never holds its own copy of what is on screen: the document is
//! the store, and every writer looks its target up by id at the moment it
//! writes. A missing element is an expected condition (the page simply does
//! not carry that widget), so every operation reports presence instead of
//! failing.

use std::rc::Rc;

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use memory::MemoryDom;
#[cfg(target_arch = "wasm32")]
pub use web::WebDom;

/// Element ids the core reads and writes.
pub mod ids {
    pub const BROKER_BADGE: &str = "broker-badge";
    pub const BROKER_TEXT: &str = "broker-text";
    pub const COUNT_ONLINE: &str = "count-online";
    pub const COUNT_OFFLINE: &str = "count-offline";
    pub const COUNT_UNKNOWN: &str = "count-unknown";
    pub const COUNT_TESTING: &str = "count-testing";
    pub const MODAL_BACKDROP: &str = "modal-backdrop";
    pub const MODAL_CONTAINER: &str = "modal-container";

    /// Every id in the contract, in document order.
    pub const ALL: [&str; 8] = [
        BROKER_BADGE,
        BROKER_TEXT,
        COUNT_ONLINE,
        COUNT_OFFLINE,
        COUNT_UNKNOWN,
        COUNT_TESTING,
        MODAL_BACKDROP,
        MODAL_CONTAINER,
    ];
}

/// Handle returned by [`Dom::add_key_listener`], used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Callback for document-level `keydown`, receiving the key name (`"Escape"`, `"a"`, ...).
pub type KeyListener = Rc<dyn Fn(&str)>;

/// Element operations needed by the dashboard core.
///
/// Writers return `true` when the element was found and written, `false`
/// when it is absent. Implementations are cheap handles onto one shared
/// document, so cloning never copies elements.
pub trait Dom: Clone + 'static {
    fn contains(&self, id: &str) -> bool;

    /// Replace the whole class attribute.
    fn set_class_name(&self, id: &str, class_name: &str) -> bool;
    fn class_name(&self, id: &str) -> Option<String>;

    fn add_class(&self, id: &str, class: &str) -> bool;
    fn remove_class(&self, id: &str, class: &str) -> bool;
    fn has_class(&self, id: &str, class: &str) -> bool;

    fn set_text(&self, id: &str, text: &str) -> bool;
    fn text(&self, id: &str) -> Option<String>;

    fn set_inner_html(&self, id: &str, html: &str) -> bool;
    fn inner_html(&self, id: &str) -> Option<String>;

    /// Register a document-wide `keydown` listener. It stays registered until
    /// [`Dom::remove_key_listener`] is called with the returned id.
    fn add_key_listener(&self, listener: KeyListener) -> ListenerId;
    fn remove_key_listener(&self, id: ListenerId);
}
