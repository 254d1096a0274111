//! The shared overlay surface.
//!
//! Pages never render their own modal; they hand markup to the modal
//! controller through the client context.

use dioxus::prelude::*;

use crate::app::context::use_client;
use crate::dom::ids;

#[component]
pub fn ModalHost() -> Element {
    let client = use_client();

    rsx! {
        div {
            id: ids::MODAL_BACKDROP,
            class: "modal-backdrop",
            onclick: move |_| client.close_modal(),
        }
        div { id: ids::MODAL_CONTAINER, class: "modal-container" }
    }
}
