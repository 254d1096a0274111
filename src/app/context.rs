//! App-level dashboard client context.
//!
//! Provides a single [`DashboardClient`](crate::DashboardClient) shared by all
//! pages. The client is created after the first mount, once the badge, count
//! and modal elements exist in the document, and lives as long as the app
//! root. Unmounting the root drops it, which unbinds the dismiss key.

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

use dioxus::prelude::*;

use crate::api::StatusResponse;

#[cfg(target_arch = "wasm32")]
type WebClient = crate::DashboardClient<crate::dom::WebDom, crate::api::FetchTransport>;

/// Global client handle shared via context
#[derive(Clone, Default)]
pub struct ClientContext {
    #[cfg(target_arch = "wasm32")]
    client: Rc<RefCell<Option<WebClient>>>,
}

impl ClientContext {
    pub fn is_ready(&self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            self.client.borrow().is_some()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            false
        }
    }

    pub fn ping_all(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(client) = self.client.borrow().as_ref() {
            client.dispatcher().ping_all();
        }
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(unused_variables))]
    pub fn ping_device(&self, device_id: &str) {
        #[cfg(target_arch = "wasm32")]
        if let Some(client) = self.client.borrow().as_ref() {
            client.dispatcher().ping_device(device_id);
        }
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(unused_variables))]
    pub fn send_command(&self, device_id: &str, command: &str) {
        #[cfg(target_arch = "wasm32")]
        if let Some(client) = self.client.borrow().as_ref() {
            client.dispatcher().send_command(device_id, command);
        }
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(unused_variables))]
    pub fn open_modal(&self, markup: &str) {
        #[cfg(target_arch = "wasm32")]
        if let Some(client) = self.client.borrow().as_ref() {
            client.modal().open(markup);
        }
    }

    pub fn close_modal(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(client) = self.client.borrow().as_ref() {
            client.modal().close();
        }
    }

    /// Re-run status reconciliation in the background.
    pub fn refresh_status(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(client) = self.client.borrow().as_ref() {
            client.poller().init();
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn connect(&self) {
        use crate::api::FetchTransport;
        use crate::config::ClientConfig;
        use crate::dom::WebDom;

        if self.client.borrow().is_some() {
            return;
        }
        let config = ClientConfig::default();
        match WebDom::new() {
            Ok(dom) => {
                let transport = FetchTransport::new(config.base_url.clone());
                let client = crate::DashboardClient::initialize(dom, transport, &config);
                *self.client.borrow_mut() = Some(client);
                tracing::info!("Dashboard client initialized");
            }
            Err(e) => tracing::warn!("Dashboard client unavailable: {}", e),
        }
    }
}

/// Fetch the full status summary for page rendering (client-side only).
#[cfg(target_arch = "wasm32")]
pub async fn fetch_status() -> Option<StatusResponse> {
    use crate::api::{transport::get_typed, FetchTransport, STATUS_PATH};

    get_typed(&FetchTransport::default(), STATUS_PATH).await.ok()
}

/// SSR stub - there is no status to fetch outside the browser
#[cfg(not(target_arch = "wasm32"))]
pub async fn fetch_status() -> Option<StatusResponse> {
    None
}

/// Initialize client context provider - call once at app root
pub fn use_client_provider() {
    #[cfg_attr(not(target_arch = "wasm32"), allow(unused_variables))]
    let ctx = use_context_provider(ClientContext::default);

    // Client-side only: build the client once the contract elements are mounted
    #[cfg(target_arch = "wasm32")]
    use_effect(move || ctx.connect());
}

/// Get client context - use in any component that dispatches commands or opens the modal
pub fn use_client() -> ClientContext {
    use_context::<ClientContext>()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_inert_outside_browser() {
        let ctx = ClientContext::default();
        ctx.ping_all();
        ctx.ping_device("dev-7");
        ctx.send_command("dev-7", "reboot");
        ctx.open_modal("<p>x</p>");
        ctx.close_modal();
        ctx.refresh_status();
        assert!(!ctx.is_ready());
    }
}
