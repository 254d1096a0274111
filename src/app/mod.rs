//! Dioxus application entry point.
//!
//! This module provides the root App component. The dashboard client is
//! created once at the root and shared with every page through context.

use dioxus::prelude::*;

pub mod components;
pub mod context;
pub mod pages;

use context::use_client_provider;
use pages::Dashboard;

/// Root app component with routing
#[component]
pub fn App() -> Element {
    // Single client per page: one status poll, one Escape binding
    use_client_provider();

    rsx! {
        Router::<Route> {}
    }
}

/// Application routes
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Dashboard {},
}
