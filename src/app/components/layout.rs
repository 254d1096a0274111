//! Layout component wrapping all pages.

use dioxus::prelude::*;

use super::{BrokerBadge, ModalHost};

#[derive(Props, Clone, PartialEq)]
pub struct LayoutProps {
    /// Page title (shown in browser tab)
    pub title: String,
    /// Page content
    pub children: Element,
}

/// Main layout: header with the broker badge, page body, shared modal host.
#[component]
pub fn Layout(props: LayoutProps) -> Element {
    let version = env!("WATCHTOWER_VERSION");
    let git_sha = env!("WATCHTOWER_GIT_SHA");
    let full_title = format!("{} - WatchTower", props.title);

    rsx! {
        // Head elements - Dioxus hoists these to the real <head>
        document::Title { "{full_title}" }

        header { class: "topbar",
            strong { "WatchTower" }
            BrokerBadge {}
        }
        main { class: "container",
            {props.children}
        }
        footer { class: "container text-center",
            small { class: "text-muted", "WatchTower v{version} ({git_sha})" }
        }

        ModalHost {}
    }
}
