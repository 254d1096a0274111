//! Broker connectivity badge.
//!
//! Rendered once with neutral content; the badge reconciler owns its class
//! and label after mount, so nothing here is reactive.

use dioxus::prelude::*;

use crate::dom::ids;

#[component]
pub fn BrokerBadge() -> Element {
    rsx! {
        span { id: ids::BROKER_BADGE, class: "broker-badge",
            span { class: "broker-dot" }
            span { id: ids::BROKER_TEXT, "Checking..." }
        }
    }
}
