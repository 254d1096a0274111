//! Per-category device counts.

use dioxus::prelude::*;

use crate::api::StatusCategory;

/// Count tiles. Values start at `0` and are written by the badge reconciler.
#[component]
pub fn StatusCounts() -> Element {
    rsx! {
        div { class: "status-counts",
            for category in StatusCategory::ALL {
                div { key: "{category.as_str()}", class: "count-tile count-{category.as_str()}",
                    span { id: category.slot_id(), class: "count-value", "0" }
                    span { class: "count-label", "{category.as_str()}" }
                }
            }
        }
    }
}
