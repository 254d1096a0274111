//! Dashboard page component.
//!
//! Shows the status counts, fleet actions and the device table. Counts and
//! the badge are projected by the client core; the table is rendered from
//! its own status fetch.

use dioxus::prelude::*;

use crate::api::DeviceSummary;
use crate::app::components::{Layout, StatusCounts};
use crate::app::context::{fetch_status, use_client};
use crate::format::{escape_html, format_date};

/// Markup shown in the shared modal for one device.
fn device_details_markup(name: &str, device: &DeviceSummary) -> String {
    let field = |label: &str, value: Option<&str>| {
        format!(
            "<dt>{}</dt><dd>{}</dd>",
            label,
            escape_html(value.unwrap_or("—"))
        )
    };
    let response = device.response_ms.map(|ms| format!("{:.0} ms", ms));

    format!(
        "<article class=\"device-details\"><header><h3>{}</h3></header><dl>{}{}{}{}{}{}</dl></article>",
        escape_html(name),
        field("Type", device.device_type.as_deref()),
        field("Room", device.room.as_deref()),
        field("Topic", device.topic.as_deref()),
        field("Last test", Some(&format_date(device.last_test.as_deref()))),
        field("Response", response.as_deref()),
        field("Last error", device.error.as_deref()),
    )
}

/// Dashboard page component.
#[component]
pub fn Dashboard() -> Element {
    let client = use_client();
    let mut status = use_resource(fetch_status);

    let ping_client = client.clone();
    let refresh_client = client.clone();

    let devices_content = match status.read().as_ref() {
        None => rsx! {
            article { aria_busy: "true", "Loading devices..." }
        },
        Some(None) => rsx! {
            article { class: "status-err", "Device list unavailable" }
        },
        Some(Some(summary)) if summary.devices.is_empty() => rsx! {
            article { "No devices registered." }
        },
        Some(Some(summary)) => {
            let rows = summary.devices.clone();
            rsx! {
                table {
                    thead {
                        tr {
                            th { "Device" }
                            th { "Room" }
                            th { "Status" }
                            th { "Last test" }
                            th { "Actions" }
                        }
                    }
                    tbody {
                        for (name, device) in rows {
                            DeviceRow { key: "{name}", name: name.clone(), device: device.clone() }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        Layout {
            title: "Dashboard".to_string(),

            h1 { "Dashboard" }

            section { id: "counts",
                StatusCounts {}
            }

            section { id: "fleet-actions",
                button {
                    onclick: move |_| ping_client.ping_all(),
                    "Ping all"
                }
                button {
                    class: "outline",
                    onclick: move |_| {
                        refresh_client.refresh_status();
                        status.restart();
                    },
                    "Refresh"
                }
            }

            section { id: "devices",
                hgroup {
                    h2 { "Devices" }
                    p { "Commands are sent once; results appear on the next refresh" }
                }
                {devices_content}
            }
        }
    }
}

#[component]
fn DeviceRow(name: String, device: DeviceSummary) -> Element {
    let client = use_client();
    let status = device.status.clone().unwrap_or_else(|| "unknown".to_string());
    let last_test = format_date(device.last_test.as_deref());
    let details = device_details_markup(&name, &device);

    let ping_client = client.clone();
    let ping_name = name.clone();
    let details_client = client.clone();

    rsx! {
        tr {
            td { "{name}" }
            td { {device.room.clone().unwrap_or_default()} }
            td { class: "status-{status}", "{status}" }
            td { "{last_test}" }
            td {
                button {
                    class: "outline secondary",
                    onclick: move |_| ping_client.ping_device(&ping_name),
                    "Ping"
                }
                for command in device.commands.clone() {
                    CommandButton { key: "{command}", device_id: name.clone(), command: command.clone() }
                }
                button {
                    class: "outline",
                    onclick: move |_| details_client.open_modal(&details),
                    "Details"
                }
            }
        }
    }
}

#[component]
fn CommandButton(device_id: String, command: String) -> Element {
    let client = use_client();
    let label = command.clone();

    rsx! {
        button {
            class: "outline secondary",
            onclick: move |_| client.send_command(&device_id, &command),
            "{label}"
        }
    }
}
