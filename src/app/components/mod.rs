//! Shared UI components for the Dioxus web UI.

pub mod broker_badge;
pub mod layout;
pub mod modal_host;
pub mod status_counts;

pub use broker_badge::BrokerBadge;
pub use layout::Layout;
pub use modal_host::ModalHost;
pub use status_counts::StatusCounts;
