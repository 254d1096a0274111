//! Broker badge and status count reconciliation.
//!
//! Pure projections from the latest server values onto the document. Each
//! write looks its element up first and quietly does nothing if the page
//! lacks it.

use crate::api::{StatusCategory, StatusCounts};
use crate::dom::{ids, Dom};

/// Broker connectivity as last reported by the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectivityState {
    Connected,
    Disconnected,
}

impl ConnectivityState {
    pub fn from_connected(connected: bool) -> Self {
        if connected {
            ConnectivityState::Connected
        } else {
            ConnectivityState::Disconnected
        }
    }

    /// Full class attribute of the badge element
    pub fn class_name(&self) -> &'static str {
        match self {
            ConnectivityState::Connected => "broker-badge connected",
            ConnectivityState::Disconnected => "broker-badge disconnected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConnectivityState::Connected => "Broker Connected",
            ConnectivityState::Disconnected => "Disconnected",
        }
    }
}

#[derive(Clone)]
pub struct BadgeReconciler<D: Dom> {
    dom: D,
}

impl<D: Dom> BadgeReconciler<D> {
    pub fn new(dom: D) -> Self {
        Self { dom }
    }

    /// Show the badge as connected or disconnected.
    ///
    /// The whole class attribute is replaced, so no state class from an
    /// earlier call survives. Requires both the badge and its label; with
    /// either missing nothing is written.
    pub fn set_connectivity(&self, connected: bool) {
        if !self.dom.contains(ids::BROKER_BADGE) || !self.dom.contains(ids::BROKER_TEXT) {
            return;
        }
        let state = ConnectivityState::from_connected(connected);
        self.dom.set_class_name(ids::BROKER_BADGE, state.class_name());
        self.dom.set_text(ids::BROKER_TEXT, state.label());
    }

    /// Write all four category counts. `None` leaves the display as it is.
    pub fn set_status_counts(&self, counts: Option<&StatusCounts>) {
        let Some(counts) = counts else {
            return;
        };
        for category in StatusCategory::ALL {
            self.dom
                .set_text(category.slot_id(), &counts.get(category).to_string());
        }
    }
}
