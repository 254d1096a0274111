//! Wire types and endpoint paths of the WatchTower HTTP API.
//!
//! The server is an external collaborator; these types describe only what
//! the dashboard reads. Every field is lenient on decode so that a partial or
//! error-shaped body still produces a value.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

pub mod transport;

pub use transport::{ScriptedTransport, Transport};
#[cfg(target_arch = "wasm32")]
pub use transport::FetchTransport;
#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub use transport::HttpTransport;

// =============================================================================
// Endpoints
// =============================================================================

pub const STATUS_PATH: &str = "/api/status";
pub const PING_ALL_PATH: &str = "/api/ping-all";

/// `/api/ping/{device_id}`. The id is interpolated verbatim.
pub fn ping_device_path(device_id: &str) -> String {
    format!("/api/ping/{}", device_id)
}

/// `/api/command/{device_id}/{command}`. Both parts are interpolated verbatim.
pub fn command_path(device_id: &str, command: &str) -> String {
    format!("/api/command/{}/{}", device_id, command)
}

// =============================================================================
// Status Types
// =============================================================================

/// The closed set of device status categories shown on the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    Online,
    Offline,
    Unknown,
    Testing,
}

impl StatusCategory {
    pub const ALL: [StatusCategory; 4] = [
        StatusCategory::Online,
        StatusCategory::Offline,
        StatusCategory::Unknown,
        StatusCategory::Testing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCategory::Online => "online",
            StatusCategory::Offline => "offline",
            StatusCategory::Unknown => "unknown",
            StatusCategory::Testing => "testing",
        }
    }

    /// Id of the element displaying this category's count.
    pub fn slot_id(&self) -> &'static str {
        use crate::dom::ids;
        match self {
            StatusCategory::Online => ids::COUNT_ONLINE,
            StatusCategory::Offline => ids::COUNT_OFFLINE,
            StatusCategory::Unknown => ids::COUNT_UNKNOWN,
            StatusCategory::Testing => ids::COUNT_TESTING,
        }
    }
}

/// Per-category device counts. Missing, `null`, negative or fractional
/// values read as zero; unknown categories are ignored.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCounts {
    #[serde(default, deserialize_with = "lenient_count")]
    pub online: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub offline: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub unknown: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub testing: u64,
}

impl StatusCounts {
    pub fn get(&self, category: StatusCategory) -> u64 {
        match category {
            StatusCategory::Online => self.online,
            StatusCategory::Offline => self.offline,
            StatusCategory::Unknown => self.unknown,
            StatusCategory::Testing => self.testing,
        }
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64().unwrap_or(0))
}

/// Decode a field, falling back to its default when present but mistyped.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// The two fields of a status body that drive the badge and the counts.
///
/// Read straight from the JSON value so nothing else in the body can get in
/// the way: a non-boolean `broker_connected` reads as disconnected and a
/// non-object `counts` as absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusProjection {
    pub broker_connected: bool,
    pub counts: Option<StatusCounts>,
}

impl StatusProjection {
    /// `None` when the body is not a JSON object.
    pub fn from_body(body: &serde_json::Value) -> Option<Self> {
        let fields = body.as_object()?;
        let broker_connected = fields
            .get("broker_connected")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);
        let counts = fields
            .get("counts")
            .filter(|counts| counts.is_object())
            .and_then(|counts| StatusCounts::deserialize(counts).ok());

        Some(Self {
            broker_connected,
            counts,
        })
    }
}

/// Body of `GET /api/status`, as rendered by the dashboard page.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    /// Absent (e.g. an error-shaped body) reads as disconnected.
    #[serde(default, deserialize_with = "lenient")]
    pub broker_connected: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub counts: Option<StatusCounts>,
    #[serde(default, deserialize_with = "lenient")]
    pub broker_host: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub broker_port: Option<u16>,
    /// Server time of the summary (ISO-8601)
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub devices: BTreeMap<String, DeviceSummary>,
}

impl StatusResponse {
    pub fn projection(&self) -> StatusProjection {
        StatusProjection {
            broker_connected: self.broker_connected,
            counts: self.counts,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DeviceSummary {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub device_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub room: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub topic: Option<String>,
    /// Last successful probe (ISO-8601)
    #[serde(default, deserialize_with = "lenient")]
    pub last_test: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub response_ms: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub commands: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub needs_protocol: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub grimoire_slug: Option<String>,
}

// =============================================================================
// Command Types
// =============================================================================

/// Body of `GET /api/command/{device}/{command}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CommandResponse {
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub sent: Option<bool>,
}

impl CommandResponse {
    /// The failure message, if the `error` field is present and truthy.
    ///
    /// `null`, `false`, `0` and `""` do not count as failures.
    pub fn failure(&self) -> Option<String> {
        use serde_json::Value;
        match self.error.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
