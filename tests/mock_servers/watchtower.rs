//! Mock WatchTower API
//!
//! Serves `/api/status`, `/api/ping-all`, `/api/ping/{device}` and
//! `/api/command/{device}/{command}` from in-memory state.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Mock server state
#[derive(Default)]
struct MockState {
    broker_connected: bool,
    /// `None` omits `counts` from the status body
    counts: Option<Value>,
    devices: BTreeMap<String, Vec<String>>,
    /// Paths of every request received, in order
    requests: Vec<String>,
}

/// Mock WatchTower Server
pub struct MockWatchtowerServer {
    addr: SocketAddr,
    state: Arc<RwLock<MockState>>,
    handle: JoinHandle<()>,
}

impl MockWatchtowerServer {
    /// Start a mock server on a random port
    pub async fn start() -> Self {
        let state = Arc::new(RwLock::new(MockState::default()));

        let app = Router::new()
            .route("/api/status", get(handle_status))
            .route("/api/ping-all", get(handle_ping_all))
            .route("/api/ping/{device}", get(handle_ping))
            .route("/api/command/{device}/{command}", get(handle_command))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn set_broker_connected(&self, connected: bool) {
        self.state.write().await.broker_connected = connected;
    }

    pub async fn set_counts(&self, counts: Option<Value>) {
        self.state.write().await.counts = counts;
    }

    /// Register a device accepting `commands`
    pub async fn add_device(&self, name: &str, commands: &[&str]) {
        self.state.write().await.devices.insert(
            name.to_string(),
            commands.iter().map(|c| c.to_string()).collect(),
        );
    }

    pub async fn requests(&self) -> Vec<String> {
        self.state.read().await.requests.clone()
    }

    /// Stop the mock server
    pub async fn stop(self) {
        self.handle.abort();
    }
}

async fn handle_status(State(state): State<Arc<RwLock<MockState>>>) -> Json<Value> {
    let mut state = state.write().await;
    state.requests.push("/api/status".to_string());

    let devices: serde_json::Map<String, Value> = state
        .devices
        .iter()
        .map(|(name, commands)| {
            (
                name.clone(),
                json!({"type": "esp32", "status": "online", "commands": commands}),
            )
        })
        .collect();

    let mut body = json!({
        "broker_connected": state.broker_connected,
        "broker_host": "127.0.0.1",
        "broker_port": 1883,
        "timestamp": "2024-03-01T12:00:00",
        "devices": devices,
    });
    if let Some(counts) = &state.counts {
        body["counts"] = counts.clone();
    }
    Json(body)
}

async fn handle_ping_all(State(state): State<Arc<RwLock<MockState>>>) -> Json<Value> {
    state.write().await.requests.push("/api/ping-all".to_string());
    Json(json!({"status": "pinging all devices"}))
}

async fn handle_ping(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(device): Path<String>,
) -> Json<Value> {
    state
        .write()
        .await
        .requests
        .push(format!("/api/ping/{}", device));
    Json(json!({"device": device, "ping_sent": true}))
}

/// Mirrors the real server: unknown devices and a down broker answer with `error`
async fn handle_command(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((device, command)): Path<(String, String)>,
) -> Json<Value> {
    let mut state = state.write().await;
    state
        .requests
        .push(format!("/api/command/{}/{}", device, command));

    if !state.devices.contains_key(&device) {
        return Json(json!({"error": format!("Unknown device: {}", device)}));
    }
    if !state.broker_connected {
        return Json(json!({"error": "MQTT not connected"}));
    }
    Json(json!({"device": device, "command": command, "sent": true}))
}
