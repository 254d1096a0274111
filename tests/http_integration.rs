#![cfg(feature = "native")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! HTTP-level integration tests
//!
//! Runs the poller and dispatcher over the real `reqwest` transport against
//! a mock WatchTower API. These tests verify:
//! - Status reconciliation from live responses
//! - Fail-soft behaviour when the server is gone
//! - Exactly one request per fire-and-forget command

mod mock_servers;

use std::rc::Rc;
use std::time::Duration;

use serde_json::json;
use tokio::task::LocalSet;

use mock_servers::MockWatchtowerServer;
use watchtower_dashboard::api::{HttpTransport, StatusResponse, Transport, STATUS_PATH};
use watchtower_dashboard::badge::BadgeReconciler;
use watchtower_dashboard::dispatch::{CommandDispatcher, CommandOutcome, CommandRequest};
use watchtower_dashboard::dom::{ids, Dom, MemoryDom};
use watchtower_dashboard::poll::{PollOutcome, StatusPoller};

// =============================================================================
// Test utilities
// =============================================================================

fn poller_for(dom: &MemoryDom, transport: &Rc<HttpTransport>) -> StatusPoller<MemoryDom, HttpTransport> {
    StatusPoller::new(BadgeReconciler::new(dom.clone()), transport.clone())
}

/// Wait until the mock server has seen `count` requests, or give up after `timeout_ms`
async fn wait_for_requests(server: &MockWatchtowerServer, count: usize, timeout_ms: u64) -> Vec<String> {
    let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);
    loop {
        let requests = server.requests().await;
        if requests.len() >= count || tokio::time::Instant::now() >= deadline {
            return requests;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

// =============================================================================
// Status reconciliation
// =============================================================================

#[tokio::test]
async fn status_connected_with_partial_counts() {
    let server = MockWatchtowerServer::start().await;
    server.set_broker_connected(true).await;
    server.set_counts(Some(json!({"online": 3, "offline": 1}))).await;

    let dom = MemoryDom::with_dashboard_elements();
    let transport = Rc::new(HttpTransport::new(&server.base_url()).unwrap());

    let outcome = poller_for(&dom, &transport).refresh().await;

    assert_eq!(outcome, PollOutcome::Reconciled { connected: true });
    assert_eq!(
        dom.class_name(ids::BROKER_BADGE).as_deref(),
        Some("broker-badge connected")
    );
    assert_eq!(dom.text(ids::BROKER_TEXT).as_deref(), Some("Broker Connected"));
    assert_eq!(dom.text(ids::COUNT_ONLINE).as_deref(), Some("3"));
    assert_eq!(dom.text(ids::COUNT_OFFLINE).as_deref(), Some("1"));
    assert_eq!(dom.text(ids::COUNT_UNKNOWN).as_deref(), Some("0"));
    assert_eq!(dom.text(ids::COUNT_TESTING).as_deref(), Some("0"));

    server.stop().await;
}

#[tokio::test]
async fn status_without_counts_keeps_display() {
    let server = MockWatchtowerServer::start().await;
    server.set_broker_connected(false).await;
    server.set_counts(None).await;

    let dom = MemoryDom::with_dashboard_elements();
    dom.set_text(ids::COUNT_ONLINE, "6");
    let transport = Rc::new(HttpTransport::new(&server.base_url()).unwrap());

    let outcome = poller_for(&dom, &transport).refresh().await;

    assert_eq!(outcome, PollOutcome::Reconciled { connected: false });
    assert_eq!(dom.text(ids::BROKER_TEXT).as_deref(), Some("Disconnected"));
    assert_eq!(dom.text(ids::COUNT_ONLINE).as_deref(), Some("6"));

    server.stop().await;
}

#[tokio::test]
async fn status_server_gone_degrades_badge_only() {
    let server = MockWatchtowerServer::start().await;
    let base_url = server.base_url();
    server.stop().await;
    // Give the aborted listener a moment to close
    tokio::time::sleep(Duration::from_millis(50)).await;

    let dom = MemoryDom::with_dashboard_elements();
    dom.set_class_name(ids::BROKER_BADGE, "broker-badge connected");
    let transport = Rc::new(HttpTransport::new(&base_url).unwrap());

    let outcome = poller_for(&dom, &transport).refresh().await;

    assert_eq!(outcome, PollOutcome::Unreachable);
    assert_eq!(
        dom.class_name(ids::BROKER_BADGE).as_deref(),
        Some("broker-badge disconnected")
    );
    assert_eq!(dom.text(ids::COUNT_ONLINE).as_deref(), Some("0"));
}

#[tokio::test]
async fn one_fetch_feeds_badge_and_device_listing() {
    let server = MockWatchtowerServer::start().await;
    server.set_broker_connected(true).await;
    server.set_counts(Some(json!({"online": 1}))).await;
    server.add_device("dev-1", &["PING"]).await;

    let dom = MemoryDom::with_dashboard_elements();
    let transport = Rc::new(HttpTransport::new(&server.base_url()).unwrap());

    let fetched = transport.get_json(STATUS_PATH).await;
    let status: StatusResponse = serde_json::from_value(fetched.as_ref().unwrap().clone()).unwrap();
    let outcome = poller_for(&dom, &transport).reconcile(fetched);

    assert_eq!(outcome, PollOutcome::Reconciled { connected: true });
    assert_eq!(dom.text(ids::COUNT_ONLINE).as_deref(), Some("1"));
    assert!(status.devices.contains_key("dev-1"));
    assert_eq!(server.requests().await, vec!["/api/status"]);

    server.stop().await;
}

// =============================================================================
// Command dispatch
// =============================================================================

#[tokio::test]
async fn command_to_unknown_device_is_rejected() {
    let server = MockWatchtowerServer::start().await;
    server.set_broker_connected(true).await;
    server.add_device("dev-1", &["PING", "RESET"]).await;

    let transport = Rc::new(HttpTransport::new(&server.base_url()).unwrap());
    let dispatcher = CommandDispatcher::new(transport);

    let accepted = dispatcher
        .dispatch(&CommandRequest::device("dev-1", "RESET"))
        .await
        .unwrap();
    let rejected = dispatcher
        .dispatch(&CommandRequest::device("dev-7", "reboot"))
        .await
        .unwrap();

    assert_eq!(accepted, CommandOutcome::Accepted);
    assert_eq!(
        rejected,
        CommandOutcome::Rejected("Unknown device: dev-7".to_string())
    );

    server.stop().await;
}

#[tokio::test]
async fn fire_and_forget_requests_reach_server_once() {
    let server = MockWatchtowerServer::start().await;
    server.set_broker_connected(true).await;
    server.add_device("dev-1", &["PING"]).await;
    let base_url = server.base_url();

    let requests = LocalSet::new()
        .run_until(async {
            let transport = Rc::new(HttpTransport::new(&base_url).unwrap());
            let dispatcher = CommandDispatcher::new(transport);

            dispatcher.ping_all();
            dispatcher.ping_device("dev-1");
            dispatcher.send_command("dev-1", "PING");

            wait_for_requests(&server, 3, 2_000).await
        })
        .await;

    let mut sorted = requests.clone();
    sorted.sort();
    assert_eq!(
        sorted,
        vec!["/api/command/dev-1/PING", "/api/ping-all", "/api/ping/dev-1"]
    );

    server.stop().await;
}
