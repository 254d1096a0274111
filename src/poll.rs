//! Status reconciliation against `/api/status`.
//!
//! A failed fetch degrades the badge to disconnected and leaves the counts
//! alone: with no count data available, the previous display is the best
//! remaining information.

use std::rc::Rc;
use std::time::Duration;

use futures::future::{abortable, AbortHandle};
use serde_json::Value;

use crate::api::{self, StatusProjection, Transport};
use crate::badge::BadgeReconciler;
use crate::dom::Dom;
use crate::error::{ClientError, Result};
use crate::runtime;

/// What a single reconciliation cycle did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    /// A status body arrived and was projected.
    Reconciled { connected: bool },
    /// No usable status; the badge now shows disconnected.
    Unreachable,
}

pub struct StatusPoller<D: Dom, T: Transport> {
    badge: BadgeReconciler<D>,
    transport: Rc<T>,
}

impl<D: Dom, T: Transport> Clone for StatusPoller<D, T> {
    fn clone(&self) -> Self {
        Self {
            badge: self.badge.clone(),
            transport: self.transport.clone(),
        }
    }
}

impl<D: Dom, T: Transport> StatusPoller<D, T> {
    pub fn new(badge: BadgeReconciler<D>, transport: Rc<T>) -> Self {
        Self { badge, transport }
    }

    /// One fetch-and-project cycle. Never fails.
    pub async fn refresh(&self) -> PollOutcome {
        let fetched = self.transport.get_json(api::STATUS_PATH).await;
        self.reconcile(fetched)
    }

    /// Project an already fetched status body.
    ///
    /// Only `broker_connected` and `counts` are read, so extras the page
    /// renders never affect the badge.
    pub fn reconcile(&self, fetched: Result<Value>) -> PollOutcome {
        let projection = fetched.and_then(|body| {
            StatusProjection::from_body(&body)
                .ok_or_else(|| ClientError::Malformed("status body is not an object".to_string()))
        });

        match projection {
            Ok(status) => {
                self.badge.set_connectivity(status.broker_connected);
                self.badge.set_status_counts(status.counts.as_ref());
                tracing::debug!(
                    "Status reconciled: broker_connected={}, counts={:?}",
                    status.broker_connected,
                    status.counts
                );
                PollOutcome::Reconciled {
                    connected: status.broker_connected,
                }
            }
            Err(e) => {
                tracing::warn!("Status fetch failed: {}", e);
                self.badge.set_connectivity(false);
                PollOutcome::Unreachable
            }
        }
    }

    /// Run one cycle in the background (page load).
    pub fn init(&self) {
        let this = self.clone();
        runtime::spawn_detached(async move {
            this.refresh().await;
        });
    }

    /// Repeat [`StatusPoller::refresh`] every `period`, starting after the
    /// first period, until the returned handle is cancelled or dropped.
    pub fn start_interval(&self, period: Duration) -> PollHandle {
        let this = self.clone();
        let (task, handle) = abortable(async move {
            loop {
                runtime::sleep(period).await;
                this.refresh().await;
            }
        });
        runtime::spawn_detached(async move {
            let _ = task.await;
        });
        PollHandle { handle }
    }
}

/// Cancels a recurring poll when dropped.
pub struct PollHandle {
    handle: AbortHandle,
}

impl PollHandle {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_aborted()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ScriptedTransport;
    use crate::dom::{ids, MemoryDom};
    use serde_json::json;
    use tokio::task::LocalSet;

    fn poller(dom: &MemoryDom, transport: &Rc<ScriptedTransport>) -> StatusPoller<MemoryDom, ScriptedTransport> {
        StatusPoller::new(BadgeReconciler::new(dom.clone()), transport.clone())
    }

    #[tokio::test]
    async fn test_refresh_projects_status() {
        let dom = MemoryDom::with_dashboard_elements();
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(
            "/api/status",
            json!({"broker_connected": true, "counts": {"online": 3, "offline": 1}}),
        );

        let outcome = poller(&dom, &transport).refresh().await;

        assert_eq!(outcome, PollOutcome::Reconciled { connected: true });
        assert_eq!(
            dom.class_name(ids::BROKER_BADGE).as_deref(),
            Some("broker-badge connected")
        );
        assert_eq!(dom.text(ids::COUNT_ONLINE).as_deref(), Some("3"));
        assert_eq!(dom.text(ids::COUNT_OFFLINE).as_deref(), Some("1"));
        assert_eq!(dom.text(ids::COUNT_UNKNOWN).as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_unreachable() {
        let dom = MemoryDom::with_dashboard_elements();
        dom.set_text(ids::COUNT_ONLINE, "4");
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond("/api/status", json!([1, 2, 3]));

        let outcome = poller(&dom, &transport).refresh().await;

        assert_eq!(outcome, PollOutcome::Unreachable);
        assert_eq!(dom.text(ids::BROKER_TEXT).as_deref(), Some("Disconnected"));
        assert_eq!(dom.text(ids::COUNT_ONLINE).as_deref(), Some("4"));
    }

    #[tokio::test]
    async fn test_malformed_extras_do_not_disturb_badge() {
        let dom = MemoryDom::with_dashboard_elements();
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(
            "/api/status",
            json!({
                "broker_connected": true,
                "counts": {"online": 2},
                "broker_port": "1883",
                "devices": {"d1": {"commands": null, "needs_protocol": null}}
            }),
        );

        let outcome = poller(&dom, &transport).refresh().await;

        assert_eq!(outcome, PollOutcome::Reconciled { connected: true });
        assert_eq!(dom.text(ids::BROKER_TEXT).as_deref(), Some("Broker Connected"));
        assert_eq!(dom.text(ids::COUNT_ONLINE).as_deref(), Some("2"));
    }

    #[test]
    fn test_reconcile_transport_error() {
        let dom = MemoryDom::with_dashboard_elements();
        dom.set_class_name(ids::BROKER_BADGE, "broker-badge connected");
        let transport = Rc::new(ScriptedTransport::new());

        let outcome = poller(&dom, &transport)
            .reconcile(Err(ClientError::Transport("connection refused".to_string())));

        assert_eq!(outcome, PollOutcome::Unreachable);
        assert_eq!(
            dom.class_name(ids::BROKER_BADGE).as_deref(),
            Some("broker-badge disconnected")
        );
    }

    #[tokio::test]
    async fn test_missing_counts_keep_stale_display() {
        let dom = MemoryDom::with_dashboard_elements();
        dom.set_text(ids::COUNT_OFFLINE, "2");
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond("/api/status", json!({"broker_connected": false}));

        let outcome = poller(&dom, &transport).refresh().await;

        assert_eq!(outcome, PollOutcome::Reconciled { connected: false });
        assert_eq!(dom.text(ids::COUNT_OFFLINE).as_deref(), Some("2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_repeats_until_cancelled() {
        LocalSet::new()
            .run_until(async {
                let dom = MemoryDom::with_dashboard_elements();
                let transport = Rc::new(ScriptedTransport::new());
                transport.respond("/api/status", json!({"broker_connected": true}));

                let handle = poller(&dom, &transport).start_interval(Duration::from_secs(5));
                tokio::time::sleep(Duration::from_millis(10_500)).await;
                assert_eq!(transport.requests().len(), 2);

                handle.cancel();
                assert!(handle.is_cancelled());
                tokio::time::sleep(Duration::from_secs(20)).await;
                assert_eq!(transport.requests().len(), 2);
            })
            .await;
    }
}
