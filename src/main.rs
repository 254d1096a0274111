//! WatchTower Dashboard
//!
//! In the browser this launches the Dioxus dashboard. Natively it is a
//! headless status probe: one reconciliation cycle against a live server,
//! projected onto an in-memory document and logged.

#[cfg(target_arch = "wasm32")]
fn main() {
    dioxus::launch(watchtower_dashboard::app::App);
}

#[cfg(all(not(target_arch = "wasm32"), feature = "native"))]
fn main() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "watchtower_dashboard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Starting WatchTower status probe v{} ({})",
        env!("WATCHTOWER_VERSION"),
        env!("WATCHTOWER_GIT_SHA")
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, probe::run())
}

#[cfg(all(not(target_arch = "wasm32"), not(feature = "native")))]
fn main() {
    eprintln!("watchtower-dashboard: build with the `native` feature for the status probe, or for wasm32 for the web UI");
}

#[cfg(all(not(target_arch = "wasm32"), feature = "native"))]
mod probe {
    use anyhow::Result;
    use watchtower_dashboard::api::{HttpTransport, StatusResponse, Transport, STATUS_PATH};
    use watchtower_dashboard::badge::BadgeReconciler;
    use watchtower_dashboard::config;
    use watchtower_dashboard::dom::{ids, Dom, MemoryDom};
    use watchtower_dashboard::format::format_date;
    use watchtower_dashboard::poll::{PollOutcome, StatusPoller};

    pub async fn run() -> Result<()> {
        let config = config::load_config()?;
        tracing::info!("Configuration loaded, server: {}", config.base_url);

        let transport = std::rc::Rc::new(HttpTransport::new(&config.base_url)?);
        let dom = MemoryDom::with_dashboard_elements();
        let poller = StatusPoller::new(BadgeReconciler::new(dom.clone()), transport.clone());

        let fetched = transport.get_json(STATUS_PATH).await;
        let status = fetched
            .as_ref()
            .ok()
            .and_then(|body| serde_json::from_value::<StatusResponse>(body.clone()).ok());
        let outcome = poller.reconcile(fetched);
        log_display(&dom);

        if outcome == PollOutcome::Unreachable {
            tracing::warn!("Status endpoint unreachable at {}", config.base_url);
            return Ok(());
        }

        // Device detail is not part of the projection; list it for the operator.
        if let Some(status) = status {
            tracing::info!(
                "Broker {}:{} as of {}",
                status.broker_host.as_deref().unwrap_or("?"),
                status.broker_port.map(|p| p.to_string()).unwrap_or_else(|| "?".into()),
                format_date(status.timestamp.as_deref())
            );
            for (name, device) in &status.devices {
                tracing::info!(
                    "  {:<24} {:<8} last test {}",
                    name,
                    device.status.as_deref().unwrap_or("unknown"),
                    format_date(device.last_test.as_deref())
                );
            }
        }

        Ok(())
    }

    fn log_display(dom: &MemoryDom) {
        let text = |id: &str| dom.text(id).unwrap_or_default();
        tracing::info!(
            "Badge: [{}] {}",
            dom.class_name(ids::BROKER_BADGE).unwrap_or_default(),
            text(ids::BROKER_TEXT)
        );
        tracing::info!(
            "Counts: online={} offline={} unknown={} testing={}",
            text(ids::COUNT_ONLINE),
            text(ids::COUNT_OFFLINE),
            text(ids::COUNT_UNKNOWN),
            text(ids::COUNT_TESTING)
        );
    }
}
