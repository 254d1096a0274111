//! Page-level wiring of the dashboard core.

use std::rc::Rc;
use std::time::Duration;

use crate::api::Transport;
use crate::badge::BadgeReconciler;
use crate::config::ClientConfig;
use crate::dispatch::CommandDispatcher;
use crate::dom::Dom;
use crate::keys::{bind_dismiss_key, KeySubscription};
use crate::modal::ModalController;
use crate::poll::{PollHandle, StatusPoller};

/// Everything a dashboard page needs, built over one document and one transport.
///
/// Holding the client keeps the dismiss-key binding and any recurring poll
/// alive; dropping it releases both.
pub struct DashboardClient<D: Dom, T: Transport> {
    badge: BadgeReconciler<D>,
    dispatcher: CommandDispatcher<T>,
    modal: ModalController<D>,
    poller: StatusPoller<D, T>,
    dismiss_binding: KeySubscription<D>,
    poll_handle: Option<PollHandle>,
}

impl<D: Dom, T: Transport> DashboardClient<D, T> {
    /// Build the components and perform the load-time work: one status
    /// fetch, the dismiss-key binding, and the recurring poll if configured.
    pub fn initialize(dom: D, transport: T, config: &ClientConfig) -> Self {
        let transport = Rc::new(transport);
        let badge = BadgeReconciler::new(dom.clone());
        let dispatcher = CommandDispatcher::new(transport.clone());
        let modal = ModalController::new(dom.clone())
            .with_settle_delay(Duration::from_millis(config.settle_delay_ms));
        let poller = StatusPoller::new(badge.clone(), transport);

        poller.init();
        let dismiss_binding = bind_dismiss_key(&dom, modal.clone(), &config.dismiss_key);
        let poll_handle = config.poll_interval().map(|period| {
            tracing::info!("Recurring status poll every {:?}", period);
            poller.start_interval(period)
        });

        Self {
            badge,
            dispatcher,
            modal,
            poller,
            dismiss_binding,
            poll_handle,
        }
    }

    pub fn badge(&self) -> &BadgeReconciler<D> {
        &self.badge
    }

    pub fn dispatcher(&self) -> &CommandDispatcher<T> {
        &self.dispatcher
    }

    pub fn modal(&self) -> &ModalController<D> {
        &self.modal
    }

    pub fn poller(&self) -> &StatusPoller<D, T> {
        &self.poller
    }

    pub fn is_polling(&self) -> bool {
        self.poll_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_cancelled())
    }

    pub fn is_dismiss_bound(&self) -> bool {
        self.dismiss_binding.is_active()
    }
}
