//! Shared overlay lifecycle.
//!
//! The overlay is two elements: a backdrop and a container holding the
//! injected markup. Visibility is the `show` class on both. Closing is two
//! phases: `show` comes off immediately so the exit transition can run, and
//! the container markup is discarded once the settle delay has passed.

use std::time::Duration;

use crate::dom::{ids, Dom};
use crate::runtime;

/// Time allowed for the exit transition before content is discarded.
pub const SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Class marking the backdrop and container as visible.
pub const VISIBLE_CLASS: &str = "show";

/// Overlay state, read back from the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open,
    /// Hidden but still holding content, waiting for the settle delay.
    Closing,
}

#[derive(Clone)]
pub struct ModalController<D: Dom> {
    dom: D,
    settle_delay: Duration,
}

impl<D: Dom> ModalController<D> {
    pub fn new(dom: D) -> Self {
        Self {
            dom,
            settle_delay: SETTLE_DELAY,
        }
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Replace the container markup and show the overlay.
    pub fn open(&self, markup: &str) {
        self.dom.set_inner_html(ids::MODAL_CONTAINER, markup);
        self.dom.add_class(ids::MODAL_BACKDROP, VISIBLE_CLASS);
        self.dom.add_class(ids::MODAL_CONTAINER, VISIBLE_CLASS);
    }

    /// Hide the overlay now and discard its content after the settle delay.
    ///
    /// Safe to call in any state and any number of times; each call schedules
    /// its own clear. A clear that fires after the overlay was reopened is
    /// skipped, so it never wipes fresh content.
    pub fn close(&self) {
        self.dom.remove_class(ids::MODAL_BACKDROP, VISIBLE_CLASS);
        self.dom.remove_class(ids::MODAL_CONTAINER, VISIBLE_CLASS);

        let dom = self.dom.clone();
        let settle_delay = self.settle_delay;
        runtime::spawn_detached(async move {
            runtime::sleep(settle_delay).await;
            if dom.has_class(ids::MODAL_CONTAINER, VISIBLE_CLASS) {
                tracing::trace!("Modal reopened during settle; keeping content");
                return;
            }
            dom.set_inner_html(ids::MODAL_CONTAINER, "");
        });
    }

    pub fn state(&self) -> ModalState {
        if self.dom.has_class(ids::MODAL_CONTAINER, VISIBLE_CLASS) {
            return ModalState::Open;
        }
        match self.dom.inner_html(ids::MODAL_CONTAINER) {
            Some(content) if !content.is_empty() => ModalState::Closing,
            _ => ModalState::Closed,
        }
    }
}
