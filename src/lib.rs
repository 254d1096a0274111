//! WatchTower Dashboard - browser client core
//!
//! Keeps an operator dashboard in step with a broker-backed device fleet.
//!
//! This library provides:
//! - Broker badge and status count reconciliation against `/api/status`
//! - Fire-and-forget device and fleet-wide commands
//! - The shared overlay (modal) lifecycle with Escape dismissal
//! - Debounce and timestamp formatting for dashboard pages
//! - A Dioxus web front end wiring all of the above

pub mod api;
pub mod app;
pub mod badge;
pub mod client;
pub mod config;
pub mod debounce;
pub mod dispatch;
pub mod dom;
pub mod error;
pub mod format;
pub mod keys;
pub mod modal;
pub mod poll;
pub mod runtime;

pub use client::DashboardClient;
pub use error::ClientError;
