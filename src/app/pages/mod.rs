//! Page components for the Dioxus web UI.

pub mod dashboard;

pub use dashboard::Dashboard;
