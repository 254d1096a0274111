//! Mock WatchTower API server for integration testing
//!
//! Simulates the status, ping and command endpoints the dashboard consumes,
//! without a broker or real devices.

pub mod watchtower;

pub use watchtower::MockWatchtowerServer;
