//! # nagbot-monitor
//!
//! Everything that talks to the monitoring backend:
//!
//! - Typed models for the Nagios Core JSON CGI envelopes
//! - [`LogQuery`] construction from command parameters and settings
//! - An HTTP [`MonitoringClient`](nagbot_core::traits::MonitoringClient)
//! - Deterministic text rendering of alert/notification lists and the
//!   periodic status summary

pub mod client;
pub mod format;
pub mod models;
pub mod query;
pub mod summary;

pub use client::HttpMonitoringClient;
pub use format::LogFormatter;
pub use models::{Envelope, ResultInfo};
pub use query::{LogFilter, LogKind, LogQuery, LogResult};
pub use summary::StatusSummary;
