//! Monitoring backend client trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::result::AppResult;

/// Parameters shared by the archive queries (alert and notification lists).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveRequest {
    /// Maximum number of records to return.
    pub count: u32,
    /// Restrict to a single host.
    pub host_name: Option<String>,
    /// Restrict to a single service description.
    pub service_description: Option<String>,
    /// Window start, seconds since the Unix epoch.
    pub start_time: i64,
    /// Window end, seconds since the Unix epoch.
    pub end_time: i64,
    /// Ask the backend for enumerated (textual) state values.
    pub enumerate: bool,
}

/// A request understood by the monitoring backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonitoringRequest {
    /// Alert history within a time window.
    AlertList(ArchiveRequest),
    /// Notification history within a time window.
    NotificationList(ArchiveRequest),
    /// Current host counts by state.
    HostCount,
    /// Current service counts by state.
    ServiceCount,
}

impl MonitoringRequest {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AlertList(_) => "alertlist",
            Self::NotificationList(_) => "notificationlist",
            Self::HostCount => "hostcount",
            Self::ServiceCount => "servicecount",
        }
    }
}

/// Client for the monitoring backend.
///
/// `query` returns the raw response envelope; decoding into typed records is
/// left to the caller so the transport stays independent of the data model.
#[async_trait]
pub trait MonitoringClient: Send + Sync + std::fmt::Debug + 'static {
    /// Execute a request and return the raw JSON envelope.
    async fn query(&self, request: &MonitoringRequest) -> AppResult<Value>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
