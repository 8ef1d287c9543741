//! Log query construction and execution.
//!
//! Cheat sheet for the `get-log` parameters:
//!
//! ```text
//! get-log alerts|notifications
//! get-log alerts|notifications host    <host name>
//! get-log alerts|notifications service <service description>
//! ```

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::de::DeserializeOwned;
use tracing::debug;

use nagbot_core::result::AppResult;
use nagbot_core::traits::monitoring::{ArchiveRequest, MonitoringClient, MonitoringRequest};

use crate::models::{AlertListData, Envelope, NotificationListData};

/// User-facing reply for a parameter nobody recognises.
pub fn unknown_parameter_message(parameter: &str) -> String {
    format!("Unknown parameter ({parameter}).")
}

/// Which archive to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// Host and service state changes.
    Alerts,
    /// Dispatched notifications.
    Notifications,
}

impl LogKind {
    /// Parse the first `get-log` parameter.
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw {
            "alerts" => Ok(Self::Alerts),
            "notifications" => Ok(Self::Notifications),
            other => Err(unknown_parameter_message(other)),
        }
    }
}

/// Optional restriction of a log query. Host and service filters are
/// mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogFilter {
    /// All hosts and services.
    #[default]
    None,
    /// A single host.
    Host(String),
    /// A single service description.
    Service(String),
}

impl LogFilter {
    /// Parse the parameters that follow the log kind.
    ///
    /// Parameters beyond the filter value are ignored.
    pub fn parse(parameters: &[String]) -> Result<Self, String> {
        let Some(first) = parameters.first() else {
            return Ok(Self::None);
        };

        match first.as_str() {
            "host" => parameters
                .get(1)
                .map(|name| Self::Host(name.clone()))
                .ok_or_else(|| "You must supply host name.".to_string()),
            "service" => parameters
                .get(1)
                .map(|description| Self::Service(description.clone()))
                .ok_or_else(|| "You must supply service description.".to_string()),
            other => Err(unknown_parameter_message(other)),
        }
    }

    fn host_name(&self) -> Option<String> {
        match self {
            Self::Host(name) => Some(name.clone()),
            _ => None,
        }
    }

    fn service_description(&self) -> Option<String> {
        match self {
            Self::Service(description) => Some(description.clone()),
            _ => None,
        }
    }
}

/// A time-windowed, optionally filtered archive query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    pub kind: LogKind,
    pub filter: LogFilter,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub limit: u32,
    pub enumerate: bool,
}

impl LogQuery {
    /// Create a query covering `[now - lookback, now]`.
    pub fn new(
        kind: LogKind,
        filter: LogFilter,
        limit: u32,
        lookback: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        let lookback = TimeDelta::from_std(lookback).unwrap_or(TimeDelta::MAX);
        let window_start = now
            .checked_sub_signed(lookback)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        Self {
            kind,
            filter,
            window_start,
            window_end: now,
            limit,
            enumerate: true,
        }
    }

    /// Build a query from the parameters following the log kind.
    pub fn build(
        kind: LogKind,
        parameters: &[String],
        limit: u32,
        lookback: Duration,
        now: DateTime<Utc>,
    ) -> Result<Self, String> {
        let filter = LogFilter::parse(parameters)?;
        Ok(Self::new(kind, filter, limit, lookback, now))
    }

    /// Translate into the backend request.
    pub fn to_request(&self) -> MonitoringRequest {
        let archive = ArchiveRequest {
            count: self.limit,
            host_name: self.filter.host_name(),
            service_description: self.filter.service_description(),
            start_time: self.window_start.timestamp(),
            end_time: self.window_end.timestamp(),
            enumerate: self.enumerate,
        };

        match self.kind {
            LogKind::Alerts => MonitoringRequest::AlertList(archive),
            LogKind::Notifications => MonitoringRequest::NotificationList(archive),
        }
    }

    /// Run the query against the backend.
    pub async fn execute(&self, client: &dyn MonitoringClient) -> AppResult<LogResult> {
        let request = self.to_request();
        debug!(
            query = request.name(),
            limit = self.limit,
            filter = ?self.filter,
            "Executing log query"
        );

        Ok(match self.kind {
            LogKind::Alerts => LogResult::Alerts(fetch(client, &request).await?),
            LogKind::Notifications => LogResult::Notifications(fetch(client, &request).await?),
        })
    }
}

/// Raw result of a log query, still carrying the upstream status.
#[derive(Debug, Clone, PartialEq)]
pub enum LogResult {
    Alerts(Envelope<AlertListData>),
    Notifications(Envelope<NotificationListData>),
}

/// Execute a request and decode the envelope into `T`.
pub async fn fetch<T: DeserializeOwned>(
    client: &dyn MonitoringClient,
    request: &MonitoringRequest,
) -> AppResult<Envelope<T>> {
    let value = client.query(request).await?;
    Ok(serde_json::from_value(value)?)
}
