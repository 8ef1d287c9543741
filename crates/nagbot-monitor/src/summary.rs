//! Status summary posted by the report subscription.

use tracing::debug;

use nagbot_core::result::AppResult;
use nagbot_core::traits::monitoring::{MonitoringClient, MonitoringRequest};

use crate::models::{HostCount, HostCountData, ServiceCount, ServiceCountData};
use crate::query::fetch;

/// Prefix of a failed report.
pub const GETTING_REPORT_UNSUCCESSFUL: &str = "Getting system monitoring report unsuccessful";

/// Current host and service counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSummary {
    pub hosts: HostCount,
    pub services: ServiceCount,
}

impl StatusSummary {
    /// Query both counts and render the report text.
    ///
    /// A non-success upstream status renders as a failure line instead of
    /// an error, matching how log queries report it.
    pub async fn report(client: &dyn MonitoringClient) -> AppResult<String> {
        let hosts = fetch::<HostCountData>(client, &MonitoringRequest::HostCount).await?;
        if !hosts.is_success() {
            return Ok(format!(
                "{GETTING_REPORT_UNSUCCESSFUL}: {}",
                hosts.result.type_text
            ));
        }

        let services = fetch::<ServiceCountData>(client, &MonitoringRequest::ServiceCount).await?;
        if !services.is_success() {
            return Ok(format!(
                "{GETTING_REPORT_UNSUCCESSFUL}: {}",
                services.result.type_text
            ));
        }

        let summary = Self {
            hosts: hosts.data.count,
            services: services.data.count,
        };
        debug!(?summary, "Fetched status summary");
        Ok(summary.render())
    }

    /// Three-line report text.
    pub fn render(&self) -> String {
        let h = &self.hosts;
        let s = &self.services;
        format!(
            "System monitoring report\n\
             Hosts: {} up | {} down | {} unreachable | {} pending\n\
             Services: {} ok | {} warning | {} critical | {} unknown | {} pending",
            h.up, h.down, h.unreachable, h.pending, s.ok, s.warning, s.critical, s.unknown, s.pending
        )
    }
}
