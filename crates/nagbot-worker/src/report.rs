//! Periodic system monitoring report.

use std::sync::Arc;
use std::time::Duration;

use nagbot_core::result::AppResult;
use nagbot_core::traits::monitoring::MonitoringClient;
use nagbot_core::traits::poster::MessagePoster;
use nagbot_monitor::StatusSummary;
use nagbot_store::Settings;

/// Fetches the status summary and posts it into a channel.
#[derive(Debug)]
pub struct ReportJob {
    /// Settings, for the report frequency.
    settings: Settings,
    /// Monitoring backend.
    client: Arc<dyn MonitoringClient>,
    /// Chat sink.
    poster: Arc<dyn MessagePoster>,
    /// Interval used when the frequency setting cannot be read.
    fallback_frequency: Duration,
}

impl ReportJob {
    /// Create a new report job
    pub fn new(
        settings: Settings,
        client: Arc<dyn MonitoringClient>,
        poster: Arc<dyn MessagePoster>,
        fallback_frequency: Duration,
    ) -> Self {
        Self {
            settings,
            client,
            poster,
            fallback_frequency,
        }
    }

    /// Current report interval. Read on every tick so `set-report-frequency`
    /// applies to a running subscription from its next wait on.
    pub async fn frequency(&self) -> Duration {
        match self.settings.report_frequency().await {
            Ok(frequency) => frequency,
            Err(e) => {
                if !e.is_not_found() {
                    tracing::warn!(error = %e, "Failed to read report frequency, using fallback");
                }
                self.fallback_frequency
            }
        }
    }

    /// Generate one report and post it into `channel_id`.
    pub async fn run_once(&self, channel_id: &str) -> AppResult<()> {
        tracing::debug!(channel_id, "Generating system monitoring report");
        let text = StatusSummary::report(self.client.as_ref()).await?;
        self.poster.post(channel_id, &text).await?;
        tracing::info!(channel_id, "System monitoring report posted");
        Ok(())
    }
}
