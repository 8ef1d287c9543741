//! Command router: runs a parsed command and collapses every outcome into
//! the single reply shown in chat.

use std::fmt::Display;
use std::sync::Arc;

use chrono::{Local, TimeZone, Utc};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use nagbot_core::error::AppError;
use nagbot_core::traits::monitoring::MonitoringClient;
use nagbot_monitor::format::GETTING_LOGS_UNSUCCESSFUL;
use nagbot_monitor::{LogFilter, LogFormatter, LogKind, LogQuery};
use nagbot_store::{SettingKey, Settings};
use nagbot_worker::SubscriptionManager;

use crate::command::{Command, Topic};
use crate::messages::*;

/// Dispatches chat commands against settings, the monitoring backend and
/// the report subscription.
#[derive(Debug)]
pub struct CommandRouter<Tz: TimeZone = Local> {
    settings: Settings,
    client: Arc<dyn MonitoringClient>,
    subscriptions: Arc<SubscriptionManager>,
    /// Held across a report subscribe or unsubscribe so the recorded
    /// channel always names the running task.
    report_lock: Mutex<()>,
    formatter: LogFormatter<Tz>,
}

impl CommandRouter<Local> {
    /// Router rendering log timestamps in the local time zone.
    pub fn new(
        settings: Settings,
        client: Arc<dyn MonitoringClient>,
        subscriptions: Arc<SubscriptionManager>,
    ) -> Self {
        Self::with_formatter(settings, client, subscriptions, LogFormatter::local())
    }
}

impl<Tz> CommandRouter<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// Router using a specific formatter.
    pub fn with_formatter(
        settings: Settings,
        client: Arc<dyn MonitoringClient>,
        subscriptions: Arc<SubscriptionManager>,
        formatter: LogFormatter<Tz>,
    ) -> Self {
        Self {
            settings,
            client,
            subscriptions,
            report_lock: Mutex::new(()),
            formatter,
        }
    }

    /// Parse and run a command invoked in `channel_id`.
    pub async fn dispatch(&self, name: &str, channel_id: &str, parameters: &[String]) -> String {
        match Command::parse(name, parameters) {
            Ok(command) => self.execute(command, channel_id).await,
            Err(reply) => {
                debug!(command = name, reply = %reply, "Command rejected");
                reply
            }
        }
    }

    /// Run an already parsed command.
    pub async fn execute(&self, command: Command, channel_id: &str) -> String {
        debug!(command = command.name(), channel_id, "Executing command");

        match command {
            Command::SetLogsLimit(limit) => {
                match self.settings.set_logs_limit(limit).await {
                    Ok(()) => LIMIT_SET.to_string(),
                    Err(e) => failed("set_logs_limit", &e, SETTING_LOGS_LIMIT_UNSUCCESSFUL),
                }
            }
            Command::SetLogsStartTime(seconds) => {
                match self.settings.set_logs_start_time(seconds).await {
                    Ok(()) => START_TIME_SET.to_string(),
                    Err(e) => failed("set_logs_start_time", &e, SETTING_START_TIME_UNSUCCESSFUL),
                }
            }
            Command::GetLog { kind, filter } => self.get_log(kind, filter).await,
            Command::SetReportFrequency(minutes) => {
                match self.settings.set_report_frequency(minutes).await {
                    Ok(()) => REPORT_FREQUENCY_SET.to_string(),
                    Err(e) => failed(
                        "set_report_frequency",
                        &e,
                        SETTING_REPORT_FREQUENCY_UNSUCCESSFUL,
                    ),
                }
            }
            Command::Subscribe(Topic::Report) => self.subscribe_report(channel_id).await,
            Command::Subscribe(Topic::ConfigurationChanges) => {
                match self.settings.set_changes_channel(channel_id).await {
                    Ok(()) => SUBSCRIBED_CHANGES.to_string(),
                    Err(e) => failed(
                        "set_changes_channel",
                        &e,
                        SETTING_CHANGES_CHANNEL_UNSUCCESSFUL,
                    ),
                }
            }
            Command::Unsubscribe(Topic::Report) => self.unsubscribe_report().await,
            Command::Unsubscribe(Topic::ConfigurationChanges) => {
                self.clear_channel(SettingKey::ChangesChannel).await
            }
            Command::GetCurrentLimits => self.current_limits().await,
        }
    }

    async fn get_log(&self, kind: LogKind, filter: LogFilter) -> String {
        let limit = match self.settings.logs_limit().await {
            Ok(limit) => limit,
            Err(e) => return failed("logs_limit", &e, GETTING_LOGS_UNSUCCESSFUL),
        };
        let lookback = match self.settings.logs_start_time().await {
            Ok(lookback) => lookback,
            Err(e) => return failed("logs_start_time", &e, GETTING_LOGS_UNSUCCESSFUL),
        };

        let query = LogQuery::new(kind, filter, limit, lookback, Utc::now());
        match query.execute(self.client.as_ref()).await {
            Ok(result) => self.formatter.format(&result),
            Err(e) => failed("log_query", &e, GETTING_LOGS_UNSUCCESSFUL),
        }
    }

    async fn subscribe_report(&self, channel_id: &str) -> String {
        let _guard = self.report_lock.lock().await;

        if let Some(previous) = self.subscriptions.subscribe(channel_id).await {
            info!(old_channel_id = %previous, channel_id, "Report subscription moved");
        }

        match self.settings.set_report_channel(channel_id).await {
            Ok(()) => SUBSCRIBED_REPORT.to_string(),
            Err(e) => {
                // Without a recorded channel the task would be invisible.
                self.subscriptions.unsubscribe().await;
                failed("set_report_channel", &e, SETTING_REPORT_CHANNEL_UNSUCCESSFUL)
            }
        }
    }

    async fn unsubscribe_report(&self) -> String {
        let _guard = self.report_lock.lock().await;

        if !self.subscriptions.unsubscribe().await {
            debug!("No report task was running");
        }
        self.clear_channel(SettingKey::ReportChannel).await
    }

    async fn clear_channel(&self, key: SettingKey) -> String {
        match self.settings.delete(key).await {
            Ok(()) => UNSUBSCRIBED.to_string(),
            Err(e) => failed("delete_channel", &e, UNSUBSCRIBING_UNSUCCESSFUL),
        }
    }

    async fn current_limits(&self) -> String {
        let limits = async {
            let limit = optional(self.settings.logs_limit().await)?;
            let lookback = optional(self.settings.logs_start_time().await)?;
            let frequency = optional(self.settings.report_frequency().await)?;
            let report_channel = self.settings.report_channel().await?;
            let changes_channel = self.settings.changes_channel().await?;

            Ok::<_, AppError>(format!(
                "Logs limit: {}\n\
                 Logs start time: {}\n\
                 Report frequency: {}\n\
                 Report channel: {}\n\
                 Configuration changes channel: {}",
                limit.map_or_else(not_set, |l| l.to_string()),
                lookback.map_or_else(not_set, |d| format!("{} seconds", d.as_secs())),
                frequency.map_or_else(not_set, |d| format!("{} minutes", d.as_secs() / 60)),
                report_channel.unwrap_or_else(not_subscribed),
                changes_channel.unwrap_or_else(not_subscribed),
            ))
        };

        match limits.await {
            Ok(text) => text,
            Err(e) => failed("current_limits", &e, GETTING_CURRENT_LIMITS_UNSUCCESSFUL),
        }
    }
}

/// Log a backend failure and return the generic reply.
fn failed(operation: &str, e: &AppError, reply: &str) -> String {
    if e.is_not_found() {
        warn!(operation, error = %e, "Setting missing");
    } else {
        error!(operation, error = %e, "Command failed");
    }
    reply.to_string()
}

/// Treat an absent setting as `None`.
fn optional<T>(result: Result<T, AppError>) -> Result<Option<T>, AppError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

fn not_set() -> String {
    "not set".to_string()
}

fn not_subscribed() -> String {
    "not subscribed".to_string()
}
