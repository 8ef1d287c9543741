//! Text rendering of log query results.
//!
//! Rendering is a pure function of the envelope and the formatter's time
//! zone: the same input always yields byte-identical output.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

use crate::models::{
    AlertListData, AlertListEntry, Envelope, NotificationListData, NotificationListEntry,
};
use crate::query::LogResult;

/// Prefix of every failed log query reply.
pub const GETTING_LOGS_UNSUCCESSFUL: &str = "Getting logs unsuccessful";

const FIELD_SEPARATOR: &str = " | ";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// `Getting logs unsuccessful: <detail>`
pub fn getting_logs_unsuccessful_message(detail: &str) -> String {
    format!("{GETTING_LOGS_UNSUCCESSFUL}: {detail}")
}

/// Emoji shown in front of an alert line.
pub fn state_emoji(state: &str) -> &'static str {
    match state {
        "ok" | "up" => ":white_check_mark:",
        "warning" => ":warning:",
        "critical" | "down" => ":red_circle:",
        "unreachable" => ":electric_plug:",
        _ => ":grey_question:",
    }
}

/// `host_name`, or the alternate name when the backend left it empty.
pub fn display_name<'a>(host_name: &'a str, alt: &'a str) -> &'a str {
    if host_name.is_empty() { alt } else { host_name }
}

/// Renders log results with timestamps in a fixed time zone.
#[derive(Debug, Clone)]
pub struct LogFormatter<Tz: TimeZone> {
    tz: Tz,
}

impl LogFormatter<Local> {
    /// Formatter using the process's local time zone.
    pub fn local() -> Self {
        Self { tz: Local }
    }
}

impl Default for LogFormatter<Local> {
    fn default() -> Self {
        Self::local()
    }
}

impl<Tz> LogFormatter<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// Formatter rendering timestamps in `tz`.
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Render a backend timestamp.
    ///
    /// The archive CGI reports milliseconds since the epoch even though it
    /// takes seconds as input, hence the division.
    pub fn format_timestamp(&self, millis: i64) -> String {
        let seconds = millis / 1000;
        match DateTime::from_timestamp(seconds, 0) {
            Some(instant) => instant
                .with_timezone(&self.tz)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
            None => seconds.to_string(),
        }
    }

    /// Render any log result.
    pub fn format(&self, result: &LogResult) -> String {
        match result {
            LogResult::Alerts(alerts) => self.format_alerts(alerts),
            LogResult::Notifications(notifications) => self.format_notifications(notifications),
        }
    }

    /// Render an alert list, one line per alert.
    pub fn format_alerts(&self, alerts: &Envelope<AlertListData>) -> String {
        if !alerts.is_success() {
            return getting_logs_unsuccessful_message(&alerts.result.type_text);
        }
        if alerts.data.alertlist.is_empty() {
            return "No alerts.".to_string();
        }

        alerts
            .data
            .alertlist
            .iter()
            .map(|entry| self.format_alert(entry))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render a notification list, one line per notification.
    pub fn format_notifications(&self, notifications: &Envelope<NotificationListData>) -> String {
        if !notifications.is_success() {
            return getting_logs_unsuccessful_message(&notifications.result.type_text);
        }
        if notifications.data.notificationlist.is_empty() {
            return "No notifications.".to_string();
        }

        notifications
            .data
            .notificationlist
            .iter()
            .map(|entry| self.format_notification(entry))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_alert(&self, e: &AlertListEntry) -> String {
        format!(
            "{} [{}] {}: {}",
            state_emoji(&e.state),
            self.format_timestamp(e.timestamp),
            e.object_type,
            [
                display_name(&e.host_name, &e.name),
                e.description.as_str(),
                e.state_type.as_str(),
                e.state.as_str(),
                e.plugin_output.as_str(),
            ]
            .join(FIELD_SEPARATOR)
        )
    }

    fn format_notification(&self, e: &NotificationListEntry) -> String {
        format!(
            "[{}] {}: {}",
            self.format_timestamp(e.timestamp),
            e.object_type,
            [
                display_name(&e.host_name, &e.name),
                e.description.as_str(),
                e.contact.as_str(),
                e.notification_type.as_str(),
                e.method.as_str(),
                e.message.as_str(),
            ]
            .join(FIELD_SEPARATOR)
        )
    }
}
