//! Store keys for every persisted setting.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use std::fmt;

/// The fixed set of persisted settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// Maximum number of records returned by `get-log`.
    LogsLimit,
    /// Lookback window for `get-log`, in seconds.
    LogsStartTime,
    /// Interval between report posts, in minutes.
    ReportFrequency,
    /// Channel receiving the periodic monitoring report.
    ReportChannel,
    /// Channel receiving configuration change notices.
    ChangesChannel,
}

impl SettingKey {
    /// Every key, in display order.
    pub const ALL: [SettingKey; 5] = [
        Self::LogsLimit,
        Self::LogsStartTime,
        Self::ReportFrequency,
        Self::ReportChannel,
        Self::ChangesChannel,
    ];

    /// The key under which the setting is stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LogsLimit => "logs-limit",
            Self::LogsStartTime => "logs-start-time",
            Self::ReportFrequency => "report-frequency",
            Self::ReportChannel => "report-channel",
            Self::ChangesChannel => "changes-channel",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
