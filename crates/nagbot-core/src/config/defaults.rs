//! Default values for user-configurable settings.

use serde::{Deserialize, Serialize};

/// Values written to the store on activation when a setting is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultSettingsConfig {
    /// Maximum number of log records returned by `get-log`.
    #[serde(default = "default_logs_limit")]
    pub logs_limit: u32,
    /// Lookback window for `get-log`, in seconds.
    #[serde(default = "default_logs_start_time")]
    pub logs_start_time_seconds: u64,
    /// Interval between report posts, in minutes.
    #[serde(default = "default_report_frequency")]
    pub report_frequency_minutes: u32,
}

impl Default for DefaultSettingsConfig {
    fn default() -> Self {
        Self {
            logs_limit: default_logs_limit(),
            logs_start_time_seconds: default_logs_start_time(),
            report_frequency_minutes: default_report_frequency(),
        }
    }
}

fn default_logs_limit() -> u32 {
    50
}

// one day
fn default_logs_start_time() -> u64 {
    86_400
}

fn default_report_frequency() -> u32 {
    10
}
