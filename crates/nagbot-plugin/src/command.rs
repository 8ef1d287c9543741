//! Typed chat commands.
//!
//! Every invocation is parsed into a [`Command`] before any handler runs, so
//! arity and value checks live in one place and handlers only see valid
//! input. A parse failure carries the exact reply for the user.

use tracing::debug;

use nagbot_monitor::query::unknown_parameter_message;
use nagbot_monitor::{LogFilter, LogKind};
use nagbot_store::settings::{SettingParseError, parse_positive};

use crate::messages::*;

pub const SET_LOGS_LIMIT: &str = "set-logs-limit";
pub const SET_LOGS_START_TIME: &str = "set-logs-start-time";
pub const GET_LOG: &str = "get-log";
pub const SET_REPORT_FREQUENCY: &str = "set-report-frequency";
pub const SUBSCRIBE: &str = "subscribe";
pub const UNSUBSCRIBE: &str = "unsubscribe";
pub const GET_CURRENT_LIMITS: &str = "get-current-limits";

/// What a `subscribe` / `unsubscribe` command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    /// The periodic system monitoring report.
    Report,
    /// Configuration change announcements.
    ConfigurationChanges,
}

impl Topic {
    /// Parse the single topic parameter.
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw {
            "report" => Ok(Self::Report),
            "configuration-changes" => Ok(Self::ConfigurationChanges),
            other => Err(unknown_parameter_message(other)),
        }
    }
}

/// A validated chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Maximum number of log records per query.
    SetLogsLimit(u32),
    /// Lookback window in seconds.
    SetLogsStartTime(u64),
    /// Query recent alerts or notifications.
    GetLog { kind: LogKind, filter: LogFilter },
    /// Report interval in minutes.
    SetReportFrequency(u32),
    Subscribe(Topic),
    Unsubscribe(Topic),
    /// Show the current settings.
    GetCurrentLimits,
}

impl Command {
    /// Parse a command name and its ordered parameters.
    pub fn parse(name: &str, parameters: &[String]) -> Result<Self, String> {
        match name {
            SET_LOGS_LIMIT => {
                let raw = exactly_one(parameters, USAGE_INTEGER_VALUE)?;
                positive(
                    name,
                    raw,
                    INVALID_LOGS_LIMIT,
                    SETTING_LOGS_LIMIT_UNSUCCESSFUL,
                )
                .map(Self::SetLogsLimit)
            }
            SET_LOGS_START_TIME => {
                let raw = exactly_one(parameters, USAGE_SECONDS)?;
                positive(
                    name,
                    raw,
                    INVALID_START_TIME,
                    SETTING_START_TIME_UNSUCCESSFUL,
                )
                .map(Self::SetLogsStartTime)
            }
            GET_LOG => {
                let (first, rest) = parameters
                    .split_first()
                    .ok_or_else(|| USAGE_LOG_KIND.to_string())?;
                // Filter problems are reported before an unknown kind.
                let filter = LogFilter::parse(rest)?;
                let kind = LogKind::parse(first)?;
                Ok(Self::GetLog { kind, filter })
            }
            SET_REPORT_FREQUENCY => {
                let raw = exactly_one(parameters, USAGE_MINUTES)?;
                positive(
                    name,
                    raw,
                    INVALID_REPORT_FREQUENCY,
                    SETTING_REPORT_FREQUENCY_UNSUCCESSFUL,
                )
                .map(Self::SetReportFrequency)
            }
            SUBSCRIBE => Topic::parse(exactly_one(parameters, USAGE_TOPIC)?).map(Self::Subscribe),
            UNSUBSCRIBE => {
                Topic::parse(exactly_one(parameters, USAGE_TOPIC)?).map(Self::Unsubscribe)
            }
            GET_CURRENT_LIMITS => {
                if parameters.is_empty() {
                    Ok(Self::GetCurrentLimits)
                } else {
                    Err(USAGE_NO_PARAMETERS.to_string())
                }
            }
            other => Err(unknown_command_message(other)),
        }
    }

    /// Registered name of this command.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetLogsLimit(_) => SET_LOGS_LIMIT,
            Self::SetLogsStartTime(_) => SET_LOGS_START_TIME,
            Self::GetLog { .. } => GET_LOG,
            Self::SetReportFrequency(_) => SET_REPORT_FREQUENCY,
            Self::Subscribe(_) => SUBSCRIBE,
            Self::Unsubscribe(_) => UNSUBSCRIBE,
            Self::GetCurrentLimits => GET_CURRENT_LIMITS,
        }
    }
}

fn exactly_one<'a>(parameters: &'a [String], usage: &str) -> Result<&'a str, String> {
    match parameters {
        [only] => Ok(only.as_str()),
        _ => Err(usage.to_string()),
    }
}

/// A value `<= 0` gets the "Invalid argument" reply; anything that is not a
/// usable integer gets the generic "unsuccessful" reply.
fn positive<T: TryFrom<i64>>(
    command: &str,
    raw: &str,
    invalid: &str,
    unsuccessful: &str,
) -> Result<T, String> {
    parse_positive(raw).map_err(|e| match e {
        SettingParseError::NotPositive => invalid.to_string(),
        other => {
            debug!(command, error = %other, "Rejected setting value");
            unsuccessful.to_string()
        }
    })
}
