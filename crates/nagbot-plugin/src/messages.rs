//! Fixed replies shown to chat users.

pub const LIMIT_SET: &str = "Limit set successfully.";
pub const START_TIME_SET: &str = "Start time set successfully.";
pub const REPORT_FREQUENCY_SET: &str = "Report frequency set successfully.";
pub const SUBSCRIBED_REPORT: &str = "Subscribed to system monitoring report successfully.";
pub const SUBSCRIBED_CHANGES: &str = "Subscribed to configuration changes successfully.";
pub const UNSUBSCRIBED: &str = "Unsubscribed successfully.";

pub const INVALID_LOGS_LIMIT: &str = "Invalid argument - logs limit must be a positive integer.";
pub const INVALID_START_TIME: &str = "Invalid argument - start time must be a positive integer.";
pub const INVALID_REPORT_FREQUENCY: &str =
    "Invalid argument - report frequency must be a positive integer.";

pub const SETTING_LOGS_LIMIT_UNSUCCESSFUL: &str = "Setting logs limit unsuccessful.";
pub const SETTING_START_TIME_UNSUCCESSFUL: &str = "Setting logs start time unsuccessful.";
pub const SETTING_REPORT_FREQUENCY_UNSUCCESSFUL: &str = "Setting report frequency unsuccessful.";
pub const SETTING_REPORT_CHANNEL_UNSUCCESSFUL: &str =
    "Setting system monitoring report channel unsuccessful.";
pub const SETTING_CHANGES_CHANNEL_UNSUCCESSFUL: &str =
    "Setting configuration changes channel unsuccessful.";
pub const UNSUBSCRIBING_UNSUCCESSFUL: &str = "Unsubscribing unsuccessful.";
pub const GETTING_CURRENT_LIMITS_UNSUCCESSFUL: &str = "Getting current limits unsuccessful.";

pub const USAGE_INTEGER_VALUE: &str = "You must supply exactly one parameter (integer value).";
pub const USAGE_SECONDS: &str = "You must supply exactly one parameter (number of seconds).";
pub const USAGE_MINUTES: &str = "You must supply exactly one parameter (number of minutes).";
pub const USAGE_LOG_KIND: &str = "You must supply at least one parameter (alerts|notifications).";
pub const USAGE_TOPIC: &str =
    "You must supply exactly one parameter (report|configuration-changes).";
pub const USAGE_NO_PARAMETERS: &str = "This command takes no parameters.";

/// Reply for a command name outside the registered table.
pub fn unknown_command_message(name: &str) -> String {
    format!("Unknown command ({name}).")
}
