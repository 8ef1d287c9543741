//! Response models for the Nagios Core JSON CGIs.
//!
//! Every CGI wraps its payload in the same envelope: a `result` block
//! describing the outcome and a query-specific `data` block. Fields the
//! formatter does not need are kept out; missing fields default to empty.

use serde::{Deserialize, Deserializer, Serialize};

/// `type_text` value the CGIs report on success.
pub const RESULT_TYPE_TEXT_SUCCESS: &str = "Success";

/// Response envelope shared by all CGIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Envelope format version.
    #[serde(default)]
    pub format_version: i64,
    /// Outcome of the query.
    pub result: ResultInfo,
    /// Query-specific payload.
    pub data: T,
}

impl<T> Envelope<T> {
    /// Whether the backend reported success.
    pub fn is_success(&self) -> bool {
        self.result.type_text == RESULT_TYPE_TEXT_SUCCESS
    }
}

/// The `result` block of an envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultInfo {
    /// Time the query ran, milliseconds since the epoch.
    #[serde(default)]
    pub query_time: i64,
    /// Name of the CGI that answered.
    #[serde(default)]
    pub cgi: String,
    /// Authenticated user.
    #[serde(default)]
    pub user: String,
    /// Query name.
    #[serde(default)]
    pub query: String,
    /// Numeric result code.
    #[serde(default)]
    pub type_code: i64,
    /// Textual result code, `"Success"` when the query worked.
    #[serde(default)]
    pub type_text: String,
    /// Additional detail from the backend.
    #[serde(default)]
    pub message: String,
}

/// Payload of `archivejson.cgi?query=alertlist`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertListData {
    /// Alerts, newest last.
    #[serde(default)]
    pub alertlist: Vec<AlertListEntry>,
}

/// A single host or service state change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertListEntry {
    /// Milliseconds since the epoch.
    #[serde(default)]
    pub timestamp: i64,
    /// `host` or `service`.
    #[serde(default, deserialize_with = "string_or_number")]
    pub object_type: String,
    /// Host the alert belongs to.
    #[serde(default)]
    pub host_name: String,
    /// Alternate name, used when `host_name` is empty.
    #[serde(default)]
    pub name: String,
    /// Service description.
    #[serde(default)]
    pub description: String,
    /// `hard` or `soft`.
    #[serde(default, deserialize_with = "string_or_number")]
    pub state_type: String,
    /// State after the change, e.g. `ok`, `critical`, `down`.
    #[serde(default, deserialize_with = "string_or_number")]
    pub state: String,
    /// Check output.
    #[serde(default)]
    pub plugin_output: String,
}

/// Payload of `archivejson.cgi?query=notificationlist`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationListData {
    /// Notifications, newest last.
    #[serde(default)]
    pub notificationlist: Vec<NotificationListEntry>,
}

/// A single dispatched notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationListEntry {
    /// Milliseconds since the epoch.
    #[serde(default)]
    pub timestamp: i64,
    /// `host` or `service`.
    #[serde(default, deserialize_with = "string_or_number")]
    pub object_type: String,
    /// Host the notification belongs to.
    #[serde(default)]
    pub host_name: String,
    /// Alternate name, used when `host_name` is empty.
    #[serde(default)]
    pub name: String,
    /// Service description.
    #[serde(default)]
    pub description: String,
    /// Contact that was notified.
    #[serde(default)]
    pub contact: String,
    /// Reason, e.g. `PROBLEM`, `RECOVERY`.
    #[serde(default, deserialize_with = "string_or_number")]
    pub notification_type: String,
    /// Notification command.
    #[serde(default)]
    pub method: String,
    /// Message body.
    #[serde(default)]
    pub message: String,
}

/// Payload of `statusjson.cgi?query=hostcount`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostCountData {
    /// Counts by state.
    #[serde(default)]
    pub count: HostCount,
}

/// Hosts per state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostCount {
    pub up: u64,
    pub down: u64,
    pub unreachable: u64,
    pub pending: u64,
}

/// Payload of `statusjson.cgi?query=servicecount`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceCountData {
    /// Counts by state.
    #[serde(default)]
    pub count: ServiceCount,
}

/// Services per state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceCount {
    pub ok: u64,
    pub warning: u64,
    pub critical: u64,
    pub unknown: u64,
    pub pending: u64,
}

/// Accept both enumerated (`"critical"`) and raw numeric (`4`) values.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
