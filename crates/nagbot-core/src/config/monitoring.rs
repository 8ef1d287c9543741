//! Monitoring backend configuration.

use serde::{Deserialize, Serialize};

/// Connection settings for the Nagios JSON CGIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// Base URL of the CGI directory, e.g. `http://host/nagios/cgi-bin`.
    #[serde(default = "default_url")]
    pub url: String,
    /// Basic auth user name.
    #[serde(default)]
    pub username: Option<String>,
    /// Basic auth password.
    #[serde(default)]
    pub password: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            username: None,
            password: None,
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_url() -> String {
    "http://localhost/nagios/cgi-bin".to_string()
}

fn default_request_timeout() -> u64 {
    10
}
