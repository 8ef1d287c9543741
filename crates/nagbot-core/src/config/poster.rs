//! Message poster configuration.

use serde::{Deserialize, Serialize};

/// Selects the sink that receives report posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosterConfig {
    /// `"console"` prints to stdout, `"webhook"` POSTs JSON to `webhook_url`.
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Target URL for the webhook poster.
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Timeout for a single webhook delivery in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            webhook_url: None,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_kind() -> String {
    "console".to_string()
}

fn default_timeout() -> u64 {
    10
}
