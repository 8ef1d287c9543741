//! Message sinks for report posts.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use nagbot_core::config::PosterConfig;
use nagbot_core::error::{AppError, ErrorKind};
use nagbot_core::result::AppResult;
use nagbot_core::traits::poster::MessagePoster;

/// Build the sink selected by `[poster] kind`.
pub fn from_config(config: &PosterConfig) -> AppResult<Arc<dyn MessagePoster>> {
    match config.kind.as_str() {
        "console" => {
            info!("Posting reports to stdout");
            Ok(Arc::new(ConsolePoster))
        }
        "webhook" => {
            let poster = WebhookPoster::new(config)?;
            info!(url = %poster.url, "Posting reports to webhook");
            Ok(Arc::new(poster))
        }
        other => Err(AppError::configuration(format!(
            "Unknown poster kind '{other}'. Supported: console, webhook"
        ))),
    }
}

/// Prints posts to stdout, one `[channel] text` block per post.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePoster;

#[async_trait]
impl MessagePoster for ConsolePoster {
    async fn post(&self, channel_id: &str, text: &str) -> AppResult<()> {
        println!("[{channel_id}] {text}");
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    channel_id: &'a str,
    text: &'a str,
}

/// POSTs `{"channel_id", "text"}` JSON to an incoming-webhook URL.
#[derive(Debug, Clone)]
pub struct WebhookPoster {
    client: Client,
    url: String,
}

impl WebhookPoster {
    pub fn new(config: &PosterConfig) -> AppResult<Self> {
        let url = config
            .webhook_url
            .clone()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::configuration("poster.webhook_url is required for webhook"))?;

        if config.timeout_seconds == 0 {
            return Err(AppError::configuration(
                "poster.timeout_seconds must be greater than zero",
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build webhook HTTP client",
                    e,
                )
            })?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl MessagePoster for WebhookPoster {
    async fn post(&self, channel_id: &str, text: &str) -> AppResult<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&WebhookMessage { channel_id, text })
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Webhook delivery failed", e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unavailable>".to_string());
            return Err(AppError::external_service(format!(
                "Webhook rejected post ({status}): {body}"
            )));
        }

        debug!(channel_id, "Webhook post delivered");
        Ok(())
    }
}
