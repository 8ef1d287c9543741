//! Typed, validated accessors over the raw key-value store.
//!
//! Each setting is JSON-encoded before it is written. Validation happens
//! before encoding, so a value that fails it never reaches the backend.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};

use nagbot_core::config::DefaultSettingsConfig;
use nagbot_core::error::AppError;
use nagbot_core::result::AppResult;
use nagbot_core::traits::store::KvStore;

use crate::keys::SettingKey;

/// Why a raw command parameter was rejected as a positive integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingParseError {
    /// The parameter is not an integer at all.
    #[error("'{0}' is not an integer")]
    NotAnInteger(String),
    /// The parameter is an integer but not greater than zero.
    #[error("value must be greater than zero")]
    NotPositive,
    /// The parameter is positive but too large for the setting.
    #[error("'{0}' is out of range")]
    OutOfRange(String),
}

/// Parse a strictly positive integer of type `T` from a command parameter.
pub fn parse_positive<T: TryFrom<i64>>(raw: &str) -> Result<T, SettingParseError> {
    let value: i64 = raw
        .parse()
        .map_err(|_| SettingParseError::NotAnInteger(raw.to_string()))?;
    if value <= 0 {
        return Err(SettingParseError::NotPositive);
    }
    T::try_from(value).map_err(|_| SettingParseError::OutOfRange(raw.to_string()))
}

/// Typed settings over a [`KvStore`] backend.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Raw backend.
    store: Arc<dyn KvStore>,
}

impl Settings {
    /// Wrap a key-value backend.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Read and decode a setting.
    ///
    /// An absent key yields an [`ErrorKind::NotFound`](nagbot_core::error::ErrorKind::NotFound)
    /// error, a value that does not decode yields a serialization error.
    pub async fn get<T: DeserializeOwned>(&self, key: SettingKey) -> AppResult<T> {
        let bytes = self
            .store
            .get(key.as_str())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Setting '{key}' is not set")))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Encode and write a setting.
    pub async fn set<T: Serialize + ?Sized>(&self, key: SettingKey, value: &T) -> AppResult<()> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key.as_str(), &bytes).await?;
        debug!(key = %key, "Setting stored");
        Ok(())
    }

    /// Remove a setting.
    pub async fn delete(&self, key: SettingKey) -> AppResult<()> {
        self.store.delete(key.as_str()).await
    }

    /// Whether a setting currently holds a value.
    pub async fn is_set(&self, key: SettingKey) -> AppResult<bool> {
        Ok(self.store.get(key.as_str()).await?.is_some())
    }

    /// Maximum number of log records per query.
    pub async fn logs_limit(&self) -> AppResult<u32> {
        self.get(SettingKey::LogsLimit).await
    }

    /// Set the maximum number of log records per query.
    pub async fn set_logs_limit(&self, limit: u32) -> AppResult<()> {
        if limit == 0 {
            return Err(AppError::validation("logs limit must be a positive integer"));
        }
        self.set(SettingKey::LogsLimit, &limit).await
    }

    /// Lookback window for log queries.
    pub async fn logs_start_time(&self) -> AppResult<Duration> {
        let seconds: u64 = self.get(SettingKey::LogsStartTime).await?;
        Ok(Duration::from_secs(seconds))
    }

    /// Set the lookback window for log queries, in seconds.
    pub async fn set_logs_start_time(&self, seconds: u64) -> AppResult<()> {
        if seconds == 0 {
            return Err(AppError::validation("start time must be a positive integer"));
        }
        self.set(SettingKey::LogsStartTime, &seconds).await
    }

    /// Interval between report posts.
    pub async fn report_frequency(&self) -> AppResult<Duration> {
        let minutes: u64 = self.get(SettingKey::ReportFrequency).await?;
        Ok(Duration::from_secs(minutes.saturating_mul(60)))
    }

    /// Set the interval between report posts, in minutes.
    pub async fn set_report_frequency(&self, minutes: u32) -> AppResult<()> {
        if minutes == 0 {
            return Err(AppError::validation(
                "report frequency must be a positive integer",
            ));
        }
        self.set(SettingKey::ReportFrequency, &minutes).await
    }

    /// Channel receiving the monitoring report, if subscribed.
    pub async fn report_channel(&self) -> AppResult<Option<String>> {
        self.channel(SettingKey::ReportChannel).await
    }

    /// Record the channel receiving the monitoring report.
    pub async fn set_report_channel(&self, channel_id: &str) -> AppResult<()> {
        self.set_channel(SettingKey::ReportChannel, channel_id).await
    }

    /// Channel receiving configuration change notices, if subscribed.
    pub async fn changes_channel(&self) -> AppResult<Option<String>> {
        self.channel(SettingKey::ChangesChannel).await
    }

    /// Record the channel receiving configuration change notices.
    pub async fn set_changes_channel(&self, channel_id: &str) -> AppResult<()> {
        self.set_channel(SettingKey::ChangesChannel, channel_id).await
    }

    /// Write every default whose setting is still absent.
    ///
    /// Returns the keys that were written. Existing values are left alone.
    pub async fn seed_defaults(&self, defaults: &DefaultSettingsConfig) -> AppResult<Vec<SettingKey>> {
        let mut seeded = Vec::new();

        if !self.is_set(SettingKey::LogsLimit).await? {
            self.set_logs_limit(defaults.logs_limit).await?;
            seeded.push(SettingKey::LogsLimit);
        }
        if !self.is_set(SettingKey::LogsStartTime).await? {
            self.set_logs_start_time(defaults.logs_start_time_seconds)
                .await?;
            seeded.push(SettingKey::LogsStartTime);
        }
        if !self.is_set(SettingKey::ReportFrequency).await? {
            self.set_report_frequency(defaults.report_frequency_minutes)
                .await?;
            seeded.push(SettingKey::ReportFrequency);
        }

        if !seeded.is_empty() {
            info!(keys = ?seeded, "Seeded default settings");
        }
        Ok(seeded)
    }

    async fn channel(&self, key: SettingKey) -> AppResult<Option<String>> {
        match self.get(key).await {
            Ok(channel) => Ok(Some(channel)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn set_channel(&self, key: SettingKey, channel_id: &str) -> AppResult<()> {
        if channel_id.is_empty() {
            return Err(AppError::validation("channel identifier must not be empty"));
        }
        self.set(key, channel_id).await
    }
}
