//! Mock collaborators for the plugin tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};

use nagbot_core::config::DefaultSettingsConfig;
use nagbot_core::error::AppError;
use nagbot_core::result::AppResult;
use nagbot_core::traits::monitoring::{MonitoringClient, MonitoringRequest};
use nagbot_core::traits::poster::MessagePoster;
use nagbot_core::traits::store::KvStore;
use nagbot_monitor::LogFormatter;
use nagbot_store::Settings;
use nagbot_store::memory::MemoryKvStore;
use nagbot_worker::{ReportJob, SubscriptionManager};

use crate::router::CommandRouter;

/// Memory store whose writes or reads can be switched to fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryKvStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    slow_writes: Mutex<Option<(String, Duration)>>,
}

impl FlakyStore {
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Hold every write whose value contains `text` for `delay`.
    pub fn delay_writes_containing(&self, text: &str, delay: Duration) {
        *self.slow_writes.lock().unwrap() = Some((text.to_string(), delay));
    }
}

#[async_trait]
impl KvStore for FlakyStore {
    async fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::store("read refused"));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &[u8]) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::store("write refused"));
        }
        let delay = self
            .slow_writes
            .lock()
            .unwrap()
            .as_ref()
            .filter(|(text, _)| String::from_utf8_lossy(value).contains(text.as_str()))
            .map(|(_, delay)| *delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::store("delete refused"));
        }
        self.inner.delete(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

/// Serves one alert, no notifications and fixed counts.
#[derive(Debug, Default)]
pub struct ScriptedClient {
    pub requests: Mutex<Vec<MonitoringRequest>>,
    pub failing: AtomicBool,
}

#[async_trait]
impl MonitoringClient for ScriptedClient {
    async fn query(&self, request: &MonitoringRequest) -> AppResult<Value> {
        self.requests.lock().unwrap().push(request.clone());
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::external_service("timed out"));
        }

        Ok(match request {
            MonitoringRequest::AlertList(_) => json!({
                "result": { "type_text": "Success" },
                "data": { "alertlist": [{
                    "timestamp": 1_700_000_000_000i64,
                    "object_type": "host",
                    "host_name": "web-1",
                    "description": "",
                    "state_type": "hard",
                    "state": "down",
                    "plugin_output": "PING CRITICAL"
                }] }
            }),
            MonitoringRequest::NotificationList(_) => json!({
                "result": { "type_text": "Success" },
                "data": { "notificationlist": [] }
            }),
            MonitoringRequest::HostCount => json!({
                "result": { "type_text": "Success" },
                "data": { "count": { "up": 1 } }
            }),
            MonitoringRequest::ServiceCount => json!({
                "result": { "type_text": "Success" },
                "data": { "count": { "ok": 2 } }
            }),
        })
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(!self.failing.load(Ordering::SeqCst))
    }
}

#[derive(Debug, Default)]
pub struct RecordingPoster {
    pub posts: Mutex<Vec<(String, String)>>,
}

impl RecordingPoster {
    pub fn channels(&self) -> Vec<String> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .map(|(channel, _)| channel.clone())
            .collect()
    }
}

#[async_trait]
impl MessagePoster for RecordingPoster {
    async fn post(&self, channel_id: &str, text: &str) -> AppResult<()> {
        self.posts
            .lock()
            .unwrap()
            .push((channel_id.to_string(), text.to_string()));
        Ok(())
    }
}

pub struct Fixture {
    pub store: Arc<FlakyStore>,
    pub settings: Settings,
    pub client: Arc<ScriptedClient>,
    pub poster: Arc<RecordingPoster>,
    pub subscriptions: Arc<SubscriptionManager>,
    pub router: CommandRouter<Utc>,
}

impl Fixture {
    pub async fn new() -> Self {
        let store = Arc::new(FlakyStore::default());
        let settings = Settings::new(store.clone());
        settings
            .seed_defaults(&DefaultSettingsConfig::default())
            .await
            .unwrap();

        let client = Arc::new(ScriptedClient::default());
        let poster = Arc::new(RecordingPoster::default());
        let job = Arc::new(ReportJob::new(
            settings.clone(),
            client.clone(),
            poster.clone(),
            std::time::Duration::from_secs(600),
        ));
        let subscriptions = Arc::new(SubscriptionManager::new(job));
        let router = CommandRouter::with_formatter(
            settings.clone(),
            client.clone(),
            subscriptions.clone(),
            LogFormatter::new(Utc),
        );

        Self {
            store,
            settings,
            client,
            poster,
            subscriptions,
            router,
        }
    }

    pub async fn run(&self, name: &str, channel_id: &str, raw: &[&str]) -> String {
        let parameters: Vec<String> = raw.iter().map(|s| s.to_string()).collect();
        self.router.dispatch(name, channel_id, &parameters).await
    }
}
