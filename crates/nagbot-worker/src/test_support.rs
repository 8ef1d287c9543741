//! Mock collaborators shared by the worker tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use nagbot_core::config::DefaultSettingsConfig;
use nagbot_core::error::AppError;
use nagbot_core::result::AppResult;
use nagbot_core::traits::monitoring::{MonitoringClient, MonitoringRequest};
use nagbot_core::traits::poster::MessagePoster;
use nagbot_core::traits::store::KvStore;
use nagbot_store::Settings;
use nagbot_store::memory::MemoryKvStore;

use crate::report::ReportJob;
use crate::subscription::SubscriptionManager;

pub const MINUTE: Duration = Duration::from_secs(60);

/// Answers count queries, or fails every call while `failing` is set.
#[derive(Debug, Default)]
pub struct CountsClient {
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl CountsClient {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MonitoringClient for CountsClient {
    async fn query(&self, request: &MonitoringRequest) -> AppResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::external_service("connection refused"));
        }

        Ok(match request {
            MonitoringRequest::HostCount => json!({
                "result": { "type_text": "Success" },
                "data": { "count": { "up": 3 } }
            }),
            _ => json!({
                "result": { "type_text": "Success" },
                "data": { "count": { "ok": 9, "critical": 1 } }
            }),
        })
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(!self.failing.load(Ordering::SeqCst))
    }
}

/// Memory store whose reads can be switched to never complete.
#[derive(Debug, Default)]
pub struct StallingStore {
    inner: MemoryKvStore,
    stall_reads: AtomicBool,
}

impl StallingStore {
    pub fn stall_reads(&self, stall: bool) {
        self.stall_reads.store(stall, Ordering::SeqCst);
    }
}

#[async_trait]
impl KvStore for StallingStore {
    async fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        if self.stall_reads.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &[u8]) -> AppResult<()> {
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

/// Records every post.
#[derive(Debug, Default)]
pub struct RecordingPoster {
    posts: Mutex<Vec<(String, String)>>,
}

impl RecordingPoster {
    pub fn count_for(&self, channel_id: &str) -> usize {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .filter(|(channel, _)| channel == channel_id)
            .count()
    }

    pub fn last(&self) -> Option<(String, String)> {
        self.posts.lock().unwrap().last().cloned()
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

/// Settings seeded with defaults plus the mocks wired into a report job.
pub struct Harness {
    pub store: Arc<StallingStore>,
    pub settings: Settings,
    pub client: Arc<CountsClient>,
    pub poster: Arc<RecordingPoster>,
    pub job: Arc<ReportJob>,
}

impl Harness {
    pub async fn new() -> Self {
        let store = Arc::new(StallingStore::default());
        let settings = Settings::new(store.clone());
        settings
            .seed_defaults(&DefaultSettingsConfig::default())
            .await
            .unwrap();

        let client = Arc::new(CountsClient::default());
        let poster = Arc::new(RecordingPoster::default());
        let job = Arc::new(ReportJob::new(
            settings.clone(),
            client.clone(),
            poster.clone(),
            MINUTE * 10,
        ));

        Self {
            store,
            settings,
            client,
            poster,
            job,
        }
    }

    pub fn manager(&self) -> SubscriptionManager {
        SubscriptionManager::new(Arc::clone(&self.job))
    }
}
