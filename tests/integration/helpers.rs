//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use nagbot_core::config::AppConfig;
use nagbot_core::result::AppResult;
use nagbot_core::traits::monitoring::{MonitoringClient, MonitoringRequest};
use nagbot_core::traits::poster::MessagePoster;
use nagbot_plugin::{MonitoringPlugin, Plugin};
use nagbot_store::{Settings, StoreManager};

/// Monitoring backend returning whatever envelopes the test installed.
#[derive(Debug)]
pub struct FakeBackend {
    pub alerts: Mutex<Value>,
    pub notifications: Mutex<Value>,
    pub requests: Mutex<Vec<MonitoringRequest>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            alerts: Mutex::new(json!({
                "result": { "type_text": "Success" },
                "data": { "alertlist": [] }
            })),
            notifications: Mutex::new(json!({
                "result": { "type_text": "Success" },
                "data": { "notificationlist": [] }
            })),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MonitoringClient for FakeBackend {
    async fn query(&self, request: &MonitoringRequest) -> AppResult<Value> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(match request {
            MonitoringRequest::AlertList(_) => self.alerts.lock().unwrap().clone(),
            MonitoringRequest::NotificationList(_) => self.notifications.lock().unwrap().clone(),
            MonitoringRequest::HostCount => json!({
                "result": { "type_text": "Success" },
                "data": { "count": { "up": 5, "down": 1 } }
            }),
            MonitoringRequest::ServiceCount => json!({
                "result": { "type_text": "Success" },
                "data": { "count": { "ok": 20, "warning": 2 } }
            }),
        })
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

/// Collects report posts.
#[derive(Debug, Default)]
pub struct Inbox {
    pub posts: Mutex<Vec<(String, String)>>,
}

impl Inbox {
    pub fn count_for(&self, channel_id: &str) -> usize {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .filter(|(channel, _)| channel == channel_id)
            .count()
    }
}

#[async_trait]
impl MessagePoster for Inbox {
    async fn post(&self, channel_id: &str, text: &str) -> AppResult<()> {
        self.posts
            .lock()
            .unwrap()
            .push((channel_id.to_string(), text.to_string()));
        Ok(())
    }
}

/// Test application context
pub struct TestApp {
    pub plugin: MonitoringPlugin,
    pub settings: Settings,
    pub backend: Arc<FakeBackend>,
    pub inbox: Arc<Inbox>,
}

impl TestApp {
    /// Activated plugin over the in-memory store from the default config
    pub async fn new() -> Self {
        let config = AppConfig::default();
        let store = StoreManager::new(&config.store)
            .await
            .expect("Failed to init store");
        let settings = Settings::new(Arc::new(store));
        let backend = Arc::new(FakeBackend::default());
        let inbox = Arc::new(Inbox::default());

        let plugin = MonitoringPlugin::new(
            settings.clone(),
            backend.clone(),
            inbox.clone(),
            config.defaults.clone(),
        );
        plugin.on_activate().await.expect("Failed to activate plugin");

        Self {
            plugin,
            settings,
            backend,
            inbox,
        }
    }

    /// Run a command the way the host would
    pub async fn command(&self, channel_id: &str, name: &str, parameters: &[&str]) -> String {
        let parameters: Vec<String> = parameters.iter().map(|s| s.to_string()).collect();
        self.plugin
            .execute_command(name, channel_id, &parameters)
            .await
    }
}
