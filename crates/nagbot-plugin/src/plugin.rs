//! Plugin lifecycle as seen by the chat host.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use nagbot_core::config::DefaultSettingsConfig;
use nagbot_core::result::AppResult;
use nagbot_core::traits::monitoring::MonitoringClient;
use nagbot_core::traits::poster::MessagePoster;
use nagbot_store::Settings;
use nagbot_worker::{ReportJob, SubscriptionManager};

use crate::registry::{CommandInfo, registered_commands};
use crate::router::CommandRouter;

/// Metadata about a plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Unique plugin identifier.
    pub id: String,
    /// Human-readable plugin name.
    pub name: String,
    /// Plugin version string.
    pub version: String,
    /// Plugin description.
    pub description: String,
}

/// What a chat host drives: activation, command execution, deactivation.
#[async_trait]
pub trait Plugin: Send + Sync + std::fmt::Debug {
    /// Returns plugin metadata.
    fn info(&self) -> PluginInfo;

    /// Commands the host should register.
    fn commands(&self) -> &'static [CommandInfo];

    /// Called once before any command is executed.
    async fn on_activate(&self) -> AppResult<()>;

    /// Called once when the host shuts the plugin down.
    async fn on_deactivate(&self) -> AppResult<()>;

    /// Run a registered command invoked in `channel_id`.
    async fn execute_command(&self, name: &str, channel_id: &str, parameters: &[String])
    -> String;
}

/// The monitoring chat plugin.
#[derive(Debug)]
pub struct MonitoringPlugin {
    settings: Settings,
    client: Arc<dyn MonitoringClient>,
    subscriptions: Arc<SubscriptionManager>,
    router: CommandRouter,
    defaults: DefaultSettingsConfig,
}

impl MonitoringPlugin {
    pub fn new(
        settings: Settings,
        client: Arc<dyn MonitoringClient>,
        poster: Arc<dyn MessagePoster>,
        defaults: DefaultSettingsConfig,
    ) -> Self {
        let fallback_frequency =
            Duration::from_secs(u64::from(defaults.report_frequency_minutes) * 60);
        let job = Arc::new(ReportJob::new(
            settings.clone(),
            client.clone(),
            poster,
            fallback_frequency,
        ));
        let subscriptions = Arc::new(SubscriptionManager::new(job));
        let router = CommandRouter::new(settings.clone(), client.clone(), subscriptions.clone());

        Self {
            settings,
            client,
            subscriptions,
            router,
            defaults,
        }
    }

    /// The command router.
    pub fn router(&self) -> &CommandRouter {
        &self.router
    }

    /// The report subscription manager.
    pub fn subscriptions(&self) -> &Arc<SubscriptionManager> {
        &self.subscriptions
    }
}

#[async_trait]
impl Plugin for MonitoringPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            id: "nagbot".to_string(),
            name: "Nagios monitoring".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Query and subscribe to a Nagios-compatible monitoring backend"
                .to_string(),
        }
    }

    fn commands(&self) -> &'static [CommandInfo] {
        registered_commands()
    }

    /// Seeds absent settings with defaults, resumes a recorded report
    /// subscription and checks the backend. An unreachable backend is only
    /// logged.
    async fn on_activate(&self) -> AppResult<()> {
        self.settings.seed_defaults(&self.defaults).await?;

        if let Some(channel_id) = self.settings.report_channel().await? {
            info!(channel_id = %channel_id, "Resuming report subscription");
            self.subscriptions.subscribe(&channel_id).await;
        }

        match self.client.health_check().await {
            Ok(true) => info!("Monitoring backend reachable"),
            Ok(false) => warn!("Monitoring backend reported unhealthy"),
            Err(e) => warn!(error = %e, "Monitoring backend unreachable"),
        }

        let info = self.info();
        info!(
            plugin_id = %info.id,
            version = %info.version,
            commands = self.commands().len(),
            "Plugin activated"
        );
        Ok(())
    }

    async fn on_deactivate(&self) -> AppResult<()> {
        self.subscriptions.shutdown().await;
        info!(plugin_id = "nagbot", "Plugin deactivated");
        Ok(())
    }

    async fn execute_command(
        &self,
        name: &str,
        channel_id: &str,
        parameters: &[String],
    ) -> String {
        self.router.dispatch(name, channel_id, parameters).await
    }
}
