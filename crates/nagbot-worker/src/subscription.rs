//! Report subscription manager: owns the single report polling task.

use std::sync::Arc;

use tokio::sync::{Mutex, oneshot};
use tokio::task::JoinHandle;
use tokio::time;
use uuid::Uuid;

use crate::report::ReportJob;

/// The live report subscription.
#[derive(Debug)]
struct ActiveSubscription {
    /// Identifier used in logs.
    id: Uuid,
    /// Channel receiving the reports.
    channel_id: String,
    /// Single-use cancel signal.
    cancel: oneshot::Sender<()>,
    /// The polling task.
    task: JoinHandle<()>,
}

impl ActiveSubscription {
    /// Signal the task and wait for it to finish.
    async fn stop(self) {
        // The task may already be gone; a failed send is fine.
        let _ = self.cancel.send(());

        if let Err(e) = self.task.await {
            tracing::error!(
                subscription_id = %self.id,
                error = %e,
                "Report task ended abnormally"
            );
        }

        tracing::info!(
            subscription_id = %self.id,
            channel_id = %self.channel_id,
            "Report subscription stopped"
        );
    }
}

/// Owns at most one report polling task process-wide.
///
/// `subscribe` and `unsubscribe` serialize on the same lock, so a signal is
/// never sent twice and a replaced task is always stopped before its
/// successor starts.
#[derive(Debug)]
pub struct SubscriptionManager {
    /// Report job shared with the polling task.
    job: Arc<ReportJob>,
    /// The current subscription, if any.
    active: Mutex<Option<ActiveSubscription>>,
}

impl SubscriptionManager {
    /// Create a manager with no active subscription.
    pub fn new(job: Arc<ReportJob>) -> Self {
        Self {
            job,
            active: Mutex::new(None),
        }
    }

    /// Start posting reports into `channel_id`.
    ///
    /// An existing subscription is cancelled and awaited first. Returns the
    /// channel of the replaced subscription, if there was one.
    pub async fn subscribe(&self, channel_id: &str) -> Option<String> {
        let mut active = self.active.lock().await;

        let replaced = match active.take() {
            Some(previous) => {
                let channel = previous.channel_id.clone();
                tracing::info!(
                    subscription_id = %previous.id,
                    old_channel_id = %channel,
                    new_channel_id = %channel_id,
                    "Replacing report subscription"
                );
                previous.stop().await;
                Some(channel)
            }
            None => None,
        };

        let id = Uuid::now_v7();
        let (cancel, cancelled) = oneshot::channel();
        let task = tokio::spawn(run_report_loop(
            Arc::clone(&self.job),
            id,
            channel_id.to_string(),
            cancelled,
        ));

        *active = Some(ActiveSubscription {
            id,
            channel_id: channel_id.to_string(),
            cancel,
            task,
        });

        tracing::info!(subscription_id = %id, channel_id, "Report subscription started");
        replaced
    }

    /// Stop the report task. Returns `false` when nothing was subscribed.
    pub async fn unsubscribe(&self) -> bool {
        let previous = self.active.lock().await.take();
        match previous {
            Some(subscription) => {
                subscription.stop().await;
                true
            }
            None => {
                tracing::debug!("Unsubscribe requested with no active report subscription");
                false
            }
        }
    }

    /// Stop the report task, if any, before the owner goes away.
    pub async fn shutdown(&self) {
        if self.unsubscribe().await {
            tracing::info!("Report subscription shut down");
        }
    }

    /// Whether a report task is running.
    pub async fn is_active(&self) -> bool {
        self.active.lock().await.is_some()
    }

    /// Channel of the running report task.
    pub async fn active_channel(&self) -> Option<String> {
        self.active
            .lock()
            .await
            .as_ref()
            .map(|subscription| subscription.channel_id.clone())
    }
}

/// Wait one interval, post one report, repeat until cancelled.
async fn run_report_loop(
    job: Arc<ReportJob>,
    id: Uuid,
    channel_id: String,
    mut cancelled: oneshot::Receiver<()>,
) {
    // Every await races the cancel signal so a stalled store cannot block
    // `stop`.
    loop {
        let frequency = tokio::select! {
            _ = &mut cancelled => break,
            frequency = job.frequency() => frequency,
        };
        tracing::trace!(
            subscription_id = %id,
            frequency_secs = frequency.as_secs(),
            "Waiting for next report"
        );

        tokio::select! {
            _ = &mut cancelled => break,
            _ = time::sleep(frequency) => {}
        }

        tokio::select! {
            _ = &mut cancelled => break,
            result = job.run_once(&channel_id) => {
                if let Err(e) = result {
                    tracing::warn!(
                        subscription_id = %id,
                        channel_id = %channel_id,
                        error = %e,
                        "Report poll failed, retrying next interval"
                    );
                }
            }
        }
    }

    tracing::debug!(subscription_id = %id, "Report loop exited");
}
