//! Integration tests for the report subscription lifecycle.

use std::time::Duration;

use nagbot_plugin::Plugin;

use crate::helpers::TestApp;

const INTERVAL: Duration = Duration::from_secs(600);

#[tokio::test(start_paused = true)]
async fn test_subscribe_posts_then_unsubscribe_stops() {
    let app = TestApp::new().await;

    assert_eq!(
        app.command("ops", "subscribe", &["report"]).await,
        "Subscribed to system monitoring report successfully."
    );
    assert_eq!(
        app.settings.report_channel().await.unwrap().as_deref(),
        Some("ops")
    );

    tokio::time::sleep(INTERVAL + Duration::from_secs(1)).await;
    assert_eq!(app.inbox.count_for("ops"), 1);
    let (_, text) = app.inbox.posts.lock().unwrap()[0].clone();
    assert!(text.contains("Hosts: 5 up | 1 down"));

    assert_eq!(
        app.command("ops", "unsubscribe", &["report"]).await,
        "Unsubscribed successfully."
    );
    assert_eq!(app.settings.report_channel().await.unwrap(), None);

    tokio::time::sleep(INTERVAL * 5).await;
    assert_eq!(app.inbox.count_for("ops"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_second_subscribe_moves_report() {
    let app = TestApp::new().await;

    app.command("alpha", "subscribe", &["report"]).await;
    app.command("beta", "subscribe", &["report"]).await;
    assert_eq!(
        app.settings.report_channel().await.unwrap().as_deref(),
        Some("beta")
    );

    tokio::time::sleep(INTERVAL * 2 + Duration::from_secs(1)).await;
    assert_eq!(app.inbox.count_for("alpha"), 0);
    assert_eq!(app.inbox.count_for("beta"), 2);

    app.plugin.on_deactivate().await.unwrap();
}

#[tokio::test]
async fn test_unsubscribe_without_subscription_is_harmless() {
    let app = TestApp::new().await;

    assert_eq!(
        app.command("ops", "unsubscribe", &["report"]).await,
        "Unsubscribed successfully."
    );
    assert_eq!(
        app.command("ops", "unsubscribe", &["report"]).await,
        "Unsubscribed successfully."
    );
}

#[tokio::test(start_paused = true)]
async fn test_deactivate_stops_reports() {
    let app = TestApp::new().await;
    app.command("ops", "subscribe", &["report"]).await;

    app.plugin.on_deactivate().await.unwrap();
    tokio::time::sleep(INTERVAL * 3).await;
    assert_eq!(app.inbox.count_for("ops"), 0);

    // The channel stays recorded so the next activation resumes it.
    assert_eq!(
        app.settings.report_channel().await.unwrap().as_deref(),
        Some("ops")
    );
}

#[tokio::test]
async fn test_configuration_changes_subscription() {
    let app = TestApp::new().await;

    assert_eq!(
        app.command("audit", "subscribe", &["configuration-changes"])
            .await,
        "Subscribed to configuration changes successfully."
    );
    assert_eq!(
        app.settings.changes_channel().await.unwrap().as_deref(),
        Some("audit")
    );
    assert_eq!(
        app.command("audit", "unsubscribe", &["configuration-changes"])
            .await,
        "Unsubscribed successfully."
    );
    assert_eq!(app.settings.changes_channel().await.unwrap(), None);
}
