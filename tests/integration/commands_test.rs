//! Integration tests for settings and log commands.

use serde_json::json;

use nagbot_core::traits::monitoring::MonitoringRequest;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_logs_limit_round_trip() {
    let app = TestApp::new().await;

    assert_eq!(
        app.command("c", "set-logs-limit", &["12"]).await,
        "Limit set successfully."
    );
    assert_eq!(app.settings.logs_limit().await.unwrap(), 12);

    for bad in ["0", "-3"] {
        assert_eq!(
            app.command("c", "set-logs-limit", &[bad]).await,
            "Invalid argument - logs limit must be a positive integer."
        );
    }
    assert_eq!(
        app.command("c", "set-logs-limit", &["twelve"]).await,
        "Setting logs limit unsuccessful."
    );
    assert_eq!(
        app.command("c", "set-logs-limit", &[]).await,
        "You must supply exactly one parameter (integer value)."
    );
    assert_eq!(app.settings.logs_limit().await.unwrap(), 12);
}

#[tokio::test]
async fn test_start_time_and_frequency() {
    let app = TestApp::new().await;

    assert_eq!(
        app.command("c", "set-logs-start-time", &["3600"]).await,
        "Start time set successfully."
    );
    assert_eq!(
        app.command("c", "set-logs-start-time", &["0"]).await,
        "Invalid argument - start time must be a positive integer."
    );
    assert_eq!(
        app.command("c", "set-report-frequency", &["30"]).await,
        "Report frequency set successfully."
    );
    assert_eq!(
        app.command("c", "set-report-frequency", &[]).await,
        "You must supply exactly one parameter (number of minutes)."
    );
    assert_eq!(
        app.command("c", "get-current-limits", &[]).await,
        "Logs limit: 50\n\
         Logs start time: 3600 seconds\n\
         Report frequency: 30 minutes\n\
         Report channel: not subscribed\n\
         Configuration changes channel: not subscribed"
    );
}

#[tokio::test]
async fn test_get_log_filters_and_messages() {
    let app = TestApp::new().await;

    assert_eq!(
        app.command("c", "get-log", &[]).await,
        "You must supply at least one parameter (alerts|notifications)."
    );
    assert_eq!(
        app.command("c", "get-log", &["alerts", "host"]).await,
        "You must supply host name."
    );
    assert_eq!(
        app.command("c", "get-log", &["alerts", "service"]).await,
        "You must supply service description."
    );
    assert_eq!(
        app.command("c", "get-log", &["alerts", "bogus"]).await,
        "Unknown parameter (bogus)."
    );
    assert_eq!(app.command("c", "get-log", &["alerts"]).await, "No alerts.");
    assert_eq!(
        app.command("c", "get-log", &["notifications", "service", "PING"])
            .await,
        "No notifications."
    );

    let requests = app.backend.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert!(matches!(
        &requests[1],
        MonitoringRequest::NotificationList(r)
            if r.service_description.as_deref() == Some("PING") && r.host_name.is_none()
    ));
}

#[tokio::test]
async fn test_get_log_upstream_failure_status() {
    let app = TestApp::new().await;
    *app.backend.alerts.lock().unwrap() = json!({
        "result": { "type_code": 3, "type_text": "Option Value Invalid" },
        "data": { "alertlist": [{ "host_name": "ignored" }] }
    });

    assert_eq!(
        app.command("c", "get-log", &["alerts"]).await,
        "Getting logs unsuccessful: Option Value Invalid"
    );
}

#[tokio::test]
async fn test_get_log_renders_records() {
    let app = TestApp::new().await;
    *app.backend.notifications.lock().unwrap() = json!({
        "result": { "type_text": "Success" },
        "data": { "notificationlist": [{
            "timestamp": 1_700_000_000_000i64,
            "object_type": "service",
            "host_name": "",
            "name": "db-1",
            "description": "Disk",
            "contact": "oncall",
            "notification_type": "PROBLEM",
            "method": "email",
            "message": "DISK WARNING"
        }] }
    });

    let reply = app.command("c", "get-log", &["notifications"]).await;
    assert!(reply.starts_with('['));
    assert!(reply.ends_with("] service: db-1 | Disk | oncall | PROBLEM | email | DISK WARNING"));
    assert_eq!(reply.lines().count(), 1);
}

#[tokio::test]
async fn test_unknown_command() {
    let app = TestApp::new().await;
    assert_eq!(
        app.command("c", "reboot", &["now"]).await,
        "Unknown command (reboot)."
    );
}
