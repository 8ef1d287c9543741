//! HTTP client for the Nagios Core JSON CGIs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use nagbot_core::config::MonitoringConfig;
use nagbot_core::error::{AppError, ErrorKind};
use nagbot_core::result::AppResult;
use nagbot_core::traits::monitoring::{ArchiveRequest, MonitoringClient, MonitoringRequest};

const ARCHIVE_CGI: &str = "archivejson.cgi";
const STATUS_CGI: &str = "statusjson.cgi";

/// Monitoring client speaking to `archivejson.cgi` and `statusjson.cgi`.
#[derive(Debug, Clone)]
pub struct HttpMonitoringClient {
    client: Client,
    base_url: String,
    credentials: Option<(String, Option<String>)>,
}

impl HttpMonitoringClient {
    /// Build a client from configuration. Every request carries the
    /// configured timeout.
    pub fn new(config: &MonitoringConfig) -> AppResult<Self> {
        if config.request_timeout_seconds == 0 {
            return Err(AppError::configuration(
                "monitoring.request_timeout_seconds must be greater than zero",
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build monitoring HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            credentials: config
                .username
                .clone()
                .map(|user| (user, config.password.clone())),
        })
    }

    async fn get_json(&self, cgi: &str, params: &[(&str, String)]) -> AppResult<Value> {
        let mut request = self
            .client
            .get(format!("{}/{cgi}", self.base_url))
            .query(params);

        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, password.as_ref());
        }

        let response = request.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("{cgi} request failed"),
                e,
            )
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unavailable>".to_string());
            return Err(AppError::external_service(format!(
                "{cgi} error ({status}): {body}"
            )));
        }

        response.json::<Value>().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("invalid {cgi} payload"),
                e,
            )
        })
    }
}

#[async_trait]
impl MonitoringClient for HttpMonitoringClient {
    async fn query(&self, request: &MonitoringRequest) -> AppResult<Value> {
        let (cgi, params) = request_target(request);
        debug!(cgi, query = request.name(), "Querying monitoring backend");
        self.get_json(cgi, &params).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        let params = [("query", "programstatus".to_string())];
        match self.get_json(STATUS_CGI, &params).await {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!(error = %e, "Monitoring backend health check failed");
                Ok(false)
            }
        }
    }
}

/// CGI name and query string for a request.
fn request_target(request: &MonitoringRequest) -> (&'static str, Vec<(&'static str, String)>) {
    match request {
        MonitoringRequest::AlertList(archive) => {
            (ARCHIVE_CGI, archive_params("alertlist", archive))
        }
        MonitoringRequest::NotificationList(archive) => {
            (ARCHIVE_CGI, archive_params("notificationlist", archive))
        }
        MonitoringRequest::HostCount => (STATUS_CGI, vec![("query", "hostcount".to_string())]),
        MonitoringRequest::ServiceCount => {
            (STATUS_CGI, vec![("query", "servicecount".to_string())])
        }
    }
}

fn archive_params(query: &str, archive: &ArchiveRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![("query", query.to_string())];
    if archive.enumerate {
        params.push(("formatoptions", "enumerate".to_string()));
    }
    params.push(("count", archive.count.to_string()));
    if let Some(host) = &archive.host_name {
        params.push(("hostname", host.clone()));
    }
    if let Some(service) = &archive.service_description {
        params.push(("servicedescription", service.clone()));
    }
    params.push(("starttime", archive.start_time.to_string()));
    params.push(("endtime", archive.end_time.to_string()));
    params
}
