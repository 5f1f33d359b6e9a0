// HTTP implementation of the remote data port
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::application::remote_port::RemoteDataPort;
use crate::domain::selection::QueryKey;
use crate::domain::sensor_data::SensorData;
use crate::error::DashboardError;
use crate::infrastructure::config::ApiSettings;

#[derive(Debug, Deserialize)]
struct SensorsResponse {
    sensors: Vec<String>,
}

enum RequestFailure {
    /// Connect errors, timeouts and 5xx; worth another attempt.
    Transient(String),
    /// 4xx; retrying cannot help.
    Fatal(String),
}

/// Remote data port backed by the dashboard HTTP API.
///
/// Carries a bounded timeout and a small fixed retry budget. Client
/// errors are returned immediately; everything else is retried until the
/// budget is spent.
#[derive(Debug, Clone)]
pub struct HttpRemotePort {
    client: Client,
    base_url: String,
    max_attempts: u32,
}

impl HttpRemotePort {
    /// Builds the adapter from config. Construction failures are a
    /// configuration problem, not a remote one, so they surface at the
    /// wiring seam instead of entering the fetch error taxonomy.
    pub fn new(settings: &ApiSettings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            max_attempts: settings.max_attempts.max(1),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, DashboardError> {
        let mut last_failure = String::new();
        for attempt in 1..=self.max_attempts {
            match self.try_get(url).await {
                Ok(response) => {
                    return response.json::<T>().await.map_err(|err| {
                        DashboardError::Remote(format!("malformed response from {url}: {err}"))
                    });
                }
                Err(RequestFailure::Fatal(reason)) => {
                    return Err(DashboardError::Remote(reason));
                }
                Err(RequestFailure::Transient(reason)) => {
                    warn!(url, attempt, reason = %reason, "request failed");
                    last_failure = reason;
                }
            }
        }
        Err(DashboardError::Remote(last_failure))
    }

    async fn try_get(&self, url: &str) -> Result<reqwest::Response, RequestFailure> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| RequestFailure::Transient(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let reason = format!("{url} returned {status}");
        if status.is_client_error() {
            Err(RequestFailure::Fatal(reason))
        } else {
            Err(RequestFailure::Transient(reason))
        }
    }

    fn sensor_data_url(&self, key: &QueryKey) -> String {
        format!(
            "{}/sensor-data/{}/{}",
            self.base_url,
            urlencoding::encode(&key.sensor),
            key.data_type
        )
    }
}

#[async_trait]
impl RemoteDataPort for HttpRemotePort {
    async fn fetch_sensors(&self) -> Result<Vec<String>, DashboardError> {
        let url = format!("{}/sensors", self.base_url);
        debug!(url, "fetching sensor list");
        let response: SensorsResponse = self.get_json(&url).await?;
        Ok(response.sensors)
    }

    async fn fetch_sensor_data(&self, key: &QueryKey) -> Result<SensorData, DashboardError> {
        let url = self.sensor_data_url(key);
        debug!(url, "fetching sensor data");
        self.get_json(&url).await
    }
}
