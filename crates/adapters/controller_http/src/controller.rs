//! reqwest implementation of the [`Controller`] port.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, header};
use serde::{Deserialize, Serialize};

use smarthouse_app::ports::Controller;
use smarthouse_domain::device::DeviceValue;
use smarthouse_domain::error::SmartHouseError;
use smarthouse_domain::state::StateSnapshot;
use smarthouse_domain::time::now;
use smarthouse_domain::write_set::DeviceWrite;

use crate::config::ControllerConfig;
use crate::error::ControllerError;

const STATUS_OK: &str = "ok";

#[derive(Debug, Deserialize)]
struct ReadResponse {
    status: String,
    #[serde(default)]
    data: Vec<DeviceEntry>,
}

#[derive(Debug, Deserialize)]
struct DeviceEntry {
    name: String,
    value: DeviceValue,
}

#[derive(Debug, Serialize)]
struct WriteRequest<'a> {
    controllers: &'a [DeviceWrite],
}

#[derive(Debug, Deserialize)]
struct WriteResponse {
    status: String,
}

/// Controller API client.
///
/// Reads and writes go to the same URL; every request carries the bearer token.
#[derive(Debug, Clone)]
pub struct HttpController {
    client: Client,
    url: String,
    token: String,
}

impl HttpController {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Http`] if the underlying client cannot be built.
    pub fn new(config: &ControllerConfig) -> Result<Self, ControllerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
            token: config.token.clone(),
        })
    }

    async fn read(&self) -> Result<StateSnapshot, ControllerError> {
        let response = self
            .client
            .get(&self.url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ControllerError::Status(response.status()));
        }

        let body: ReadResponse = response.json().await?;
        if body.status != STATUS_OK {
            return Err(ControllerError::Rejected(body.status));
        }

        let fetched_at = now();
        tracing::debug!(devices = body.data.len(), %fetched_at, "controller state fetched");
        Ok(StateSnapshot::from_pairs(
            body.data.into_iter().map(|entry| (entry.name, entry.value)),
            fetched_at,
        ))
    }

    async fn write(&self, batch: Vec<DeviceWrite>) -> Result<(), ControllerError> {
        let response = self
            .client
            .post(&self.url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .json(&WriteRequest {
                controllers: &batch,
            })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ControllerError::Status(response.status()));
        }

        let body: WriteResponse = response.json().await?;
        if body.status != STATUS_OK {
            return Err(ControllerError::Rejected(body.status));
        }

        tracing::debug!(writes = batch.len(), "controller batch accepted");
        Ok(())
    }
}

impl Controller for HttpController {
    fn fetch(&self) -> impl Future<Output = Result<StateSnapshot, SmartHouseError>> + Send {
        async move {
            self.read().await.map_err(|err| {
                tracing::warn!(%err, url = %self.url, "controller read failed");
                SmartHouseError::from(err)
            })
        }
    }

    fn send(
        &self,
        batch: Vec<DeviceWrite>,
    ) -> impl Future<Output = Result<(), SmartHouseError>> + Send {
        async move {
            self.write(batch).await.map_err(|err| {
                tracing::warn!(%err, url = %self.url, "controller write failed");
                SmartHouseError::from(err)
            })
        }
    }
}
