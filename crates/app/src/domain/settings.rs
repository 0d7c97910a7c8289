//! Global settings service.

use async_trait::async_trait;
use benabazar::rates::ExchangeRate;
use mockall::automock;
use serde::Deserialize;

use crate::backend::{BackendClient, BackendError, decode_json};

/// Read access to the single shared settings row.
#[automock]
#[async_trait]
pub trait SettingsService: Send + Sync {
    /// Fetches the current exchange rate.
    ///
    /// Non-positive stored values fail deserialization and surface as an
    /// error, so a bad push can never reach total computations.
    async fn fetch_exchange_rate(&self) -> Result<ExchangeRate, BackendError>;
}

#[derive(Debug, Deserialize)]
struct SettingsRecord {
    exchange_rate: ExchangeRate,
}

/// Settings reads against the hosted backend.
#[derive(Debug, Clone)]
pub struct RestSettingsService {
    client: BackendClient,
}

impl RestSettingsService {
    #[must_use]
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SettingsService for RestSettingsService {
    async fn fetch_exchange_rate(&self) -> Result<ExchangeRate, BackendError> {
        let response = self
            .client
            .rest(
                reqwest::Method::GET,
                "global_settings?select=exchange_rate&id=eq.1",
            )
            .send()
            .await?;

        let rows: Vec<SettingsRecord> = decode_json(response).await?;

        rows.into_iter()
            .next()
            .map(|row| row.exchange_rate)
            .ok_or(BackendError::MissingRow)
    }
}
