use crate::error::{ApiError, Result};
use clima_core::config::ApiConfig;
use clima_core::request::{AnalyzeRequest, SeriesRequest};
use clima_core::response::AnalyzeResponse;
use log::{debug, warn};
use reqwest::{Client, Response};
use serde::Serialize;

/// HTTP client for the analysis service.
///
/// Reuse one instance for every call; the inner `reqwest::Client` pools
/// connections. No timeout is set: a call lasts as long as the service takes.
#[derive(Debug, Clone)]
pub struct ClimateClient {
    http: Client,
    config: ApiConfig,
}

impl ClimateClient {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: ApiConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// POST `body` as JSON and return the response if its status is 2xx.
    async fn post_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Response> {
        debug!("POST {}", url);
        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("{} answered {}", url, status);
            return Err(ApiError::status(status, &text));
        }
        Ok(response)
    }

    /// Full analysis for every factor. An `ok: false` answer is returned as
    /// [`ApiError::Rejected`].
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse> {
        let response = self.post_json(&self.config.analyze_url(), request).await?;
        let bytes = response.bytes().await?;
        let parsed: AnalyzeResponse = serde_json::from_slice(&bytes)?;
        if !parsed.ok {
            return Err(ApiError::rejected(parsed.message));
        }
        Ok(parsed)
    }

    /// PNG bytes of the yearly series chart.
    pub async fn series_plot(&self, request: &SeriesRequest) -> Result<Vec<u8>> {
        let response = self
            .post_json(&self.config.series_plot_url(), request)
            .await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// CSV bytes of the yearly series.
    pub async fn series_csv(&self, request: &SeriesRequest) -> Result<Vec<u8>> {
        let response = self
            .post_json(&self.config.series_csv_url(), request)
            .await?;
        Ok(response.bytes().await?.to_vec())
    }
}
