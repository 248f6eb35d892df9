use crate::client::ClimateClient;
use crate::error::Result;
use async_trait::async_trait;
use clima_core::request::{AnalyzeRequest, SeriesRequest};
use clima_core::response::AnalyzeResponse;

/// The three calls the front-end makes.
///
/// Futures are not required to be `Send`: in the browser they run on the
/// single-threaded executor.
#[async_trait(?Send)]
pub trait ClimateService {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse>;

    async fn series_plot(&self, request: &SeriesRequest) -> Result<Vec<u8>>;

    async fn series_csv(&self, request: &SeriesRequest) -> Result<Vec<u8>>;
}

#[async_trait(?Send)]
impl ClimateService for ClimateClient {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse> {
        ClimateClient::analyze(self, request).await
    }

    async fn series_plot(&self, request: &SeriesRequest) -> Result<Vec<u8>> {
        ClimateClient::series_plot(self, request).await
    }

    async fn series_csv(&self, request: &SeriesRequest) -> Result<Vec<u8>> {
        ClimateClient::series_csv(self, request).await
    }
}
