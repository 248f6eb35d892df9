//! Endpoint configuration and the fixed parameters of every analysis.

/// First year of the climatology period.
pub const START_YEAR: i32 = 2000;
/// Last year (inclusive) of the climatology period.
pub const END_YEAR: i32 = 2024;
/// The full analysis always looks at the exact day only.
pub const ANALYSIS_HALF_WINDOW_DAYS: u32 = 0;
/// Upper bound of the series half-window (± days).
pub const MAX_HALF_WINDOW_DAYS: u32 = 30;
/// How long an analysis error toast stays on screen.
pub const TOAST_DISMISS_MS: u32 = 4000;

pub const ANALYZE_PATH: &str = "/v1/analyze";
pub const SERIES_PLOT_PATH: &str = "/v1/series/plot";
pub const SERIES_CSV_PATH: &str = "/v1/series/csv";

/// Root of the remote analysis service.
///
/// An empty base means "same origin": paths are used as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Build from the configured endpoint root, trimming whitespace and any
    /// trailing slashes.
    pub fn from_base(base: Option<&str>) -> Self {
        let base_url = base
            .map(|b| b.trim().trim_end_matches('/').to_string())
            .unwrap_or_default();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute (or origin-relative) URL for one of the service paths.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn analyze_url(&self) -> String {
        self.endpoint(ANALYZE_PATH)
    }

    pub fn series_plot_url(&self) -> String {
        self.endpoint(SERIES_PLOT_PATH)
    }

    pub fn series_csv_url(&self) -> String {
        self.endpoint(SERIES_CSV_PATH)
    }
}
