//! Glue between the coordinators in `clima-core` and a [`ClimateService`].
//!
//! The `fetch_*` functions perform one call and turn any failure into the
//! message the user sees. The `run_*` functions drive a coordinator through
//! a whole request when the caller can hold it mutably across the await
//! (the CLI does; the UI keeps its coordinators in signals and uses the
//! `fetch_*` functions directly).

use crate::service::ClimateService;
use clima_core::analysis::{AnalysisCoordinator, Toast, CONNECTION_FALLBACK};
use clima_core::plot::{PlotCache, PlotCoordinator, CSV_ERROR_FALLBACK, PLOT_ERROR_FALLBACK};
use clima_core::request::{AnalyzeRequest, SeriesRequest};
use clima_core::response::AnalyzeResponse;
use clima_core::validation::{FactorsForm, SeriesInputs};
use log::{debug, error};
use std::future::Future;

pub async fn fetch_analysis<S: ClimateService + ?Sized>(
    service: &S,
    request: &AnalyzeRequest,
) -> Result<AnalyzeResponse, String> {
    service.analyze(request).await.map_err(|e| {
        error!("analysis request failed: {}", e);
        e.user_message(CONNECTION_FALLBACK)
    })
}

pub async fn fetch_plot<S: ClimateService + ?Sized>(
    service: &S,
    request: &SeriesRequest,
) -> Result<Vec<u8>, String> {
    service.series_plot(request).await.map_err(|e| {
        error!("series chart request failed: {}", e);
        e.user_message(PLOT_ERROR_FALLBACK)
    })
}

pub async fn fetch_csv<S: ClimateService + ?Sized>(
    service: &S,
    request: &SeriesRequest,
) -> Result<Vec<u8>, String> {
    service.series_csv(request).await.map_err(|e| {
        error!("series CSV request failed: {}", e);
        e.user_message(CSV_ERROR_FALLBACK)
    })
}

/// How an analysis run is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The user pressed the submit control.
    Explicit,
    /// The view was entered with a prefilled selection.
    Auto,
}

/// Submit `form` and wait for the outcome. Returns `false` when the
/// coordinator declined to send anything.
pub async fn run_analysis<S: ClimateService + ?Sized>(
    service: &S,
    coordinator: &mut AnalysisCoordinator,
    form: &FactorsForm,
    submission: Submission,
) -> bool {
    let request = match submission {
        Submission::Explicit => coordinator.submit(form),
        Submission::Auto => coordinator.auto_submit(form),
    };
    let Some(request) = request else {
        return false;
    };
    let outcome = fetch_analysis(service, &request).await;
    coordinator.complete(outcome);
    true
}

/// Wait out `toast`'s dismissal delay on the host's timer and hand back the
/// id to dismiss. A newer toast raised meanwhile keeps its own timer, so
/// dismissing a stale id is a no-op on the coordinator.
pub async fn expire_toast<F, Fut>(toast: Toast, sleep: F) -> u64
where
    F: FnOnce(u32) -> Fut,
    Fut: Future<Output = ()>,
{
    sleep(toast.dismiss_after_ms()).await;
    debug!("toast {} expired", toast.id);
    toast.id
}

/// How a chart fetch is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotTrigger {
    /// Mount or parameter change; only fetches on a cache miss.
    Auto,
    /// The "update chart" control.
    Manual,
}

/// Fetch the card's chart if the trigger calls for it. `to_handle` turns the
/// image bytes into whatever the cache stores. Returns `false` when no
/// request was sent.
pub async fn run_plot<S, H, F>(
    service: &S,
    card: &mut PlotCoordinator<H>,
    cache: &mut PlotCache<H>,
    inputs: Option<&SeriesInputs>,
    trigger: PlotTrigger,
    to_handle: F,
) -> bool
where
    S: ClimateService + ?Sized,
    H: Clone,
    F: FnOnce(Vec<u8>) -> H,
{
    let request = match trigger {
        PlotTrigger::Auto => card.auto_load(inputs),
        PlotTrigger::Manual => card.update_plot(inputs),
    };
    let Some(request) = request else {
        return false;
    };
    let outcome = fetch_plot(service, &request).await.map(to_handle);
    card.complete_plot(outcome, cache);
    true
}

/// Fetch the card's CSV. On success returns the download filename and the
/// bytes; failures are recorded on the card.
pub async fn run_csv<S, H>(
    service: &S,
    card: &mut PlotCoordinator<H>,
    inputs: Option<&SeriesInputs>,
) -> Option<(String, Vec<u8>)>
where
    S: ClimateService + ?Sized,
    H: Clone,
{
    let request = card.download_csv(inputs)?;
    match fetch_csv(service, &request).await {
        Ok(bytes) => {
            card.complete_csv(Ok(()));
            Some((request.csv_filename(), bytes))
        }
        Err(message) => {
            card.complete_csv(Err(message));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, Result};
    use async_trait::async_trait;
    use clima_core::analysis::AnalysisStatus;
    use clima_core::factor::{AnalysisFactor, PlotFactor};
    use clima_core::validation::SeriesForm;
    use reqwest::StatusCode;
    use std::cell::Cell;
    use std::time::Duration;
    use tokio::time::{sleep, timeout, Instant, Sleep};

    #[derive(Default)]
    struct FakeService {
        analyze_calls: Cell<usize>,
        plot_calls: Cell<usize>,
        csv_calls: Cell<usize>,
        fail_with: Option<StatusCode>,
    }

    impl FakeService {
        fn failing(status: StatusCode) -> Self {
            Self {
                fail_with: Some(status),
                ..Default::default()
            }
        }

        fn check(&self) -> Result<()> {
            match self.fail_with {
                Some(status) => Err(ApiError::status(status, "")),
                None => Ok(()),
            }
        }
    }

    #[async_trait(?Send)]
    impl ClimateService for FakeService {
        async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse> {
            self.analyze_calls.set(self.analyze_calls.get() + 1);
            self.check()?;
            assert_eq!(request.factors.len(), 5);
            Ok(serde_json::from_str(
                r#"{"ok":true,"results":{"precipitation":{"prob_wet_day":0.42,"intensity_percentiles":{"p50":3.2}}}}"#,
            )?)
        }

        async fn series_plot(&self, request: &SeriesRequest) -> Result<Vec<u8>> {
            self.plot_calls.set(self.plot_calls.get() + 1);
            self.check()?;
            Ok(request.factor.0.wire_name().as_bytes().to_vec())
        }

        async fn series_csv(&self, _request: &SeriesRequest) -> Result<Vec<u8>> {
            self.csv_calls.set(self.csv_calls.get() + 1);
            self.check()?;
            Ok(b"year,value\n2000,1.0\n".to_vec())
        }
    }

    fn form() -> FactorsForm {
        FactorsForm {
            latitude: "19.43".into(),
            longitude: "-99.13".into(),
            month: "6".into(),
            day: "15".into(),
            factor: "wind".into(),
        }
    }

    fn inputs() -> SeriesInputs {
        SeriesForm::default().validate(&form()).into_value().unwrap()
    }

    fn sleep_ms(ms: u32) -> Sleep {
        sleep(Duration::from_millis(ms.into()))
    }

    fn as_text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[tokio::test]
    async fn test_analysis_success() {
        let service = FakeService::default();
        let mut c = AnalysisCoordinator::new();
        assert!(run_analysis(&service, &mut c, &form(), Submission::Explicit).await);
        assert_eq!(c.status(), AnalysisStatus::Idle);
        assert_eq!(c.rows(AnalysisFactor::Precipitation)[0].value, "42 %");
    }

    #[tokio::test]
    async fn test_analysis_server_error_raises_toast() {
        let service = FakeService::failing(StatusCode::INTERNAL_SERVER_ERROR);
        let mut c = AnalysisCoordinator::new();
        run_analysis(&service, &mut c, &form(), Submission::Explicit).await;
        assert_eq!(c.status(), AnalysisStatus::Idle);
        assert_eq!(
            c.toast().unwrap().message,
            "Error 500: Internal Server Error"
        );
        assert!(run_analysis(&service, &mut c, &form(), Submission::Explicit).await);
        assert_eq!(service.analyze_calls.get(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_toast_expires_after_four_seconds() {
        let service = FakeService::failing(StatusCode::INTERNAL_SERVER_ERROR);
        let mut coordinator = AnalysisCoordinator::new();
        run_analysis(&service, &mut coordinator, &form(), Submission::Explicit).await;
        let toast = coordinator.toast().cloned().unwrap();

        let early = timeout(
            Duration::from_millis(3_999),
            expire_toast(toast.clone(), sleep_ms),
        )
        .await;
        assert!(early.is_err());

        let started = Instant::now();
        let id = expire_toast(toast, sleep_ms).await;
        assert!(started.elapsed() >= Duration::from_millis(4_000));
        assert!(coordinator.dismiss_toast(id));
        assert!(coordinator.toast().is_none());
        assert_eq!(coordinator.status(), AnalysisStatus::Idle);

        assert!(run_analysis(&service, &mut coordinator, &form(), Submission::Explicit).await);
        assert_eq!(service.analyze_calls.get(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_timer_leaves_newer_toast() {
        let service = FakeService::failing(StatusCode::BAD_GATEWAY);
        let mut coordinator = AnalysisCoordinator::new();
        run_analysis(&service, &mut coordinator, &form(), Submission::Explicit).await;
        let first = coordinator.toast().cloned().unwrap();
        run_analysis(&service, &mut coordinator, &form(), Submission::Explicit).await;
        let second = coordinator.toast().cloned().unwrap();
        assert_ne!(first.id, second.id);

        let stale = expire_toast(first, sleep_ms).await;
        assert!(!coordinator.dismiss_toast(stale));
        assert_eq!(coordinator.toast(), Some(&second));

        let id = expire_toast(second, sleep_ms).await;
        assert!(coordinator.dismiss_toast(id));
        assert!(coordinator.toast().is_none());
    }

    #[tokio::test]
    async fn test_auto_run_sends_once() {
        let service = FakeService::default();
        let mut c = AnalysisCoordinator::new();
        assert!(run_analysis(&service, &mut c, &form(), Submission::Auto).await);
        assert!(!run_analysis(&service, &mut c, &form(), Submission::Auto).await);
        assert_eq!(service.analyze_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_wind_chart_cached_across_factor_switches() {
        let service = FakeService::default();
        let mut cache: PlotCache<String> = PlotCache::new();

        let mut wind = PlotCoordinator::mount(PlotFactor::Wind, &cache);
        run_plot(
            &service,
            &mut wind,
            &mut cache,
            Some(&inputs()),
            PlotTrigger::Auto,
            as_text,
        )
        .await;
        assert_eq!(wind.displayed().map(String::as_str), Some("windspeed"));

        let mut temperature = PlotCoordinator::mount(PlotFactor::Temperature, &cache);
        run_plot(
            &service,
            &mut temperature,
            &mut cache,
            Some(&inputs()),
            PlotTrigger::Auto,
            as_text,
        )
        .await;

        let mut wind = PlotCoordinator::mount(PlotFactor::Wind, &cache);
        let fetched =
            run_plot(&service, &mut wind, &mut cache, Some(&inputs()), PlotTrigger::Auto, as_text)
                .await;
        assert!(!fetched);
        assert_eq!(wind.displayed().map(String::as_str), Some("windspeed"));
        assert_eq!(service.plot_calls.get(), 2);
    }

    #[tokio::test]
    async fn test_manual_update_refetches_over_cache() {
        let service = FakeService::default();
        let mut cache: PlotCache<String> = PlotCache::new();
        cache.store(PlotFactor::Humidity, "old".into());
        let mut card = PlotCoordinator::mount(PlotFactor::Humidity, &cache);
        assert!(
            run_plot(&service, &mut card, &mut cache, Some(&inputs()), PlotTrigger::Manual, as_text)
                .await
        );
        assert_eq!(cache.get(PlotFactor::Humidity).map(String::as_str), Some("humidity"));
    }

    #[tokio::test]
    async fn test_chart_failure_message() {
        let service = FakeService::failing(StatusCode::BAD_GATEWAY);
        let mut cache: PlotCache<String> = PlotCache::new();
        let mut card = PlotCoordinator::mount(PlotFactor::Precipitation, &cache);
        run_plot(
            &service,
            &mut card,
            &mut cache,
            Some(&inputs()),
            PlotTrigger::Auto,
            as_text,
        )
        .await;
        assert_eq!(card.error(), Some("Error 502: Bad Gateway"));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_csv_download() {
        let service = FakeService::default();
        let cache: PlotCache<String> = PlotCache::new();
        let mut card = PlotCoordinator::mount(PlotFactor::Wind, &cache);
        let (filename, bytes) = run_csv(&service, &mut card, Some(&inputs())).await.unwrap();
        assert_eq!(filename, "series_windspeed_0615_2000-2024_win0.csv");
        assert!(bytes.starts_with(b"year,value"));
        assert!(!card.is_loading_csv());
        assert_eq!(service.plot_calls.get(), 0);
    }

    #[tokio::test]
    async fn test_invalid_inputs_send_nothing() {
        let service = FakeService::default();
        let mut cache: PlotCache<String> = PlotCache::new();
        let mut card = PlotCoordinator::mount(PlotFactor::Wind, &cache);
        let sent = run_plot(
            &service,
            &mut card,
            &mut cache,
            None,
            PlotTrigger::Manual,
            as_text,
        )
        .await;
        assert!(!sent);
        assert!(run_csv(&service, &mut card, None).await.is_none());
        assert_eq!(service.plot_calls.get() + service.csv_calls.get(), 0);
    }
}
