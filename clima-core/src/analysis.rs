//! State machine behind the "Calcular" button.
//!
//! The coordinator does no I/O itself. [`AnalysisCoordinator::submit`] hands
//! back the request to send; whoever sends it reports the outcome through
//! [`AnalysisCoordinator::complete`]. Errors arrive already converted to a
//! user-facing message.

use crate::config::TOAST_DISMISS_MS;
use crate::factor::AnalysisFactor;
use crate::render::{render_rows, ResultRow};
use crate::request::AnalyzeRequest;
use crate::response::AnalyzeResponse;
use crate::validation::FactorsForm;

/// Shown when the service answers `ok: false` without a message.
pub const REJECTED_FALLBACK: &str = "Solicitud rechazada";
/// Shown when the service could not be reached or its answer not read.
pub const CONNECTION_FALLBACK: &str = "Error al conectar con el servicio";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Loading,
}

/// A transient error message. `id` lets a dismissal timer clear only the
/// toast it was started for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
}

impl Toast {
    pub fn dismiss_after_ms(&self) -> u32 {
        TOAST_DISMISS_MS
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisCoordinator {
    status: AnalysisStatus,
    result: Option<AnalyzeResponse>,
    toast: Option<Toast>,
    next_toast_id: u64,
    /// Set the first time the on-entry submission fires; never reset.
    auto_run_fired: bool,
}

impl AnalysisCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == AnalysisStatus::Loading
    }

    pub fn result(&self) -> Option<&AnalyzeResponse> {
        self.result.as_ref()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn auto_run_fired(&self) -> bool {
        self.auto_run_fired
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self, form: &FactorsForm) -> bool {
        !self.is_loading() && form.validate().ok()
    }

    /// Explicit submission. Any shown result is cleared first; the request
    /// is returned only when the form is valid and nothing is in flight.
    pub fn submit(&mut self, form: &FactorsForm) -> Option<AnalyzeRequest> {
        if self.is_loading() {
            log::debug!("analysis already in flight, ignoring submit");
            return None;
        }
        self.result = None;
        let validated = form.validate().into_value()?;
        self.status = AnalysisStatus::Loading;
        log::info!(
            "requesting analysis for ({}, {}) on {:02}/{:02}",
            validated.target.coordinate.latitude,
            validated.target.coordinate.longitude,
            validated.target.date.day,
            validated.target.date.month
        );
        Some(AnalyzeRequest::all_factors(&validated.target))
    }

    /// Submission on entering the view with prefilled selections. Fires at
    /// most once per coordinator, however the inputs change later.
    pub fn auto_submit(&mut self, form: &FactorsForm) -> Option<AnalyzeRequest> {
        if self.auto_run_fired {
            return None;
        }
        if !form.is_complete() || !form.validate().ok() {
            return None;
        }
        self.auto_run_fired = true;
        log::debug!("auto-running analysis for prefilled selection");
        self.submit(form)
    }

    /// Record the outcome of the request returned by [`Self::submit`].
    ///
    /// On failure a toast is raised and its id returned so the caller can
    /// schedule [`Self::dismiss_toast`] after [`TOAST_DISMISS_MS`].
    pub fn complete(&mut self, outcome: Result<AnalyzeResponse, String>) -> Option<u64> {
        self.status = AnalysisStatus::Idle;
        match outcome {
            Ok(response) if response.ok => {
                log::debug!("analysis succeeded");
                self.result = Some(response);
                None
            }
            Ok(response) => {
                let message = response
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| REJECTED_FALLBACK.to_string());
                Some(self.raise_toast(message))
            }
            Err(message) => Some(self.raise_toast(message)),
        }
    }

    fn raise_toast(&mut self, message: String) -> u64 {
        log::warn!("analysis failed: {}", message);
        self.next_toast_id += 1;
        let id = self.next_toast_id;
        self.toast = Some(Toast { id, message });
        id
    }

    /// Clear the toast if it is still the one `id` refers to.
    pub fn dismiss_toast(&mut self, id: u64) -> bool {
        if self.toast.as_ref().map(|t| t.id) == Some(id) {
            self.toast = None;
            true
        } else {
            false
        }
    }

    /// Rows of the retained result for the displayed factor.
    pub fn rows(&self, factor: AnalysisFactor) -> Vec<ResultRow> {
        self.result
            .as_ref()
            .map(|r| render_rows(&r.results, factor))
            .unwrap_or_default()
    }
}
