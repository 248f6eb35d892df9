//! `analyze`: one analysis call, printed as the result card rows.

use crate::args::{require_valid, TargetArgs};
use clima_api::driver::{self, Submission};
use clima_api::ClimateService;
use clima_core::analysis::AnalysisCoordinator;
use clima_core::factor::AnalysisFactor;
use clima_core::render::{basis_note, render_rows, CLIMATOLOGY_NOTE};
use clima_core::response::AnalysisResults;
use log::info;

/// The rendered rows for each of `factors`, one block per factor.
pub fn format_results(results: &AnalysisResults, factors: &[AnalysisFactor]) -> String {
    let mut out = String::new();
    for factor in factors {
        out.push_str(&format!("== {} ==\n", factor.label()));
        let rows = render_rows(results, *factor);
        if rows.is_empty() {
            out.push_str("  (sin datos)\n");
        }
        for row in rows {
            out.push_str(&format!("  {}: {}\n", row.label, row.value));
        }
    }
    out.push_str(&basis_note());
    out.push('\n');
    out.push_str(CLIMATOLOGY_NOTE);
    out.push('\n');
    out
}

pub async fn run_analyze<S: ClimateService + ?Sized>(
    service: &S,
    target: &TargetArgs,
    factor: Option<&str>,
) -> anyhow::Result<()> {
    let form = target.to_form(factor.unwrap_or(AnalysisFactor::default().as_str()));
    let validated = require_valid(form.validate())?;

    let mut coordinator = AnalysisCoordinator::new();
    driver::run_analysis(service, &mut coordinator, &form, Submission::Explicit).await;

    if let Some(toast) = coordinator.toast() {
        anyhow::bail!("{}", toast.message);
    }
    let Some(response) = coordinator.result() else {
        anyhow::bail!("analysis returned no result");
    };

    let factors: Vec<AnalysisFactor> = match factor {
        Some(_) => vec![validated.factor],
        None => AnalysisFactor::UI_ORDER.to_vec(),
    };
    info!(
        "analysis for ({}, {}) on {}",
        validated.target.coordinate.latitude,
        validated.target.coordinate.longitude,
        validated.target.date.mmdd()
    );
    print!("{}", format_results(&response.results, &factors));
    Ok(())
}
