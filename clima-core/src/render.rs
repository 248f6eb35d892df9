//! Projection of an analysis response into the rows of the result card.

use crate::config::{END_YEAR, START_YEAR};
use crate::factor::AnalysisFactor;
use crate::response::{AnalysisResults, FactorStats, Percentiles, Scalar};

/// The card has room for this many rows; anything after is dropped.
pub const MAX_ROWS: usize = 4;

pub const CLIMATOLOGY_NOTE: &str = "Probabilidad climatológica. No es pronóstico.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub label: &'static str,
    pub value: String,
}

impl ResultRow {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

/// Footer line describing the period the numbers come from.
pub fn basis_note() -> String {
    format!("Basado en climatología {}–{}.", START_YEAR, END_YEAR)
}

fn range(percentiles: Option<&Percentiles>) -> Option<(&Scalar, &Scalar)> {
    let p = percentiles?;
    Some((p.p10.as_ref()?, p.p90.as_ref()?))
}

fn precipitation_rows(stats: &FactorStats, rows: &mut Vec<ResultRow>) {
    if let Some(wet) = stats.prob_wet_day {
        rows.push(ResultRow::new(
            "Probabilidad de lluvia",
            format!("{:.0} %", (wet * 100.0).round()),
        ));
    }
    if let Some(p50) = stats
        .intensity_percentiles
        .as_ref()
        .and_then(|p| p.p50.as_ref())
    {
        rows.push(ResultRow::new("Intensidad típica", format!("{} mm/día", p50)));
    }
}

fn temperature_rows(stats: &FactorStats, rows: &mut Vec<ResultRow>) {
    if let Some(typical) = &stats.typical {
        rows.push(ResultRow::new(
            "Temperatura típica",
            format!("{} °C", typical),
        ));
    }
    if let Some((p10, p90)) = range(stats.percentiles.as_ref()) {
        rows.push(ResultRow::new("Rango típico", format!("{} – {} °C", p10, p90)));
    }
    if let Some(label) = stats.label.as_deref().filter(|l| !l.is_empty()) {
        rows.push(ResultRow::new("Condición", label.to_string()));
    }
}

fn humidity_rows(stats: &FactorStats, rows: &mut Vec<ResultRow>) {
    if let Some(typical) = &stats.typical {
        rows.push(ResultRow::new("Humedad típica", format!("{} %", typical)));
    }
    if let Some((p10, p90)) = range(stats.percentiles.as_ref()) {
        rows.push(ResultRow::new("Rango típico", format!("{} – {} %", p10, p90)));
    }
}

fn wind_rows(stats: &FactorStats, rows: &mut Vec<ResultRow>) {
    if let Some(typical) = &stats.typical {
        rows.push(ResultRow::new(
            "Viento típico 10 m",
            format!("{} m/s", typical),
        ));
    }
}

fn comfort_rows(stats: &FactorStats, rows: &mut Vec<ResultRow>) {
    if let Some(label) = stats.label.as_deref().filter(|l| !l.is_empty()) {
        rows.push(ResultRow::new("Confort", label.to_string()));
    }
    if let Some(typical) = &stats.typical {
        rows.push(ResultRow::new("Valor típico", typical.to_string()));
    }
}

/// Rows for `factor`, at most [`MAX_ROWS`]. Missing statistics are left out
/// rather than shown as zero.
pub fn render_rows(results: &AnalysisResults, factor: AnalysisFactor) -> Vec<ResultRow> {
    let mut rows = Vec::new();
    let Some(stats) = results.get(factor) else {
        return rows;
    };
    match factor {
        AnalysisFactor::Precipitation => precipitation_rows(stats, &mut rows),
        AnalysisFactor::Temperature => temperature_rows(stats, &mut rows),
        AnalysisFactor::Humidity => humidity_rows(stats, &mut rows),
        AnalysisFactor::Wind => wind_rows(stats, &mut rows),
        AnalysisFactor::Comfort => comfort_rows(stats, &mut rows),
    }
    rows.truncate(MAX_ROWS);
    rows
}
