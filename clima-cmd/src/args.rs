//! Shared command-line arguments and their validation.

use anyhow::bail;
use clap::Args;
use clima_core::validation::{FactorsForm, SeriesForm, ValidationResult};

/// Point and day of the year. Values are passed to the validator as typed.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Latitude in degrees, -90 to 90
    #[arg(long, allow_hyphen_values = true)]
    pub lat: String,

    /// Longitude in degrees; any value, normalized to [-180, 180)
    #[arg(long, allow_hyphen_values = true)]
    pub lon: String,

    /// Month, 1-12
    #[arg(short, long)]
    pub month: String,

    /// Day of the month
    #[arg(short, long)]
    pub day: String,
}

impl TargetArgs {
    pub fn to_form(&self, factor: &str) -> FactorsForm {
        FactorsForm {
            latitude: self.lat.clone(),
            longitude: self.lon.clone(),
            month: self.month.clone(),
            day: self.day.clone(),
            factor: factor.to_string(),
        }
    }
}

/// Options of the yearly series.
#[derive(Args, Debug, Clone)]
pub struct SeriesArgs {
    /// Factor to chart (precipitation, temperature, humidity, wind)
    #[arg(short, long)]
    pub factor: String,

    /// Half-window in days around the date, 0-30
    #[arg(short = 'w', long, default_value = "0", allow_hyphen_values = true)]
    pub half_window: String,

    /// Aggregation across the window (median, mean, max)
    #[arg(short, long, default_value = "median")]
    pub agg: String,

    /// Leave out the linear trend
    #[arg(long)]
    pub no_trend: bool,
}

impl SeriesArgs {
    pub fn to_form(&self) -> SeriesForm {
        SeriesForm {
            half_window: self.half_window.clone(),
            aggregation: self.agg.clone(),
            trend: !self.no_trend,
        }
    }
}

/// Unwrap a validation result, listing every field error otherwise.
pub fn require_valid<T>(result: ValidationResult<T>) -> anyhow::Result<T> {
    if !result.ok() {
        let details = result
            .errors()
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join("; ");
        bail!("invalid parameters ({})", details);
    }
    match result.into_value() {
        Some(value) => Ok(value),
        None => bail!("invalid parameters"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(lat: &str, month: &str, day: &str) -> TargetArgs {
        TargetArgs {
            lat: lat.into(),
            lon: "-99.13".into(),
            month: month.into(),
            day: day.into(),
        }
    }

    #[test]
    fn test_valid_target() {
        let form = target("19.43", "6", "15").to_form("precipitation");
        let validated = require_valid(form.validate()).unwrap();
        assert_eq!(validated.target.date.day, 15);
    }

    #[test]
    fn test_errors_are_listed_per_field() {
        let form = target("91", "2", "30").to_form("precipitation");
        let err = require_valid(form.validate()).unwrap_err().to_string();
        assert_eq!(
            err,
            "invalid parameters (latitude: Latitud fuera de rango; day: Día no válido para el mes seleccionado)"
        );
    }

    #[test]
    fn test_series_options() {
        let series = SeriesArgs {
            factor: "wind".into(),
            half_window: "31".into(),
            agg: "median".into(),
            no_trend: true,
        };
        let form = target("19.43", "6", "15").to_form("wind");
        let err = require_valid(series.to_form().validate(&form))
            .unwrap_err()
            .to_string();
        assert!(err.contains("half_window: Ventana 0–30"));
        assert!(!series.to_form().trend);
    }
}
