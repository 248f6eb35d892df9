//! Validation of the raw form fields.
//!
//! Forms keep the strings exactly as typed; validation recomputes everything
//! from those strings on every call. A result is either fully valid (a value
//! and no errors) or invalid (errors and no value), never in between.

use crate::calendar::{days_in_month, CalendarDate};
use crate::config::MAX_HALF_WINDOW_DAYS;
use crate::factor::AnalysisFactor;
use crate::geo::{is_normalized_longitude, is_valid_latitude, normalize_longitude, Coordinate};
use crate::prefill::Prefill;
use crate::request::{AnalysisTarget, Aggregation, SeriesSettings};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Latitude,
    Longitude,
    Month,
    Day,
    Factor,
    HalfWindow,
    Aggregation,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
            Field::Month => "month",
            Field::Day => "day",
            Field::Factor => "factor",
            Field::HalfWindow => "half_window",
            Field::Aggregation => "aggregation",
        };
        f.write_str(name)
    }
}

pub type FieldErrors = BTreeMap<Field, String>;

pub const MSG_LATITUDE_INVALID: &str = "Latitud inválida";
pub const MSG_LATITUDE_RANGE: &str = "Latitud fuera de rango";
pub const MSG_LONGITUDE_INVALID: &str = "Longitud inválida";
pub const MSG_MONTH_INVALID: &str = "Mes inválido";
pub const MSG_DAY_INVALID: &str = "Día inválido";
pub const MSG_DAY_NOT_IN_MONTH: &str = "Día no válido para el mes seleccionado";
pub const MSG_FACTOR_INVALID: &str = "Factor inválido";
pub const MSG_HALF_WINDOW_RANGE: &str = "Ventana 0–30";
pub const MSG_AGGREGATION_INVALID: &str = "Agregación inválida";

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult<T> {
    errors: FieldErrors,
    value: Option<T>,
}

impl<T> ValidationResult<T> {
    /// Keep `value` only when there are no errors.
    fn from_parts(errors: FieldErrors, value: Option<T>) -> Self {
        match value {
            Some(value) if errors.is_empty() => Self {
                errors,
                value: Some(value),
            },
            _ => Self {
                errors,
                value: None,
            },
        }
    }

    pub fn ok(&self) -> bool {
        self.value.is_some()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

/// A raw numeric field: empty, unparseable, or a number (possibly non-finite).
#[derive(Debug, Clone, Copy, PartialEq)]
enum RawNumber {
    Missing,
    Invalid,
    Value(f64),
}

fn parse_number(raw: &str) -> RawNumber {
    let raw = raw.trim();
    if raw.is_empty() {
        return RawNumber::Missing;
    }
    match raw.parse::<f64>() {
        Ok(v) => RawNumber::Value(v),
        Err(_) => RawNumber::Invalid,
    }
}

/// Integer fields accept `"6"` and `"6.0"` but not `"6.5"`.
fn parse_integer(raw: &str) -> Option<i64> {
    match parse_number(raw) {
        RawNumber::Value(v) if v.is_finite() && v.fract() == 0.0 => Some(v as i64),
        _ => None,
    }
}

fn check_latitude(raw: &str, errors: &mut FieldErrors) -> Option<f64> {
    match parse_number(raw) {
        RawNumber::Value(lat) if is_valid_latitude(lat) => Some(lat),
        RawNumber::Value(lat) if lat.is_finite() => {
            errors.insert(Field::Latitude, MSG_LATITUDE_RANGE.to_string());
            None
        }
        _ => {
            errors.insert(Field::Latitude, MSG_LATITUDE_INVALID.to_string());
            None
        }
    }
}

fn check_longitude(raw: &str, errors: &mut FieldErrors) -> Option<f64> {
    let normalized = match parse_number(raw) {
        RawNumber::Value(lon) if lon.is_finite() => normalize_longitude(lon),
        _ => f64::NAN,
    };
    if is_normalized_longitude(normalized) {
        Some(normalized)
    } else {
        errors.insert(Field::Longitude, MSG_LONGITUDE_INVALID.to_string());
        None
    }
}

fn check_month(raw: &str, errors: &mut FieldErrors) -> Option<u32> {
    match parse_integer(raw) {
        Some(m) if (1..=12).contains(&m) => Some(m as u32),
        _ => {
            errors.insert(Field::Month, MSG_MONTH_INVALID.to_string());
            None
        }
    }
}

/// The day only validates against a valid month; with no month it fails too.
fn check_day(raw: &str, month: Option<u32>, errors: &mut FieldErrors) -> Option<u32> {
    let day = match parse_integer(raw) {
        Some(d) if (1..=31).contains(&d) => d as u32,
        _ => {
            errors.insert(Field::Day, MSG_DAY_INVALID.to_string());
            return None;
        }
    };
    match month.map(days_in_month) {
        Some(Ok(max_day)) if day <= max_day => Some(day),
        _ => {
            errors.insert(Field::Day, MSG_DAY_NOT_IN_MONTH.to_string());
            None
        }
    }
}

fn check_target(
    latitude: &str,
    longitude: &str,
    month: &str,
    day: &str,
    errors: &mut FieldErrors,
) -> Option<AnalysisTarget> {
    let lat = check_latitude(latitude, errors);
    let lon = check_longitude(longitude, errors);
    let month = check_month(month, errors);
    let day = check_day(day, month, errors);

    let coordinate = Coordinate::new(lat?, lon?)?;
    let date = CalendarDate::new(month?, day?).ok()?;
    Some(AnalysisTarget { coordinate, date })
}

/// A fully validated analysis form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedForm {
    pub target: AnalysisTarget,
    pub factor: AnalysisFactor,
}

/// The analysis form as typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorsForm {
    pub latitude: String,
    pub longitude: String,
    pub month: String,
    pub day: String,
    pub factor: String,
}

impl Default for FactorsForm {
    fn default() -> Self {
        Self {
            latitude: String::new(),
            longitude: String::new(),
            month: String::new(),
            day: String::new(),
            factor: AnalysisFactor::default().as_str().to_string(),
        }
    }
}

impl FactorsForm {
    /// Seed the form from the last map/date selection, if any.
    pub fn from_prefill(prefill: &Prefill) -> Self {
        let mut form = Self::default();
        if let Some(marker) = &prefill.marker {
            form.latitude = marker.lat.to_string();
            form.longitude = marker.lng.to_string();
        }
        if let Some(date) = &prefill.date {
            form.month = date.month.to_string();
            form.day = date.day.to_string();
        }
        form
    }

    /// All four location/date fields have something typed in.
    pub fn is_complete(&self) -> bool {
        [&self.latitude, &self.longitude, &self.month, &self.day]
            .iter()
            .all(|f| !f.trim().is_empty())
    }

    /// The factor currently picked for display, defaulting to precipitation.
    pub fn selected_factor(&self) -> AnalysisFactor {
        self.factor.parse().unwrap_or_default()
    }

    pub fn validate(&self) -> ValidationResult<ValidatedForm> {
        let mut errors = FieldErrors::new();
        let target = check_target(
            &self.latitude,
            &self.longitude,
            &self.month,
            &self.day,
            &mut errors,
        );
        let factor = match self.factor.parse::<AnalysisFactor>() {
            Ok(factor) => Some(factor),
            Err(_) => {
                errors.insert(Field::Factor, MSG_FACTOR_INVALID.to_string());
                None
            }
        };
        let value = target
            .zip(factor)
            .map(|(target, factor)| ValidatedForm { target, factor });
        ValidationResult::from_parts(errors, value)
    }
}

/// Validated inputs of the plot card: the shared target plus chart options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesInputs {
    pub target: AnalysisTarget,
    pub settings: SeriesSettings,
}

/// The plot card's own controls as typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesForm {
    pub half_window: String,
    pub aggregation: String,
    pub trend: bool,
}

impl Default for SeriesForm {
    fn default() -> Self {
        let settings = SeriesSettings::default();
        Self {
            half_window: settings.half_window_days.to_string(),
            aggregation: settings.aggregation.as_str().to_string(),
            trend: settings.trend,
        }
    }
}

/// Clamp a typed half-window into `0..=30` the way the number input does.
/// Empty input counts as 0; text that is not a number is kept so that it
/// fails validation.
pub fn clamp_half_window_input(raw: &str) -> String {
    match parse_number(raw) {
        RawNumber::Missing => "0".to_string(),
        RawNumber::Value(v) if v.is_finite() => {
            v.clamp(0.0, MAX_HALF_WINDOW_DAYS as f64).to_string()
        }
        _ => raw.to_string(),
    }
}

impl SeriesForm {
    pub fn set_half_window(&mut self, raw: &str) {
        self.half_window = clamp_half_window_input(raw);
    }

    /// The aggregation control is disabled at window 0 (exact day).
    pub fn aggregation_disabled(&self) -> bool {
        parse_integer(&self.half_window) == Some(0)
    }

    /// Validate the card's controls together with the target fields of the
    /// analysis form. The form's factor field is not consulted: the card is
    /// always mounted for a known factor.
    pub fn validate(&self, form: &FactorsForm) -> ValidationResult<SeriesInputs> {
        let mut errors = FieldErrors::new();
        let target = check_target(
            &form.latitude,
            &form.longitude,
            &form.month,
            &form.day,
            &mut errors,
        );

        let half_window = match parse_integer(&self.half_window) {
            Some(w) if (0..=MAX_HALF_WINDOW_DAYS as i64).contains(&w) => Some(w as u32),
            _ => {
                errors.insert(Field::HalfWindow, MSG_HALF_WINDOW_RANGE.to_string());
                None
            }
        };

        let aggregation = if self.aggregation.trim().is_empty() {
            Some(Aggregation::default())
        } else {
            match self.aggregation.parse::<Aggregation>() {
                Ok(agg) => Some(agg),
                // Disabled control: fall back instead of blocking the chart.
                Err(_) if self.aggregation_disabled() => Some(Aggregation::default()),
                Err(_) => {
                    errors.insert(Field::Aggregation, MSG_AGGREGATION_INVALID.to_string());
                    None
                }
            }
        };

        let value = match (target, half_window, aggregation) {
            (Some(target), Some(half_window_days), Some(aggregation)) => Some(SeriesInputs {
                target,
                settings: SeriesSettings {
                    half_window_days,
                    aggregation,
                    trend: self.trend,
                },
            }),
            _ => None,
        };
        ValidationResult::from_parts(errors, value)
    }
}
