//! Request bodies sent to the analysis service.

use crate::calendar::CalendarDate;
use crate::config::{ANALYSIS_HALF_WINDOW_DAYS, END_YEAR, START_YEAR};
use crate::factor::{AnalysisFactor, PlotFactor, WireFactor};
use crate::geo::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The validated point and day an analysis is run for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisTarget {
    pub coordinate: Coordinate,
    pub date: CalendarDate,
}

/// Body of `POST /v1/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub month: u32,
    pub day: u32,
    pub start_year: i32,
    pub end_year: i32,
    pub half_window_days: u32,
    pub factors: Vec<WireFactor>,
}

impl AnalyzeRequest {
    /// Every analysis asks for all five factors over the fixed climatology
    /// period, exact day only. The displayed factor never changes the body.
    pub fn all_factors(target: &AnalysisTarget) -> Self {
        Self {
            latitude: target.coordinate.latitude,
            longitude: target.coordinate.longitude,
            month: target.date.month,
            day: target.date.day,
            start_year: START_YEAR,
            end_year: END_YEAR,
            half_window_days: ANALYSIS_HALF_WINDOW_DAYS,
            factors: AnalysisFactor::REQUEST_ORDER
                .into_iter()
                .map(WireFactor)
                .collect(),
        }
    }
}

/// Reducer applied across the half-window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Median,
    Mean,
    Max,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown aggregation '{0}'")]
pub struct UnknownAggregation(pub String);

impl Aggregation {
    pub const ALL: [Aggregation; 3] = [Aggregation::Median, Aggregation::Mean, Aggregation::Max];

    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Median => "median",
            Aggregation::Mean => "mean",
            Aggregation::Max => "max",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aggregation {
    type Err = UnknownAggregation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s.trim())
            .ok_or_else(|| UnknownAggregation(s.to_string()))
    }
}

/// Chart options chosen in the plot card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesSettings {
    pub half_window_days: u32,
    pub aggregation: Aggregation,
    pub trend: bool,
}

impl Default for SeriesSettings {
    fn default() -> Self {
        Self {
            half_window_days: 0,
            aggregation: Aggregation::Median,
            trend: true,
        }
    }
}

/// Body of the series chart and series CSV calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub month: u32,
    pub day: u32,
    pub start_year: i32,
    pub end_year: i32,
    pub half_window_days: u32,
    pub factor: WireFactor,
    pub agg: Aggregation,
    pub trend: bool,
}

impl SeriesRequest {
    pub fn new(target: &AnalysisTarget, factor: PlotFactor, settings: &SeriesSettings) -> Self {
        Self {
            latitude: target.coordinate.latitude,
            longitude: target.coordinate.longitude,
            month: target.date.month,
            day: target.date.day,
            start_year: START_YEAR,
            end_year: END_YEAR,
            half_window_days: settings.half_window_days,
            factor: WireFactor(factor.into()),
            agg: settings.aggregation,
            trend: settings.trend,
        }
    }

    /// `series_<factor>_<MM><DD>_<start>-<end>_win<half_window>.csv`, with the
    /// factor in its wire spelling.
    pub fn csv_filename(&self) -> String {
        format!(
            "series_{}_{:02}{:02}_{}-{}_win{}.csv",
            self.factor.0.wire_name(),
            self.month,
            self.day,
            self.start_year,
            self.end_year,
            self.half_window_days
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn target() -> AnalysisTarget {
        AnalysisTarget {
            coordinate: Coordinate::new(19.43, -99.13).unwrap(),
            date: CalendarDate::new(6, 15).unwrap(),
        }
    }

    #[test]
    fn test_analyze_request_body() {
        let body = serde_json::to_value(AnalyzeRequest::all_factors(&target())).unwrap();
        assert_eq!(
            body,
            json!({
                "latitude": 19.43,
                "longitude": -99.13,
                "month": 6,
                "day": 15,
                "start_year": 2000,
                "end_year": 2024,
                "half_window_days": 0,
                "factors": ["temperature", "precipitation", "windspeed", "humidity", "comfort"],
            })
        );
    }

    #[test]
    fn test_series_request_body() {
        let settings = SeriesSettings {
            half_window_days: 7,
            aggregation: Aggregation::Max,
            trend: false,
        };
        let body =
            serde_json::to_value(SeriesRequest::new(&target(), PlotFactor::Wind, &settings))
                .unwrap();
        assert_eq!(body["factor"], "windspeed");
        assert_eq!(body["agg"], "max");
        assert_eq!(body["half_window_days"], 7);
        assert_eq!(body["trend"], false);
        assert_eq!(body["start_year"], 2000);
    }

    #[test]
    fn test_csv_filename() {
        let request = SeriesRequest::new(&target(), PlotFactor::Wind, &SeriesSettings::default());
        assert_eq!(
            request.csv_filename(),
            "series_windspeed_0615_2000-2024_win0.csv"
        );

        let mut target = target();
        target.date = CalendarDate::new(1, 5).unwrap();
        let settings = SeriesSettings {
            half_window_days: 12,
            ..SeriesSettings::default()
        };
        let request = SeriesRequest::new(&target, PlotFactor::Humidity, &settings);
        assert_eq!(
            request.csv_filename(),
            "series_humidity_0105_2000-2024_win12.csv"
        );
    }

    #[test]
    fn test_aggregation_parse() {
        assert_eq!("mean".parse::<Aggregation>(), Ok(Aggregation::Mean));
        assert!("sum".parse::<Aggregation>().is_err());
        assert_eq!(Aggregation::default(), Aggregation::Median);
    }
}
