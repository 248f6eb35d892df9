//! Climate factors and the UI ↔ wire name translation table.
//!
//! The service spells wind as `windspeed`; everywhere inside the crate the
//! factor is [`AnalysisFactor::Wind`]. The translation happens only through
//! [`WireFactor`] (request bodies) and [`AnalysisFactor::from_result_key`]
//! (response maps).

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum AnalysisFactor {
    #[default]
    Precipitation,
    Temperature,
    Humidity,
    Wind,
    Comfort,
}

/// `(ui name, wire name)` for every factor.
const WIRE_NAMES: [(AnalysisFactor, &str); 5] = [
    (AnalysisFactor::Temperature, "temperature"),
    (AnalysisFactor::Precipitation, "precipitation"),
    (AnalysisFactor::Wind, "windspeed"),
    (AnalysisFactor::Humidity, "humidity"),
    (AnalysisFactor::Comfort, "comfort"),
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown factor '{0}'")]
pub struct UnknownFactor(pub String);

impl AnalysisFactor {
    /// Factors in the order they are shown in the form.
    pub const UI_ORDER: [AnalysisFactor; 5] = [
        AnalysisFactor::Precipitation,
        AnalysisFactor::Temperature,
        AnalysisFactor::Humidity,
        AnalysisFactor::Wind,
        AnalysisFactor::Comfort,
    ];

    /// Factors in the order the analysis request lists them.
    pub const REQUEST_ORDER: [AnalysisFactor; 5] = [
        AnalysisFactor::Temperature,
        AnalysisFactor::Precipitation,
        AnalysisFactor::Wind,
        AnalysisFactor::Humidity,
        AnalysisFactor::Comfort,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisFactor::Precipitation => "precipitation",
            AnalysisFactor::Temperature => "temperature",
            AnalysisFactor::Humidity => "humidity",
            AnalysisFactor::Wind => "wind",
            AnalysisFactor::Comfort => "comfort",
        }
    }

    pub fn wire_name(&self) -> &'static str {
        WIRE_NAMES
            .iter()
            .find(|(factor, _)| factor == self)
            .map(|(_, wire)| *wire)
            .unwrap_or_else(|| self.as_str())
    }

    /// Read a key of the `results` object. Both the wire name and the UI name
    /// are accepted, so `wind` and `windspeed` both map to [`AnalysisFactor::Wind`].
    pub fn from_result_key(key: &str) -> Option<Self> {
        WIRE_NAMES
            .iter()
            .find(|(factor, wire)| *wire == key || factor.as_str() == key)
            .map(|(factor, _)| *factor)
    }

    /// Label for the factor radio group.
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisFactor::Precipitation => "Precipitación",
            AnalysisFactor::Temperature => "Temperatura",
            AnalysisFactor::Humidity => "Humedad",
            AnalysisFactor::Wind => "Viento",
            AnalysisFactor::Comfort => "Confort",
        }
    }
}

impl fmt::Display for AnalysisFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisFactor {
    type Err = UnknownFactor;

    /// Parses the UI spelling only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::UI_ORDER
            .into_iter()
            .find(|f| f.as_str() == s.trim())
            .ok_or_else(|| UnknownFactor(s.to_string()))
    }
}

/// A factor as it appears in request bodies (`wind` serializes as `windspeed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireFactor(pub AnalysisFactor);

impl Serialize for WireFactor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.wire_name())
    }
}

impl From<AnalysisFactor> for WireFactor {
    fn from(factor: AnalysisFactor) -> Self {
        WireFactor(factor)
    }
}

/// The factors that have a series chart: every factor except comfort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlotFactor {
    Precipitation,
    Temperature,
    Humidity,
    Wind,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("factor '{0}' has no series chart")]
pub struct NotChartable(pub AnalysisFactor);

impl PlotFactor {
    pub const ALL: [PlotFactor; 4] = [
        PlotFactor::Precipitation,
        PlotFactor::Temperature,
        PlotFactor::Humidity,
        PlotFactor::Wind,
    ];

    pub(crate) fn index(&self) -> usize {
        match self {
            PlotFactor::Precipitation => 0,
            PlotFactor::Temperature => 1,
            PlotFactor::Humidity => 2,
            PlotFactor::Wind => 3,
        }
    }
}

impl TryFrom<AnalysisFactor> for PlotFactor {
    type Error = NotChartable;

    fn try_from(factor: AnalysisFactor) -> Result<Self, Self::Error> {
        match factor {
            AnalysisFactor::Precipitation => Ok(PlotFactor::Precipitation),
            AnalysisFactor::Temperature => Ok(PlotFactor::Temperature),
            AnalysisFactor::Humidity => Ok(PlotFactor::Humidity),
            AnalysisFactor::Wind => Ok(PlotFactor::Wind),
            AnalysisFactor::Comfort => Err(NotChartable(factor)),
        }
    }
}

impl From<PlotFactor> for AnalysisFactor {
    fn from(factor: PlotFactor) -> Self {
        match factor {
            PlotFactor::Precipitation => AnalysisFactor::Precipitation,
            PlotFactor::Temperature => AnalysisFactor::Temperature,
            PlotFactor::Humidity => AnalysisFactor::Humidity,
            PlotFactor::Wind => AnalysisFactor::Wind,
        }
    }
}

impl fmt::Display for PlotFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        AnalysisFactor::from(*self).fmt(f)
    }
}
