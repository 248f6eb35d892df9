//! Shape of the `/v1/analyze` response.
//!
//! Only the fields the result cards read are modelled; anything else in the
//! payload is ignored. Every field is optional because the service omits the
//! statistics it could not compute.

use crate::factor::AnalysisFactor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A statistic the service may send either as a number or as preformatted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // -0 prints as 0
            Scalar::Number(n) if *n == 0.0 => f.write_str("0"),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(t) => f.write_str(t),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Percentiles {
    pub p10: Option<Scalar>,
    pub p50: Option<Scalar>,
    pub p90: Option<Scalar>,
}

/// Statistics for one factor. Which fields are filled depends on the factor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorStats {
    pub typical: Option<Scalar>,
    pub label: Option<String>,
    pub percentiles: Option<Percentiles>,
    pub prob_wet_day: Option<f64>,
    pub intensity_percentiles: Option<Percentiles>,
}

/// The `results` object, keyed by UI factor.
///
/// Keys are read through [`AnalysisFactor::from_result_key`], so a wind block
/// sent as either `wind` or `windspeed` lands under [`AnalysisFactor::Wind`].
/// Unknown keys are dropped; if both wind spellings appear, the first one wins.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, serde_json::Value>")]
pub struct AnalysisResults {
    by_factor: BTreeMap<AnalysisFactor, FactorStats>,
}

impl From<BTreeMap<String, serde_json::Value>> for AnalysisResults {
    fn from(raw: BTreeMap<String, serde_json::Value>) -> Self {
        let mut by_factor = BTreeMap::new();
        for (key, value) in raw {
            let Some(factor) = AnalysisFactor::from_result_key(&key) else {
                log::debug!("ignoring unknown result key '{}'", key);
                continue;
            };
            match serde_json::from_value::<FactorStats>(value) {
                Ok(stats) => {
                    by_factor.entry(factor).or_insert(stats);
                }
                Err(e) => log::warn!("unreadable '{}' block in results: {}", key, e),
            }
        }
        Self { by_factor }
    }
}

impl AnalysisResults {
    pub fn get(&self, factor: AnalysisFactor) -> Option<&FactorStats> {
        self.by_factor.get(&factor)
    }

    pub fn is_empty(&self) -> bool {
        self.by_factor.is_empty()
    }

    pub fn factors(&self) -> impl Iterator<Item = AnalysisFactor> + '_ {
        self.by_factor.keys().copied()
    }
}

/// Full analysis response as retained by the coordinator.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub results: AnalysisResults,
}
