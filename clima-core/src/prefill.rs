//! Last selection persisted by the map and date pickers.
//!
//! The picker views write two JSON entries to the browser's key-value
//! storage; the factors view reads them once when it is created.

use serde::{Deserialize, Serialize};

pub const MARKER_KEY: &str = "selection_marker";
pub const DATE_KEY: &str = "selection_date";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredMarker {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDate {
    pub day: u32,
    pub month: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Prefill {
    pub marker: Option<StoredMarker>,
    pub date: Option<StoredDate>,
}

impl Prefill {
    /// Parse the raw storage entries. Missing, `null` or malformed entries
    /// are treated as absent.
    pub fn parse(marker_json: Option<&str>, date_json: Option<&str>) -> Self {
        Self {
            marker: parse_entry(MARKER_KEY, marker_json),
            date: parse_entry(DATE_KEY, date_json),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.marker.is_none() && self.date.is_none()
    }
}

fn parse_entry<T: for<'de> Deserialize<'de>>(key: &str, raw: Option<&str>) -> Option<T> {
    let raw = raw?;
    match serde_json::from_str::<Option<T>>(raw) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("ignoring malformed '{}' entry: {}", key, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_entries() {
        let prefill = Prefill::parse(
            Some(r#"{"lat":19.43,"lng":-99.13}"#),
            Some(r#"{"day":15,"month":6}"#),
        );
        assert_eq!(
            prefill.marker,
            Some(StoredMarker {
                lat: 19.43,
                lng: -99.13
            })
        );
        assert_eq!(prefill.date, Some(StoredDate { day: 15, month: 6 }));
    }

    #[test]
    fn test_missing_null_and_malformed_are_absent() {
        assert!(Prefill::parse(None, None).is_empty());
        assert!(Prefill::parse(Some("null"), Some("null")).is_empty());
        let prefill = Prefill::parse(Some("{not json"), Some(r#"{"day":"x"}"#));
        assert!(prefill.is_empty());
    }
}
