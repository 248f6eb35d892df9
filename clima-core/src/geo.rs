/// Reduce a longitude into `[-180, 180)`.
///
/// Non-finite input is returned as a non-finite value; callers treat that as
/// invalid.
pub fn normalize_longitude(lon: f64) -> f64 {
    let mut x = lon % 360.0;
    if x < -180.0 {
        x += 360.0;
    }
    if x >= 180.0 {
        x -= 360.0;
    }
    x
}

/// Whether `lon` already lies in the normalized range.
pub fn is_normalized_longitude(lon: f64) -> bool {
    (-180.0..180.0).contains(&lon)
}

/// Whether `lat` is a finite latitude in `[-90, 90]`.
pub fn is_valid_latitude(lat: f64) -> bool {
    lat.is_finite() && (-90.0..=90.0).contains(&lat)
}

/// A validated point. The longitude is always stored normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, normalizing the longitude. Returns `None` when the
    /// latitude is out of range or either value is not finite.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if !is_valid_latitude(latitude) || !longitude.is_finite() {
            return None;
        }
        let longitude = normalize_longitude(longitude);
        if !is_normalized_longitude(longitude) {
            return None;
        }
        Some(Self {
            latitude,
            longitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wraparound_examples() {
        assert_eq!(normalize_longitude(-200.0), 160.0);
        assert_eq!(normalize_longitude(200.0), -160.0);
        assert_eq!(normalize_longitude(180.0), -180.0);
        assert_eq!(normalize_longitude(-180.0), -180.0);
        assert_eq!(normalize_longitude(260.0), -100.0);
        assert_eq!(normalize_longitude(540.0), -180.0);
        assert_eq!(normalize_longitude(-99.13), -99.13);
    }

    #[test]
    fn test_non_finite_propagates() {
        assert!(normalize_longitude(f64::NAN).is_nan());
        assert!(!normalize_longitude(f64::INFINITY).is_finite());
    }

    #[test]
    fn test_coordinate_new() {
        let c = Coordinate::new(19.43, 260.0).unwrap();
        assert_eq!(c.longitude, -100.0);
        assert!(Coordinate::new(90.5, 0.0).is_none());
        assert!(Coordinate::new(-90.0, f64::NAN).is_none());
        assert!(Coordinate::new(f64::INFINITY, 0.0).is_none());
    }

    #[test]
    fn test_just_below_minus_180_stays_in_range() {
        let lon = normalize_longitude(-180.0 - 1e-9);
        assert!(is_normalized_longitude(lon), "got {lon}");
    }

    proptest! {
        #[test]
        fn prop_normalized_range(lon in -1e7..1e7f64) {
            let n = normalize_longitude(lon);
            prop_assert!(n >= -180.0);
            prop_assert!(n < 180.0);
        }

        #[test]
        fn prop_normalize_idempotent(lon in -1e7..1e7f64) {
            let once = normalize_longitude(lon);
            prop_assert_eq!(normalize_longitude(once), once);
        }
    }
}
