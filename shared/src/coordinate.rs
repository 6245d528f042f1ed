use serde::{Deserialize, Serialize};

use crate::error::CoordinateError;

const EARTH_RADIUS_KM: f64 = 6_371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Parses a pair of text-encoded numbers the way geocoders ship them.
    ///
    /// Unparsable text becomes NaN instead of failing: the pair is kept and
    /// rejected later by [`Coordinate::validate`] at the point of use.
    pub fn from_text(lat: &str, lon: &str) -> Self {
        let parse = |value: &str| value.trim().parse::<f64>().unwrap_or(f64::NAN);
        Self {
            lat: parse(lat),
            lon: parse(lon),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    pub fn validate(self) -> Result<Self, CoordinateError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(CoordinateError::NotFinite {
                lat: self.lat,
                lon: self.lon,
            })
        }
    }
}

pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

pub fn polyline_length_km(path: &[Coordinate]) -> f64 {
    path.windows(2).map(|w| haversine_km(w[0], w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_parses_provider_strings() {
        let coord = Coordinate::from_text("28.6139391", " 77.2090212 ");
        assert_eq!(coord.lat, 28.6139391);
        assert_eq!(coord.lon, 77.2090212);
        assert!(coord.is_valid());
    }

    #[test]
    fn test_from_text_garbage_becomes_invalid() {
        let coord = Coordinate::from_text("north", "77.2");
        assert!(coord.lat.is_nan());
        assert!(coord.validate().is_err());
    }

    #[test]
    fn test_nan_text_is_rejected() {
        let coord = Coordinate::from_text("NaN", "77.1025");
        assert!(matches!(
            coord.validate(),
            Err(CoordinateError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_infinity_is_rejected() {
        assert!(!Coordinate::new(f64::INFINITY, 0.0).is_valid());
    }

    #[test]
    fn test_haversine_same_point() {
        let point = Coordinate::new(28.7041, 77.1025);
        assert_eq!(haversine_km(point, point), 0.0);
    }

    #[test]
    fn test_polyline_length_single_point() {
        assert_eq!(polyline_length_km(&[Coordinate::new(28.7, 77.1)]), 0.0);
    }

    #[test]
    fn test_delhi_to_noida_is_about_thirty_km() {
        let delhi = Coordinate::new(28.7041, 77.1025);
        let noida = Coordinate::new(28.5355, 77.3910);
        let dist = haversine_km(delhi, noida);
        assert!(dist > 30.0 && dist < 36.0, "got {dist}");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn valid_coord() -> impl Strategy<Value = Coordinate> {
            (-90.0..=90.0, -180.0..=180.0).prop_map(|(lat, lon)| Coordinate { lat, lon })
        }

        proptest! {
            #[test]
            fn prop_finite_pairs_validate(coord in valid_coord()) {
                prop_assert_eq!(coord.validate().ok(), Some(coord));
            }

            #[test]
            fn prop_haversine_symmetric(a in valid_coord(), b in valid_coord()) {
                prop_assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-10);
            }

            #[test]
            fn prop_polyline_length_non_negative(
                path in prop::collection::vec(valid_coord(), 0..10)
            ) {
                prop_assert!(polyline_length_km(&path) >= 0.0);
            }
        }
    }
}
