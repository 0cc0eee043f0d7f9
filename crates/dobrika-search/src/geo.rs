//! Geo coordinates: the `"lat,lon"` grammar and great-circle distance.
//!
//! The grammar is shared by both call sites, which treat a parse failure
//! differently: the index writer substitutes [`FALLBACK_POINT`], geo search
//! rejects the request.

use std::fmt;

/// Mean earth radius in metres used for great-circle distances.
pub const EARTH_RADIUS_METRES: f64 = 6_372_797.6;

/// Position assigned to tasks indexed without usable geo data.
pub const FALLBACK_POINT: GeoPoint = GeoPoint {
    lat: 55.45,
    lon: 37.65,
};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude, -90..=90.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

impl GeoPoint {
    /// Create a point, returning `None` for non-finite values or a latitude
    /// outside -90..=90.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        if !lat.is_finite() || !lon.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return None;
        }
        Some(Self { lat, lon })
    }

    /// Great-circle distance to `other`, in metres (haversine).
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (other.lon - self.lon).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METRES * a.sqrt().min(1.0).asin()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Parse `"<lat>,<lon>"`.
///
/// Splits at the first comma; both sides must parse as floating point after
/// trimming surrounding whitespace. Empty input, a missing comma or a
/// non-numeric side yields `None`.
pub fn parse_geo(input: &str) -> Option<GeoPoint> {
    let (lat, lon) = input.split_once(',')?;
    let lat = lat.trim().parse::<f64>().ok()?;
    let lon = lon.trim().parse::<f64>().ok()?;
    GeoPoint::new(lat, lon)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_geo_valid() {
        let point = parse_geo("55.7558,37.6173").unwrap();
        assert_eq!(point.lat, 55.7558);
        assert_eq!(point.lon, 37.6173);

        let point = parse_geo(" -33.9 , 151.2 ").unwrap();
        assert_eq!(point.lat, -33.9);
        assert_eq!(point.lon, 151.2);
    }

    #[test]
    fn test_parse_geo_unparsable() {
        assert!(parse_geo("").is_none());
        assert!(parse_geo("55.7").is_none());
        assert!(parse_geo("abc,37.6").is_none());
        assert!(parse_geo("55.7,").is_none());
        assert!(parse_geo(",37.6").is_none());
        assert!(parse_geo("55.7,37.6,1").is_none());
    }

    #[test]
    fn test_parse_geo_rejects_out_of_range_latitude() {
        assert!(parse_geo("91,0").is_none());
        assert!(parse_geo("NaN,0").is_none());
        assert!(parse_geo("0,inf").is_none());
    }

    #[test]
    fn test_fallback_point_is_valid() {
        assert_eq!(GeoPoint::new(FALLBACK_POINT.lat, FALLBACK_POINT.lon), Some(FALLBACK_POINT));
    }

    #[test]
    fn test_distance_zero_to_self() {
        let p = GeoPoint::new(55.0, 37.0).unwrap();
        assert_eq!(p.distance_to(&p), 0.0);
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        let a = GeoPoint::new(55.0, 37.0).unwrap();
        let b = GeoPoint::new(56.0, 37.0).unwrap();
        let d = a.distance_to(&b);
        // One degree of arc on the configured sphere.
        assert!((d - 111_226.0).abs() < 100.0, "distance was {d}");
    }

    #[test]
    fn test_distance_orders_by_proximity() {
        let centre = GeoPoint::new(55.0, 37.0).unwrap();
        let near = GeoPoint::new(55.005, 37.0).unwrap();
        let far = GeoPoint::new(55.03, 37.0).unwrap();
        assert!(centre.distance_to(&near) < centre.distance_to(&far));
    }

    #[test]
    fn test_display_roundtrips_through_parser() {
        let p = GeoPoint::new(55.45, 37.65).unwrap();
        assert_eq!(parse_geo(&p.to_string()), Some(p));
    }

    proptest! {
        #[test]
        fn test_distance_is_symmetric(
            lat1 in -90.0f64..=90.0, lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lon2 in -180.0f64..=180.0,
        ) {
            let a = GeoPoint::new(lat1, lon1).unwrap();
            let b = GeoPoint::new(lat2, lon2).unwrap();
            prop_assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-6);
        }

        #[test]
        fn test_strings_without_comma_never_parse(s in "[^,]*") {
            prop_assert!(parse_geo(&s).is_none());
        }
    }
}
