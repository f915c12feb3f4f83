//! Great-circle distance between coordinate pairs.

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two `(lat, lng)` pairs given in
/// degrees.
///
/// Literally-identical endpoints produce exactly `0.0`: both difference
/// terms are `sin(0.0)` and the final angle is `atan2(0.0, 1.0)`, which are
/// exact in IEEE arithmetic. The false-start filter relies on this.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let (lat1, lng1) = (lat1.to_radians(), lng1.to_radians());
    let (lat2, lng2) = (lat2.to_radians(), lng2.to_radians());
    let dlat = lat2 - lat1;
    let dlng = lng2 - lng1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlng = (dlng * 0.5).sin();
    let a = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlng * sin_dlng;
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_points_are_exactly_zero() {
        assert_eq!(haversine_km(41.88, -87.63, 41.88, -87.63), 0.0);
        assert_eq!(haversine_km(0.0, 0.0, 0.0, 0.0), 0.0);
        assert_eq!(haversine_km(-33.8688, 151.2093, -33.8688, 151.2093), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let d1 = haversine_km(41.88, -87.63, 41.95, -87.65);
        let d2 = haversine_km(41.95, -87.65, 41.88, -87.63);
        assert_eq!(d1, d2);
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        // One degree of arc on a 6371 km sphere is ~111.195 km
        let d = haversine_km(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn test_short_city_hop() {
        // Two points ~1.6 km apart in downtown Chicago
        let d = haversine_km(41.8781, -87.6298, 41.8925, -87.6298);
        assert!(d > 1.0 && d < 2.5, "got {d}");
    }

    #[test]
    fn test_nonnegative() {
        let d = haversine_km(41.88, -87.63, 41.87, -87.64);
        assert!(d >= 0.0);
    }
}
