//! Spherical-earth geodesy helpers
//!
//! Both functions take decimal degrees. Accuracy is that of a spherical
//! model, which is ample for spacing path vertices a few meters apart.

use crate::types::GeoPoint;

/// Mean earth radius used by the haversine formula
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance in meters between two points (haversine)
pub fn haversine_distance(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Initial bearing (forward azimuth) from `from` to `to`, in [0, 360) degrees
pub fn initial_bearing(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    let bearing = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if bearing >= 360.0 {
        0.0
    } else {
        bearing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = GeoPoint::new(47.3769, 8.5417);
        assert_eq!(haversine_distance(&p, &p), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = GeoPoint::new(10.0, 20.0);
        let b = GeoPoint::new(10.0001, 20.0001);
        let ab = haversine_distance(&a, &b);
        let ba = haversine_distance(&b, &a);
        assert!((ab - ba).abs() < 1e-9, "{ab} != {ba}");
    }

    #[test]
    fn test_distance_known_values() {
        // One degree of latitude on a 6371 km sphere
        let d = haversine_distance(&GeoPoint::new(0.0, 0.0), &GeoPoint::new(1.0, 0.0));
        assert!((d - 111_194.93).abs() < 1.0, "got {d}");

        // 0.0001 deg on both axes near 10N is roughly 15.5 m
        let d = haversine_distance(&GeoPoint::new(10.0, 20.0), &GeoPoint::new(10.0001, 20.0001));
        assert!(d > 15.0 && d < 16.0, "got {d}");
    }

    #[test]
    fn test_distance_triangle_inequality() {
        let a = GeoPoint::new(10.0, 20.0);
        let b = GeoPoint::new(10.001, 20.001);
        let c = GeoPoint::new(10.002, 20.0021);
        let direct = haversine_distance(&a, &c);
        let via = haversine_distance(&a, &b) + haversine_distance(&b, &c);
        assert!(direct <= via + 1e-6);
        assert!((via - direct) / direct < 0.01);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = GeoPoint::new(10.0, 20.0);

        let north = initial_bearing(&origin, &GeoPoint::new(10.001, 20.0));
        assert!(north.abs() < 1e-6, "north: {north}");

        let east = initial_bearing(&origin, &GeoPoint::new(10.0, 20.001));
        assert!((east - 90.0).abs() < 0.01, "east: {east}");

        let south = initial_bearing(&origin, &GeoPoint::new(9.999, 20.0));
        assert!((south - 180.0).abs() < 1e-6, "south: {south}");

        let west = initial_bearing(&origin, &GeoPoint::new(10.0, 19.999));
        assert!((west - 270.0).abs() < 0.01, "west: {west}");
    }

    #[test]
    fn test_bearing_range() {
        let origin = GeoPoint::new(-33.86, 151.21);
        for i in 0..36 {
            let angle = (i as f64 * 10.0).to_radians();
            let target = GeoPoint::new(
                origin.latitude + 0.01 * angle.cos(),
                origin.longitude + 0.01 * angle.sin(),
            );
            let bearing = initial_bearing(&origin, &target);
            assert!((0.0..360.0).contains(&bearing), "bearing {bearing} out of range");
        }
        assert_eq!(initial_bearing(&origin, &origin), 0.0);
    }
}
