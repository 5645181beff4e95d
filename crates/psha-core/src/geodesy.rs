//! Spherical-earth geodesy primitives used by every spatial computation.
//!
//! All functions take and return decimal degrees; distances are kilometres on
//! a sphere of radius [`EARTH_RADIUS_KM`].

use crate::types::Coordinate;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates using the haversine formula.
pub fn haversine_distance(p1: Coordinate, p2: Coordinate) -> f64 {
    let (lat1, lon1) = p1.to_radians();
    let (lat2, lon2) = p2.to_radians();
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());
    EARTH_RADIUS_KM * c
}

/// Initial bearing from `p1` to `p2`, in degrees within `[0, 360)`.
pub fn azimuth(p1: Coordinate, p2: Coordinate) -> f64 {
    let (lat1, lon1) = p1.to_radians();
    let (lat2, lon2) = p2.to_radians();
    let dlon = lon2 - lon1;

    let x = dlon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    let bearing = x.atan2(y).to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if bearing >= 360.0 {
        0.0
    } else {
        bearing
    }
}

/// Forward geodesic projection of `origin` along `azimuth_deg` by `distance_km`.
pub fn destination_point(origin: Coordinate, azimuth_deg: f64, distance_km: f64) -> Coordinate {
    let (lat, lon) = origin.to_radians();
    let bearing = azimuth_deg.to_radians();
    let delta = distance_km / EARTH_RADIUS_KM;

    let new_lat = (lat.sin() * delta.cos() + lat.cos() * delta.sin() * bearing.cos()).asin();
    let new_lon = lon
        + (bearing.sin() * delta.sin() * lat.cos()).atan2(delta.cos() - lat.sin() * new_lat.sin());

    Coordinate {
        lat: new_lat.to_degrees(),
        lon: normalize_longitude(new_lon.to_degrees()),
    }
}

/// Wraps a longitude into `[-180, 180)`.
pub fn normalize_longitude(lon: f64) -> f64 {
    if (-180.0..180.0).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = haversine_distance(coord(0.0, 0.0), coord(1.0, 0.0));
        assert!((d - 111.194_926_6).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn cardinal_azimuths() {
        let origin = coord(10.0, 10.0);
        assert!(azimuth(origin, coord(11.0, 10.0)).abs() < 1e-9);
        assert!((azimuth(origin, coord(10.0, 11.0)) - 90.0).abs() < 0.1);
        assert!((azimuth(origin, coord(9.0, 10.0)) - 180.0).abs() < 1e-9);
        assert!((azimuth(origin, coord(10.0, 9.0)) - 270.0).abs() < 0.1);
    }

    #[test]
    fn destination_wraps_antimeridian() {
        let p = destination_point(coord(0.0, 179.9), 90.0, 50.0);
        assert!(p.lon < -179.0 && p.lon >= -180.0, "got {}", p.lon);
    }
}
