use psha_core::{azimuth, destination_point, haversine_distance, Coordinate, PshaError, Stage};
use proptest::prelude::*;

#[test]
fn malformed_pairs_are_domain_errors() {
    for pair in [vec![], vec![1.0], vec![1.0, 2.0, 3.0]] {
        let err = Coordinate::from_slice(&pair).unwrap_err();
        assert!(matches!(err, PshaError::Domain(_)));
        assert_eq!(err.stage(), Some(Stage::Geodesy));
    }
}

#[test]
fn coordinates_deserialize_from_pairs() {
    let coord: Coordinate = serde_json::from_str("[28.0, 40.8]").unwrap();
    assert_eq!(coord.lat, 28.0);
    assert_eq!(coord.lon, 40.8);
    assert_eq!(serde_json::to_string(&coord).unwrap(), "[28.0,40.8]");
    assert!(serde_json::from_str::<Coordinate>("[1.0]").is_err());
    assert!(serde_json::from_str::<Coordinate>("[95.0, 0.0]").is_err());
}

#[test]
fn reference_fault_length() {
    let a = Coordinate::new(28.0, 40.8).unwrap();
    let b = Coordinate::new(29.5, 40.7).unwrap();
    let length = haversine_distance(a, b);
    assert!(length > 166.0 && length < 168.0, "got {length}");
    let strike = azimuth(a, b);
    assert!(strike > 350.0 && strike < 360.0, "got {strike}");
}

proptest! {
    #[test]
    fn destination_then_haversine_recovers_distance(
        lat in -70.0f64..70.0,
        lon in -179.0f64..179.0,
        az in 0.0f64..360.0,
        d in 0.1f64..500.0,
    ) {
        let origin = Coordinate::new(lat, lon).unwrap();
        let target = destination_point(origin, az, d);
        let back = haversine_distance(target, origin);
        prop_assert!((back - d).abs() < 1e-6 * d.max(1.0), "d={} back={}", d, back);
    }

    #[test]
    fn destination_follows_azimuth(
        lat in -60.0f64..60.0,
        lon in -170.0f64..170.0,
        az in 0.0f64..360.0,
        d in 1.0f64..200.0,
    ) {
        let origin = Coordinate::new(lat, lon).unwrap();
        let target = destination_point(origin, az, d);
        let bearing = azimuth(origin, target);
        let diff = (bearing - az).abs();
        prop_assert!(diff.min(360.0 - diff) < 1e-6, "az={} bearing={}", az, bearing);
    }
}
