use psha_core::geodesy::{destination_point, haversine_distance};
use psha_core::{Coordinate, PshaError, Site, Stage};
use psha_source::{closest_distance, closest_point, locate_ruptures, Rupture, RuptureMesh};

fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).unwrap()
}

#[test]
fn site_on_the_segment_has_zero_distance() {
    let start = coord(40.0, 29.0);
    let end = coord(40.0, 30.0);
    let d = closest_distance(start, end, coord(40.0, 29.5)).unwrap();
    assert!(d < 0.05, "got {d}");
}

#[test]
fn perpendicular_offset_is_measured_to_the_interior() {
    let start = coord(0.0, 10.0);
    let end = coord(1.0, 10.0);
    let site = destination_point(coord(0.5, 10.0), 90.0, 20.0);
    let d = closest_distance(start, end, site).unwrap();
    assert!((d - 20.0).abs() < 0.01, "got {d}");
}

#[test]
fn beyond_the_end_clamps_to_the_endpoint() {
    let start = coord(0.0, 10.0);
    let end = coord(1.0, 10.0);
    let site = coord(2.0, 10.0);
    let nearest = closest_point(start, end, site).unwrap();
    assert_eq!(nearest, end);
    let d = closest_distance(start, end, site).unwrap();
    assert!((d - haversine_distance(site, end)).abs() < 1e-12);

    let behind = coord(-0.5, 10.2);
    assert_eq!(closest_point(start, end, behind).unwrap(), start);
}

#[test]
fn coincident_endpoints_are_a_domain_error() {
    let p = coord(10.0, 10.0);
    let err = closest_distance(p, p, coord(11.0, 11.0)).unwrap_err();
    assert!(matches!(err, PshaError::Domain(_)));
    assert_eq!(err.stage(), Some(Stage::Distance));
}

#[test]
fn located_ruptures_carry_the_rupture_id_on_failure() {
    let p = coord(10.0, 10.0);
    let rupture = Rupture {
        id: 7,
        bin_index: 0,
        magnitude: 5.0,
        length_km: 0.0,
        offset_km: 0.0,
        start: p,
        end: p,
        p_magnitude: 1.0,
        p_location: 1.0,
    };
    let mesh = RuptureMesh {
        mesh_spacing_km: 1.0,
        ruptures: vec![rupture],
    };
    let site = Site::new(coord(10.5, 10.5), 760.0).unwrap();
    let err = locate_ruptures(&mesh, &site).unwrap_err();
    assert_eq!(err.info().context.get("rupture").map(String::as_str), Some("7"));
}

#[test]
fn segments_crossing_the_antimeridian_take_the_short_way() {
    let start = coord(0.0, 179.9);
    let end = coord(0.0, -179.9);
    let site = coord(0.1, 180.0);
    let nearest = closest_point(start, end, site).unwrap();
    assert!(nearest.lat.abs() < 1e-9);
    assert!((nearest.lon.abs() - 180.0).abs() < 1e-9, "got {nearest}");
    assert!((-180.0..180.0).contains(&nearest.lon));

    let d = closest_distance(start, end, site).unwrap();
    let expected = haversine_distance(site, coord(0.0, 180.0));
    assert!((d - expected).abs() < 1e-6, "got {d}, expected {expected}");
    assert!((d - 11.12).abs() < 0.01);

    let reversed = closest_distance(end, start, site).unwrap();
    assert!((reversed - d).abs() < 1e-6);
}
