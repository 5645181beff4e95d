mod common;

use psha_core::geodesy::haversine_distance;
use psha_core::PshaError;
use psha_source::{generate_ruptures, start_offsets, ScalingTable, DEFAULT_ASPECT_RATIO};
use proptest::prelude::*;

use common::{reference_fault, reference_mfd};

#[test]
fn reference_mesh_counts_per_bin() {
    let fault = reference_fault();
    let mfd = reference_mfd();
    let table = ScalingTable::leonard_2014(&fault, &mfd, DEFAULT_ASPECT_RATIO).unwrap();
    let mesh = generate_ruptures(&fault, &mfd, &table, 10.0).unwrap();

    let counts: Vec<usize> = mesh.bin_counts().into_iter().map(|(_, count)| count).collect();
    assert_eq!(counts, vec![17, 17, 16, 16, 16, 15, 15, 14, 12, 9, 2, 1, 1]);
    assert_eq!(mesh.len(), 151);

    for (id, rupture) in mesh.ruptures.iter().enumerate() {
        assert_eq!(rupture.id, id);
    }
    for bin in &mfd.bins {
        let total: f64 = mesh.bin(bin.index).map(|r| r.p_location).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(mesh.bin(bin.index).all(|r| r.p_magnitude == bin.pmf));
    }
}

#[test]
fn ruptures_are_centred_on_the_fault() {
    let fault = reference_fault();
    let mfd = reference_mfd();
    let table = ScalingTable::leonard_2014(&fault, &mfd, DEFAULT_ASPECT_RATIO).unwrap();
    let mesh = generate_ruptures(&fault, &mfd, &table, 10.0).unwrap();

    for (bin_index, _) in mesh.bin_counts() {
        let ruptures: Vec<_> = mesh.bin(bin_index).collect();
        let first = ruptures.first().unwrap();
        let last = ruptures.last().unwrap();
        let leading = first.offset_km;
        let trailing = fault.length_km - (last.offset_km + last.length_km);
        assert!((leading - trailing).abs() < 1e-9, "bin {bin_index}");
    }
}

#[test]
fn endpoints_lie_one_rupture_length_apart() {
    let fault = reference_fault();
    let mfd = reference_mfd();
    let table = ScalingTable::leonard_2014(&fault, &mfd, DEFAULT_ASPECT_RATIO).unwrap();
    let mesh = generate_ruptures(&fault, &mfd, &table, 5.0).unwrap();
    for rupture in &mesh.ruptures {
        let span = haversine_distance(rupture.start, rupture.end);
        assert!((span - rupture.length_km).abs() < 1e-6);
        let from_origin = haversine_distance(fault.origin(), rupture.start);
        assert!((from_origin - rupture.offset_km).abs() < 1e-6);
    }
}

#[test]
fn long_ruptures_fall_back_to_a_single_full_length_rupture() {
    let fault = reference_fault();
    let mfd = reference_mfd();
    let table = ScalingTable::leonard_2014(&fault, &mfd, DEFAULT_ASPECT_RATIO).unwrap();
    let mesh = generate_ruptures(&fault, &mfd, &table, 10.0).unwrap();

    let top: Vec<_> = mesh.bin(12).collect();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].offset_km, 0.0);
    assert_eq!(top[0].length_km, fault.length_km);
    assert_eq!(top[0].p_location, 1.0);
    assert!(haversine_distance(top[0].end, fault.vertices[1]) < 1e-6);
}

#[test]
fn empty_grid_cases() {
    assert!(start_offsets(100.0, 100.0, 10.0).is_empty());
    assert!(start_offsets(100.0, 120.0, 10.0).is_empty());
    assert_eq!(start_offsets(100.0, 95.0, 10.0), vec![2.5]);
    assert_eq!(start_offsets(100.0, 80.0, 10.0), vec![0.0, 10.0, 20.0]);
}

#[test]
fn mesh_spacing_must_be_positive() {
    let fault = reference_fault();
    let mfd = reference_mfd();
    let table = ScalingTable::leonard_2014(&fault, &mfd, DEFAULT_ASPECT_RATIO).unwrap();
    let err = generate_ruptures(&fault, &mfd, &table, 0.0).unwrap_err();
    assert!(matches!(err, PshaError::Configuration(_)));
    assert_eq!(err.info().code, "mesh_spacing_invalid");
}

proptest! {
    #[test]
    fn offsets_are_increasing_and_on_the_fault(
        fault_length in 1.0f64..400.0,
        fraction in 0.01f64..1.2,
        spacing in 0.5f64..25.0,
    ) {
        let rupture_length = fault_length * fraction;
        let offsets = start_offsets(fault_length, rupture_length, spacing);
        if rupture_length >= fault_length {
            prop_assert!(offsets.is_empty());
        } else {
            prop_assert!(!offsets.is_empty());
            prop_assert!(offsets.windows(2).all(|w| w[1] > w[0]));
            prop_assert!(offsets[0] >= 0.0);
            let last = offsets[offsets.len() - 1];
            prop_assert!(last + rupture_length <= fault_length + 1e-6);
            let leading = offsets[0];
            let trailing = fault_length - (last + rupture_length);
            prop_assert!((leading - trailing).abs() < 1e-6);
        }
    }
}
