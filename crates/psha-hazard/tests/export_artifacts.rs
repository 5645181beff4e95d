mod common;

use std::fs;

use psha_hazard::{run_hazard, write_artifacts, HazardCurve, HazardReport, RuptureTable};
use tempfile::tempdir;

use common::reference_inputs;

#[test]
fn artifacts_land_in_the_output_directory() {
    let inputs = reference_inputs();
    let run = run_hazard(&inputs).unwrap();
    let dir = tempdir().unwrap();
    let out = dir.path().join("reference");
    let (paths, report) = write_artifacts(&out, &inputs, &run).unwrap();

    let csv = fs::read_to_string(&paths.ruptures_csv).unwrap();
    let mut lines = csv.lines();
    let header = lines.next().unwrap();
    for column in [
        "magnitude",
        "p_magnitude",
        "p_location",
        "start_lat",
        "start_lon",
        "end_lat",
        "end_lon",
        "distance_km",
        "median",
        "tau",
        "phi",
        "sigma",
    ] {
        assert!(header.split(',').any(|name| name == column), "missing {column}");
    }
    assert_eq!(lines.count(), run.table.len());

    let table: RuptureTable = serde_json::from_slice(&fs::read(&paths.ruptures_json).unwrap()).unwrap();
    assert_eq!(table.len(), run.table.len());
    let curve: HazardCurve = serde_json::from_slice(&fs::read(&paths.curve_json).unwrap()).unwrap();
    assert_eq!(curve.len(), 100);

    let stored: HazardReport = serde_json::from_slice(&fs::read(&paths.report_json).unwrap()).unwrap();
    assert_eq!(stored.provenance.input_hash, report.provenance.input_hash);
    assert_eq!(stored.rupture_count, 151);
    assert_eq!(stored.bin_count, 13);
    assert!((stored.source_rate - 0.1).abs() < 1e-12);
}

#[test]
fn report_hashes_are_deterministic() {
    let inputs = reference_inputs();
    let run = run_hazard(&inputs).unwrap();
    let first = HazardReport::new(&inputs, &run).unwrap();
    let second = HazardReport::new(&inputs, &run).unwrap();
    assert_eq!(first.provenance.input_hash, second.provenance.input_hash);
    assert_eq!(first.provenance.rupture_hash, second.provenance.rupture_hash);
    assert_eq!(first.provenance.input_hash.len(), 64);

    let mut other = inputs.clone();
    other.site.vs30 = 400.0;
    let other_run = run_hazard(&other).unwrap();
    let third = HazardReport::new(&other, &other_run).unwrap();
    assert_ne!(first.provenance.input_hash, third.provenance.input_hash);
    assert_ne!(first.provenance.rupture_hash, third.provenance.rupture_hash);
}
