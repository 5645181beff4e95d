#![allow(dead_code)]

use psha_core::Coordinate;
use psha_source::{FaultSource, FaultSpec, MagnitudeFrequencyModel, MfdParams};

pub fn reference_spec() -> FaultSpec {
    FaultSpec {
        vertices: vec![
            Coordinate::new(28.0, 40.8).unwrap(),
            Coordinate::new(29.5, 40.7).unwrap(),
        ],
        upper_depth_km: 0.0,
        lower_depth_km: 20.0,
        dip_deg: 90.0,
        rake_deg: 180.0,
    }
}

pub fn reference_fault() -> FaultSource {
    FaultSource::characterize(&reference_spec()).unwrap()
}

pub fn reference_mfd() -> MagnitudeFrequencyModel {
    MagnitudeFrequencyModel::doubly_bounded(MfdParams {
        min_magnitude: 5.0,
        max_magnitude: 8.0,
        a_value: 4.0,
        b_value: 1.0,
        bin_width: 0.25,
    })
    .unwrap()
}
