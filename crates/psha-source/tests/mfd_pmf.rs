mod common;

use psha_core::{PshaError, Stage};
use psha_source::{MagnitudeFrequencyModel, MfdParams};
use proptest::prelude::*;

use common::reference_mfd;

#[test]
fn reference_axis_is_exact_quarter_steps() {
    let mfd = reference_mfd();
    let expected: Vec<f64> = (0..13).map(|i| 5.0 + 0.25 * i as f64).collect();
    assert_eq!(mfd.magnitudes().collect::<Vec<_>>(), expected);
    assert_eq!(mfd.bins[0].cdf, 0.0);
    assert!((mfd.bins[12].cdf - 1.0).abs() < 1e-12);
    assert!(mfd.bins[12].pmf.abs() < 1e-12);
    assert!((mfd.source_rate - 10f64.powf(4.0 - 5.0)).abs() < 1e-15);
}

#[test]
fn pmf_decreases_with_magnitude() {
    let mfd = reference_mfd();
    for pair in mfd.bins.windows(2).take(11) {
        assert!(pair[0].pmf > pair[1].pmf);
    }
}

#[test]
fn bin_rates_sum_to_source_rate() {
    let mfd = reference_mfd();
    let total: f64 = mfd.bin_rates().iter().sum();
    assert!((total - mfd.source_rate).abs() < 1e-12);
}

#[test]
fn unaligned_upper_bound_stays_below_max() {
    let mfd = MagnitudeFrequencyModel::doubly_bounded(MfdParams {
        min_magnitude: 5.0,
        max_magnitude: 7.9,
        a_value: 3.0,
        b_value: 0.9,
        bin_width: 0.25,
    })
    .unwrap();
    let last = mfd.bins.last().unwrap();
    assert_eq!(last.magnitude, 7.75);
    assert!(last.pmf > 0.0);
    assert!((mfd.total_probability() - 1.0).abs() < 1e-12);
}

#[test]
fn invalid_parameters_are_configuration_errors() {
    let base = MfdParams {
        min_magnitude: 5.0,
        max_magnitude: 8.0,
        a_value: 4.0,
        b_value: 1.0,
        bin_width: 0.25,
    };
    let cases = [
        (MfdParams { max_magnitude: 5.0, ..base }, "magnitude_range_empty"),
        (MfdParams { max_magnitude: 4.0, ..base }, "magnitude_range_empty"),
        (MfdParams { b_value: 0.0, ..base }, "b_value_non_positive"),
        (MfdParams { bin_width: -0.1, ..base }, "bin_width_non_positive"),
        (MfdParams { a_value: f64::NAN, ..base }, "mfd_non_finite"),
    ];
    for (params, code) in cases {
        let err = MagnitudeFrequencyModel::doubly_bounded(params).unwrap_err();
        assert!(matches!(err, PshaError::Configuration(_)));
        assert_eq!(err.info().code, code);
        assert_eq!(err.stage(), Some(Stage::Mfd));
    }
}

#[test]
fn bin_width_defaults_when_omitted() {
    let params: MfdParams = serde_json::from_str(
        r#"{"min_magnitude":5.0,"max_magnitude":6.0,"a_value":3.5,"b_value":1.1}"#,
    )
    .unwrap();
    assert_eq!(params.bin_width, 0.25);
}

proptest! {
    #[test]
    fn pmf_sums_to_one(
        min in 3.0f64..6.0,
        span in 0.3f64..4.0,
        b in 0.3f64..2.0,
        bin in prop::sample::select(vec![0.05, 0.1, 0.2, 0.25, 0.5]),
    ) {
        let mfd = MagnitudeFrequencyModel::doubly_bounded(MfdParams {
            min_magnitude: min,
            max_magnitude: min + span,
            a_value: 4.0,
            b_value: b,
            bin_width: bin,
        }).unwrap();
        prop_assert!((mfd.total_probability() - 1.0).abs() < 1e-9);
        prop_assert!(mfd.bins.iter().all(|bin| bin.pmf >= -1e-12));
        prop_assert!(mfd.magnitudes().all(|m| m <= min + span + 1e-9));
    }
}
