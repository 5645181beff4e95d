//! Discretized total-probability integration.
//!
//! For each threshold `t` the annual exceedance rate is
//! `source_rate * Σ (1 - Φ((ln t - log_mean) / sigma)) * P(M=m) * P(R=r|m)`
//! summed over the rupture table in row order.

use psha_core::errors::{ErrorInfo, PshaError, Stage};
use rayon::prelude::*;
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

use crate::curve::{HazardCurve, HazardPoint};
use crate::table::RuptureTable;

fn hazard_error(code: &str, message: impl Into<String>) -> ErrorInfo {
    ErrorInfo::new(code, message).at(Stage::Hazard)
}

/// Checks that thresholds are positive, finite and strictly increasing.
pub fn validate_thresholds(thresholds: &[f64]) -> Result<(), PshaError> {
    if thresholds.is_empty() {
        return Err(PshaError::Configuration(hazard_error(
            "thresholds_empty",
            "at least one intensity threshold is required",
        )));
    }
    if let Some((index, value)) = thresholds
        .iter()
        .enumerate()
        .find(|(_, t)| !t.is_finite() || **t <= 0.0)
    {
        return Err(PshaError::Configuration(
            hazard_error("threshold_non_positive", "thresholds must be positive and finite")
                .with_context("index", index)
                .with_context("threshold", value),
        ));
    }
    if let Some(index) = thresholds.windows(2).position(|pair| pair[1] <= pair[0]) {
        return Err(PshaError::Configuration(
            hazard_error("thresholds_unordered", "thresholds must be strictly increasing")
                .with_context("index", index + 1)
                .with_context("threshold", thresholds[index + 1]),
        ));
    }
    Ok(())
}

/// Probability that the intensity exceeds `exp(ln_threshold)` for a
/// log-normal prediction.
pub fn exceedance_probability(normal: &Normal, log_mean: f64, sigma: f64, ln_threshold: f64) -> f64 {
    normal.sf((ln_threshold - log_mean) / sigma)
}

fn check_table(table: &RuptureTable) -> Result<(), PshaError> {
    for row in &table.rows {
        if !row.sigma.is_finite() || row.sigma <= 0.0 {
            return Err(PshaError::Numeric(
                hazard_error("sigma_non_positive", "total sigma must be positive")
                    .with_context("rupture", row.rupture_id)
                    .with_context("sigma", row.sigma),
            ));
        }
        if !row.log_mean.is_finite() {
            return Err(PshaError::Numeric(
                hazard_error("log_mean_non_finite", "log-mean intensity must be finite")
                    .with_context("rupture", row.rupture_id),
            ));
        }
    }
    Ok(())
}

/// Integrates the rupture table into a hazard curve on `thresholds`.
pub fn integrate_hazard(
    table: &RuptureTable,
    source_rate: f64,
    thresholds: &[f64],
) -> Result<HazardCurve, PshaError> {
    validate_thresholds(thresholds)?;
    if !source_rate.is_finite() || source_rate < 0.0 {
        return Err(PshaError::Numeric(
            hazard_error("source_rate_invalid", "source rate must be finite and non-negative")
                .with_context("source_rate", source_rate),
        ));
    }
    check_table(table)?;
    let normal = Normal::new(0.0, 1.0).map_err(|err| {
        PshaError::Numeric(hazard_error("standard_normal", err.to_string()))
    })?;

    let points: Vec<HazardPoint> = thresholds
        .par_iter()
        .map(|&threshold| {
            let ln_threshold = threshold.ln();
            let weighted: f64 = table
                .rows
                .iter()
                .map(|row| {
                    exceedance_probability(&normal, row.log_mean, row.sigma, ln_threshold)
                        * row.p_magnitude
                        * row.p_location
                })
                .sum();
            HazardPoint {
                threshold,
                annual_rate: source_rate * weighted,
            }
        })
        .collect();

    debug!(
        thresholds = points.len(),
        max_rate = points.iter().map(|p| p.annual_rate).fold(0.0, f64::max),
        "hazard integrated"
    );
    Ok(HazardCurve {
        imt: table.imt,
        points,
    })
}
