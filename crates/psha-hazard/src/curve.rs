use psha_core::errors::{ErrorInfo, PshaError, Stage};
use psha_gmm::Imt;
use serde::{Deserialize, Serialize};

/// One point of the hazard curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardPoint {
    /// Intensity threshold in the units of the curve's IMT.
    pub threshold: f64,
    /// Annual rate at which the threshold is exceeded.
    pub annual_rate: f64,
}

/// Annual exceedance rates on the threshold axis they were evaluated on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardCurve {
    /// Intensity measure of the thresholds.
    pub imt: Imt,
    /// Points in threshold order.
    pub points: Vec<HazardPoint>,
}

impl HazardCurve {
    /// Thresholds in axis order.
    pub fn thresholds(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.points.iter().map(|point| point.threshold)
    }

    /// Annual exceedance rates in axis order.
    pub fn rates(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.points.iter().map(|point| point.annual_rate)
    }

    /// Number of points on the curve.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true when the curve has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns true when no rate exceeds the rate of a lower threshold.
    pub fn is_non_increasing(&self) -> bool {
        self.points
            .windows(2)
            .all(|pair| pair[1].annual_rate <= pair[0].annual_rate)
    }

    /// Poisson probability of at least one exceedance within `years`,
    /// `1 - exp(-rate * years)`, for every threshold.
    pub fn annual_probability(&self, years: f64) -> Result<Vec<f64>, PshaError> {
        if !years.is_finite() || years <= 0.0 {
            return Err(PshaError::Configuration(
                ErrorInfo::new("exposure_invalid", "exposure time must be positive")
                    .at(Stage::Hazard)
                    .with_context("years", years),
            ));
        }
        Ok(self
            .rates()
            .map(|rate| -(-rate * years).exp_m1())
            .collect())
    }
}
