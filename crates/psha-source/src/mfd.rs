use psha_core::errors::{ErrorInfo, PshaError, Stage};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default magnitude bin width.
pub const DEFAULT_MAGNITUDE_BIN: f64 = 0.25;

fn mfd_error(code: &str, message: impl Into<String>) -> ErrorInfo {
    ErrorInfo::new(code, message).at(Stage::Mfd)
}

fn default_bin_width() -> f64 {
    DEFAULT_MAGNITUDE_BIN
}

fn round_magnitude(value: f64) -> f64 {
    (value * 1e9).round() / 1e9
}

/// Parameters of a doubly-bounded Gutenberg-Richter relation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MfdParams {
    /// Lower magnitude bound.
    pub min_magnitude: f64,
    /// Upper magnitude bound (inclusive).
    pub max_magnitude: f64,
    /// Gutenberg-Richter a-value.
    pub a_value: f64,
    /// Gutenberg-Richter b-value.
    pub b_value: f64,
    /// Spacing of the magnitude axis.
    #[serde(default = "default_bin_width")]
    pub bin_width: f64,
}

impl MfdParams {
    fn validate(&self) -> Result<(), PshaError> {
        let values = [
            self.min_magnitude,
            self.max_magnitude,
            self.a_value,
            self.b_value,
            self.bin_width,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(PshaError::Configuration(mfd_error(
                "mfd_non_finite",
                "magnitude-frequency parameters must be finite",
            )));
        }
        if self.max_magnitude <= self.min_magnitude {
            return Err(PshaError::Configuration(
                mfd_error("magnitude_range_empty", "max magnitude must exceed min magnitude")
                    .with_context("min", self.min_magnitude)
                    .with_context("max", self.max_magnitude),
            ));
        }
        if self.b_value <= 0.0 {
            return Err(PshaError::Configuration(
                mfd_error("b_value_non_positive", "b-value must be positive")
                    .with_context("b", self.b_value),
            ));
        }
        if self.bin_width <= 0.0 {
            return Err(PshaError::Configuration(
                mfd_error("bin_width_non_positive", "magnitude bin width must be positive")
                    .with_context("bin_width", self.bin_width),
            ));
        }
        Ok(())
    }
}

/// One discretised magnitude with its probability mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeBin {
    /// Position on the magnitude axis.
    pub index: usize,
    /// Magnitude value.
    pub magnitude: f64,
    /// Cumulative probability of magnitudes up to this value.
    pub cdf: f64,
    /// Probability mass assigned to the bin.
    pub pmf: f64,
}

/// Doubly-truncated exponential magnitude distribution and source activity rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeFrequencyModel {
    /// Parameters the model was built from.
    pub params: MfdParams,
    /// Magnitude bins in ascending order.
    pub bins: Vec<MagnitudeBin>,
    /// Annual rate of events at or above the minimum magnitude.
    pub source_rate: f64,
}

impl MagnitudeFrequencyModel {
    /// Builds the model for `params`.
    pub fn doubly_bounded(params: MfdParams) -> Result<Self, PshaError> {
        params.validate()?;

        let steps = ((params.max_magnitude - params.min_magnitude) / params.bin_width + 1e-9).floor()
            as usize;
        let magnitudes: Vec<f64> = (0..=steps)
            .map(|i| round_magnitude(params.min_magnitude + i as f64 * params.bin_width))
            .collect();

        let cdfs: Vec<f64> = magnitudes.iter().map(|&m| gr_cdf(&params, m)).collect();
        let bins = magnitudes
            .iter()
            .zip(&cdfs)
            .enumerate()
            .map(|(index, (&magnitude, &cdf))| {
                let next = cdfs.get(index + 1).copied().unwrap_or(1.0);
                MagnitudeBin {
                    index,
                    magnitude,
                    cdf,
                    pmf: next - cdf,
                }
            })
            .collect::<Vec<_>>();
        let source_rate = 10f64.powf(params.a_value - params.b_value * params.min_magnitude);

        debug!(bins = bins.len(), source_rate, "magnitude-frequency model built");
        Ok(Self {
            params,
            bins,
            source_rate,
        })
    }

    /// Cumulative probability at magnitude `m`.
    pub fn cdf(&self, m: f64) -> f64 {
        gr_cdf(&self.params, m)
    }

    /// Magnitude axis in ascending order.
    pub fn magnitudes(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.bins.iter().map(|bin| bin.magnitude)
    }

    /// Sum of all bin probability masses.
    pub fn total_probability(&self) -> f64 {
        self.bins.iter().map(|bin| bin.pmf).sum()
    }

    /// Annual rate of events falling in each bin.
    pub fn bin_rates(&self) -> Vec<f64> {
        self.bins
            .iter()
            .map(|bin| bin.pmf * self.source_rate)
            .collect()
    }
}

fn gr_cdf(params: &MfdParams, m: f64) -> f64 {
    let b = params.b_value;
    let numerator = 1.0 - 10f64.powf(-b * (m - params.min_magnitude));
    let denominator = 1.0 - 10f64.powf(-b * (params.max_magnitude - params.min_magnitude));
    numerator / denominator
}
