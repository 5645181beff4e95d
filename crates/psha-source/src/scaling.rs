//! Leonard (2014) magnitude-area scaling with a mechanism-dependent depth to
//! top of rupture.
//!
//! For every magnitude on the recurrence axis the available down-dip width is
//! reduced by the along-dip part of the expected top-of-rupture depth, the
//! rupture area follows from the seismic-moment relation, and the rupture
//! length is derived from the area and a target aspect ratio (length / width).

use psha_core::errors::{ErrorInfo, PshaError, Stage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fault::{FaultSource, Mechanism};
use crate::mfd::MagnitudeFrequencyModel;

/// Default rupture aspect ratio (length / width).
pub const DEFAULT_ASPECT_RATIO: f64 = 2.0;

/// Two thirds of log10 seismic moment offset (Hanks and Kanamori, 1979).
const MOMENT_OFFSET: f64 = 6.0333;
const AREA_SLOPE: f64 = 1.5;
const AREA_INTERCEPT_STRIKE_SLIP: f64 = 6.087;
const AREA_INTERCEPT_DIP_SLIP: f64 = 6.098;
const M2_PER_KM2: f64 = 1e6;

fn scaling_error(code: &str, message: impl Into<String>) -> ErrorInfo {
    ErrorInfo::new(code, message).at(Stage::Scaling)
}

fn round_km(value: f64) -> f64 {
    (value * 1e3).round() / 1e3
}

/// Expected depth to the top of rupture, in km.
pub fn top_of_rupture_depth_km(mechanism: Mechanism, magnitude: f64) -> f64 {
    let (intercept, slope, hinge) = match mechanism {
        Mechanism::Normal | Mechanism::StrikeSlip => (2.673, 1.136, 4.970),
        Mechanism::Reverse => (2.704, 1.226, 5.849),
    };
    (intercept - slope * (magnitude - hinge).max(0.0))
        .max(0.0)
        .powi(2)
}

/// Interplate rupture area in km² for `magnitude`.
pub fn rupture_area_km2(mechanism: Mechanism, magnitude: f64) -> f64 {
    let intercept = match mechanism {
        Mechanism::StrikeSlip => AREA_INTERCEPT_STRIKE_SLIP,
        Mechanism::Normal | Mechanism::Reverse => AREA_INTERCEPT_DIP_SLIP,
    };
    let area_m2 = 10f64.powf((AREA_SLOPE * (magnitude + MOMENT_OFFSET) - intercept) / AREA_SLOPE);
    area_m2 / M2_PER_KM2
}

/// Rupture dimensions derived for a single magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuptureDimensions {
    /// Magnitude the dimensions belong to.
    pub magnitude: f64,
    /// Expected depth to top of rupture in km.
    pub z_tor_km: f64,
    /// Down-dip width left after removing the top-of-rupture offset.
    pub available_width_km: f64,
    /// Rupture area in km².
    pub area_km2: f64,
    /// Rupture length in km, never longer than the fault.
    pub length_km: f64,
    /// Whether the available width, rather than the aspect ratio, set the length.
    pub width_limited: bool,
    /// Whether the length was clipped to the fault length.
    pub clipped: bool,
}

/// Per-magnitude rupture dimensions aligned with the recurrence axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingTable {
    /// Aspect ratio used to derive the lengths.
    pub aspect_ratio: f64,
    /// One entry per magnitude bin, in axis order.
    pub entries: Vec<RuptureDimensions>,
}

impl ScalingTable {
    /// Applies the Leonard (2014) relations to every magnitude of `mfd`.
    pub fn leonard_2014(
        fault: &FaultSource,
        mfd: &MagnitudeFrequencyModel,
        aspect_ratio: f64,
    ) -> Result<Self, PshaError> {
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return Err(PshaError::Configuration(
                scaling_error("aspect_ratio_invalid", "aspect ratio must be positive")
                    .with_context("aspect_ratio", aspect_ratio),
            ));
        }
        let entries = mfd
            .magnitudes()
            .map(|magnitude| dimensions_for(fault, magnitude, aspect_ratio))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            entries = entries.len(),
            width_limited = entries.iter().filter(|e| e.width_limited).count(),
            clipped = entries.iter().filter(|e| e.clipped).count(),
            "rupture scaling table built"
        );
        Ok(Self {
            aspect_ratio,
            entries,
        })
    }

    /// Rupture lengths in axis order.
    pub fn lengths(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.entries.iter().map(|entry| entry.length_km)
    }
}

fn dimensions_for(
    fault: &FaultSource,
    magnitude: f64,
    aspect_ratio: f64,
) -> Result<RuptureDimensions, PshaError> {
    let z_tor_km = top_of_rupture_depth_km(fault.mechanism, magnitude);
    let along_dip = if z_tor_km > fault.upper_depth_km {
        (z_tor_km - fault.upper_depth_km) / fault.dip_deg.to_radians().sin()
    } else {
        0.0
    };
    let available_width_km = (fault.width_km - along_dip).max(0.0);
    let area_km2 = rupture_area_km2(fault.mechanism, magnitude);

    // width that keeps length / width equal to the aspect ratio
    let balanced_width = (area_km2 / aspect_ratio).sqrt();
    let width_limited = available_width_km < balanced_width;
    let raw_length = if width_limited {
        if available_width_km <= 0.0 {
            return Err(PshaError::Domain(
                scaling_error(
                    "available_width_zero",
                    "top of rupture lies below the seismogenic zone",
                )
                .with_context("magnitude", magnitude)
                .with_context("z_tor_km", z_tor_km)
                .with_hint("increase the lower seismogenic depth"),
            ));
        }
        area_km2 / available_width_km
    } else {
        (area_km2 * aspect_ratio).sqrt()
    };

    let rounded = round_km(raw_length);
    let clipped = rounded > fault.length_km;
    Ok(RuptureDimensions {
        magnitude,
        z_tor_km,
        available_width_km,
        area_km2,
        length_km: if clipped { fault.length_km } else { rounded },
        width_limited,
        clipped,
    })
}
