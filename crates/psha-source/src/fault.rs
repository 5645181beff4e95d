use std::fmt;
use std::str::FromStr;

use psha_core::errors::{ErrorInfo, PshaError, Stage};
use psha_core::geodesy::{azimuth, haversine_distance};
use psha_core::Coordinate;
use serde::{Deserialize, Serialize};
use tracing::debug;

fn fault_error(code: &str, message: impl Into<String>) -> ErrorInfo {
    ErrorInfo::new(code, message).at(Stage::Fault)
}

/// Faulting style derived from the rake angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mechanism {
    /// Normal faulting (rake strictly within 225..315 after normalisation).
    Normal,
    /// Reverse faulting (rake strictly within 45..135).
    Reverse,
    /// Everything else, boundaries included.
    StrikeSlip,
}

impl Mechanism {
    /// Classifies a rake angle given in degrees.
    ///
    /// Negative rakes are first shifted into `[0, 360)`. The ranges are open,
    /// so 45, 135, 225 and 315 all classify as strike-slip.
    pub fn from_rake(rake_deg: f64) -> Self {
        let rake = normalize_rake(rake_deg);
        if rake > 45.0 && rake < 135.0 {
            Mechanism::Reverse
        } else if rake > 225.0 && rake < 315.0 {
            Mechanism::Normal
        } else {
            Mechanism::StrikeSlip
        }
    }

    /// Returns the canonical label of the mechanism.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mechanism::Normal => "Normal",
            Mechanism::Reverse => "Reverse",
            Mechanism::StrikeSlip => "StrikeSlip",
        }
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mechanism {
    type Err = PshaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "normal" => Ok(Mechanism::Normal),
            "reverse" => Ok(Mechanism::Reverse),
            "strikeslip" => Ok(Mechanism::StrikeSlip),
            _ => Err(PshaError::Configuration(
                fault_error("mechanism_unknown", "unrecognized faulting mechanism")
                    .with_context("mechanism", s)
                    .with_hint("expected one of Normal, Reverse, StrikeSlip"),
            )),
        }
    }
}

/// Shifts negative rakes into `[0, 360)`.
pub fn normalize_rake(rake_deg: f64) -> f64 {
    if rake_deg < 0.0 {
        rake_deg + 360.0
    } else {
        rake_deg
    }
}

/// Geometric type of the seismic source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Single vertex; characterized but not meshable.
    Point,
    /// Two or more vertices describing a fault trace.
    Fault,
}

impl SourceType {
    fn classify(vertices: &[Coordinate]) -> Result<Self, PshaError> {
        match vertices.len() {
            0 => Err(PshaError::Configuration(fault_error(
                "vertices_empty",
                "a source needs at least one coordinate pair",
            ))),
            1 => Ok(SourceType::Point),
            _ => Ok(SourceType::Fault),
        }
    }
}

/// User supplied description of the causative fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultSpec {
    /// Ordered trace vertices as `[lat, lon]` pairs.
    pub vertices: Vec<Coordinate>,
    /// Upper seismogenic depth in km.
    pub upper_depth_km: f64,
    /// Lower seismogenic depth in km.
    pub lower_depth_km: f64,
    /// Dip angle in degrees, within (0, 90].
    pub dip_deg: f64,
    /// Rake angle in degrees, within [-180, 180].
    pub rake_deg: f64,
}

/// Characterized fault; immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultSource {
    /// Ordered trace vertices.
    pub vertices: Vec<Coordinate>,
    /// Geometric source type.
    pub source_type: SourceType,
    /// Upper seismogenic depth in km.
    pub upper_depth_km: f64,
    /// Lower seismogenic depth in km.
    pub lower_depth_km: f64,
    /// Dip angle in degrees.
    pub dip_deg: f64,
    /// Rake angle normalised to `[0, 360)`.
    pub rake_deg: f64,
    /// Great-circle length of each trace segment, in km.
    pub segment_lengths_km: Vec<f64>,
    /// Total trace length in km.
    pub length_km: f64,
    /// Down-dip width in km.
    pub width_km: f64,
    /// Azimuth of the first segment, absent for point sources.
    pub strike_deg: Option<f64>,
    /// Faulting mechanism derived from the rake.
    pub mechanism: Mechanism,
}

impl FaultSource {
    /// Validates `spec` and derives lengths, width, strike and mechanism.
    pub fn characterize(spec: &FaultSpec) -> Result<Self, PshaError> {
        let source_type = SourceType::classify(&spec.vertices)?;
        validate_depths(spec.upper_depth_km, spec.lower_depth_km)?;
        validate_dip(spec.dip_deg)?;
        if !spec.rake_deg.is_finite() || !(-180.0..=180.0).contains(&spec.rake_deg) {
            return Err(PshaError::Configuration(
                fault_error("rake_out_of_range", "rake must lie within [-180, 180]")
                    .with_context("rake", spec.rake_deg),
            ));
        }

        let mut segment_lengths_km = Vec::with_capacity(spec.vertices.len().saturating_sub(1));
        for (idx, pair) in spec.vertices.windows(2).enumerate() {
            let length = haversine_distance(pair[0], pair[1]);
            if length <= 0.0 {
                return Err(PshaError::Domain(
                    fault_error("segment_degenerate", "fault segment has zero length")
                        .with_context("segment", idx)
                        .with_hint("consecutive vertices must be distinct"),
                ));
            }
            segment_lengths_km.push(length);
        }
        let length_km: f64 = segment_lengths_km.iter().sum();
        let width_km = (spec.lower_depth_km - spec.upper_depth_km) / spec.dip_deg.to_radians().sin();
        let strike_deg = match source_type {
            SourceType::Fault => Some(azimuth(spec.vertices[0], spec.vertices[1])),
            SourceType::Point => None,
        };
        let rake_deg = normalize_rake(spec.rake_deg);
        let mechanism = Mechanism::from_rake(rake_deg);

        debug!(
            ?source_type,
            length_km,
            width_km,
            strike = ?strike_deg,
            %mechanism,
            "fault characterized"
        );

        Ok(Self {
            vertices: spec.vertices.clone(),
            source_type,
            upper_depth_km: spec.upper_depth_km,
            lower_depth_km: spec.lower_depth_km,
            dip_deg: spec.dip_deg,
            rake_deg,
            segment_lengths_km,
            length_km,
            width_km,
            strike_deg,
            mechanism,
        })
    }

    /// Returns the strike of a two-vertex line source.
    ///
    /// Rupture placement projects along a single azimuth, so point sources and
    /// multi-segment traces are rejected here.
    pub fn line_strike(&self) -> Result<f64, PshaError> {
        match (self.source_type, self.strike_deg) {
            (SourceType::Fault, Some(strike)) if self.vertices.len() == 2 => Ok(strike),
            (SourceType::Point, _) => Err(PshaError::Configuration(
                fault_error("point_source_unsupported", "point sources cannot be meshed")
                    .with_hint("supply a two-vertex fault trace"),
            )),
            _ => Err(PshaError::Configuration(
                fault_error(
                    "fault_not_two_point",
                    "only two-vertex line sources can be meshed",
                )
                .with_context("vertices", self.vertices.len()),
            )),
        }
    }

    /// First trace vertex, the origin of all along-strike offsets.
    pub fn origin(&self) -> Coordinate {
        self.vertices[0]
    }
}

fn validate_depths(upper: f64, lower: f64) -> Result<(), PshaError> {
    if !upper.is_finite() || !lower.is_finite() || upper < 0.0 {
        return Err(PshaError::Configuration(
            fault_error("depth_invalid", "seismogenic depths must be finite and non-negative")
                .with_context("upper", upper)
                .with_context("lower", lower),
        ));
    }
    if lower <= upper {
        return Err(PshaError::Configuration(
            fault_error("depth_range_empty", "lower depth must exceed upper depth")
                .with_context("upper", upper)
                .with_context("lower", lower),
        ));
    }
    Ok(())
}

fn validate_dip(dip: f64) -> Result<(), PshaError> {
    if !dip.is_finite() || !(0.0..=90.0).contains(&dip) {
        return Err(PshaError::Configuration(
            fault_error("dip_out_of_range", "dip must lie within (0, 90]")
                .with_context("dip", dip),
        ));
    }
    if dip == 0.0 {
        return Err(PshaError::Domain(
            fault_error("dip_zero", "a horizontal fault has no finite down-dip width")
                .with_context("dip", dip),
        ));
    }
    Ok(())
}
