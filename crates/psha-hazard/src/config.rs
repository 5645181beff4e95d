use std::fs;
use std::path::Path;

use psha_core::errors::{ErrorInfo, PshaError, Stage};
use psha_core::{Coordinate, Site};
use psha_gmm::{GroundMotionModel, Imt};
use psha_source::{FaultSpec, MfdParams, DEFAULT_ASPECT_RATIO, DEFAULT_MAGNITUDE_BIN};
use serde::{Deserialize, Serialize};

use crate::hash::stable_hash_string;
use crate::pipeline::HazardInputs;
use crate::serde::{from_yaml_slice, to_yaml_string};

fn config_error(code: &str, message: impl Into<String>) -> ErrorInfo {
    ErrorInfo::new(code, message).at(Stage::Config)
}

/// Fault geometry and kinematics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultConfig {
    /// Trace vertices as `[lat, lon]` pairs, checked by [`HazardConfig::to_inputs`].
    #[serde(default = "FaultConfig::default_vertices")]
    pub vertices: Vec<Vec<f64>>,
    /// Upper seismogenic depth in km.
    #[serde(default)]
    pub upper_depth_km: f64,
    /// Lower seismogenic depth in km.
    #[serde(default = "FaultConfig::default_lower_depth")]
    pub lower_depth_km: f64,
    /// Dip in degrees.
    #[serde(default = "FaultConfig::default_dip")]
    pub dip_deg: f64,
    /// Rake in degrees.
    #[serde(default = "FaultConfig::default_rake")]
    pub rake_deg: f64,
}

impl FaultConfig {
    fn default_vertices() -> Vec<Vec<f64>> {
        vec![vec![28.0, 40.8], vec![29.5, 40.7]]
    }

    fn trace(&self) -> Result<Vec<Coordinate>, PshaError> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(index, pair)| {
                Coordinate::from_slice(pair).map_err(|err| {
                    PshaError::Configuration(
                        err.info()
                            .clone()
                            .at(Stage::Fault)
                            .with_context("vertex", index)
                            .with_hint("fault vertices are [lat, lon] pairs"),
                    )
                })
            })
            .collect()
    }

    fn default_lower_depth() -> f64 {
        20.0
    }

    fn default_dip() -> f64 {
        90.0
    }

    fn default_rake() -> f64 {
        180.0
    }
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            vertices: Self::default_vertices(),
            upper_depth_km: 0.0,
            lower_depth_km: Self::default_lower_depth(),
            dip_deg: Self::default_dip(),
            rake_deg: Self::default_rake(),
        }
    }
}

/// Gutenberg-Richter recurrence parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceConfig {
    /// Minimum magnitude.
    #[serde(default = "RecurrenceConfig::default_min")]
    pub min_magnitude: f64,
    /// Maximum magnitude.
    #[serde(default = "RecurrenceConfig::default_max")]
    pub max_magnitude: f64,
    /// a-value.
    #[serde(default = "RecurrenceConfig::default_a")]
    pub a_value: f64,
    /// b-value.
    #[serde(default = "RecurrenceConfig::default_b")]
    pub b_value: f64,
    /// Magnitude bin width.
    #[serde(default = "RecurrenceConfig::default_bin")]
    pub bin_width: f64,
}

impl RecurrenceConfig {
    fn default_min() -> f64 {
        5.0
    }

    fn default_max() -> f64 {
        8.0
    }

    fn default_a() -> f64 {
        4.0
    }

    fn default_b() -> f64 {
        1.0
    }

    fn default_bin() -> f64 {
        DEFAULT_MAGNITUDE_BIN
    }
}

impl Default for RecurrenceConfig {
    fn default() -> Self {
        Self {
            min_magnitude: Self::default_min(),
            max_magnitude: Self::default_max(),
            a_value: Self::default_a(),
            b_value: Self::default_b(),
            bin_width: Self::default_bin(),
        }
    }
}

/// Site of interest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// `[lat, lon]` of the site.
    #[serde(default = "SiteConfig::default_location")]
    pub location: Coordinate,
    /// Vs30 in m/s.
    #[serde(default = "SiteConfig::default_vs30")]
    pub vs30: f64,
}

impl SiteConfig {
    fn default_location() -> Coordinate {
        Coordinate { lat: 29.2, lon: 41.0 }
    }

    fn default_vs30() -> f64 {
        700.0
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            location: Self::default_location(),
            vs30: Self::default_vs30(),
        }
    }
}

/// Log-spaced threshold axis, `count` points from `start` to `end` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogSpace {
    /// First threshold.
    pub start: f64,
    /// Last threshold.
    pub end: f64,
    /// Number of thresholds.
    pub count: usize,
}

impl LogSpace {
    /// Expands the axis into explicit thresholds.
    pub fn values(&self) -> Result<Vec<f64>, PshaError> {
        let valid = self.start.is_finite()
            && self.end.is_finite()
            && self.start > 0.0
            && self.end > self.start
            && self.count > 0;
        if !valid {
            return Err(PshaError::Configuration(
                config_error(
                    "logspace_invalid",
                    "log-spaced thresholds need 0 < start < end and a positive count",
                )
                .with_context("start", self.start)
                .with_context("end", self.end)
                .with_context("count", self.count),
            ));
        }
        if self.count == 1 {
            return Ok(vec![self.start]);
        }
        let (lo, hi) = (self.start.log10(), self.end.log10());
        let step = (hi - lo) / (self.count - 1) as f64;
        Ok((0..self.count)
            .map(|i| 10f64.powf(lo + i as f64 * step))
            .collect())
    }
}

/// Intensity thresholds, given explicitly or as a log-spaced axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSpec {
    /// Explicit thresholds in ascending order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f64>>,
    /// Log-spaced axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logspace: Option<LogSpace>,
}

impl ThresholdSpec {
    /// Resolves the threshold sequence; exactly one form must be present.
    pub fn resolve(&self) -> Result<Vec<f64>, PshaError> {
        match (&self.values, &self.logspace) {
            (Some(values), None) => Ok(values.clone()),
            (None, Some(axis)) => axis.values(),
            (Some(_), Some(_)) => Err(PshaError::Configuration(
                config_error("thresholds_ambiguous", "give either values or logspace, not both")
                    .with_hint("remove one of thresholds.values or thresholds.logspace"),
            )),
            (None, None) => Err(PshaError::Configuration(config_error(
                "thresholds_missing",
                "no intensity thresholds configured",
            ))),
        }
    }
}

impl Default for ThresholdSpec {
    fn default() -> Self {
        Self {
            values: None,
            logspace: Some(LogSpace {
                start: 0.1,
                end: 2.0,
                count: 100,
            }),
        }
    }
}

/// Full description of a hazard run as read from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardConfig {
    /// Causative fault.
    #[serde(default)]
    pub fault: FaultConfig,
    /// Magnitude recurrence.
    #[serde(default)]
    pub recurrence: RecurrenceConfig,
    /// Site of interest.
    #[serde(default)]
    pub site: SiteConfig,
    /// Spacing between rupture start offsets in km.
    #[serde(default = "HazardConfig::default_mesh_spacing")]
    pub mesh_spacing_km: f64,
    /// Rupture aspect ratio (length / width).
    #[serde(default = "HazardConfig::default_aspect_ratio")]
    pub aspect_ratio: f64,
    /// Ground-motion model identifier.
    #[serde(default = "HazardConfig::default_gmm")]
    pub gmm: String,
    /// Intensity measure type.
    #[serde(default = "HazardConfig::default_imt")]
    pub imt: String,
    /// Intensity thresholds.
    #[serde(default)]
    pub thresholds: ThresholdSpec,
}

impl HazardConfig {
    fn default_mesh_spacing() -> f64 {
        10.0
    }

    fn default_aspect_ratio() -> f64 {
        DEFAULT_ASPECT_RATIO
    }

    fn default_gmm() -> String {
        GroundMotionModel::Asb14.id().to_string()
    }

    fn default_imt() -> String {
        Imt::Pga.as_str().to_string()
    }

    /// Validates identifiers and ranges and builds typed pipeline inputs.
    pub fn to_inputs(&self) -> Result<HazardInputs, PshaError> {
        let gmm: GroundMotionModel = self.gmm.parse()?;
        let imt: Imt = self.imt.parse()?;
        let vertices = self.fault.trace()?;
        let location = Coordinate::new(self.site.location.lat, self.site.location.lon)?;
        let site = Site::new(location, self.site.vs30)?;
        Ok(HazardInputs {
            fault: FaultSpec {
                vertices,
                upper_depth_km: self.fault.upper_depth_km,
                lower_depth_km: self.fault.lower_depth_km,
                dip_deg: self.fault.dip_deg,
                rake_deg: self.fault.rake_deg,
            },
            recurrence: MfdParams {
                min_magnitude: self.recurrence.min_magnitude,
                max_magnitude: self.recurrence.max_magnitude,
                a_value: self.recurrence.a_value,
                b_value: self.recurrence.b_value,
                bin_width: self.recurrence.bin_width,
            },
            site,
            mesh_spacing_km: self.mesh_spacing_km,
            aspect_ratio: self.aspect_ratio,
            gmm,
            imt,
            thresholds: self.thresholds.resolve()?,
        })
    }

    /// Deterministic hash of the configuration contents.
    pub fn config_hash(&self) -> Result<String, PshaError> {
        stable_hash_string(self)
    }

    /// YAML representation of the configuration.
    pub fn to_yaml_string(&self) -> Result<String, PshaError> {
        to_yaml_string(self)
    }
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            fault: FaultConfig::default(),
            recurrence: RecurrenceConfig::default(),
            site: SiteConfig::default(),
            mesh_spacing_km: Self::default_mesh_spacing(),
            aspect_ratio: Self::default_aspect_ratio(),
            gmm: Self::default_gmm(),
            imt: Self::default_imt(),
            thresholds: ThresholdSpec::default(),
        }
    }
}

/// Loads a YAML configuration; absent fields take the application defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<HazardConfig, PshaError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| {
        PshaError::Serde(
            config_error("config_read", err.to_string()).with_context("path", path.display()),
        )
    })?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(HazardConfig::default());
    }
    from_yaml_slice(&bytes)
}
