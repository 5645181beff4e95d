#![deny(missing_docs)]
#![doc = "Ground-motion prediction for a single rupture: log-mean intensity and its aleatory variability."]

use std::fmt;
use std::str::FromStr;

use psha_core::errors::{ErrorInfo, PshaError, Stage};
use serde::{Deserialize, Serialize};

/// Akkar, Sandikkaya and Bommer (2014) Joyner-Boore distance model.
pub mod asb14;

pub use asb14::Asb14;

fn gmm_error(code: &str, message: impl Into<String>) -> ErrorInfo {
    ErrorInfo::new(code, message).at(Stage::Gmm)
}

/// Intensity measure type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Imt {
    /// Peak ground acceleration, in g.
    Pga,
    /// Peak ground velocity, in cm/s.
    Pgv,
}

impl Imt {
    /// Unit of the median intensity.
    pub fn units(&self) -> &'static str {
        match self {
            Imt::Pga => "g",
            Imt::Pgv => "cm/s",
        }
    }

    /// Canonical upper-case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Imt::Pga => "PGA",
            Imt::Pgv => "PGV",
        }
    }
}

impl fmt::Display for Imt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Imt {
    type Err = PshaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pga" => Ok(Imt::Pga),
            "pgv" => Ok(Imt::Pgv),
            _ => Err(PshaError::Configuration(
                gmm_error("imt_unknown", "unrecognized intensity measure type")
                    .with_context("imt", s)
                    .with_hint("expected PGA or PGV"),
            )),
        }
    }
}

/// Rupture and site parameters consumed by a ground-motion model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GmmContext {
    /// Moment magnitude.
    pub magnitude: f64,
    /// Joyner-Boore style closest distance in km.
    pub distance_km: f64,
    /// Rake angle in degrees.
    pub rake_deg: f64,
    /// Site Vs30 in m/s.
    pub vs30: f64,
}

impl GmmContext {
    fn validate(&self) -> Result<(), PshaError> {
        if !self.magnitude.is_finite() || !self.rake_deg.is_finite() {
            return Err(PshaError::Configuration(
                gmm_error("context_non_finite", "magnitude and rake must be finite")
                    .with_context("magnitude", self.magnitude)
                    .with_context("rake", self.rake_deg),
            ));
        }
        if !self.distance_km.is_finite() || self.distance_km < 0.0 {
            return Err(PshaError::Configuration(
                gmm_error("distance_invalid", "distance must be finite and non-negative")
                    .with_context("distance_km", self.distance_km),
            ));
        }
        if !self.vs30.is_finite() || self.vs30 <= 0.0 {
            return Err(PshaError::Configuration(
                gmm_error("vs30_invalid", "Vs30 must be positive and finite")
                    .with_context("vs30", self.vs30),
            ));
        }
        Ok(())
    }
}

/// Predicted log-intensity distribution for one rupture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GmmPrediction {
    /// Natural-log mean intensity.
    pub log_mean: f64,
    /// Between-event standard deviation.
    pub tau: f64,
    /// Within-event standard deviation.
    pub phi: f64,
    /// Total standard deviation, `sqrt(tau² + phi²)`.
    pub sigma: f64,
}

impl GmmPrediction {
    /// Builds a prediction combining the two variability components.
    pub fn new(log_mean: f64, tau: f64, phi: f64) -> Self {
        Self {
            log_mean,
            tau,
            phi,
            sigma: tau.hypot(phi),
        }
    }

    /// Median intensity, `exp(log_mean)`.
    pub fn median(&self) -> f64 {
        self.log_mean.exp()
    }
}

/// Capability shared by every ground-motion prediction equation.
pub trait GroundMotionPredictor: Send + Sync {
    /// Intensity measure types the model supports.
    fn supported_imts(&self) -> &'static [Imt];

    /// Predicts the log-intensity distribution for a validated context.
    fn predict(&self, ctx: &GmmContext, imt: Imt) -> GmmPrediction;
}

/// Ground-motion models available to the hazard engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroundMotionModel {
    /// Akkar, Sandikkaya and Bommer (2014), Joyner-Boore distance.
    #[serde(rename = "ASB14")]
    Asb14,
}

impl GroundMotionModel {
    /// Stable identifier used in configuration files.
    pub fn id(&self) -> &'static str {
        match self {
            GroundMotionModel::Asb14 => "ASB14",
        }
    }

    fn predictor(&self) -> &'static dyn GroundMotionPredictor {
        match self {
            GroundMotionModel::Asb14 => &Asb14,
        }
    }

    /// Evaluates the model for `ctx`.
    pub fn compute(&self, ctx: &GmmContext, imt: Imt) -> Result<GmmPrediction, PshaError> {
        ctx.validate()?;
        let predictor = self.predictor();
        if !predictor.supported_imts().contains(&imt) {
            return Err(PshaError::Configuration(
                gmm_error("imt_unsupported", "intensity measure not supported by the model")
                    .with_context("gmm", self.id())
                    .with_context("imt", imt),
            ));
        }
        Ok(predictor.predict(ctx, imt))
    }
}

impl fmt::Display for GroundMotionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for GroundMotionModel {
    type Err = PshaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASB14" => Ok(GroundMotionModel::Asb14),
            _ => Err(PshaError::Configuration(
                gmm_error("gmm_unknown", "unrecognized ground-motion model")
                    .with_context("gmm", s)
                    .with_hint("available models: ASB14"),
            )),
        }
    }
}
