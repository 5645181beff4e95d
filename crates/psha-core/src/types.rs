use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, PshaError, Stage};

fn coordinate_error(code: &str, message: impl Into<String>) -> PshaError {
    PshaError::Domain(ErrorInfo::new(code, message).at(Stage::Geodesy))
}

/// Geographic position in decimal degrees.
///
/// Serialized as a `[latitude, longitude]` pair, which is also the layout
/// accepted from configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
pub struct Coordinate {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lon: f64,
}

impl Coordinate {
    /// Creates a validated coordinate.
    pub fn new(lat: f64, lon: f64) -> Result<Self, PshaError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(coordinate_error(
                "coordinate_non_finite",
                "latitude and longitude must be finite",
            ));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(PshaError::Domain(
                ErrorInfo::new("latitude_out_of_range", "latitude must lie within [-90, 90]")
                    .at(Stage::Geodesy)
                    .with_context("lat", lat),
            ));
        }
        Ok(Self { lat, lon })
    }

    /// Builds a coordinate from a `[lat, lon]` slice.
    pub fn from_slice(pair: &[f64]) -> Result<Self, PshaError> {
        match pair {
            [lat, lon] => Self::new(*lat, *lon),
            _ => Err(PshaError::Domain(
                ErrorInfo::new(
                    "coordinate_malformed",
                    "coordinate must have exactly two components",
                )
                .at(Stage::Geodesy)
                .with_context("components", pair.len()),
            )),
        }
    }

    /// Returns the coordinate converted to radians as `(lat, lon)`.
    pub fn to_radians(&self) -> (f64, f64) {
        (self.lat.to_radians(), self.lon.to_radians())
    }
}

impl TryFrom<Vec<f64>> for Coordinate {
    type Error = PshaError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_slice(&value)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(value: Coordinate) -> Self {
        [value.lat, value.lon]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// Fixed site at which the hazard is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Site location.
    pub location: Coordinate,
    /// Time-averaged shear-wave velocity of the upper 30 m, in m/s.
    pub vs30: f64,
}

impl Site {
    /// Creates a site after checking that `vs30` is positive and finite.
    pub fn new(location: Coordinate, vs30: f64) -> Result<Self, PshaError> {
        if !vs30.is_finite() || vs30 <= 0.0 {
            return Err(PshaError::Configuration(
                ErrorInfo::new("vs30_invalid", "Vs30 must be positive and finite")
                    .at(Stage::Config)
                    .with_context("vs30", vs30),
            ));
        }
        Ok(Self { location, vs30 })
    }
}
