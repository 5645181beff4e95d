#![deny(missing_docs)]
#![doc = "Core error taxonomy, geodesy primitives and shared value types for the single-source PSHA engine."]

pub mod errors;
pub mod geodesy;
pub mod provenance;
mod types;

pub use errors::{ErrorInfo, PshaError, Stage};
pub use geodesy::{
    azimuth, destination_point, haversine_distance, normalize_longitude, EARTH_RADIUS_KM,
};
pub use provenance::{RunProvenance, SchemaVersion};
pub use types::{Coordinate, Site};
