#![deny(missing_docs)]
#![doc = "Fault characterization, doubly-bounded Gutenberg-Richter recurrence, magnitude-area scaling, rupture meshing and closest-distance evaluation for a single line source."]

/// Closest-approach distance from the site to each rupture.
pub mod distance;
/// Fault geometry and mechanism characterization.
pub mod fault;
/// Rupture placement along the fault trace.
pub mod mesh;
/// Doubly-bounded Gutenberg-Richter magnitude-frequency model.
pub mod mfd;
/// Magnitude to rupture-length scaling.
pub mod scaling;

pub use distance::{closest_distance, closest_point, locate_ruptures, LocatedRupture};
pub use fault::{normalize_rake, FaultSource, FaultSpec, Mechanism, SourceType};
pub use mesh::{generate_ruptures, start_offsets, Rupture, RuptureMesh};
pub use mfd::{MagnitudeBin, MagnitudeFrequencyModel, MfdParams, DEFAULT_MAGNITUDE_BIN};
pub use scaling::{
    rupture_area_km2, top_of_rupture_depth_km, RuptureDimensions, ScalingTable,
    DEFAULT_ASPECT_RATIO,
};
