#![deny(missing_docs)]
#![doc = "Hazard integration for a single line source: configuration, the end-to-end pipeline, and canonical artifacts."]

/// Application configuration and its conversion into pipeline inputs.
pub mod config;
/// Hazard curve artifact.
pub mod curve;
/// CSV and JSON artifact writers.
pub mod export;
/// Canonical hashing helpers.
pub mod hash;
/// Total-probability integration over the rupture table.
pub mod integrate;
/// End-to-end hazard computation.
pub mod pipeline;
/// Report assembly with provenance.
pub mod report;
/// Canonical JSON and YAML serde helpers.
pub mod serde;
/// Rupture table annotated with ground-motion predictions.
pub mod table;

pub use config::{
    load_config, FaultConfig, HazardConfig, LogSpace, RecurrenceConfig, SiteConfig, ThresholdSpec,
};
pub use curve::{HazardCurve, HazardPoint};
pub use export::{write_artifacts, write_canonical_json, write_rupture_csv, ArtifactPaths};
pub use integrate::{exceedance_probability, integrate_hazard, validate_thresholds};
pub use pipeline::{compute_hazard, run_hazard, HazardInputs, HazardRun};
pub use report::HazardReport;
pub use table::{RuptureRow, RuptureTable};
