use std::collections::BTreeMap;

use chrono::Utc;
use psha_core::errors::PshaError;
use psha_core::provenance::{RunProvenance, SchemaVersion};
use psha_core::Site;
use psha_gmm::{GroundMotionModel, Imt};
use serde::{Deserialize, Serialize};

use crate::curve::HazardCurve;
use crate::hash::stable_hash_string;
use crate::pipeline::{HazardInputs, HazardRun};

/// Summary of a hazard run with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardReport {
    /// Schema of this payload.
    pub schema_version: SchemaVersion,
    /// Hashes, timestamp and tool versions.
    pub provenance: RunProvenance,
    /// Ground-motion model used.
    pub gmm: GroundMotionModel,
    /// Intensity measure of the curve.
    pub imt: Imt,
    /// Site of interest.
    pub site: Site,
    /// Annual rate of events above the minimum magnitude.
    pub source_rate: f64,
    /// Number of magnitude bins.
    pub bin_count: usize,
    /// Number of ruptures integrated.
    pub rupture_count: usize,
    /// Fault trace length in km.
    pub fault_length_km: f64,
    /// Hazard curve.
    pub curve: HazardCurve,
}

impl HazardReport {
    /// Assembles the report for `run`, hashing the inputs and rupture table.
    pub fn new(inputs: &HazardInputs, run: &HazardRun) -> Result<Self, PshaError> {
        Ok(Self {
            schema_version: SchemaVersion::default(),
            provenance: provenance(inputs, run)?,
            gmm: inputs.gmm,
            imt: inputs.imt,
            site: inputs.site,
            source_rate: run.mfd.source_rate,
            bin_count: run.mfd.bins.len(),
            rupture_count: run.table.len(),
            fault_length_km: run.fault.length_km,
            curve: run.curve.clone(),
        })
    }
}

fn provenance(inputs: &HazardInputs, run: &HazardRun) -> Result<RunProvenance, PshaError> {
    let mut versions = BTreeMap::new();
    versions.insert(
        "psha-hazard".to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    );
    Ok(RunProvenance {
        input_hash: stable_hash_string(inputs)?,
        rupture_hash: stable_hash_string(&run.table)?,
        created_at: Utc::now().to_rfc3339(),
        tool_versions: versions,
    })
}
