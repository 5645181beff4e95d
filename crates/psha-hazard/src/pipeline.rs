use psha_core::errors::PshaError;
use psha_core::Site;
use psha_gmm::{GroundMotionModel, Imt};
use psha_source::{
    generate_ruptures, locate_ruptures, FaultSource, FaultSpec, MagnitudeFrequencyModel, MfdParams,
    ScalingTable,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::curve::HazardCurve;
use crate::integrate::{integrate_hazard, validate_thresholds};
use crate::table::RuptureTable;

/// Validated arguments of a hazard computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardInputs {
    /// Causative fault.
    pub fault: FaultSpec,
    /// Magnitude recurrence parameters.
    pub recurrence: MfdParams,
    /// Site of interest.
    pub site: Site,
    /// Spacing between rupture start offsets in km.
    pub mesh_spacing_km: f64,
    /// Rupture aspect ratio (length / width).
    pub aspect_ratio: f64,
    /// Ground-motion model.
    pub gmm: GroundMotionModel,
    /// Intensity measure type.
    pub imt: Imt,
    /// Ascending intensity thresholds.
    pub thresholds: Vec<f64>,
}

/// Every intermediate artifact of a hazard run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardRun {
    /// Characterized fault.
    pub fault: FaultSource,
    /// Magnitude-frequency model with its source rate.
    pub mfd: MagnitudeFrequencyModel,
    /// Rupture lengths per magnitude.
    pub scaling: ScalingTable,
    /// Rupture table with ground-motion predictions.
    pub table: RuptureTable,
    /// Hazard curve.
    pub curve: HazardCurve,
}

/// Runs every stage in order and keeps the intermediate artifacts.
#[instrument(
    skip(inputs),
    fields(gmm = %inputs.gmm, imt = %inputs.imt, thresholds = inputs.thresholds.len())
)]
pub fn run_hazard(inputs: &HazardInputs) -> Result<HazardRun, PshaError> {
    validate_thresholds(&inputs.thresholds)?;
    let fault = FaultSource::characterize(&inputs.fault)?;
    let mfd = MagnitudeFrequencyModel::doubly_bounded(inputs.recurrence)?;
    let scaling = ScalingTable::leonard_2014(&fault, &mfd, inputs.aspect_ratio)?;
    let mesh = generate_ruptures(&fault, &mfd, &scaling, inputs.mesh_spacing_km)?;
    let located = locate_ruptures(&mesh, &inputs.site)?;
    let table = RuptureTable::evaluate(
        &located,
        fault.rake_deg,
        inputs.site.vs30,
        inputs.gmm,
        inputs.imt,
    )?;
    let curve = integrate_hazard(&table, mfd.source_rate, &inputs.thresholds)?;

    info!(
        fault_length_km = fault.length_km,
        mechanism = fault.mechanism.as_str(),
        bins = mfd.bins.len(),
        ruptures = table.len(),
        source_rate = mfd.source_rate,
        "hazard curve computed"
    );
    Ok(HazardRun {
        fault,
        mfd,
        scaling,
        table,
        curve,
    })
}

/// Computes the rupture table and hazard curve for `inputs`.
pub fn compute_hazard(inputs: &HazardInputs) -> Result<(RuptureTable, HazardCurve), PshaError> {
    let run = run_hazard(inputs)?;
    Ok((run.table, run.curve))
}
