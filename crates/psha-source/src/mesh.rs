use psha_core::errors::{ErrorInfo, PshaError, Stage};
use psha_core::geodesy::destination_point;
use psha_core::Coordinate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fault::FaultSource;
use crate::mfd::MagnitudeFrequencyModel;
use crate::scaling::ScalingTable;

fn mesh_error(code: &str, message: impl Into<String>) -> ErrorInfo {
    ErrorInfo::new(code, message).at(Stage::Mesh)
}

/// Candidate rupture placed on the fault trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rupture {
    /// Row index across the whole mesh.
    pub id: usize,
    /// Index of the magnitude bin the rupture belongs to.
    pub bin_index: usize,
    /// Magnitude of the bin.
    pub magnitude: f64,
    /// Rupture length in km.
    pub length_km: f64,
    /// Along-strike distance from the first trace vertex to the start point.
    pub offset_km: f64,
    /// Starting coordinate.
    pub start: Coordinate,
    /// Ending coordinate.
    pub end: Coordinate,
    /// Probability mass of the magnitude bin, P(M=m).
    pub p_magnitude: f64,
    /// Location probability within the bin, P(R=r|m).
    pub p_location: f64,
}

/// Every candidate rupture across all magnitude bins, in magnitude-axis order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuptureMesh {
    /// Spacing between consecutive start offsets in km.
    pub mesh_spacing_km: f64,
    /// Ruptures ordered by bin, then by offset.
    pub ruptures: Vec<Rupture>,
}

impl RuptureMesh {
    /// Number of ruptures generated for each magnitude bin.
    pub fn bin_counts(&self) -> Vec<(usize, usize)> {
        let mut counts: Vec<(usize, usize)> = Vec::new();
        for rupture in &self.ruptures {
            match counts.last_mut() {
                Some((bin, count)) if *bin == rupture.bin_index => *count += 1,
                _ => counts.push((rupture.bin_index, 1)),
            }
        }
        counts
    }

    /// Ruptures belonging to `bin_index`.
    pub fn bin(&self, bin_index: usize) -> impl Iterator<Item = &Rupture> + '_ {
        self.ruptures
            .iter()
            .filter(move |rupture| rupture.bin_index == bin_index)
    }

    /// Number of ruptures in the mesh.
    pub fn len(&self) -> usize {
        self.ruptures.len()
    }

    /// Returns true when the mesh holds no ruptures.
    pub fn is_empty(&self) -> bool {
        self.ruptures.is_empty()
    }
}

/// Start offsets of every rupture of `rupture_length` that fits on the fault.
///
/// Offsets step by `spacing` from zero while the rupture stays on the trace,
/// then the grid is shifted by half of the unruptured remainder so the
/// ruptures sit symmetrically about the fault midpoint. Returns an empty grid
/// when the rupture is at least as long as the fault.
pub fn start_offsets(fault_length: f64, rupture_length: f64, spacing: f64) -> Vec<f64> {
    if rupture_length >= fault_length {
        return Vec::new();
    }
    let slack = fault_length - rupture_length;
    let steps = (slack / spacing + 1e-9).floor() as usize;
    let last = steps as f64 * spacing;
    let shift = ((slack - last) / 2.0).max(0.0);
    (0..=steps).map(|k| k as f64 * spacing + shift).collect()
}

/// Places every candidate rupture for every magnitude bin.
///
/// A bin whose grid is empty gets a single rupture spanning the whole fault.
pub fn generate_ruptures(
    fault: &FaultSource,
    mfd: &MagnitudeFrequencyModel,
    scaling: &ScalingTable,
    mesh_spacing_km: f64,
) -> Result<RuptureMesh, PshaError> {
    if !mesh_spacing_km.is_finite() || mesh_spacing_km <= 0.0 {
        return Err(PshaError::Configuration(
            mesh_error("mesh_spacing_invalid", "mesh spacing must be positive")
                .with_context("mesh_spacing_km", mesh_spacing_km),
        ));
    }
    if scaling.entries.len() != mfd.bins.len() {
        return Err(PshaError::Configuration(
            mesh_error(
                "scaling_axis_mismatch",
                "scaling table does not match the magnitude axis",
            )
            .with_context("bins", mfd.bins.len())
            .with_context("entries", scaling.entries.len()),
        ));
    }
    let strike = fault.line_strike()?;
    let origin = fault.origin();
    let fault_length = fault.length_km;

    let mut ruptures = Vec::new();
    for (bin, dims) in mfd.bins.iter().zip(&scaling.entries) {
        let mut offsets = start_offsets(fault_length, dims.length_km, mesh_spacing_km);
        let length_km = if offsets.is_empty() {
            offsets.push(0.0);
            fault_length
        } else {
            dims.length_km
        };
        let p_location = 1.0 / offsets.len() as f64;

        for offset_km in offsets {
            let start = destination_point(origin, strike, offset_km);
            let end = destination_point(origin, strike, offset_km + length_km);
            ruptures.push(Rupture {
                id: ruptures.len(),
                bin_index: bin.index,
                magnitude: bin.magnitude,
                length_km,
                offset_km,
                start,
                end,
                p_magnitude: bin.pmf,
                p_location,
            });
        }
    }

    debug!(
        ruptures = ruptures.len(),
        mesh_spacing_km, fault_length, "rupture mesh generated"
    );
    Ok(RuptureMesh {
        mesh_spacing_km,
        ruptures,
    })
}
