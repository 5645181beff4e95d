use psha_core::errors::PshaError;
use psha_gmm::{GmmContext, GroundMotionModel, Imt};
use psha_source::LocatedRupture;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Flat record describing one rupture and its ground-motion prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuptureRow {
    /// Rupture identifier, equal to the row index.
    pub rupture_id: usize,
    /// Magnitude bin index.
    pub bin_index: usize,
    /// Moment magnitude.
    pub magnitude: f64,
    /// P(M=m).
    pub p_magnitude: f64,
    /// P(R=r|m).
    pub p_location: f64,
    /// Start latitude.
    pub start_lat: f64,
    /// Start longitude.
    pub start_lon: f64,
    /// End latitude.
    pub end_lat: f64,
    /// End longitude.
    pub end_lon: f64,
    /// Closest distance to the site in km.
    pub distance_km: f64,
    /// Natural-log mean intensity.
    pub log_mean: f64,
    /// Median intensity, `exp(log_mean)`.
    pub median: f64,
    /// Between-event standard deviation.
    pub tau: f64,
    /// Within-event standard deviation.
    pub phi: f64,
    /// Total standard deviation.
    pub sigma: f64,
    /// Rupture length in km.
    pub length_km: f64,
    /// Along-strike offset of the start point in km.
    pub offset_km: f64,
}

/// Every rupture of the source with its distance and predicted intensity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuptureTable {
    /// Ground-motion model used for the predictions.
    pub gmm: GroundMotionModel,
    /// Intensity measure predicted.
    pub imt: Imt,
    /// Rows in mesh order.
    pub rows: Vec<RuptureRow>,
}

impl RuptureTable {
    /// Evaluates `gmm` for every located rupture.
    ///
    /// Predictions run in parallel and land in mesh order.
    pub fn evaluate(
        located: &[LocatedRupture],
        rake_deg: f64,
        vs30: f64,
        gmm: GroundMotionModel,
        imt: Imt,
    ) -> Result<Self, PshaError> {
        let rows = located
            .par_iter()
            .map(|entry| -> Result<RuptureRow, PshaError> {
                let rupture = &entry.rupture;
                let ctx = GmmContext {
                    magnitude: rupture.magnitude,
                    distance_km: entry.distance_km,
                    rake_deg,
                    vs30,
                };
                let prediction = gmm.compute(&ctx, imt)?;
                Ok(RuptureRow {
                    rupture_id: rupture.id,
                    bin_index: rupture.bin_index,
                    magnitude: rupture.magnitude,
                    p_magnitude: rupture.p_magnitude,
                    p_location: rupture.p_location,
                    start_lat: rupture.start.lat,
                    start_lon: rupture.start.lon,
                    end_lat: rupture.end.lat,
                    end_lon: rupture.end.lon,
                    distance_km: entry.distance_km,
                    log_mean: prediction.log_mean,
                    median: prediction.median(),
                    tau: prediction.tau,
                    phi: prediction.phi,
                    sigma: prediction.sigma,
                    length_km: rupture.length_km,
                    offset_km: rupture.offset_km,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(rows = rows.len(), gmm = %gmm, imt = %imt, "ground motions predicted");
        Ok(Self { gmm, imt, rows })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct magnitudes in axis order.
    pub fn magnitudes(&self) -> Vec<f64> {
        let mut magnitudes: Vec<f64> = Vec::new();
        for row in &self.rows {
            if magnitudes.last() != Some(&row.magnitude) {
                magnitudes.push(row.magnitude);
            }
        }
        magnitudes
    }

    /// Sum of the joint weights `P(M=m) * P(R=r|m)` over all rows.
    pub fn total_weight(&self) -> f64 {
        self.rows
            .iter()
            .map(|row| row.p_magnitude * row.p_location)
            .sum()
    }
}
