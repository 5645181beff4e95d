use psha_core::errors::{ErrorInfo, PshaError, Stage};
use psha_core::geodesy::{haversine_distance, normalize_longitude};
use psha_core::{Coordinate, Site};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::mesh::{Rupture, RuptureMesh};

/// Rupture annotated with its closest approach to the site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocatedRupture {
    /// Underlying rupture.
    pub rupture: Rupture,
    /// Point on the rupture closest to the site.
    pub closest_point: Coordinate,
    /// Great-circle distance from the site to `closest_point`, in km.
    pub distance_km: f64,
}

/// Longitude of `lon` shifted by whole turns to lie within 180° of `reference`.
fn unwrap_longitude(lon: f64, reference: f64) -> f64 {
    let delta = lon - reference;
    if delta > 180.0 {
        lon - 360.0
    } else if delta < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}

/// Point of the segment `start`..`end` closest to `site`.
///
/// The site is projected onto the segment in a local equirectangular frame
/// and the projection parameter is clamped to the segment's extent.
/// Longitudes are unwrapped around `start` so segments crossing the
/// antimeridian are interpolated the short way.
pub fn closest_point(
    start: Coordinate,
    end: Coordinate,
    site: Coordinate,
) -> Result<Coordinate, PshaError> {
    let scale = ((start.lat + end.lat) / 2.0).to_radians().cos();
    let (ax, ay) = (start.lon * scale, start.lat);
    let end_lon = unwrap_longitude(end.lon, start.lon);
    let site_lon = unwrap_longitude(site.lon, start.lon);
    let (bx, by) = (end_lon * scale, end.lat);
    let (px, py) = (site_lon * scale, site.lat);

    let (dx, dy) = (bx - ax, by - ay);
    let length_sq = dx * dx + dy * dy;
    if length_sq <= f64::EPSILON * f64::EPSILON {
        return Err(PshaError::Domain(
            ErrorInfo::new("segment_degenerate", "rupture endpoints coincide")
                .at(Stage::Distance)
                .with_context("start", start)
                .with_context("end", end),
        ));
    }
    let t = (((px - ax) * dx + (py - ay) * dy) / length_sq).clamp(0.0, 1.0);
    Ok(Coordinate {
        lat: start.lat + t * (end.lat - start.lat),
        lon: normalize_longitude(start.lon + t * (end_lon - start.lon)),
    })
}

/// Closest-approach distance in km from `site` to the segment `start`..`end`.
pub fn closest_distance(
    start: Coordinate,
    end: Coordinate,
    site: Coordinate,
) -> Result<f64, PshaError> {
    let nearest = closest_point(start, end, site)?;
    Ok(haversine_distance(site, nearest))
}

/// Annotates every rupture of `mesh` with its distance to `site`.
pub fn locate_ruptures(mesh: &RuptureMesh, site: &Site) -> Result<Vec<LocatedRupture>, PshaError> {
    let located = mesh
        .ruptures
        .iter()
        .map(|rupture| -> Result<LocatedRupture, PshaError> {
            let closest_point = closest_point(rupture.start, rupture.end, site.location)
                .map_err(|err| with_rupture_context(err, rupture.id))?;
            Ok(LocatedRupture {
                rupture: *rupture,
                closest_point,
                distance_km: haversine_distance(site.location, closest_point),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(nearest) = located
        .iter()
        .map(|entry| entry.distance_km)
        .min_by(f64::total_cmp)
    {
        debug!(ruptures = located.len(), nearest_km = nearest, "distances evaluated");
    }
    Ok(located)
}

fn with_rupture_context(err: PshaError, id: usize) -> PshaError {
    match err {
        PshaError::Domain(info) => PshaError::Domain(info.with_context("rupture", id)),
        other => other,
    }
}
