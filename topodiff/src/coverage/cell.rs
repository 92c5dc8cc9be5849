//! Point to hex cell mapping with explicit input validation.

use h3o::{CellIndex, LatLng, Resolution};

use super::CoverageError;
use crate::geometry::GeoPoint;

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;
/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;
/// Minimum valid longitude in degrees.
pub const MIN_LON: f64 = -180.0;
/// Maximum valid longitude in degrees.
pub const MAX_LON: f64 = 180.0;

/// Maps a geographic point to its containing cell.
///
/// # Arguments
///
/// * `point` - Position in WGS84 degrees
/// * `resolution` - H3 resolution of the target cell
///
/// # Returns
///
/// The containing cell, or an error when the point lies outside the
/// WGS84 domain. Non-finite coordinates fail the range check as well.
#[inline]
pub fn cell_at(point: GeoPoint, resolution: Resolution) -> Result<CellIndex, CoverageError> {
    if !(MIN_LAT..=MAX_LAT).contains(&point.lat) || !(MIN_LON..=MAX_LON).contains(&point.lon) {
        return Err(CoverageError::InvalidCoordinate {
            lon: point.lon,
            lat: point.lat,
        });
    }

    let position = LatLng::new(point.lat, point.lon).map_err(|_| {
        CoverageError::InvalidCoordinate {
            lon: point.lon,
            lat: point.lat,
        }
    })?;
    Ok(position.to_cell(resolution))
}
