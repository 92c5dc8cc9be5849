//! Hex cell coverage for line geometries.
//!
//! Maps WGS84 polylines onto the H3 grid at a fixed resolution: each
//! segment is rasterized into the minimal covering cell set, segment
//! sets are unioned, and the result can be dilated by a k-ring radius
//! to absorb positional drift between datasets.

mod cell;
mod rasterize;
mod set;

pub use cell::{cell_at, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
pub use rasterize::{segment_cells, MAX_BISECTION_DEPTH, MAX_BISECTION_STEPS};
pub use set::CoverageSet;

use h3o::{CellIndex, Resolution};
use thiserror::Error;

use crate::geometry::GeoPoint;

/// Errors that can occur while building coverage.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoverageError {
    /// Coordinate outside the WGS84 domain.
    #[error("coordinate out of range: lon {lon}, lat {lat}")]
    InvalidCoordinate { lon: f64, lat: f64 },

    /// Segment endpoints are more than 180 degrees of longitude apart.
    #[error("segment spans the antimeridian: lon {start_lon} to {end_lon}")]
    AntimeridianSpan { start_lon: f64, end_lon: f64 },

    /// Segment bisection did not converge within the work bounds.
    #[error("segment bisection exceeded limits (depth {depth}, steps {steps})")]
    BisectionLimit { depth: u32, steps: usize },
}

/// Expands a cell to its neighborhood of grid distance `radius` or less.
///
/// The result always contains the cell itself; radius 0 is the identity.
#[inline]
pub fn expand_cell(cell: CellIndex, radius: u32) -> Vec<CellIndex> {
    cell.grid_disk::<Vec<_>>(radius)
}

/// Builds the dilated cell coverage of a polyline.
///
/// Consecutive point pairs are rasterized independently and unioned, so
/// the result does not depend on traversal direction. With `dilation`
/// greater than zero every covered cell is replaced by its k-ring
/// neighborhood.
///
/// # Arguments
///
/// * `points` - Polyline vertices; fewer than two yield an empty set
/// * `dilation` - k-ring radius applied to the covered cells
/// * `resolution` - H3 resolution shared by the whole run
pub fn line_coverage(
    points: &[GeoPoint],
    dilation: u32,
    resolution: Resolution,
) -> Result<CoverageSet, CoverageError> {
    let mut covered = CoverageSet::new();
    for pair in points.windows(2) {
        covered.merge(segment_cells(pair[0], pair[1], resolution)?);
    }

    if dilation == 0 {
        return Ok(covered);
    }

    let mut dilated = CoverageSet::new();
    for cell in covered.iter() {
        dilated.extend(expand_cell(cell, dilation));
    }
    Ok(dilated)
}
