//! Segment rasterization by adaptive bisection.
//!
//! A segment is split at its arithmetic midpoint until the endpoint
//! cells of every piece are equal or hex-adjacent. The split runs over
//! an explicit worklist with hard depth and step bounds, so no input
//! can drive it into unbounded work.

use h3o::Resolution;

use super::cell::cell_at;
use super::{CoverageError, CoverageSet};
use crate::geometry::GeoPoint;

/// Maximum bisection depth for a single segment piece.
///
/// Halving 48 times reduces a whole-globe span below a millimeter, far
/// past the point where both endpoints land in the same cell.
pub const MAX_BISECTION_DEPTH: u32 = 48;

/// Maximum worklist items processed per segment.
pub const MAX_BISECTION_STEPS: usize = 1_000_000;

/// Rasterizes one segment into its minimal covering cell set.
///
/// Identical endpoints produce the single containing cell. Segments
/// whose endpoints are more than 180 degrees of longitude apart are
/// rejected instead of being traced the long way around the globe.
///
/// # Arguments
///
/// * `start` - First endpoint in WGS84 degrees
/// * `end` - Second endpoint in WGS84 degrees
/// * `resolution` - H3 resolution of the covering cells
pub fn segment_cells(
    start: GeoPoint,
    end: GeoPoint,
    resolution: Resolution,
) -> Result<CoverageSet, CoverageError> {
    if (start.lon - end.lon).abs() > 180.0 {
        return Err(CoverageError::AntimeridianSpan {
            start_lon: start.lon,
            end_lon: end.lon,
        });
    }

    let mut cells = CoverageSet::new();
    let mut work = vec![(start, end, 0u32)];
    let mut steps = 0usize;

    while let Some((a, b, depth)) = work.pop() {
        steps += 1;
        if steps > MAX_BISECTION_STEPS {
            return Err(CoverageError::BisectionLimit { depth, steps });
        }

        let cell_a = cell_at(a, resolution)?;
        let cell_b = cell_at(b, resolution)?;

        if cell_a == cell_b {
            cells.insert(cell_a);
            continue;
        }
        // Grid distance can fail for cells far apart; treat that the
        // same as "not adjacent" and keep splitting.
        if matches!(cell_a.grid_distance(cell_b), Ok(1)) {
            cells.insert(cell_a);
            cells.insert(cell_b);
            continue;
        }

        if depth >= MAX_BISECTION_DEPTH {
            return Err(CoverageError::BisectionLimit { depth, steps });
        }
        let midpoint = GeoPoint::new((a.lon + b.lon) / 2.0, (a.lat + b.lat) / 2.0);
        work.push((a, midpoint, depth + 1));
        work.push((midpoint, b, depth + 1));
    }

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use h3o::{CellIndex, LatLng};

    const RES: Resolution = Resolution::Twelve;

    fn cell(point: GeoPoint) -> CellIndex {
        cell_at(point, RES).unwrap()
    }

    fn centroid(cell: CellIndex) -> GeoPoint {
        let position = LatLng::from(cell);
        GeoPoint::new(position.lng(), position.lat())
    }

    #[test]
    fn test_degenerate_segment_yields_single_cell() {
        let point = GeoPoint::new(21.0122, 52.2297);
        let cells = segment_cells(point, point, RES).unwrap();

        assert_eq!(cells.len(), 1);
        assert!(cells.contains(cell(point)));
    }

    #[test]
    fn test_endpoints_in_same_cell_yield_single_cell() {
        let origin = cell(GeoPoint::new(19.94, 50.05));
        let center = centroid(origin);
        // Nudge well below the cell size so both points stay inside.
        let nudged = GeoPoint::new(center.lon + 1e-8, center.lat + 1e-8);

        let cells = segment_cells(center, nudged, RES).unwrap();
        assert_eq!(cells.len(), 1);
        assert!(cells.contains(origin));
    }

    #[test]
    fn test_adjacent_endpoint_cells_yield_exactly_two_cells() {
        let origin = cell(GeoPoint::new(19.94, 50.05));
        let neighbor = origin
            .grid_disk::<Vec<_>>(1)
            .into_iter()
            .find(|c| *c != origin)
            .expect("every cell has neighbors");

        let cells = segment_cells(centroid(origin), centroid(neighbor), RES).unwrap();

        assert_eq!(cells.len(), 2);
        assert!(cells.contains(origin));
        assert!(cells.contains(neighbor));
    }

    #[test]
    fn test_coverage_contains_both_endpoint_cells() {
        let start = GeoPoint::new(21.000, 52.200);
        let end = GeoPoint::new(21.010, 52.205);

        let cells = segment_cells(start, end, RES).unwrap();

        assert!(cells.len() > 2);
        assert!(cells.contains(cell(start)));
        assert!(cells.contains(cell(end)));
    }

    #[test]
    fn test_reversed_segment_has_identical_coverage() {
        let start = GeoPoint::new(18.600, 54.350);
        let end = GeoPoint::new(18.608, 54.353);

        assert_eq!(
            segment_cells(start, end, RES).unwrap(),
            segment_cells(end, start, RES).unwrap()
        );
    }

    #[test]
    fn test_antimeridian_span_rejected() {
        let west = GeoPoint::new(179.9, 1.0);
        let east = GeoPoint::new(-179.9, 1.0);

        let result = segment_cells(west, east, RES);
        assert!(matches!(
            result,
            Err(CoverageError::AntimeridianSpan { .. })
        ));
    }

    #[test]
    fn test_invalid_coordinate_rejected() {
        let result = segment_cells(GeoPoint::new(200.0, 0.0), GeoPoint::new(0.0, 0.0), RES);
        assert!(matches!(
            result,
            Err(CoverageError::InvalidCoordinate { .. })
        ));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_segment_reversal_invariant(
                lon in -170.0..170.0_f64,
                lat in -60.0..60.0_f64,
                dlon in -0.005..0.005_f64,
                dlat in -0.005..0.005_f64,
            ) {
                let a = GeoPoint::new(lon, lat);
                let b = GeoPoint::new(lon + dlon, lat + dlat);

                prop_assert_eq!(
                    segment_cells(a, b, RES).unwrap(),
                    segment_cells(b, a, RES).unwrap()
                );
            }

            #[test]
            fn test_segment_covers_endpoints(
                lon in -170.0..170.0_f64,
                lat in -60.0..60.0_f64,
                dlon in -0.005..0.005_f64,
                dlat in -0.005..0.005_f64,
            ) {
                let a = GeoPoint::new(lon, lat);
                let b = GeoPoint::new(lon + dlon, lat + dlat);

                let cells = segment_cells(a, b, RES).unwrap();
                prop_assert!(cells.contains(cell_at(a, RES).unwrap()));
                prop_assert!(cells.contains(cell_at(b, RES).unwrap()));
            }
        }
    }
}
