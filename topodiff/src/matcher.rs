//! Coverage matching between the two sources.
//!
//! The OSM side is rasterized with one ring of dilation so small
//! digitization offsets between the datasets do not show up as missing
//! features. Candidate BDOT features are rasterized without dilation
//! and count as present as soon as one of their cells falls into the
//! dilated OSM coverage.

use h3o::Resolution;
use tracing::warn;

use crate::coverage::{line_coverage, CoverageSet};
use crate::geometry::{Feature, Geometry};

/// Ring radius applied to the OSM coverage.
pub const AUTHORITATIVE_DILATION: u32 = 1;

/// Result of matching one unit's candidate features.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Candidate features with no overlap in the OSM coverage.
    pub missing: Vec<Feature>,

    /// Candidates that overlapped the OSM coverage.
    pub present: usize,

    /// Candidates skipped because they could not be rasterized.
    pub unsupported: usize,
}

/// Builds the dilated coverage of the OSM ways.
///
/// Ways that are not lines or fail to rasterize are skipped with a
/// warning; a sparse OSM answer only ever makes more BDOT features
/// look missing, never fewer.
pub fn authoritative_coverage(ways: &[Geometry], resolution: Resolution) -> CoverageSet {
    let mut coverage = CoverageSet::new();
    for way in ways {
        match way {
            Geometry::Line(points) => {
                match line_coverage(points, AUTHORITATIVE_DILATION, resolution) {
                    Ok(cells) => coverage.merge(cells),
                    Err(err) => warn!(error = %err, "skipping OSM way"),
                }
            }
            other => warn!(
                geometry = other.type_tag(),
                "skipping non-line OSM geometry"
            ),
        }
    }
    coverage
}

/// Splits candidate features into present and missing against the
/// dilated OSM coverage.
///
/// A feature whose geometry is not a line, or whose line cannot be
/// rasterized, is counted as unsupported and logged rather than
/// failing the unit.
pub fn match_features(
    features: Vec<Feature>,
    authoritative: &CoverageSet,
    resolution: Resolution,
) -> MatchOutcome {
    let mut outcome = MatchOutcome::default();
    for feature in features {
        match &feature.geometry {
            Geometry::Line(points) => match line_coverage(points, 0, resolution) {
                Ok(cells) => {
                    if cells.intersects(authoritative) {
                        outcome.present += 1;
                    } else {
                        outcome.missing.push(feature);
                    }
                }
                Err(err) => {
                    outcome.unsupported += 1;
                    warn!(error = %err, "skipping candidate feature");
                }
            },
            other => {
                outcome.unsupported += 1;
                warn!(
                    geometry = other.type_tag(),
                    "skipping non-line candidate feature"
                );
            }
        }
    }
    outcome
}
