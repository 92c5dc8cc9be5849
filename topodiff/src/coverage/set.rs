//! Deduplicated cell set with the handful of operations matching needs.

use std::collections::HashSet;

use h3o::CellIndex;

/// A set of hex cells covered by one or more geometries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageSet {
    cells: HashSet<CellIndex>,
}

impl CoverageSet {
    /// Creates an empty coverage set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a cell; returns false when it was already covered.
    pub fn insert(&mut self, cell: CellIndex) -> bool {
        self.cells.insert(cell)
    }

    /// True when the cell is covered.
    pub fn contains(&self, cell: CellIndex) -> bool {
        self.cells.contains(&cell)
    }

    /// Absorbs another coverage set.
    pub fn merge(&mut self, other: CoverageSet) {
        if self.cells.is_empty() {
            self.cells = other.cells;
        } else {
            self.cells.extend(other.cells);
        }
    }

    /// True when the two sets share at least one cell.
    ///
    /// Probes the smaller set against the larger one.
    pub fn intersects(&self, other: &CoverageSet) -> bool {
        let (probe, target) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        probe.cells.iter().any(|cell| target.cells.contains(cell))
    }

    /// Number of covered cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when no cell is covered.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over the covered cells in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.cells.iter().copied()
    }
}

impl Extend<CellIndex> for CoverageSet {
    fn extend<I: IntoIterator<Item = CellIndex>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

impl FromIterator<CellIndex> for CoverageSet {
    fn from_iter<I: IntoIterator<Item = CellIndex>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
