//! Built-in administrative regions.
//!
//! Regions are identified by their TERYT code, the national register
//! key the topographic dataset is published under. Codes are kept as
//! strings to preserve leading zeros.

/// An administrative region covered by the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Human-readable name for reports and logs.
    pub name: &'static str,
    /// Four-digit TERYT code (county level).
    pub teryt: &'static str,
}

impl Region {
    const fn new(name: &'static str, teryt: &'static str) -> Self {
        Self { name, teryt }
    }

    /// The two-digit voivodeship prefix of the TERYT code.
    ///
    /// Archives on the geoportal are grouped by this prefix.
    pub fn voivodeship(&self) -> &str {
        &self.teryt[..2]
    }
}

const REGIONS: [Region; 8] = [
    Region::new("Warszawa", "1465"),
    Region::new("Gdańsk", "2261"),
    Region::new("Kraków", "1261"),
    Region::new("Tczew", "2214"),
    Region::new("Inowrocław", "0407"),
    Region::new("Starachowice", "2611"),
    Region::new("Żyrardów", "1438"),
    Region::new("Kutno", "1002"),
];

/// Returns the built-in region table.
pub fn regions() -> &'static [Region] {
    &REGIONS
}

/// Looks up a region by name or TERYT code.
pub fn region_by_name(key: &str) -> Option<&'static Region> {
    REGIONS
        .iter()
        .find(|region| region.name == key || region.teryt == key)
}
