//! Built-in thematic layers.
//!
//! Each theme pairs an Overpass way filter with the BDOT10k layer that
//! carries the corresponding features. The table is fixed at compile
//! time; callers select from it and pass themes around by reference.

/// A thematic layer to diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Short name used in artifact file names and logs.
    pub name: &'static str,
    /// Filter placed inside the Overpass `way[...]` selector.
    pub overpass_filter: &'static str,
    /// BDOT10k layer key (part of the extracted layer file name).
    pub bdot_layer: &'static str,
}

impl Theme {
    const fn new(
        name: &'static str,
        overpass_filter: &'static str,
        bdot_layer: &'static str,
    ) -> Self {
        Self {
            name,
            overpass_filter,
            bdot_layer,
        }
    }
}

const THEMES: [Theme; 4] = [
    Theme::new(
        "roads",
        "\"highway\"~\"(service|primary|secondary|tertiary|motorway|residential|unclassified\
         |living_street|trunk|trunk_link|primary_link|secondary_link|tertiary_link\
         |motorway_link|pedestrian|track)\"",
        "OT_SKJZ_L",
    ),
    // TODO: narrow the OIKM layer to RODZAJ="ekran akustyczny"; it also
    // carries other engineering structures.
    Theme::new("noise_barriers", "wall=noise_barrier", "OT_OIKM_L"),
    Theme::new("powerlines", "power~\"(line|minor_line)\"", "OT_SULN_L"),
    Theme::new(
        "footways",
        "\"highway\"~\"(footway|path|service|track|pedestrian)\"",
        "OT_SKRP_L",
    ),
];

/// Returns the built-in theme table.
pub fn themes() -> &'static [Theme] {
    &THEMES
}

/// Looks up a theme by its short name.
pub fn theme_by_name(name: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|theme| theme.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_four_themes() {
        assert_eq!(themes().len(), 4);
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = themes().iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), themes().len());
    }

    #[test]
    fn test_lookup_by_name() {
        let roads = theme_by_name("roads").expect("roads theme exists");
        assert_eq!(roads.bdot_layer, "OT_SKJZ_L");
        assert!(roads.overpass_filter.contains("motorway"));

        assert!(theme_by_name("waterways").is_none());
    }

    #[test]
    fn test_every_theme_is_complete() {
        for theme in themes() {
            assert!(!theme.name.is_empty());
            assert!(!theme.overpass_filter.is_empty());
            assert!(theme.bdot_layer.starts_with("OT_"));
            assert!(theme.bdot_layer.ends_with("_L"));
        }
    }
}
