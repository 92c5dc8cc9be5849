//! Overpass QL query construction.

use crate::config::{Region, Theme};

/// Server-side timeout requested in the query header.
pub const QUERY_TIMEOUT_SECS: u32 = 25;

/// Builds the way query for one (theme, region) unit.
///
/// The query scopes the search to the administrative area tagged with
/// the region's TERYT code, selects ways matching the theme filter and
/// converts them so every element carries its geometry inline.
pub fn way_query(theme: &Theme, region: &Region) -> String {
    format!(
        "[out:json][timeout:{timeout}];\n\
         area[\"teryt:terc\"=\"{teryt}\"]->.searchArea;\n\
         way[{filter}](area.searchArea);\n\
         convert item ::=::,::geom=geom(),_osm_type=type();\n\
         out geom;",
        timeout = QUERY_TIMEOUT_SECS,
        teryt = region.teryt,
        filter = theme.overpass_filter,
    )
}
