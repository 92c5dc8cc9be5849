//! Geometry model shared by both data sources.
//!
//! Incoming GeoJSON is reduced to a closed set of variants so every
//! downstream consumer can match exhaustively. Only line strings are
//! diffed; everything else keeps its original type tag for diagnostics.

use geojson::{JsonObject, Value};

/// A geographic position in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Longitude in degrees (-180.0 to 180.0).
    pub lon: f64,
    /// Latitude in degrees (-90.0 to 90.0).
    pub lat: f64,
}

impl GeoPoint {
    /// Creates a new point from longitude and latitude in degrees.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Builds a point from a GeoJSON position array (`[lon, lat, ...]`).
    ///
    /// Returns `None` when the array has fewer than two elements or
    /// contains non-finite values. Elevation and further members are
    /// ignored.
    pub fn from_position(position: &[f64]) -> Option<Self> {
        let (&lon, &lat) = (position.first()?, position.get(1)?);
        if !lon.is_finite() || !lat.is_finite() {
            return None;
        }
        Some(Self { lon, lat })
    }
}

/// Geometry of a single source feature.
///
/// `Line` is the only variant that participates in coverage matching and
/// is guaranteed to hold at least two points. Structurally unusable line
/// strings (fewer than two points, non-finite coordinates) are folded
/// into `Other` together with all geometry types the diff does not
/// handle.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A line string with two or more positions.
    Line(Vec<GeoPoint>),
    /// A single position.
    Point,
    /// A polygon ring set.
    Polygon,
    /// Anything else, carrying a tag describing what was found.
    Other(String),
}

impl Geometry {
    /// Classifies a GeoJSON geometry into the closed variant set.
    pub fn from_geojson(geometry: &geojson::Geometry) -> Self {
        match &geometry.value {
            Value::LineString(positions) => Self::line_from_positions(positions),
            Value::Point(_) => Geometry::Point,
            Value::Polygon(_) => Geometry::Polygon,
            Value::MultiPoint(_) => Geometry::Other("MultiPoint".to_string()),
            Value::MultiLineString(_) => Geometry::Other("MultiLineString".to_string()),
            Value::MultiPolygon(_) => Geometry::Other("MultiPolygon".to_string()),
            Value::GeometryCollection(_) => Geometry::Other("GeometryCollection".to_string()),
        }
    }

    fn line_from_positions(positions: &[Vec<f64>]) -> Self {
        if positions.len() < 2 {
            return Geometry::Other("degenerate LineString".to_string());
        }
        let mut points = Vec::with_capacity(positions.len());
        for position in positions {
            match GeoPoint::from_position(position) {
                Some(point) => points.push(point),
                None => {
                    return Geometry::Other("LineString with malformed coordinates".to_string())
                }
            }
        }
        Geometry::Line(points)
    }

    /// Returns the GeoJSON type tag for diagnostics.
    pub fn type_tag(&self) -> &str {
        match self {
            Geometry::Line(_) => "LineString",
            Geometry::Point => "Point",
            Geometry::Polygon => "Polygon",
            Geometry::Other(tag) => tag,
        }
    }

    /// True for geometries that can be rasterized and matched.
    pub fn is_line(&self) -> bool {
        matches!(self, Geometry::Line(_))
    }

    /// Converts back to GeoJSON for artifact output.
    ///
    /// Only lines survive the round trip; other variants return `None`.
    pub fn to_geojson(&self) -> Option<geojson::Geometry> {
        match self {
            Geometry::Line(points) => {
                let positions = points.iter().map(|p| vec![p.lon, p.lat]).collect();
                Some(geojson::Geometry::new(Value::LineString(positions)))
            }
            _ => None,
        }
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry::Other("missing geometry".to_string())
    }
}

/// A source feature: classified geometry plus its attribute map.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: JsonObject,
}

impl Feature {
    /// Builds a feature from a GeoJSON feature, consuming it.
    ///
    /// A feature without a geometry member is kept, with its geometry
    /// classified as unusable, so it still shows up in diagnostics.
    pub fn from_geojson(feature: geojson::Feature) -> Self {
        let geometry = feature
            .geometry
            .as_ref()
            .map(Geometry::from_geojson)
            .unwrap_or_default();
        Self {
            geometry,
            properties: feature.properties.unwrap_or_default(),
        }
    }

    /// Converts back to a GeoJSON feature for artifact output.
    ///
    /// Returns `None` for features whose geometry cannot be represented
    /// (only lines are written to artifacts).
    pub fn to_geojson(&self) -> Option<geojson::Feature> {
        let geometry = self.geometry.to_geojson()?;
        Some(geojson::Feature {
            bbox: None,
            geometry: Some(geometry),
            id: None,
            properties: Some(self.properties.clone()),
            foreign_members: None,
        })
    }
}
