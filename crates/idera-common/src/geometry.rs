//! Geometry kind enumerations.
//!
//! The catalog declares geometry constraints in terms of three abstract
//! kinds (point, line, polygon); GIS data carries one of six concrete
//! kinds. Normalization bridges the two by expanding each abstract kind
//! into its single-part + multi-part pair.

use geo_types::Geometry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Abstract geometry kind as declared in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbstractKind {
    Point,
    Line,
    Polygon,
}

impl AbstractKind {
    /// Expand into the concrete single-part + multi-part pair.
    pub fn expand(&self) -> [GisKind; 2] {
        match self {
            AbstractKind::Point => [GisKind::Point, GisKind::MultiPoint],
            AbstractKind::Line => [GisKind::LineString, GisKind::MultiLineString],
            AbstractKind::Polygon => [GisKind::Polygon, GisKind::MultiPolygon],
        }
    }
}

impl fmt::Display for AbstractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AbstractKind::Point => "point",
            AbstractKind::Line => "line",
            AbstractKind::Polygon => "polygon",
        };
        write!(f, "{}", name)
    }
}

/// Concrete GIS geometry kind, matching GeoJSON type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GisKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
}

impl GisKind {
    /// Kind of a concrete geometry value.
    ///
    /// Returns `None` for kinds that never occur in a feature table
    /// (collections and the geo-types primitives Line/Rect/Triangle).
    pub fn of(geometry: &Geometry<f64>) -> Option<GisKind> {
        match geometry {
            Geometry::Point(_) => Some(GisKind::Point),
            Geometry::MultiPoint(_) => Some(GisKind::MultiPoint),
            Geometry::LineString(_) => Some(GisKind::LineString),
            Geometry::MultiLineString(_) => Some(GisKind::MultiLineString),
            Geometry::Polygon(_) => Some(GisKind::Polygon),
            Geometry::MultiPolygon(_) => Some(GisKind::MultiPolygon),
            _ => None,
        }
    }

    /// Whether this is a multi-part kind.
    pub fn is_multi(&self) -> bool {
        matches!(
            self,
            GisKind::MultiPoint | GisKind::MultiLineString | GisKind::MultiPolygon
        )
    }

    /// The multi-part counterpart of a single-part kind (identity on
    /// multi-part kinds).
    pub fn multi_counterpart(&self) -> GisKind {
        match self {
            GisKind::Point => GisKind::MultiPoint,
            GisKind::LineString => GisKind::MultiLineString,
            GisKind::Polygon => GisKind::MultiPolygon,
            other => *other,
        }
    }

    /// The abstract family this kind belongs to.
    pub fn family(&self) -> AbstractKind {
        match self {
            GisKind::Point | GisKind::MultiPoint => AbstractKind::Point,
            GisKind::LineString | GisKind::MultiLineString => AbstractKind::Line,
            GisKind::Polygon | GisKind::MultiPolygon => AbstractKind::Polygon,
        }
    }
}

impl fmt::Display for GisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Variant names match the GeoJSON spelling exactly.
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{point, Geometry};

    #[test]
    fn test_expand_abstract_kinds() {
        assert_eq!(
            AbstractKind::Line.expand(),
            [GisKind::LineString, GisKind::MultiLineString]
        );
    }

    #[test]
    fn test_kind_of_geometry() {
        let geom = Geometry::Point(point!(x: 1.0, y: 2.0));
        assert_eq!(GisKind::of(&geom), Some(GisKind::Point));
    }

    #[test]
    fn test_multi_counterpart() {
        assert_eq!(GisKind::Point.multi_counterpart(), GisKind::MultiPoint);
        assert_eq!(
            GisKind::MultiPolygon.multi_counterpart(),
            GisKind::MultiPolygon
        );
    }

    #[test]
    fn test_display_matches_geojson_names() {
        assert_eq!(GisKind::MultiLineString.to_string(), "MultiLineString");
    }
}
