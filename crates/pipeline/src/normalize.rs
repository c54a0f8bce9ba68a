//! Geometry kind normalization.

use geo_types::{Geometry, MultiLineString, MultiPoint, MultiPolygon};
use tracing::debug;

use catalog::GeoObject;
use feature_table::FeatureTable;
use idera_common::{IderaError, IderaResult};

/// Coerce the table's geometry kind to one the catalog object allows.
///
/// A single-part kind whose multi-part counterpart is allowed is wrapped
/// record by record into one-element multi containers; an already-allowed
/// kind is a no-op. Mixed kinds and kinds outside the allowed families
/// fail without touching the table.
pub fn normalize_geometry(table: &mut FeatureTable, object: &GeoObject) -> IderaResult<()> {
    let kind = match table.uniform_kind()? {
        Some(kind) => kind,
        // Nothing to coerce in an empty table.
        None => return Ok(()),
    };

    let allowed = object.allowed_gis_kinds();
    if allowed.contains(&kind) {
        return Ok(());
    }

    let multi = kind.multi_counterpart();
    if kind.is_multi() || !allowed.contains(&multi) {
        return Err(IderaError::IncompatibleGeometry {
            found: kind,
            allowed,
        });
    }

    let wrapped = table
        .records()
        .iter()
        .map(|record| wrap_in_multi(&record.geometry))
        .collect();
    table.replace_geometries(wrapped)?;

    debug!(object = %object.code, from = %kind, to = %multi, "Wrapped single-part geometries");
    Ok(())
}

/// Wrap a single-part geometry into a one-element multi-part container
/// of the same family.
fn wrap_in_multi(geometry: &Geometry<f64>) -> Geometry<f64> {
    match geometry {
        Geometry::Point(p) => Geometry::MultiPoint(MultiPoint::new(vec![*p])),
        Geometry::LineString(l) => {
            Geometry::MultiLineString(MultiLineString::new(vec![l.clone()]))
        }
        Geometry::Polygon(p) => Geometry::MultiPolygon(MultiPolygon::new(vec![p.clone()])),
        other => other.clone(),
    }
}
