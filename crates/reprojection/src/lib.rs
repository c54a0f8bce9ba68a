//! Coordinate reprojection for feature tables.
//!
//! Projection math is delegated to proj4rs; this crate only owns the
//! supported-CRS definition tables and the degree/radian bookkeeping
//! around the library call. A whole-table transform either fully
//! succeeds or leaves the table unchanged.

pub mod defs;

use geo::MapCoords;
use geo_types::{Coord, Geometry};
use proj4rs::proj::Proj;
use tracing::info;

use feature_table::FeatureTable;
use idera_common::{CrsCode, IderaError, IderaResult};

/// Reproject every geometry of the table to the target CRS.
///
/// No-op when the table is already in the target CRS. Fails with
/// `UndefinedCrs` when the source CRS is unknown and with
/// `UnsupportedCrs` when it is outside the definition tables.
pub fn reproject(table: &mut FeatureTable, target: CrsCode) -> IderaResult<()> {
    let source_epsg = table.crs().ok_or(IderaError::UndefinedCrs)?;
    if source_epsg == target.epsg() {
        return Ok(());
    }

    let source = CrsCode::from_epsg(source_epsg)
        .ok_or_else(|| IderaError::UnsupportedCrs(format!("EPSG:{source_epsg}")))?;

    let src_proj = parse_proj(source)?;
    let dst_proj = parse_proj(target)?;

    // Transform into a fresh vector first; the table is only touched
    // once every geometry converted.
    let mut transformed = Vec::with_capacity(table.len());
    for record in table.records() {
        transformed.push(transform_geometry(
            &record.geometry,
            &src_proj,
            &dst_proj,
            source.is_geographic(),
            target.is_geographic(),
        )?);
    }

    table.replace_geometries(transformed)?;
    table.set_crs(Some(target.epsg()));

    info!(from = %source, to = %target, records = table.len(), "Reprojected table");
    Ok(())
}

fn parse_proj(code: CrsCode) -> IderaResult<Proj> {
    Proj::from_proj_string(defs::proj_string(code))
        .map_err(|e| IderaError::Projection(format!("{code}: {e}")))
}

fn transform_geometry(
    geometry: &Geometry<f64>,
    src: &Proj,
    dst: &Proj,
    src_geographic: bool,
    dst_geographic: bool,
) -> IderaResult<Geometry<f64>> {
    geometry.try_map_coords(|coord| {
        // proj4rs works in radians for angular CRSs
        let mut point = if src_geographic {
            (coord.x.to_radians(), coord.y.to_radians(), 0.0)
        } else {
            (coord.x, coord.y, 0.0)
        };

        proj4rs::transform::transform(src, dst, &mut point)
            .map_err(|e| IderaError::Projection(e.to_string()))?;

        let (x, y) = if dst_geographic {
            (point.0.to_degrees(), point.1.to_degrees())
        } else {
            (point.0, point.1)
        };
        Ok(Coord { x, y })
    })
}
