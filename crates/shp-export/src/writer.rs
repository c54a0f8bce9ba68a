//! Shapefile bundle writing and zip assembly.

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use geo_types::Geometry;
use shapefile::dbase;
use tracing::info;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use feature_table::FeatureTable;
use idera_common::{CrsCode, FieldValue, GisKind, IderaError, IderaResult};

use crate::fields::{self, DbfField, DbfFieldKind};
use crate::naming;

/// A finished export: the archive name and its bytes.
///
/// The bundle never touches the final filesystem location; writing it
/// somewhere is the caller's decision.
#[derive(Debug, Clone)]
pub struct ExportBundle {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Serialize the table as `{code}_{normalized name}.zip`.
///
/// Shapefile parts are written into a temp directory that is removed
/// when this function returns, whether it succeeds or fails; the
/// archive itself is assembled in memory.
pub fn export_bundle(
    table: &FeatureTable,
    object_code: &str,
    object_name: &str,
) -> IderaResult<ExportBundle> {
    let kind = table
        .uniform_kind()?
        .ok_or_else(|| IderaError::ShapefileWrite("table has no records to export".into()))?;

    let base = format!(
        "{}_{}",
        object_code,
        naming::normalize_object_name(object_name)
    );

    let truncated = fields::truncate_unique(table.columns());
    let schema = fields::infer_schema(table, &truncated);

    let tmp = tempfile::tempdir()?;
    write_shapefile(table, kind, &schema, &tmp.path().join(format!("{base}.shp")))?;

    if let Some(crs) = table.crs().and_then(CrsCode::from_epsg) {
        fs::write(
            tmp.path().join(format!("{base}.prj")),
            reprojection::defs::prj_wkt(crs),
        )?;
    }

    let data = zip_directory(tmp.path())?;
    let file_name = format!("{base}.zip");

    info!(
        bundle = %file_name,
        records = table.len(),
        kind = %kind,
        bytes = data.len(),
        "Exported shapefile bundle"
    );
    Ok(ExportBundle { file_name, data })
}

fn write_shapefile(
    table: &FeatureTable,
    kind: GisKind,
    schema: &[DbfField],
    path: &Path,
) -> IderaResult<()> {
    let mut builder = dbase::TableWriterBuilder::new();
    for field in schema {
        let name = dbase::FieldName::try_from(field.name.as_str())
            .map_err(|e| IderaError::ShapefileWrite(format!("field {}: {e:?}", field.name)))?;
        builder = match field.kind {
            DbfFieldKind::Character(width) => builder.add_character_field(name, width),
            DbfFieldKind::Numeric { width, decimals } => {
                builder.add_numeric_field(name, width, decimals)
            }
            DbfFieldKind::Logical => builder.add_logical_field(name),
        };
    }

    let mut writer = shapefile::Writer::from_path(path, builder)
        .map_err(|e| IderaError::ShapefileWrite(e.to_string()))?;

    for record in table.records() {
        let attributes = dbase_record(schema, &record.values);
        write_shape(&mut writer, kind, &record.geometry, &attributes)?;
    }

    // writer drops here, finalizing .shp/.shx/.dbf headers
    Ok(())
}

fn write_shape<W: std::io::Write + std::io::Seek>(
    writer: &mut shapefile::Writer<W>,
    kind: GisKind,
    geometry: &Geometry<f64>,
    attributes: &dbase::Record,
) -> IderaResult<()> {
    let unexpected =
        || IderaError::ShapefileWrite(format!("geometry does not match table kind {kind}"));

    let result = match (kind, geometry) {
        (GisKind::Point, Geometry::Point(p)) => {
            writer.write_shape_and_record(&shapefile::Point::new(p.x(), p.y()), attributes)
        }
        (GisKind::MultiPoint, Geometry::MultiPoint(mp)) => {
            let points: Vec<shapefile::Point> = mp
                .iter()
                .map(|p| shapefile::Point::new(p.x(), p.y()))
                .collect();
            writer.write_shape_and_record(&shapefile::Multipoint::new(points), attributes)
        }
        (GisKind::LineString, Geometry::LineString(line)) => {
            writer.write_shape_and_record(&shapefile::Polyline::new(line_points(line)), attributes)
        }
        (GisKind::MultiLineString, Geometry::MultiLineString(lines)) => {
            let parts: Vec<Vec<shapefile::Point>> = lines.iter().map(line_points).collect();
            writer.write_shape_and_record(&shapefile::Polyline::with_parts(parts), attributes)
        }
        (GisKind::Polygon, Geometry::Polygon(polygon)) => {
            writer.write_shape_and_record(
                &shapefile::Polygon::with_rings(polygon_rings(polygon)),
                attributes,
            )
        }
        (GisKind::MultiPolygon, Geometry::MultiPolygon(polygons)) => {
            let rings: Vec<shapefile::PolygonRing<shapefile::Point>> =
                polygons.iter().flat_map(polygon_rings).collect();
            writer.write_shape_and_record(&shapefile::Polygon::with_rings(rings), attributes)
        }
        _ => return Err(unexpected()),
    };

    result.map_err(|e| IderaError::ShapefileWrite(e.to_string()))
}

fn line_points(line: &geo_types::LineString<f64>) -> Vec<shapefile::Point> {
    line.coords()
        .map(|c| shapefile::Point::new(c.x, c.y))
        .collect()
}

fn polygon_rings(polygon: &geo_types::Polygon<f64>) -> Vec<shapefile::PolygonRing<shapefile::Point>> {
    // The shapefile crate closes rings and fixes ESRI winding order on
    // its own; only outer/inner classification matters here.
    let mut rings = vec![shapefile::PolygonRing::Outer(line_points(
        polygon.exterior(),
    ))];
    rings.extend(
        polygon
            .interiors()
            .iter()
            .map(|ring| shapefile::PolygonRing::Inner(line_points(ring))),
    );
    rings
}

fn dbase_record(schema: &[DbfField], values: &[FieldValue]) -> dbase::Record {
    let mut record = dbase::Record::default();
    for (field, value) in schema.iter().zip(values) {
        let rendered = match field.kind {
            DbfFieldKind::Character(_) => dbase::FieldValue::Character(match value {
                FieldValue::Null => None,
                other => Some(other.to_string()),
            }),
            DbfFieldKind::Numeric { .. } => dbase::FieldValue::Numeric(match value {
                FieldValue::Integer(i) => Some(*i as f64),
                FieldValue::Real(r) => Some(*r),
                _ => None,
            }),
            DbfFieldKind::Logical => dbase::FieldValue::Logical(match value {
                FieldValue::Bool(b) => Some(*b),
                _ => None,
            }),
        };
        record.insert(field.name.clone(), rendered);
    }
    record
}

fn zip_directory(dir: &Path) -> IderaResult<Vec<u8>> {
    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| IderaError::Archive(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry
            .path()
            .strip_prefix(dir)
            .map_err(|e| IderaError::Archive(e.to_string()))?
            .to_string_lossy()
            .into_owned();

        archive
            .start_file(name, options)
            .map_err(|e| IderaError::Archive(e.to_string()))?;
        archive.write_all(&fs::read(entry.path())?)?;
    }

    let cursor = archive
        .finish()
        .map_err(|e| IderaError::Archive(e.to_string()))?;
    Ok(cursor.into_inner())
}
