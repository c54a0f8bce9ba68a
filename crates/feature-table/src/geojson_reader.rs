//! GeoJSON ingestion.

use std::fs;
use std::path::Path;

use geojson::{GeoJson, JsonObject, JsonValue};
use tracing::info;

use idera_common::{FieldValue, GisKind, IderaError, IderaResult};

use crate::table::{FeatureTable, Record};

/// Read a GeoJSON feature collection from disk into a feature table.
pub fn read_geojson_file<P: AsRef<Path>>(path: P) -> IderaResult<FeatureTable> {
    let raw = fs::read_to_string(path.as_ref())?;
    let table = read_geojson_str(&raw)?;
    info!(
        path = %path.as_ref().display(),
        records = table.len(),
        columns = table.columns().len(),
        crs = ?table.crs(),
        "Loaded GeoJSON file"
    );
    Ok(table)
}

/// Parse GeoJSON text into a feature table.
///
/// The column list is the union of every feature's property keys, in
/// first-seen order. Records missing a property get a Null cell, so all
/// rows share the same width.
pub fn read_geojson_str(raw: &str) -> IderaResult<FeatureTable> {
    let geojson: GeoJson = raw
        .parse()
        .map_err(|e: geojson::Error| IderaError::GeoJsonParse(e.to_string()))?;

    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        other => {
            return Err(IderaError::GeoJsonParse(format!(
                "expected a FeatureCollection, got {}",
                geojson_kind(&other)
            )))
        }
    };

    let crs = detect_crs(collection.foreign_members.as_ref());

    // First pass: column union in first-seen order.
    let mut columns: Vec<String> = Vec::new();
    for feature in &collection.features {
        if let Some(props) = &feature.properties {
            for key in props.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
    }

    // Second pass: geometry conversion plus one aligned value row per
    // feature.
    let mut table = FeatureTable::new(columns, crs);
    for (index, feature) in collection.features.into_iter().enumerate() {
        let geometry = feature
            .geometry
            .ok_or(IderaError::MissingGeometry { record: index })?;

        let geometry: geo_types::Geometry<f64> = geometry
            .try_into()
            .map_err(|e: geojson::Error| IderaError::GeoJsonParse(e.to_string()))?;

        if GisKind::of(&geometry).is_none() {
            return Err(IderaError::UnsupportedGeometry(format!(
                "record {index} carries a geometry collection"
            )));
        }

        let values = row_values(table.columns(), feature.properties.as_ref());
        table.push(Record { geometry, values })?;
    }

    Ok(table)
}

fn row_values(columns: &[String], properties: Option<&JsonObject>) -> Vec<FieldValue> {
    columns
        .iter()
        .map(|col| match properties.and_then(|p| p.get(col)) {
            Some(value) => FieldValue::from_json(value),
            None => FieldValue::Null,
        })
        .collect()
}

fn geojson_kind(geojson: &GeoJson) -> &'static str {
    match geojson {
        GeoJson::Geometry(_) => "a bare geometry",
        GeoJson::Feature(_) => "a single feature",
        GeoJson::FeatureCollection(_) => "a FeatureCollection",
    }
}

/// Detect the source CRS from the legacy `crs` foreign member.
///
/// RFC 7946 dropped the member and fixed the CRS to WGS 84, so a missing
/// member is EPSG:4326. An explicit `"crs": null` (old-spec "unknown") or
/// an unparseable named CRS leaves the table with no CRS, which later
/// makes reprojection fail rather than silently assume one.
fn detect_crs(foreign_members: Option<&JsonObject>) -> Option<u32> {
    let member = match foreign_members.and_then(|m| m.get("crs")) {
        None => return Some(4326),
        Some(JsonValue::Null) => return None,
        Some(member) => member,
    };

    let name = member
        .get("properties")
        .and_then(|p| p.get("name"))
        .and_then(JsonValue::as_str)?;

    parse_crs_name(name)
}

/// Parse an EPSG code out of a CRS name like `EPSG:4326`,
/// `urn:ogc:def:crs:EPSG::5344` or `urn:ogc:def:crs:OGC:1.3:CRS84`.
fn parse_crs_name(name: &str) -> Option<u32> {
    if name.to_uppercase().contains("CRS84") {
        return Some(4326);
    }
    name.rsplit(':').next()?.parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(crs_member: &str) -> String {
        format!(
            r#"{{
                "type": "FeatureCollection",
                {crs_member}
                "features": [
                    {{
                        "type": "Feature",
                        "geometry": {{"type": "Point", "coordinates": [-58.4, -34.6]}},
                        "properties": {{"NOM": "Plaza X", "altura": 12}}
                    }},
                    {{
                        "type": "Feature",
                        "geometry": {{"type": "Point", "coordinates": [-58.5, -34.7]}},
                        "properties": {{"NOM": "Plaza Y", "barrio": "Centro"}}
                    }}
                ]
            }}"#
        )
    }

    #[test]
    fn test_column_union_in_first_seen_order() {
        let table = read_geojson_str(&sample("")).unwrap();
        assert_eq!(table.columns(), ["NOM", "altura", "barrio"]);
        assert_eq!(table.len(), 2);
        // Missing property becomes Null, not absent
        assert_eq!(table.value(0, "barrio").unwrap(), &FieldValue::Null);
        assert_eq!(table.value(1, "altura").unwrap(), &FieldValue::Null);
    }

    #[test]
    fn test_missing_crs_member_defaults_to_wgs84() {
        let table = read_geojson_str(&sample("")).unwrap();
        assert_eq!(table.crs(), Some(4326));
    }

    #[test]
    fn test_null_crs_member_is_undefined() {
        let table = read_geojson_str(&sample(r#""crs": null,"#)).unwrap();
        assert_eq!(table.crs(), None);
    }

    #[test]
    fn test_named_crs_member() {
        let member = r#""crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::5344"}},"#;
        let table = read_geojson_str(&sample(member)).unwrap();
        assert_eq!(table.crs(), Some(5344));
    }

    #[test]
    fn test_crs84_name_maps_to_wgs84() {
        assert_eq!(parse_crs_name("urn:ogc:def:crs:OGC:1.3:CRS84"), Some(4326));
        assert_eq!(parse_crs_name("EPSG:5348"), Some(5348));
        assert_eq!(parse_crs_name("not a crs"), None);
    }

    #[test]
    fn test_feature_without_geometry_is_an_error() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": null, "properties": {"a": 1}}
            ]
        }"#;
        assert!(matches!(
            read_geojson_str(raw),
            Err(IderaError::MissingGeometry { record: 0 })
        ));
    }

    #[test]
    fn test_bare_geometry_rejected() {
        let raw = r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#;
        assert!(matches!(
            read_geojson_str(raw),
            Err(IderaError::GeoJsonParse(_))
        ));
    }

    #[test]
    fn test_geometry_collection_rejected() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {
                    "type": "GeometryCollection",
                    "geometries": [{"type": "Point", "coordinates": [0.0, 0.0]}]
                },
                "properties": {}
            }]
        }"#;
        assert!(matches!(
            read_geojson_str(raw),
            Err(IderaError::UnsupportedGeometry(_))
        ));
    }
}
