//! Tests for the shapefile bundle exporter.

use std::io::{Cursor, Read};

use geo_types::{point, Geometry, MultiPoint};

use feature_table::{FeatureTable, Record};
use idera_common::FieldValue;
use shp_export::export_bundle;

fn one_record_table() -> FeatureTable {
    let mut table = FeatureTable::new(vec!["nombre".into(), "categoria".into()], Some(4326));
    table
        .push(Record {
            geometry: Geometry::MultiPoint(MultiPoint::new(vec![point!(x: -58.4, y: -34.6)])),
            values: vec![FieldValue::Text("Plaza X".into()), FieldValue::Null],
        })
        .unwrap();
    table
}

fn entry_names(data: &[u8]) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

#[test]
fn test_bundle_name_uses_code_and_normalized_display_name() {
    let bundle = export_bundle(&one_record_table(), "AB01001", "Plaza X").unwrap();
    assert_eq!(bundle.file_name, "AB01001_plaza_x.zip");
}

#[test]
fn test_bundle_contains_all_shapefile_parts() {
    let bundle = export_bundle(&one_record_table(), "AB01001", "Plaza X").unwrap();
    let names = entry_names(&bundle.data);

    for extension in ["shp", "shx", "dbf", "prj"] {
        let expected = format!("AB01001_plaza_x.{extension}");
        assert!(names.contains(&expected), "missing {expected} in {names:?}");
    }
}

#[test]
fn test_bundle_entries_are_non_empty() {
    let bundle = export_bundle(&one_record_table(), "AB01001", "Plaza X").unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bundle.data)).unwrap();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).unwrap();
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).unwrap();
        assert!(!bytes.is_empty(), "{} is empty", entry.name());
    }
}

#[test]
fn test_unknown_crs_skips_prj() {
    let mut table = one_record_table();
    table.set_crs(None);
    let bundle = export_bundle(&table, "AB01001", "Plaza X").unwrap();
    let names = entry_names(&bundle.data);
    assert!(names.iter().all(|n| !n.ends_with(".prj")));
    assert!(names.iter().any(|n| n.ends_with(".shp")));
}

#[test]
fn test_empty_table_is_rejected() {
    let table = FeatureTable::new(vec!["nombre".into()], Some(4326));
    assert!(export_bundle(&table, "AB01001", "Plaza X").is_err());
}

#[test]
fn test_truncated_field_names_survive_in_dbf() {
    let mut table = FeatureTable::new(
        vec![
            "precipitacion_promedio".into(),
            "precipitacion_maxima".into(),
        ],
        Some(4326),
    );
    table
        .push(Record {
            geometry: Geometry::MultiPoint(MultiPoint::new(vec![point!(x: 0.0, y: 0.0)])),
            values: vec![FieldValue::Real(10.5), FieldValue::Real(80.0)],
        })
        .unwrap();

    // Colliding 10-byte prefixes must not break the DBF writer.
    let bundle = export_bundle(&table, "ME01001", "Precipitación").unwrap();
    assert_eq!(bundle.file_name, "ME01001_precipitacion.zip");
}
