//! End-to-end tests for a full wizard session.

use std::io::Cursor;

use catalog::parse_catalog;
use feature_table::read_geojson_str;
use idera_common::{CrsCode, FieldValue, GisKind, IderaError, Violation};
use pipeline::{FieldMapping, Session};

const CATALOG: &str = r#"{
    "classes": [{
        "code": "AB",
        "name": "Demarcación",
        "subclasses": [{
            "code": "01",
            "name": "Espacios públicos",
            "objects": [{
                "code": "AB01001",
                "name": "Plaza",
                "definition": "Espacio verde de uso público.",
                "geometry": ["point"],
                "attributes": [
                    {"name": "nombre", "mandatory": true},
                    {"name": "categoria"}
                ]
            }]
        }]
    }]
}"#;

const GEOJSON: &str = r#"{
    "type": "FeatureCollection",
    "features": [{
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [-58.4, -34.6]},
        "properties": {"NOMBRE": "Plaza X", "altura": 12}
    }]
}"#;

#[test]
fn test_full_session_exports_multipoint_bundle() {
    let catalog = parse_catalog(CATALOG).unwrap();
    let table = read_geojson_str(GEOJSON).unwrap();

    let mut session = Session::open(table);
    session.reproject(None).unwrap();
    session.select_object(&catalog, "AB01001").unwrap();
    session.normalize(&catalog).unwrap();

    // the source "NOMBRE" column is close enough to suggest
    let suggestions = session.suggestions(&catalog).unwrap();
    assert_eq!(suggestions[0].column.as_deref(), Some("NOMBRE"));

    let mut mapping = session.empty_mapping(&catalog).unwrap();
    mapping.assign("nombre", "NOMBRE").unwrap();
    session.confirm_mapping(&catalog, mapping).unwrap();

    assert!(session.validate(&catalog).unwrap().is_empty());

    let bundle = session.export(&catalog).unwrap();
    assert_eq!(bundle.file_name, "AB01001_plaza.zip");

    let archive = zip::ZipArchive::new(Cursor::new(bundle.data)).unwrap();
    let names: Vec<_> = archive.file_names().collect();
    assert!(names.contains(&"AB01001_plaza.shp"));
    assert!(names.contains(&"AB01001_plaza.dbf"));

    // normalization wrapped the Point into a MultiPoint
    assert_eq!(
        session.clean_table().unwrap().uniform_kind().unwrap(),
        Some(GisKind::MultiPoint)
    );
}

#[test]
fn test_unknown_object_code_is_rejected() {
    let catalog = parse_catalog(CATALOG).unwrap();
    let mut session = Session::open(read_geojson_str(GEOJSON).unwrap());
    assert!(matches!(
        session.select_object(&catalog, "ZZ99999"),
        Err(IderaError::ObjectNotFound(_))
    ));
}

#[test]
fn test_steps_out_of_order_are_rejected() {
    let catalog = parse_catalog(CATALOG).unwrap();
    let mut session = Session::open(read_geojson_str(GEOJSON).unwrap());

    // no object selected yet
    assert!(matches!(
        session.normalize(&catalog),
        Err(IderaError::MappingIncomplete(_))
    ));

    session.select_object(&catalog, "AB01001").unwrap();

    // no mapping confirmed yet
    assert!(matches!(
        session.validate(&catalog),
        Err(IderaError::MappingIncomplete(_))
    ));
}

#[test]
fn test_export_refused_while_violations_remain() {
    let catalog = parse_catalog(CATALOG).unwrap();
    let mut session = Session::open(read_geojson_str(GEOJSON).unwrap());
    session.select_object(&catalog, "AB01001").unwrap();
    session.normalize(&catalog).unwrap();

    // leave the mandatory "nombre" unassigned
    let mapping = session.empty_mapping(&catalog).unwrap();
    session.confirm_mapping(&catalog, mapping).unwrap();

    let violations = session.validate(&catalog).unwrap();
    assert_eq!(
        violations,
        vec![Violation::EmptyMandatoryField("nombre".into())]
    );
    assert!(matches!(
        session.export(&catalog),
        Err(IderaError::ValidationFailed(_))
    ));
}

#[test]
fn test_edits_can_cure_violations() {
    let catalog = parse_catalog(CATALOG).unwrap();
    let mut session = Session::open(read_geojson_str(GEOJSON).unwrap());
    session.select_object(&catalog, "AB01001").unwrap();
    session.normalize(&catalog).unwrap();
    session
        .confirm_mapping(&catalog, session.empty_mapping(&catalog).unwrap())
        .unwrap();

    // bulk fill cures the empty mandatory column
    session
        .fill_column("nombre", FieldValue::Text("Plaza sin nombre".into()))
        .unwrap();
    assert!(session.validate(&catalog).unwrap().is_empty());

    // and a cell edit can undo the cure
    session.edit_cell(0, "nombre", FieldValue::Null).unwrap();
    assert_eq!(session.validate(&catalog).unwrap().len(), 1);
}

#[test]
fn test_reprojection_to_faja_then_export() {
    let catalog = parse_catalog(CATALOG).unwrap();
    let mut session = Session::open(read_geojson_str(GEOJSON).unwrap());
    // Buenos Aires sits in faja 5
    session.reproject(Some(CrsCode::Epsg5347)).unwrap();
    assert_eq!(session.table().crs(), Some(5347));

    session.select_object(&catalog, "AB01001").unwrap();
    session.normalize(&catalog).unwrap();
    let mut mapping = session.empty_mapping(&catalog).unwrap();
    mapping.assign("nombre", "NOMBRE").unwrap();
    session.confirm_mapping(&catalog, mapping).unwrap();

    let bundle = session.export(&catalog).unwrap();
    let archive = zip::ZipArchive::new(Cursor::new(bundle.data)).unwrap();
    let names: Vec<_> = archive.file_names().collect();
    assert!(names.contains(&"AB01001_plaza.prj"));
}
