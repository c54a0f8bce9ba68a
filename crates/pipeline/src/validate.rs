//! Final validation of a clean table against its catalog object.

use geo::Validation;

use catalog::GeoObject;
use feature_table::FeatureTable;
use idera_common::Violation;

/// Check mandatory fields and geometry validity.
///
/// Violations accumulate: one per mandatory attribute that is absent or
/// carries a Null anywhere, plus one aggregate entry when any geometry
/// is topologically invalid. An empty list means the table may be
/// exported.
pub fn validate(table: &FeatureTable, object: &GeoObject) -> Vec<Violation> {
    let mut violations = Vec::new();

    for attr in object.mandatory_attributes() {
        match table.column_index(&attr.name) {
            None => violations.push(Violation::MissingMandatoryField(attr.name.clone())),
            Some(index) => {
                if table.records().iter().any(|r| r.values[index].is_null()) {
                    violations.push(Violation::EmptyMandatoryField(attr.name.clone()));
                }
            }
        }
    }

    let invalid = table
        .records()
        .iter()
        .filter(|r| !r.geometry.is_valid())
        .count();
    if invalid > 0 {
        violations.push(Violation::InvalidGeometries(invalid));
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::AttributeSpec;
    use feature_table::Record;
    use geo_types::{point, polygon, Geometry};
    use idera_common::{AbstractKind, FieldValue};

    fn object() -> GeoObject {
        GeoObject {
            code: "AB01001".into(),
            name: "Plaza".into(),
            definition: String::new(),
            geometry: vec![AbstractKind::Point],
            attributes: vec![
                AttributeSpec {
                    name: "nombre".into(),
                    mandatory: true,
                },
                AttributeSpec {
                    name: "categoria".into(),
                    mandatory: false,
                },
            ],
        }
    }

    #[test]
    fn test_complete_table_passes() {
        let mut table = FeatureTable::new(vec!["nombre".into(), "categoria".into()], Some(4326));
        table
            .push(Record {
                geometry: Geometry::Point(point!(x: -58.4, y: -34.6)),
                values: vec![FieldValue::Text("Plaza X".into()), FieldValue::Null],
            })
            .unwrap();

        // optional attribute may be Null
        assert!(validate(&table, &object()).is_empty());
    }

    #[test]
    fn test_missing_mandatory_column_reports_once() {
        let table = FeatureTable::new(vec!["categoria".into()], Some(4326));
        let violations = validate(&table, &object());
        assert_eq!(
            violations,
            vec![Violation::MissingMandatoryField("nombre".into())]
        );
    }

    #[test]
    fn test_null_in_mandatory_column() {
        let mut table = FeatureTable::new(vec!["nombre".into(), "categoria".into()], Some(4326));
        table
            .push(Record {
                geometry: Geometry::Point(point!(x: 0.0, y: 0.0)),
                values: vec![FieldValue::Null, FieldValue::Null],
            })
            .unwrap();
        let violations = validate(&table, &object());
        assert_eq!(
            violations,
            vec![Violation::EmptyMandatoryField("nombre".into())]
        );
    }

    #[test]
    fn test_violations_accumulate() {
        // table with neither declared column and a bow-tie polygon
        let mut table = FeatureTable::new(vec![], Some(4326));
        let bow_tie = polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 2.0),
            (x: 2.0, y: 0.0),
            (x: 0.0, y: 2.0),
        ];
        table
            .push(Record {
                geometry: Geometry::Polygon(bow_tie),
                values: vec![],
            })
            .unwrap();

        let violations = validate(&table, &object());
        assert!(violations.contains(&Violation::MissingMandatoryField("nombre".into())));
        assert!(violations.contains(&Violation::InvalidGeometries(1)));
        // optional "categoria" being absent is not a violation
        assert_eq!(violations.len(), 2);
    }
}
