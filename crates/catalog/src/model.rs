//! Catalog document model.
//!
//! Classes, subclasses, objects and attributes are stored as ordered
//! arrays: the declared attribute order drives clean-table column order,
//! so it is part of the contract, not a presentation detail.

use serde::{Deserialize, Serialize};

use idera_common::{AbstractKind, GisKind};

/// The full catalog taxonomy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub classes: Vec<ObjectClass>,
}

/// Top-level thematic class (e.g. "AB – Hidrografía").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectClass {
    pub code: String,
    pub name: String,
    pub subclasses: Vec<Subclass>,
}

/// Second taxonomy level below a class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subclass {
    pub code: String,
    pub name: String,
    pub objects: Vec<GeoObject>,
}

/// One leaf entry: the geometry and attribute constraints for a feature
/// table claiming to represent this geographic object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoObject {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub definition: String,
    pub geometry: Vec<AbstractKind>,
    pub attributes: Vec<AttributeSpec>,
}

/// A declared attribute and its rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub name: String,
    #[serde(default)]
    pub mandatory: bool,
}

impl Catalog {
    /// Find a geographic object by its code, anywhere in the tree.
    pub fn find_object(&self, code: &str) -> Option<&GeoObject> {
        self.classes
            .iter()
            .flat_map(|c| &c.subclasses)
            .flat_map(|s| &s.objects)
            .find(|o| o.code == code)
    }

    /// Iterate every geographic object with its class/subclass context.
    pub fn objects(&self) -> impl Iterator<Item = (&ObjectClass, &Subclass, &GeoObject)> {
        self.classes.iter().flat_map(|c| {
            c.subclasses
                .iter()
                .flat_map(move |s| s.objects.iter().map(move |o| (c, s, o)))
        })
    }
}

impl GeoObject {
    /// Concrete GIS kinds this object accepts, expanded from the abstract
    /// declaration (each abstract kind allows its single + multi pair).
    pub fn allowed_gis_kinds(&self) -> Vec<GisKind> {
        self.geometry.iter().flat_map(|k| k.expand()).collect()
    }

    /// Ordered declared attribute names.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.name.as_str()).collect()
    }

    /// Declared attributes marked mandatory.
    pub fn mandatory_attributes(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.attributes.iter().filter(|a| a.mandatory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog {
            classes: vec![ObjectClass {
                code: "AB".into(),
                name: "Demarcación".into(),
                subclasses: vec![Subclass {
                    code: "01".into(),
                    name: "Espacios públicos".into(),
                    objects: vec![GeoObject {
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
                    }],
                }],
            }],
        }
    }

    #[test]
    fn test_find_object() {
        let catalog = sample();
        assert!(catalog.find_object("AB01001").is_some());
        assert!(catalog.find_object("ZZ99999").is_none());
    }

    #[test]
    fn test_allowed_gis_kinds_expand() {
        let catalog = sample();
        let og = catalog.find_object("AB01001").unwrap();
        assert_eq!(
            og.allowed_gis_kinds(),
            vec![GisKind::Point, GisKind::MultiPoint]
        );
    }

    #[test]
    fn test_mandatory_attributes() {
        let catalog = sample();
        let og = catalog.find_object("AB01001").unwrap();
        let mandatory: Vec<_> = og.mandatory_attributes().map(|a| a.name.as_str()).collect();
        assert_eq!(mandatory, vec!["nombre"]);
    }
}
