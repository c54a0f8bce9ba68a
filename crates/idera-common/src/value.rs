//! Attribute cell values.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// A single attribute value in a feature table.
///
/// The schema is data (it comes from the catalog), so cells are a small
/// dynamic enum rather than typed columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Null,
    Text(String),
    Integer(i64),
    Real(f64),
    Bool(bool),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Convert a GeoJSON property value.
    ///
    /// Integral numbers become `Integer`, other numbers `Real`. Nested
    /// arrays/objects have no tabular representation and are kept as
    /// their JSON text.
    pub fn from_json(value: &JsonValue) -> FieldValue {
        match value {
            JsonValue::Null => FieldValue::Null,
            JsonValue::Bool(b) => FieldValue::Bool(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Integer(i)
                } else {
                    FieldValue::Real(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            JsonValue::String(s) => FieldValue::Text(s.clone()),
            other => FieldValue::Text(other.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, ""),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Real(r) => write!(f, "{}", r),
            FieldValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(FieldValue::from_json(&json!(null)), FieldValue::Null);
        assert_eq!(FieldValue::from_json(&json!(42)), FieldValue::Integer(42));
        assert_eq!(FieldValue::from_json(&json!(1.5)), FieldValue::Real(1.5));
        assert_eq!(FieldValue::from_json(&json!(true)), FieldValue::Bool(true));
        assert_eq!(
            FieldValue::from_json(&json!("Plaza X")),
            FieldValue::Text("Plaza X".into())
        );
    }

    #[test]
    fn test_from_json_nested_kept_as_text() {
        let v = FieldValue::from_json(&json!(["a", "b"]));
        assert_eq!(v, FieldValue::Text("[\"a\",\"b\"]".into()));
    }
}
