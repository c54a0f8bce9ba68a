//! Attribute mapping: fuzzy suggestion and clean-table construction.

use tracing::debug;

use catalog::GeoObject;
use feature_table::{encoding, FeatureTable, Record};
use idera_common::{FieldValue, IderaError, IderaResult};

/// Minimum similarity for a fuzzy suggestion to be offered.
pub const SUGGESTION_THRESHOLD: f64 = 0.6;

/// One suggested source column for a declared attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub attribute: String,
    /// Best-matching source column, if any cleared the threshold.
    pub column: Option<String>,
    pub score: f64,
}

/// Suggest a source column for each declared attribute.
///
/// Pure function: case-insensitive fuzzy match (Sørensen-Dice bigram
/// similarity), at most one suggestion per attribute, only when the
/// similarity clears the threshold. The result is advice for the
/// operator, never applied silently.
pub fn suggest_mapping(columns: &[String], object: &GeoObject) -> Vec<Suggestion> {
    object
        .attributes
        .iter()
        .map(|attr| {
            let needle = attr.name.to_lowercase();
            let mut best: Option<(&String, f64)> = None;

            for column in columns {
                let score = strsim::sorensen_dice(&needle, &column.to_lowercase());
                if score >= SUGGESTION_THRESHOLD
                    && best.map_or(true, |(_, current)| score > current)
                {
                    best = Some((column, score));
                }
            }

            match best {
                Some((column, score)) => Suggestion {
                    attribute: attr.name.clone(),
                    column: Some(column.clone()),
                    score,
                },
                None => Suggestion {
                    attribute: attr.name.clone(),
                    column: None,
                    score: 0.0,
                },
            }
        })
        .collect()
}

/// Operator-confirmed mapping of declared attributes to source columns.
///
/// Every declared attribute is present, in catalog order; unassigned
/// attributes map to `None` and become all-Null columns in the clean
/// table.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMapping {
    assignments: Vec<(String, Option<String>)>,
}

impl FieldMapping {
    /// A mapping with every declared attribute unassigned.
    pub fn for_object(object: &GeoObject) -> Self {
        Self {
            assignments: object
                .attributes
                .iter()
                .map(|a| (a.name.clone(), None))
                .collect(),
        }
    }

    /// Start from suggestions the operator accepted wholesale.
    pub fn from_suggestions(object: &GeoObject, suggestions: &[Suggestion]) -> Self {
        let mut mapping = Self::for_object(object);
        for suggestion in suggestions {
            if let Some(column) = &suggestion.column {
                // Suggested attributes always come from the same object
                let _ = mapping.assign(&suggestion.attribute, column);
            }
        }
        mapping
    }

    /// Assign a source column to a declared attribute.
    pub fn assign(&mut self, attribute: &str, column: &str) -> IderaResult<()> {
        let slot = self
            .assignments
            .iter_mut()
            .find(|(name, _)| name == attribute)
            .ok_or_else(|| IderaError::UnknownAttribute(attribute.to_string()))?;
        slot.1 = Some(column.to_string());
        Ok(())
    }

    /// Drop an attribute's assignment, leaving it unassigned.
    pub fn clear(&mut self, attribute: &str) -> IderaResult<()> {
        let slot = self
            .assignments
            .iter_mut()
            .find(|(name, _)| name == attribute)
            .ok_or_else(|| IderaError::UnknownAttribute(attribute.to_string()))?;
        slot.1 = None;
        Ok(())
    }

    pub fn source_for(&self, attribute: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|(name, _)| name == attribute)
            .and_then(|(_, column)| column.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.assignments
            .iter()
            .map(|(name, column)| (name.as_str(), column.as_deref()))
    }

    /// Declared attributes with an assigned source column.
    pub fn assigned_count(&self) -> usize {
        self.assignments.iter().filter(|(_, c)| c.is_some()).count()
    }
}

/// Build the clean table for a confirmed mapping.
///
/// Columns are exactly the declared attributes in catalog order; mapped
/// columns are copied with mojibake repair on text values, unassigned
/// ones are filled with Null for every record. Geometry and CRS carry
/// over unchanged.
pub fn build_clean_table(
    table: &FeatureTable,
    object: &GeoObject,
    mapping: &FieldMapping,
) -> IderaResult<FeatureTable> {
    // Resolve source column indexes up front so a stale mapping fails
    // before any copying happens.
    let mut sources = Vec::with_capacity(object.attributes.len());
    for attr in &object.attributes {
        let index = match mapping.source_for(&attr.name) {
            Some(column) => Some(
                table
                    .column_index(column)
                    .ok_or_else(|| IderaError::UnknownColumn(column.to_string()))?,
            ),
            None => None,
        };
        sources.push(index);
    }

    let columns: Vec<String> = object.attributes.iter().map(|a| a.name.clone()).collect();
    let mut clean = FeatureTable::new(columns, table.crs());

    for record in table.records() {
        let values = sources
            .iter()
            .map(|source| match source {
                Some(index) => encoding::repair_value(&record.values[*index]),
                None => FieldValue::Null,
            })
            .collect();
        clean.push(Record {
            geometry: record.geometry.clone(),
            values,
        })?;
    }

    debug!(
        object = %object.code,
        mapped = mapping.assigned_count(),
        declared = object.attributes.len(),
        records = clean.len(),
        "Built clean attribute table"
    );
    Ok(clean)
}
