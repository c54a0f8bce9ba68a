//! DBF field-name truncation and schema inference.

use std::collections::{HashMap, HashSet};

use feature_table::FeatureTable;
use idera_common::FieldValue;

/// DBF field name limit, in bytes.
const MAX_NAME_BYTES: usize = 10;

/// Truncate column names to the DBF limit, keeping them unique.
///
/// Names whose truncated candidate is unique pass through. Every member
/// of a colliding candidate group gets an incrementing numeric suffix
/// (starting at 1, in input order), with the prefix trimmed so
/// suffix + prefix still fit; a generated name that is itself taken
/// bumps the counter until free. Input order is preserved, so position
/// is the cross-reference back to the original columns.
pub fn truncate_unique(names: &[String]) -> Vec<String> {
    let candidates: Vec<String> = names
        .iter()
        .map(|n| truncate_bytes(n, MAX_NAME_BYTES))
        .collect();

    let mut group_sizes: HashMap<&str, usize> = HashMap::new();
    for candidate in &candidates {
        *group_sizes.entry(candidate.as_str()).or_default() += 1;
    }

    let mut used: HashSet<String> = HashSet::new();
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut result = Vec::with_capacity(names.len());

    for candidate in &candidates {
        let unique = group_sizes[candidate.as_str()] == 1 && !used.contains(candidate.as_str());
        let name = if unique {
            candidate.clone()
        } else {
            let counter = counters.entry(candidate.clone()).or_insert(1);
            loop {
                let suffix = counter.to_string();
                *counter += 1;
                let budget = MAX_NAME_BYTES.saturating_sub(suffix.len());
                let attempt = format!("{}{}", truncate_bytes(candidate, budget), suffix);
                if !used.contains(&attempt) {
                    break attempt;
                }
            }
        };
        used.insert(name.clone());
        result.push(name);
    }

    result
}

/// Longest prefix that fits the byte budget without splitting a char.
fn truncate_bytes(name: &str, max_bytes: usize) -> String {
    let mut end = 0;
    for (index, ch) in name.char_indices() {
        if index + ch.len_utf8() > max_bytes {
            break;
        }
        end = index + ch.len_utf8();
    }
    name[..end].to_string()
}

/// DBF column type, sized from the observed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbfFieldKind {
    Character(u8),
    Numeric { width: u8, decimals: u8 },
    Logical,
}

/// One DBF field: truncated name plus inferred type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbfField {
    pub name: String,
    pub kind: DbfFieldKind,
}

/// Infer the DBF schema of a table, one field per column.
///
/// `truncated` is the output of [`truncate_unique`] for the table's
/// columns, matched by position. Homogeneous integer columns become
/// Numeric(18,0), columns with any Real become Numeric(24,15), pure
/// boolean columns Logical, everything else Character sized to the
/// longest rendered value (all-Null columns default to Character(80)).
pub fn infer_schema(table: &FeatureTable, truncated: &[String]) -> Vec<DbfField> {
    table
        .columns()
        .iter()
        .enumerate()
        .map(|(index, _)| {
            let values = table.records().iter().map(|r| &r.values[index]);
            DbfField {
                name: truncated[index].clone(),
                kind: infer_kind(values),
            }
        })
        .collect()
}

fn infer_kind<'a>(values: impl Iterator<Item = &'a FieldValue>) -> DbfFieldKind {
    let mut saw_text = false;
    let mut saw_integer = false;
    let mut saw_real = false;
    let mut saw_bool = false;
    let mut max_width = 0usize;

    for value in values {
        match value {
            FieldValue::Null => {}
            FieldValue::Text(s) => {
                saw_text = true;
                max_width = max_width.max(s.len());
            }
            FieldValue::Integer(i) => {
                saw_integer = true;
                max_width = max_width.max(i.to_string().len());
            }
            FieldValue::Real(r) => {
                saw_real = true;
                max_width = max_width.max(r.to_string().len());
            }
            FieldValue::Bool(b) => {
                saw_bool = true;
                max_width = max_width.max(b.to_string().len());
            }
        }
    }

    if saw_text || (saw_bool && (saw_integer || saw_real)) {
        DbfFieldKind::Character(max_width.clamp(1, 254) as u8)
    } else if saw_real {
        DbfFieldKind::Numeric {
            width: 24,
            decimals: 15,
        }
    } else if saw_integer {
        DbfFieldKind::Numeric {
            width: 18,
            decimals: 0,
        }
    } else if saw_bool {
        DbfFieldKind::Logical
    } else {
        // all Null: no evidence either way, keep a roomy text column
        DbfFieldKind::Character(80)
    }
}
