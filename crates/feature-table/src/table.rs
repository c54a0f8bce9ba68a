//! The in-memory feature table.

use geo_types::Geometry;

use idera_common::{FieldValue, GisKind, IderaError, IderaResult};

/// One record: a geometry plus one value per table column.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub geometry: Geometry<f64>,
    pub values: Vec<FieldValue>,
}

/// Ordered records sharing one column list and (optionally) one CRS.
///
/// Invariant: `values.len() == columns.len()` for every record, enforced
/// by the constructors and mutators below.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    columns: Vec<String>,
    records: Vec<Record>,
    crs: Option<u32>,
}

impl FeatureTable {
    pub fn new(columns: Vec<String>, crs: Option<u32>) -> Self {
        Self {
            columns,
            records: Vec::new(),
            crs,
        }
    }

    /// Append a record. The value row must match the column list.
    pub fn push(&mut self, record: Record) -> IderaResult<()> {
        if record.values.len() != self.columns.len() {
            return Err(IderaError::GeoJsonParse(format!(
                "record has {} values, table has {} columns",
                record.values.len(),
                self.columns.len()
            )));
        }
        self.records.push(record);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// EPSG code of the table's CRS, when known.
    pub fn crs(&self) -> Option<u32> {
        self.crs
    }

    pub fn set_crs(&mut self, crs: Option<u32>) {
        self.crs = crs;
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Value of one cell, by record index and column name.
    pub fn value(&self, record: usize, column: &str) -> IderaResult<&FieldValue> {
        let col = self
            .column_index(column)
            .ok_or_else(|| IderaError::UnknownColumn(column.to_string()))?;
        let rec = self.records.get(record).ok_or(IderaError::RecordOutOfRange {
            record,
            len: self.records.len(),
        })?;
        Ok(&rec.values[col])
    }

    /// Overwrite one cell. Geometry is never editable through here.
    pub fn set_value(&mut self, record: usize, column: &str, value: FieldValue) -> IderaResult<()> {
        let col = self
            .column_index(column)
            .ok_or_else(|| IderaError::UnknownColumn(column.to_string()))?;
        let len = self.records.len();
        let rec = self
            .records
            .get_mut(record)
            .ok_or(IderaError::RecordOutOfRange { record, len })?;
        rec.values[col] = value;
        Ok(())
    }

    /// Bulk-assign one value to every record of a column.
    pub fn fill_column(&mut self, column: &str, value: FieldValue) -> IderaResult<()> {
        let col = self
            .column_index(column)
            .ok_or_else(|| IderaError::UnknownColumn(column.to_string()))?;
        for rec in &mut self.records {
            rec.values[col] = value.clone();
        }
        Ok(())
    }

    /// Distinct geometry kinds present, in first-seen order.
    pub fn geometry_kinds(&self) -> Vec<GisKind> {
        let mut kinds = Vec::new();
        for rec in &self.records {
            if let Some(kind) = GisKind::of(&rec.geometry) {
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
        }
        kinds
    }

    /// The single geometry kind shared by all records.
    ///
    /// `None` for an empty table; `MixedGeometry` if more than one kind
    /// is present.
    pub fn uniform_kind(&self) -> IderaResult<Option<GisKind>> {
        let kinds = self.geometry_kinds();
        match kinds.len() {
            0 => Ok(None),
            1 => Ok(Some(kinds[0])),
            _ => Err(IderaError::MixedGeometry {
                kinds: kinds.iter().map(|k| k.to_string()).collect(),
            }),
        }
    }

    /// Replace every geometry at once.
    ///
    /// Used by normalization so a failure earlier in the step leaves the
    /// table untouched (no partial mutation).
    pub fn replace_geometries(&mut self, geometries: Vec<Geometry<f64>>) -> IderaResult<()> {
        if geometries.len() != self.records.len() {
            return Err(IderaError::RecordOutOfRange {
                record: geometries.len(),
                len: self.records.len(),
            });
        }
        for (rec, geom) in self.records.iter_mut().zip(geometries) {
            rec.geometry = geom;
        }
        Ok(())
    }
}
