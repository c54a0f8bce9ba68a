//! One operator session, from upload to export.

use tracing::info;

use catalog::{Catalog, GeoObject};
use feature_table::FeatureTable;
use idera_common::{CrsCode, FieldValue, IderaError, IderaResult, Violation};
use shp_export::ExportBundle;

use crate::mapping::{self, FieldMapping, Suggestion};
use crate::normalize;
use crate::validate;

/// Mutable wizard state for one uploaded file.
///
/// Each interactive round trip hands the current session into a step
/// method and gets the updated session back; there is no ambient global
/// state, and independent sessions never share anything.
#[derive(Debug, Clone)]
pub struct Session {
    table: FeatureTable,
    object_code: Option<String>,
    mapping: Option<FieldMapping>,
    clean: Option<FeatureTable>,
}

impl Session {
    /// Start a session from a freshly ingested table.
    pub fn open(table: FeatureTable) -> Self {
        info!(records = table.len(), crs = ?table.crs(), "Opened session");
        Self {
            table,
            object_code: None,
            mapping: None,
            clean: None,
        }
    }

    /// The working (uploaded, possibly reprojected/normalized) table.
    pub fn table(&self) -> &FeatureTable {
        &self.table
    }

    /// The editable clean table, once built.
    pub fn clean_table(&self) -> Option<&FeatureTable> {
        self.clean.as_ref()
    }

    pub fn object_code(&self) -> Option<&str> {
        self.object_code.as_deref()
    }

    /// The confirmed mapping, once the operator settled one.
    pub fn mapping(&self) -> Option<&FieldMapping> {
        self.mapping.as_ref()
    }

    /// Reproject the working table; `None` keeps the original CRS.
    pub fn reproject(&mut self, target: Option<CrsCode>) -> IderaResult<()> {
        match target {
            Some(target) => reprojection::reproject(&mut self.table, target),
            None => Ok(()),
        }
    }

    /// Choose the geographic object to align against.
    ///
    /// Resets any mapping and clean table from a previous choice.
    pub fn select_object<'c>(
        &mut self,
        catalog: &'c Catalog,
        code: &str,
    ) -> IderaResult<&'c GeoObject> {
        let object = catalog
            .find_object(code)
            .ok_or_else(|| IderaError::ObjectNotFound(code.to_string()))?;

        self.object_code = Some(object.code.clone());
        self.mapping = None;
        self.clean = None;
        info!(object = %object.code, name = %object.name, "Selected geographic object");
        Ok(object)
    }

    fn selected_object<'c>(&self, catalog: &'c Catalog) -> IderaResult<&'c GeoObject> {
        let code = self.object_code.as_deref().ok_or_else(|| {
            IderaError::MappingIncomplete("no geographic object selected yet".into())
        })?;
        catalog
            .find_object(code)
            .ok_or_else(|| IderaError::ObjectNotFound(code.to_string()))
    }

    /// Coerce the working table's geometry kind to the selected object.
    pub fn normalize(&mut self, catalog: &Catalog) -> IderaResult<()> {
        let object = self.selected_object(catalog)?;
        normalize::normalize_geometry(&mut self.table, object)
    }

    /// Fuzzy source-column suggestions for the selected object.
    pub fn suggestions(&self, catalog: &Catalog) -> IderaResult<Vec<Suggestion>> {
        let object = self.selected_object(catalog)?;
        Ok(mapping::suggest_mapping(self.table.columns(), object))
    }

    /// An all-unassigned mapping for the selected object, for the
    /// operator to fill in.
    pub fn empty_mapping(&self, catalog: &Catalog) -> IderaResult<FieldMapping> {
        Ok(FieldMapping::for_object(self.selected_object(catalog)?))
    }

    /// Confirm the operator's mapping and build the clean table.
    pub fn confirm_mapping(&mut self, catalog: &Catalog, mapping: FieldMapping) -> IderaResult<()> {
        let object = self.selected_object(catalog)?;
        self.clean = Some(mapping::build_clean_table(&self.table, object, &mapping)?);
        self.mapping = Some(mapping);
        Ok(())
    }

    fn clean_mut(&mut self) -> IderaResult<&mut FeatureTable> {
        self.clean.as_mut().ok_or_else(|| {
            IderaError::MappingIncomplete("clean table not built yet, confirm a mapping first".into())
        })
    }

    /// Edit one cell of the clean table.
    pub fn edit_cell(&mut self, record: usize, column: &str, value: FieldValue) -> IderaResult<()> {
        self.clean_mut()?.set_value(record, column, value)
    }

    /// Bulk-assign one value to a clean-table column.
    pub fn fill_column(&mut self, column: &str, value: FieldValue) -> IderaResult<()> {
        self.clean_mut()?.fill_column(column, value)
    }

    /// Validate the clean table against the selected object.
    pub fn validate(&self, catalog: &Catalog) -> IderaResult<Vec<Violation>> {
        let object = self.selected_object(catalog)?;
        let clean = self.clean.as_ref().ok_or_else(|| {
            IderaError::MappingIncomplete("clean table not built yet, confirm a mapping first".into())
        })?;
        Ok(validate::validate(clean, object))
    }

    /// Validate and export the clean table as a zipped bundle.
    ///
    /// Refuses to export while any violation remains.
    pub fn export(&self, catalog: &Catalog) -> IderaResult<ExportBundle> {
        let object = self.selected_object(catalog)?;
        let violations = self.validate(catalog)?;
        if !violations.is_empty() {
            return Err(IderaError::ValidationFailed(violations));
        }

        let clean = self.clean.as_ref().ok_or_else(|| {
            IderaError::MappingIncomplete("clean table not built yet, confirm a mapping first".into())
        })?;
        shp_export::export_bundle(clean, &object.code, &object.name)
    }
}
