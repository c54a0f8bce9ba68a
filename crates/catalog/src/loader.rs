//! Catalog document loading.

use std::fs;
use std::path::Path;

use tracing::info;

use idera_common::{IderaError, IderaResult};

use crate::model::Catalog;

/// Load and check the catalog document.
///
/// Any failure here is fatal for the tool: without a readable catalog
/// there are no valid object definitions to align against.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> IderaResult<Catalog> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .map_err(|e| IderaError::CatalogRead(format!("{}: {}", path.display(), e)))?;

    let catalog = parse_catalog(&raw)?;

    info!(
        path = %path.display(),
        classes = catalog.classes.len(),
        objects = catalog.objects().count(),
        "Loaded IDERA catalog"
    );

    Ok(catalog)
}

/// Parse a catalog document from its JSON text and check its integrity.
pub fn parse_catalog(raw: &str) -> IderaResult<Catalog> {
    let catalog: Catalog =
        serde_json::from_str(raw).map_err(|e| IderaError::CatalogParse(e.to_string()))?;

    check_integrity(&catalog)?;
    Ok(catalog)
}

fn check_integrity(catalog: &Catalog) -> IderaResult<()> {
    let mut seen = std::collections::HashSet::new();

    for (class, subclass, og) in catalog.objects() {
        if !seen.insert(og.code.as_str()) {
            return Err(IderaError::CatalogParse(format!(
                "duplicate object code {} (class {}, subclass {})",
                og.code, class.code, subclass.code
            )));
        }
        if og.geometry.is_empty() {
            return Err(IderaError::CatalogParse(format!(
                "object {} declares no geometry kind",
                og.code
            )));
        }
        let mut attr_names = std::collections::HashSet::new();
        for attr in &og.attributes {
            if !attr_names.insert(attr.name.as_str()) {
                return Err(IderaError::CatalogParse(format!(
                    "object {} declares attribute {} twice",
                    og.code, attr.name
                )));
            }
        }
    }

    Ok(())
}
