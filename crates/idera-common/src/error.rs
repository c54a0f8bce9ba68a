//! Error types for idera-validator crates.

use thiserror::Error;

use crate::geometry::GisKind;

/// Result type alias using IderaError.
pub type IderaResult<T> = Result<T, IderaError>;

/// Primary error type for the conversion pipeline.
///
/// Every variant except the catalog ones is recoverable at the session
/// level: the current step fails, the operator corrects the input and
/// retries. An unreadable or malformed catalog is fatal at startup.
#[derive(Debug, Error)]
pub enum IderaError {
    // === Geometry errors ===
    #[error("input contains multiple geometry kinds: {}", .kinds.join(", "))]
    MixedGeometry { kinds: Vec<String> },

    #[error("geometry kind {found} not allowed by the catalog object (allowed: {})",
            .allowed.iter().map(|k| k.to_string()).collect::<Vec<_>>().join(", "))]
    IncompatibleGeometry {
        found: GisKind,
        allowed: Vec<GisKind>,
    },

    #[error("record {record} has no geometry")]
    MissingGeometry { record: usize },

    #[error("unsupported geometry kind: {0}")]
    UnsupportedGeometry(String),

    // === CRS errors ===
    #[error("source file has no defined CRS, cannot reproject")]
    UndefinedCrs,

    #[error("unsupported CRS: {0}")]
    UnsupportedCrs(String),

    #[error("projection error: {0}")]
    Projection(String),

    // === Input errors ===
    #[error("failed to parse GeoJSON: {0}")]
    GeoJsonParse(String),

    // === Catalog errors ===
    #[error("failed to read catalog: {0}")]
    CatalogRead(String),

    #[error("malformed catalog document: {0}")]
    CatalogParse(String),

    #[error("geographic object not found in catalog: {0}")]
    ObjectNotFound(String),

    // === Mapping and editing errors ===
    #[error("attribute not declared by the catalog object: {0}")]
    UnknownAttribute(String),

    #[error("column not found in table: {0}")]
    UnknownColumn(String),

    #[error("record index {record} out of range (table has {len} records)")]
    RecordOutOfRange { record: usize, len: usize },

    #[error("mapping step incomplete: {0}")]
    MappingIncomplete(String),

    // === Validation ===
    #[error("validation failed with {} violation(s)", .0.len())]
    ValidationFailed(Vec<Violation>),

    // === Export errors ===
    #[error("failed to write shapefile: {0}")]
    ShapefileWrite(String),

    #[error("failed to build archive: {0}")]
    Archive(String),

    // === Infrastructure errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single validation finding.
///
/// Violations accumulate; they are collected into a list rather than
/// short-circuiting so the operator sees every problem at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("missing mandatory field: {0}")]
    MissingMandatoryField(String),

    #[error("empty mandatory field: {0}")]
    EmptyMandatoryField(String),

    #[error("{0} invalid geometrie(s) in table")]
    InvalidGeometries(usize),
}
