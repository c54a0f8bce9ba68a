//! Shapefile bundle export.
//!
//! Takes a validated clean table and produces one in-memory zip archive
//! with the multi-file shapefile bundle (.shp/.shx/.dbf and .prj when
//! the CRS is known). Field names are truncated to the DBF 10-byte
//! limit first; the bundle base name comes from the geographic object's
//! code and ASCII-normalized display name. All intermediate files live
//! in a scoped temp directory that is deleted before this crate
//! returns, on success and failure alike.

mod fields;
mod naming;
mod writer;

pub use fields::{infer_schema, truncate_unique, DbfField, DbfFieldKind};
pub use naming::normalize_object_name;
pub use writer::{export_bundle, ExportBundle};
