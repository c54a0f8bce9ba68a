//! In-memory feature table and GeoJSON ingestion.
//!
//! The table is the unit of work for the whole pipeline: one geometry and
//! one row of attribute values per record, with a single ordered column
//! list shared by all records. Upload creates it, reprojection and
//! normalization mutate it in place, mapping replaces it with a clean
//! table restricted to the catalog schema.

pub mod encoding;
mod geojson_reader;
mod table;

pub use encoding::repair_mojibake;
pub use geojson_reader::{read_geojson_file, read_geojson_str};
pub use table::{FeatureTable, Record};
