//! Pipeline steps aligning an uploaded feature table to a catalog object.
//!
//! The steps mirror one operator session: reproject, pick a geographic
//! object, normalize the geometry kind, map source columns onto the
//! declared attributes, edit, validate, export. Each step is a pure
//! in-memory transformation; the `Session` object threads the working
//! state through them.

mod mapping;
mod normalize;
mod session;
mod validate;

pub use mapping::{build_clean_table, suggest_mapping, FieldMapping, Suggestion};
pub use normalize::normalize_geometry;
pub use session::Session;
pub use validate::validate;
