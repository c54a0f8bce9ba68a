//! IDERA geographic-object catalog.
//!
//! The catalog is a static taxonomy (class → subclass → geographic object)
//! loaded once at startup from a JSON document and read-only afterwards.
//! Each leaf object declares the geometry kinds it allows and the ordered
//! attribute schema a conforming feature table must carry.

mod loader;
mod model;

pub use loader::{load_catalog, parse_catalog};
pub use model::{AttributeSpec, Catalog, GeoObject, ObjectClass, Subclass};
