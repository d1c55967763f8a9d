//! Core domain types for collection data.
//!
//! Everything the collection stores as loosely-typed embedded blobs
//! (space-padded tag strings, separator-joined field blobs, JSON model
//! and tag-registry objects) is decoded into one of these types at the
//! storage boundary and validated exactly once.

mod field_map;
mod model;
mod registry;
mod tag_set;

pub use field_map::{FIELD_SEP, FieldMap, FieldMapError};
pub use model::{Model, ModelRegistry, decode_models};
pub use registry::{DEFAULT_MARKER, RegistryError, TagRegistry};
pub use tag_set::TagSet;
