//! Note-type (model) schemas decoded from collection metadata.

use std::collections::HashMap;

use serde::Deserialize;

/// A note type: the schema that fixes a note's field names and order.
///
/// Read-only in this tool. The collection stores models as one JSON
/// object keyed by model id; only the ordered field-name list matters
/// for resolving field blobs, everything else is ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub id: i64,
    pub field_names: Vec<String>,
}

/// All models of a collection, keyed by id. Loaded once per session.
pub type ModelRegistry = HashMap<i64, Model>;

#[derive(Deserialize)]
struct RawModel {
    flds: Vec<RawField>,
}

#[derive(Deserialize)]
struct RawField {
    name: String,
}

/// Decodes the collection's `models` JSON blob.
///
/// Model ids appear as string keys in the blob; keys that are not
/// valid integers are rejected rather than silently skipped.
pub fn decode_models(raw: &str) -> Result<ModelRegistry, serde_json::Error> {
    let parsed: HashMap<String, RawModel> = serde_json::from_str(raw)?;
    let mut registry = ModelRegistry::with_capacity(parsed.len());
    for (key, raw_model) in parsed {
        let id: i64 = key.parse().map_err(serde::de::Error::custom)?;
        let field_names = raw_model.flds.into_iter().map(|f| f.name).collect();
        registry.insert(id, Model { id, field_names });
    }
    Ok(registry)
}
