//! Ordered field name/value mapping for a single note.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Model;

/// Separator byte joining field values inside a note's field blob.
pub const FIELD_SEP: char = '\u{1f}';

/// Error building a [`FieldMap`] from externally supplied lists.
#[derive(Debug, Error)]
pub enum FieldMapError {
    /// Name and value lists must have equal, non-zero length.
    #[error("field name and value lists must have equal, non-zero length ({names} names, {values} values)")]
    ArityMismatch { names: usize, values: usize },
}

/// A note's fields as an ordered list of `(name, value)` pairs.
///
/// Field identity is positional: the blob carries only values, and the
/// note's model supplies the names in schema order. Serialization for
/// dump/reload round-trips is a 2-tuple of (name list, value list) so
/// the order survives a trip through external tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap(Vec<String>, Vec<String>);

impl FieldMap {
    /// Pairs a model's ordered field names with the values split out of
    /// a field blob.
    ///
    /// When the model has more names than the blob has values, the
    /// missing trailing values default to the empty string. Extra blob
    /// segments beyond the model's field count are dropped.
    pub fn resolve(model: &Model, blob: &str) -> Self {
        let mut values: Vec<String> = blob.split(FIELD_SEP).map(str::to_string).collect();
        values.truncate(model.field_names.len());
        values.resize(model.field_names.len(), String::new());
        Self(model.field_names.clone(), values)
    }

    /// Builds a map from externally supplied name and value lists, as
    /// produced by a field dump.
    pub fn from_lists(names: Vec<String>, values: Vec<String>) -> Result<Self, FieldMapError> {
        if names.is_empty() || names.len() != values.len() {
            return Err(FieldMapError::ArityMismatch {
                names: names.len(),
                values: values.len(),
            });
        }
        Ok(Self(names, values))
    }

    /// Re-joins the values into the persisted blob form.
    pub fn join(&self) -> String {
        self.1.join(&FIELD_SEP.to_string())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn values(&self) -> &[String] {
        &self.1
    }

    /// Iterates `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .zip(self.1.iter())
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn model(names: &[&str]) -> Model {
        Model {
            id: 1,
            field_names: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn resolve_pairs_names_and_values_in_order() {
        let m = model(&["Front", "Back"]);
        let fields = FieldMap::resolve(&m, "hello\u{1f}world");
        let pairs: Vec<_> = fields.iter().collect();
        assert_eq!(pairs, vec![("Front", "hello"), ("Back", "world")]);
    }

    #[test]
    fn resolve_pads_missing_trailing_values() {
        let m = model(&["Front", "Back", "Extra"]);
        let fields = FieldMap::resolve(&m, "only");
        assert_eq!(fields.values(), &["only", "", ""]);
    }

    #[test]
    fn resolve_drops_extra_blob_segments() {
        let m = model(&["Front"]);
        let fields = FieldMap::resolve(&m, "a\u{1f}b\u{1f}c");
        assert_eq!(fields.values(), &["a"]);
    }

    #[test]
    fn join_round_trips_blob() {
        let m = model(&["Front", "Back"]);
        let blob = "hello\u{1f}world";
        let fields = FieldMap::resolve(&m, blob);
        assert_eq!(fields.join(), blob);
    }

    #[test]
    fn from_lists_rejects_arity_mismatch() {
        let err = FieldMap::from_lists(
            vec!["Front".into(), "Back".into()],
            vec!["only".into()],
        );
        assert!(err.is_err());
    }

    #[test]
    fn from_lists_rejects_empty() {
        assert!(FieldMap::from_lists(vec![], vec![]).is_err());
    }

    #[test]
    fn serde_shape_is_pair_of_lists() {
        let fields =
            FieldMap::from_lists(vec!["Front".into()], vec!["hello".into()]).unwrap();
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"[["Front"],["hello"]]"#);
        let back: FieldMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fields);
    }
}
