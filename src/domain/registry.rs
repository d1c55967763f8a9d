//! The collection-level tag registry.

use std::collections::BTreeMap;

use thiserror::Error;

/// Usage marker stored against registry entries. Its semantics belong
/// to the flashcard application; this tool only preserves it.
pub const DEFAULT_MARKER: i64 = -1;

/// Error decoding the persisted registry blob.
#[derive(Debug, Error)]
#[error("tag registry is not a flat string-keyed object: {raw}")]
pub struct RegistryError {
    pub raw: String,
}

/// The collection-wide index of known tag names.
///
/// Persisted as a JSON object mapping tag name to an integer usage
/// marker (`-1` in observed data). The registry is a hint index, not
/// authoritative: notes may carry tags the registry has dropped and
/// vice versa. It is rebuilt wholesale on every mutating operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRegistry(BTreeMap<String, i64>);

impl TagRegistry {
    /// Decodes the registry from its persisted JSON form.
    pub fn decode(raw: &str) -> Result<Self, RegistryError> {
        let entries: BTreeMap<String, i64> =
            serde_json::from_str(raw).map_err(|_| RegistryError {
                raw: raw.to_string(),
            })?;
        Ok(Self(entries))
    }

    /// Re-encodes the whole mapping for write-back. Key order is not
    /// part of the contract.
    pub fn encode(&self) -> String {
        // BTreeMap of strings to integers cannot fail to serialize.
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains_key(tag)
    }

    /// Iterates registry keys in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Removes an entry, returning its marker when present.
    pub fn remove(&mut self, tag: &str) -> Option<i64> {
        self.0.remove(tag)
    }

    /// Inserts an entry unless the key already exists; an existing
    /// entry keeps its marker untouched.
    pub fn insert_if_absent(&mut self, tag: &str, marker: i64) {
        self.0.entry(tag.to_string()).or_insert(marker);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_flat_object() {
        let reg = TagRegistry::decode(r#"{"math": -1, "algebra": -1}"#).unwrap();
        assert!(reg.contains("math"));
        assert!(reg.contains("algebra"));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn decode_rejects_array() {
        assert!(TagRegistry::decode("[1, 2]").is_err());
    }

    #[test]
    fn decode_rejects_nested_object() {
        assert!(TagRegistry::decode(r#"{"math": {"usn": -1}}"#).is_err());
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(TagRegistry::decode("not json").is_err());
    }

    #[test]
    fn encode_round_trips() {
        let reg = TagRegistry::decode(r#"{"b": -1, "a": 3}"#).unwrap();
        let back = TagRegistry::decode(&reg.encode()).unwrap();
        assert_eq!(back, reg);
    }

    #[test]
    fn insert_if_absent_preserves_existing_marker() {
        let mut reg = TagRegistry::decode(r#"{"kept": 7}"#).unwrap();
        reg.insert_if_absent("kept", DEFAULT_MARKER);
        assert_eq!(reg.remove("kept"), Some(7));
    }

    #[test]
    fn insert_if_absent_adds_missing_entry() {
        let mut reg = TagRegistry::default();
        reg.insert_if_absent("new", DEFAULT_MARKER);
        assert_eq!(reg.remove("new"), Some(DEFAULT_MARKER));
    }
}
