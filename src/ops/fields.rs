//! Field resolution, replacement, and the dump/reload batch contract.
//!
//! Dumps are JSON objects keyed by note id (as a string). Field dumps
//! map each id to a 2-tuple of (ordered field-name list, ordered
//! field-value list) so positional field identity survives a
//! dump → external edit → reload cycle; tag dumps map each id to the
//! raw tag string.

use std::collections::BTreeMap;

use super::Progress;
use crate::domain::{FieldMap, TagSet};
use crate::store::{Collection, StoreError, StoreResult};

/// Resolves a note's field blob into its named, ordered field mapping.
///
/// Returns `Ok(None)` when the note does not exist; a missing model
/// schema is an error.
pub fn note_fields(col: &mut Collection, id: i64) -> StoreResult<Option<FieldMap>> {
    let Some(note) = col.note(id)? else {
        return Ok(None);
    };
    let model = col.model(note.model_id)?;
    Ok(Some(FieldMap::resolve(model, &note.fields)))
}

/// Replaces a note's field values wholesale.
///
/// The caller supplies the full ordered value list, assumed to come
/// from a prior read of the same note; nothing is padded or truncated
/// here. Returns `false` when the note does not exist.
pub fn replace_fields(col: &mut Collection, id: i64, fields: &FieldMap) -> StoreResult<bool> {
    col.update_note_fields(id, &fields.join())
}

/// Applies one field-dump document.
///
/// Structural problems (not an object, lists of unequal or zero
/// length, a non-numeric id key) abort the whole document with
/// `MalformedInput` before any further row is written. Ids that simply
/// don't exist are skipped with a diagnostic and the rest of the batch
/// continues. Returns how many notes were modified.
pub fn apply_field_dump(
    col: &mut Collection,
    doc: &str,
    progress: &mut dyn Progress,
) -> StoreResult<usize> {
    let parsed: BTreeMap<String, (Vec<String>, Vec<String>)> = serde_json::from_str(doc)
        .map_err(|e| StoreError::MalformedInput(format!("couldn't decode field dump: {e}")))?;

    let mut applied = 0usize;
    for (id_str, (names, values)) in parsed {
        let fields = FieldMap::from_lists(names, values)
            .map_err(|e| StoreError::MalformedInput(e.to_string()))?;
        let id = parse_note_id(&id_str)?;
        if replace_fields(col, id, &fields)? {
            applied += 1;
        } else {
            progress.note_skipped(&id_str);
        }
    }
    Ok(applied)
}

/// Applies one tag-dump document, canonicalizing each tag string on
/// the way in (deduplicated, sorted, space-padded).
pub fn apply_tag_dump(
    col: &mut Collection,
    doc: &str,
    progress: &mut dyn Progress,
) -> StoreResult<usize> {
    let parsed: BTreeMap<String, String> = serde_json::from_str(doc)
        .map_err(|e| StoreError::MalformedInput(format!("couldn't decode tag dump: {e}")))?;

    let mut applied = 0usize;
    for (id_str, raw) in parsed {
        let id = parse_note_id(&id_str)?;
        let canonical = TagSet::parse(&raw).encode();
        if col.update_note_tags(id, &canonical)? {
            applied += 1;
        } else {
            progress.note_skipped(&id_str);
        }
    }
    Ok(applied)
}

fn parse_note_id(id_str: &str) -> StoreResult<i64> {
    id_str
        .trim()
        .parse()
        .map_err(|_| StoreError::MalformedInput(format!("invalid note id: {id_str}")))
}
