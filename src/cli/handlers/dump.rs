//! Field and tag print / dump / reload command handlers.
//!
//! `print-*` is the human-readable form; `dump-*` emits the JSON batch
//! contract (note id → data) on stdout for external editing, and
//! `replace-*` reloads it.

use std::collections::BTreeMap;

use anyhow::Result;

use super::{LineSource, Reporter};
use crate::cli::{DocArgs, IdArgs};
use crate::domain::FieldMap;
use crate::ops::Progress;
use crate::ops::fields::{apply_field_dump, apply_tag_dump, note_fields};
use crate::store::Collection;

/// Iterates requested ids, feeding each parsed id to `visit`. Invalid
/// and unknown ids are skipped with a diagnostic; the batch succeeds
/// when at least one id did.
fn for_each_note_id(
    col: &mut Collection,
    args: &IdArgs,
    reporter: &mut Reporter,
    mut visit: impl FnMut(&mut Collection, i64, &mut Reporter) -> Result<bool>,
) -> Result<bool> {
    let ids = LineSource::new(&args.ids, reporter).collect_all()?;
    let mut any = false;
    for raw in &ids {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let Ok(id) = trimmed.parse::<i64>() else {
            reporter.info(&format!("Invalid note id '{trimmed}', skipping."));
            continue;
        };
        if visit(col, id, reporter)? {
            any = true;
        } else {
            reporter.note_skipped(trimmed);
        }
    }
    Ok(any)
}

pub fn handle_print_fields(
    col: &mut Collection,
    args: &IdArgs,
    reporter: &mut Reporter,
) -> Result<bool> {
    for_each_note_id(col, args, reporter, |col, id, reporter| {
        let Some(fields) = note_fields(col, id)? else {
            return Ok(false);
        };
        reporter.info(&format!("# Note {id} #"));
        for (name, value) in fields.iter() {
            reporter.info(&format!("## {name} ##"));
            println!("{value}");
        }
        println!();
        Ok(true)
    })
}

pub fn handle_dump_fields(
    col: &mut Collection,
    args: &IdArgs,
    reporter: &mut Reporter,
) -> Result<bool> {
    let mut dump: BTreeMap<String, FieldMap> = BTreeMap::new();
    let any = for_each_note_id(col, args, reporter, |col, id, _| {
        let Some(fields) = note_fields(col, id)? else {
            return Ok(false);
        };
        dump.insert(id.to_string(), fields);
        Ok(true)
    })?;
    println!("{}", serde_json::to_string(&dump)?);
    Ok(any)
}

pub fn handle_replace_fields(
    col: &mut Collection,
    args: &DocArgs,
    reporter: &mut Reporter,
) -> Result<bool> {
    apply_docs(col, args, reporter, apply_field_dump)
}

pub fn handle_print_tags(
    col: &mut Collection,
    args: &IdArgs,
    reporter: &mut Reporter,
) -> Result<bool> {
    for_each_note_id(col, args, reporter, |col, id, reporter| {
        let Some(note) = col.note(id)? else {
            return Ok(false);
        };
        reporter.info(&format!("# Note {id} #"));
        println!("{}", note.tags.trim());
        println!();
        Ok(true)
    })
}

pub fn handle_dump_tags(
    col: &mut Collection,
    args: &IdArgs,
    reporter: &mut Reporter,
) -> Result<bool> {
    let mut dump: BTreeMap<String, String> = BTreeMap::new();
    let any = for_each_note_id(col, args, reporter, |col, id, _| {
        let Some(note) = col.note(id)? else {
            return Ok(false);
        };
        dump.insert(id.to_string(), note.tags);
        Ok(true)
    })?;
    println!("{}", serde_json::to_string(&dump)?);
    Ok(any)
}

pub fn handle_replace_tags(
    col: &mut Collection,
    args: &DocArgs,
    reporter: &mut Reporter,
) -> Result<bool> {
    apply_docs(col, args, reporter, apply_tag_dump)
}

/// Streams dump documents (one JSON object per argument or stdin
/// line) through the given reload engine.
fn apply_docs(
    col: &mut Collection,
    args: &DocArgs,
    reporter: &mut Reporter,
    apply: impl Fn(&mut Collection, &str, &mut dyn Progress) -> crate::store::StoreResult<usize>,
) -> Result<bool> {
    let mut total = 0usize;
    for doc in LineSource::new(&args.docs, reporter) {
        let doc = doc?;
        if doc.trim().is_empty() {
            continue;
        }
        total += apply(col, &doc, reporter)?;
    }
    if total == 0 {
        reporter.info("No notes were modified.");
    } else {
        reporter.info(&format!("{total} note(s) successfully modified."));
    }
    Ok(total > 0)
}
