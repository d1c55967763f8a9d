//! Tag rename and removal command handlers.

use anyhow::{Result, bail};

use super::{LineSource, Reporter};
use crate::cli::{MvTagsArgs, PatternArgs};
use crate::ops::tags::rename_tags;
use crate::store::Collection;

/// `mv-tags`: the last argument is the destination, everything before
/// it is a source pattern.
pub fn handle_mv_tags(
    col: &mut Collection,
    args: &MvTagsArgs,
    reporter: &mut Reporter,
) -> Result<bool> {
    // clap enforces the arity, but be explicit about the contract.
    let Some((destination, sources)) = args.tags.split_last() else {
        bail!("usage: mv-tags regex [regex]... destination");
    };
    if sources.is_empty() {
        bail!("usage: mv-tags regex [regex]... destination");
    }

    let changed = rename_tags(col, sources, Some(destination.as_str()), reporter)?;
    summarize(reporter, changed, "renamed");
    Ok(changed > 0)
}

/// `rm-tags`: every argument (or stdin line) is a pattern to remove.
pub fn handle_rm_tags(
    col: &mut Collection,
    args: &PatternArgs,
    reporter: &mut Reporter,
) -> Result<bool> {
    let patterns = LineSource::new(&args.patterns, reporter).collect_all()?;
    let changed = rename_tags(col, &patterns, None, reporter)?;
    summarize(reporter, changed, "removed");
    Ok(changed > 0)
}

fn summarize(reporter: &Reporter, changed: usize, verb: &str) {
    if changed == 0 {
        reporter.info(&format!("No tags were {verb}."));
    } else {
        reporter.info(&format!("{changed} tag(s) successfully {verb}."));
    }
}
