//! Search command handlers.

use anyhow::{Context, Result};

use super::{LineSource, Reporter};
use crate::cli::{PatternArgs, SearchFieldArgs};
use crate::ops::search::{SearchScope, search};
use crate::store::Collection;

/// Shared driver for `search`, `search-tags` and `search-cards`.
///
/// Prints one id per matching row to stdout and a human-readable
/// summary per hit to stderr. Reports success only when something
/// matched.
pub fn handle_search(
    col: &mut Collection,
    args: &PatternArgs,
    scope: SearchScope,
    reporter: &mut Reporter,
) -> Result<bool> {
    let patterns = LineSource::new(&args.patterns, reporter).collect_all()?;
    run_search(col, &patterns, scope, reporter)
}

/// `search-field`: the first argument names the fields, the rest are
/// the patterns.
pub fn handle_search_field(
    col: &mut Collection,
    args: &SearchFieldArgs,
    reporter: &mut Reporter,
) -> Result<bool> {
    let patterns = LineSource::new(&args.patterns, reporter).collect_all()?;
    run_search(
        col,
        &patterns,
        SearchScope::Fields(args.field.clone()),
        reporter,
    )
}

fn run_search(
    col: &mut Collection,
    patterns: &[String],
    scope: SearchScope,
    reporter: &mut Reporter,
) -> Result<bool> {
    let matches = search(col, patterns, scope).context("search failed")?;

    let mut any = false;
    for hit in matches {
        let hit = hit?;
        reporter.info(&format!(
            "Found {} in '{}', id:",
            hit.matched.join(" and "),
            hit.label
        ));
        println!("{}", hit.id);
        any = true;
    }
    Ok(any)
}
