//! Command handlers for the CLI.
//!
//! Handlers return `Ok(true)` when the operation accomplished
//! something, `Ok(false)` for a soft no-match / no-op outcome, and
//! `Err` for real failures. Requested data goes to stdout; everything
//! informational goes through the [`Reporter`] to stderr so output can
//! be piped onward.

mod catalog;
mod dump;
mod search;
mod tags;

pub use catalog::{Catalog, handle_list_catalog};
pub use dump::{
    handle_dump_fields, handle_dump_tags, handle_print_fields, handle_print_tags,
    handle_replace_fields, handle_replace_tags,
};
pub use search::{handle_search, handle_search_field};
pub use tags::{handle_mv_tags, handle_rm_tags};

use std::io;
use std::vec;

use anyhow::{Context, Result};

use crate::ops::Progress;

/// Routes diagnostics to stderr, or drops them under `--quiet`.
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn info(&self, msg: &str) {
        if !self.quiet {
            eprintln!("{msg}");
        }
    }
}

impl Progress for Reporter {
    fn tag_applied(&mut self, tag: &str, destination: Option<&str>, notes: usize) {
        let verb = if destination.is_some() {
            "renamed"
        } else {
            "removed"
        };
        self.info(&format!(
            "Tag '{tag}' successfully {verb} in {notes} note(s)."
        ));
    }

    fn tag_missing(&mut self, tag: &str) {
        self.info(&format!("Tag '{tag}' not found in any notes."));
    }

    fn registry_fallback(&mut self, pattern: &str) {
        self.info(&format!(
            "No registry tags match '{pattern}', searching notes for the exact name."
        ));
    }

    fn note_skipped(&mut self, id: &str) {
        self.info(&format!("Note with id {id} not found, skipping."));
    }
}

/// Input items for a command: an explicit argument list, or one item
/// per line from stdin when the list was omitted.
///
/// The stdin variant is lazy, so commands that process line-by-line
/// (dump reloads in particular) can stream arbitrarily long pipes.
pub enum LineSource {
    Args(vec::IntoIter<String>),
    Stdin(io::Lines<io::StdinLock<'static>>),
}

impl LineSource {
    pub fn new(args: &[String], reporter: &Reporter) -> Self {
        if args.is_empty() {
            reporter.info("Reading from stdin...");
            Self::Stdin(io::stdin().lines())
        } else {
            Self::Args(args.to_vec().into_iter())
        }
    }

    /// Drains the source into a vector, for commands that need the
    /// whole list up front.
    pub fn collect_all(self) -> Result<Vec<String>> {
        self.collect::<io::Result<Vec<_>>>()
            .context("failed to read from stdin")
    }
}

impl Iterator for LineSource {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Args(items) => items.next().map(Ok),
            Self::Stdin(lines) => lines
                .next()
                .map(|line| line.map(|l| l.trim_end().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_source_prefers_explicit_args() {
        let args = vec!["a".to_string(), "b".to_string()];
        let items = LineSource::new(&args, &Reporter::new(true))
            .collect_all()
            .unwrap();
        assert_eq!(items, args);
    }
}
