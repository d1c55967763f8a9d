//! Model and deck listing handlers.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::Reporter;
use crate::cli::PatternArgs;
use crate::ops::matcher::compile_search;
use crate::store::{Collection, MetaColumn};

/// Which collection catalog to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    Models,
    Decks,
}

impl Catalog {
    fn column(self) -> MetaColumn {
        match self {
            Self::Models => MetaColumn::Models,
            Self::Decks => MetaColumn::Decks,
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Self::Models => "models",
            Self::Decks => "decks",
        }
    }
}

/// A catalog entry only needs its display name; the rest of the blob
/// is the flashcard application's business.
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    name: String,
}

/// Lists catalog entries whose name or id matches every pattern.
///
/// With no patterns, lists everything immediately; unlike the other
/// commands this one never falls back to stdin. Names go to stderr,
/// ids to stdout so the id list can be piped onward.
pub fn handle_list_catalog(
    col: &mut Collection,
    args: &PatternArgs,
    catalog: Catalog,
    reporter: &mut Reporter,
) -> Result<bool> {
    let mut patterns = args.patterns.clone();
    if patterns.is_empty() {
        reporter.info(&format!("Listing all {}.", catalog.noun()));
        patterns.push(".".to_string());
    }
    let regexes = patterns
        .iter()
        .map(|p| compile_search(p))
        .collect::<Result<Vec<_>, _>>()?;

    let raw = col.meta_blob(catalog.column())?;
    let entries: BTreeMap<String, CatalogEntry> = serde_json::from_str(&raw)
        .with_context(|| format!("couldn't decode {} blob", catalog.noun()))?;

    for (id, entry) in &entries {
        let qualifies = regexes
            .iter()
            .all(|re| re.is_match(&entry.name) || re.is_match(id));
        if qualifies {
            reporter.info(&format!("# {} #", entry.name));
            println!("{id}");
        }
    }
    Ok(true)
}
