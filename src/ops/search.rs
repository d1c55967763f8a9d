//! Query facade over notes and cards.
//!
//! One pass over the table regardless of pattern count: rows are
//! fetched once, then each pattern is evaluated per row against a
//! scope-dependent target set. A row qualifies only when every pattern
//! matches at least one target (AND across patterns, OR across
//! targets). Matching is case-insensitive and unanchored unless the
//! pattern anchors itself.

use std::vec;

use regex::Regex;

use super::matcher;
use crate::domain::{FIELD_SEP, FieldMap, ModelRegistry};
use crate::store::{CardRow, Collection, NoteRow, StoreError, StoreResult};

/// What a pattern is allowed to match for each row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    /// Markup-stripped field values, tag tokens, and numeric ids.
    All,
    /// Only values of fields whose *name* matches this pattern.
    Fields(String),
    /// Tag tokens only. Untagged notes expose one empty-string target
    /// so `^$` can select them.
    Tags,
    /// Cards instead of notes: card, note, and deck ids, with the
    /// card's scheduling state carried along for presentation.
    Cards,
}

/// One qualifying row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Note id, or card id in card scope.
    pub id: i64,
    /// Human-readable label: the note's sort field, or a card summary.
    pub label: String,
    /// The matched fragment(s), one or more per pattern.
    pub matched: Vec<String>,
}

/// Runs a search and returns a lazily-evaluated stream of hits.
///
/// The row set is fetched eagerly (a single table scan); pattern
/// evaluation happens as the iterator is driven. The stream is finite
/// and restartable by calling `search` again.
pub fn search<'c>(
    col: &'c mut Collection,
    patterns: &[String],
    scope: SearchScope,
) -> StoreResult<SearchMatches<'c>> {
    let compiled: Vec<Regex> = patterns
        .iter()
        .map(|p| matcher::compile_search(p))
        .collect::<StoreResult<_>>()?;
    // A fixed pattern; cannot fail to compile.
    let markup = Regex::new("<[^>]*>").expect("markup pattern is valid");

    let (source, models) = match scope {
        SearchScope::Cards => (
            Source::Cards {
                rows: col.all_cards()?.into_iter(),
            },
            None,
        ),
        SearchScope::Fields(field_pattern) => {
            let mode = NoteMode::Fields(matcher::compile_search(&field_pattern)?);
            let rows = col.all_notes()?.into_iter();
            (Source::Notes { rows, mode }, Some(col.models()?))
        }
        SearchScope::All => (
            Source::Notes {
                rows: col.all_notes()?.into_iter(),
                mode: NoteMode::All,
            },
            None,
        ),
        SearchScope::Tags => (
            Source::Notes {
                rows: col.all_notes()?.into_iter(),
                mode: NoteMode::Tags,
            },
            None,
        ),
    };

    Ok(SearchMatches {
        source,
        patterns: compiled,
        models,
        markup,
    })
}

enum NoteMode {
    All,
    Tags,
    Fields(Regex),
}

enum Source {
    Notes {
        rows: vec::IntoIter<NoteRow>,
        mode: NoteMode,
    },
    Cards {
        rows: vec::IntoIter<CardRow>,
    },
}

/// Lazily-evaluated search results. See [`search`].
pub struct SearchMatches<'c> {
    source: Source,
    patterns: Vec<Regex>,
    models: Option<&'c ModelRegistry>,
    markup: Regex,
}

impl Iterator for SearchMatches<'_> {
    type Item = StoreResult<SearchHit>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.source {
                Source::Notes { rows, mode } => {
                    let row = rows.next()?;
                    let targets = match note_targets(mode, self.models, &self.markup, &row) {
                        Ok(t) => t,
                        Err(e) => return Some(Err(e)),
                    };
                    if let Some(matched) = match_all(&self.patterns, &targets) {
                        return Some(Ok(SearchHit {
                            id: row.id,
                            label: row.sort_field,
                            matched,
                        }));
                    }
                }
                Source::Cards { rows } => {
                    let card = rows.next()?;
                    let targets = vec![
                        card.id.to_string(),
                        card.note_id.to_string(),
                        card.deck_id.to_string(),
                    ];
                    if let Some(matched) = match_all(&self.patterns, &targets) {
                        let label = format!(
                            "note {} deck {} due {} ivl {} ease {} reps {} lapses {}",
                            card.note_id,
                            card.deck_id,
                            card.due,
                            card.interval,
                            card.ease_factor,
                            card.reps,
                            card.lapses
                        );
                        return Some(Ok(SearchHit {
                            id: card.id,
                            label,
                            matched,
                        }));
                    }
                }
            }
        }
    }
}

/// Builds the target string set for one note under the given mode.
fn note_targets(
    mode: &NoteMode,
    models: Option<&ModelRegistry>,
    markup: &Regex,
    row: &NoteRow,
) -> StoreResult<Vec<String>> {
    let mut tags: Vec<String> = row.tags.split_whitespace().map(str::to_string).collect();
    if tags.is_empty() {
        // One empty target, so ^$ can select untagged notes.
        tags.push(String::new());
    }

    match mode {
        NoteMode::Tags => Ok(tags),
        NoteMode::All => {
            let mut targets = tags;
            targets.push(row.id.to_string());
            targets.push(row.model_id.to_string());
            let stripped = markup.replace_all(&row.fields, "");
            targets.extend(stripped.split(FIELD_SEP).map(str::to_string));
            Ok(targets)
        }
        NoteMode::Fields(field_re) => {
            let models = models.ok_or_else(|| {
                StoreError::MalformedInput("field scope requires model schemas".to_string())
            })?;
            let model = models
                .get(&row.model_id)
                .ok_or(StoreError::SchemaNotFound {
                    model_id: row.model_id,
                })?;
            let fields = FieldMap::resolve(model, &row.fields);
            Ok(fields
                .iter()
                .filter(|(name, _)| field_re.is_match(name))
                .map(|(_, value)| value.to_string())
                .collect())
        }
    }
}

/// Evaluates all patterns against the target set.
///
/// Returns the matched fragments when every pattern matched at least
/// one target, `None` otherwise. A pattern that matches several
/// targets contributes one fragment per target, as the diagnostic
/// output reports everything it found.
fn match_all(patterns: &[Regex], targets: &[String]) -> Option<Vec<String>> {
    let mut matched = Vec::new();
    for re in patterns {
        let mut found = false;
        for target in targets {
            if let Some(m) = re.find(target) {
                matched.push(m.as_str().to_string());
                found = true;
            }
        }
        if !found {
            return None;
        }
    }
    Some(matched)
}
