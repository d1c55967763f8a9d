//! Tag matching primitives.
//!
//! Two deliberately separate operations: a case-insensitive regex
//! search over registry keys, and exact whitespace-token matching over
//! a note's tag string. Keeping them apart keeps the fallback policy
//! in the tag engine auditable: substring matching may *find* a tag,
//! but only an exact token is ever *changed*.

use regex::{Regex, RegexBuilder};

use crate::store::{StoreError, StoreResult};

/// Compiles a user-supplied pattern for case-insensitive search.
pub fn compile_search(pattern: &str) -> StoreResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| StoreError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Finds registry keys the pattern matches.
///
/// The match is an unanchored substring search, so pattern `a` matches
/// keys `a`, `ab` and `ba`. Narrowing down to exact tokens happens at
/// the per-note application step, not here.
pub fn pattern_search<'a, I>(pattern: &str, keys: I) -> StoreResult<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let re = compile_search(pattern)?;
    Ok(keys
        .into_iter()
        .filter(|key| re.is_match(key))
        .map(str::to_string)
        .collect())
}

/// Exact-token membership over a raw space-delimited tag string.
pub fn exact_token(tag_string: &str, tag: &str) -> bool {
    tag_string.split_whitespace().any(|t| t == tag)
}
