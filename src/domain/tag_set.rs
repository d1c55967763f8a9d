//! A note's tag set and its canonical string form.

use std::collections::BTreeSet;
use std::fmt;

/// The set of tags carried by a single note.
///
/// Notes persist their tags as a single space-delimited string with a
/// leading and trailing space when non-empty (`" math algebra "`), so
/// that substring searches for `" tag "` behave consistently. A `TagSet`
/// is the decoded form: an ordered set with exact-token membership.
///
/// Re-encoding is canonical: tags are deduplicated, sorted, joined with
/// single spaces and padded, or the empty string when the set is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    /// Decodes the persisted tag string into a set.
    ///
    /// Splits on whitespace, so any amount of padding or internal
    /// spacing is accepted; duplicates collapse.
    pub fn parse(raw: &str) -> Self {
        Self(raw.split_whitespace().map(str::to_string).collect())
    }

    /// Exact-token membership. `a` is never a member of a set holding
    /// only `ab`.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Inserts a tag. Returns `false` if it was already present.
    pub fn insert(&mut self, tag: &str) -> bool {
        self.0.insert(tag.to_string())
    }

    /// Removes a tag by exact token. Returns `true` if it was present.
    pub fn remove(&mut self, tag: &str) -> bool {
        self.0.remove(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Re-encodes into the canonical persisted form.
    pub fn encode(&self) -> String {
        if self.0.is_empty() {
            String::new()
        } else {
            let joined = self.0.iter().cloned().collect::<Vec<_>>().join(" ");
            format!(" {} ", joined)
        }
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for tag in &self.0 {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{tag}")?;
            first = false;
        }
        Ok(())
    }
}
