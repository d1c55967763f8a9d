//! The reconciliation engines.
//!
//! Everything here works against an open [`Collection`] session and
//! stays inside its pending transaction; durability is decided by the
//! caller through the commit gate.
//!
//! [`Collection`]: crate::store::Collection

pub mod fields;
pub mod matcher;
pub mod search;
pub mod tags;

/// Diagnostic callbacks emitted by the mutation engines.
///
/// Engines never print; they report through this trait so the CLI can
/// route diagnostics to stderr (or drop them under `--quiet`) while
/// stdout stays reserved for requested data.
pub trait Progress {
    /// A tag was removed from, or renamed in, `notes` notes.
    fn tag_applied(&mut self, _tag: &str, _destination: Option<&str>, _notes: usize) {}

    /// A resolved tag turned out to be carried by no note.
    fn tag_missing(&mut self, _tag: &str) {}

    /// A pattern matched no registry key; the engine is falling back
    /// to an exact-token search over note tag strings.
    fn registry_fallback(&mut self, _pattern: &str) {}

    /// A referenced note id does not exist; the batch continues.
    fn note_skipped(&mut self, _id: &str) {}
}

/// No-op progress sink for callers that don't care.
impl Progress for () {}
