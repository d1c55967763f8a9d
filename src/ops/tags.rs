//! Tag rename and removal engine.
//!
//! One invocation handles an ordered list of target patterns and an
//! optional destination tag (no destination means removal). Each
//! resolved tag is rewritten across every note carrying it and in the
//! collection tag registry, as one logical operation; the registry is
//! persisted once at the end.

use super::{Progress, matcher};
use crate::domain::{DEFAULT_MARKER, TagSet};
use crate::store::{Collection, StoreResult};

/// Renames (or, with no destination, removes) every tag matching the
/// target patterns.
///
/// Resolution is two-tier: each pattern is first searched against the
/// registry keys; when nothing matches there, the literal pattern is
/// tried as an exact tag name directly over note tag strings. The
/// registry is only a hint index and can drift from what notes
/// actually carry, so the fallback is the safety net.
///
/// Returns the number of *tags* changed, not notes touched. Zero means
/// the whole operation was a no-op: nothing was written, including the
/// registry.
pub fn rename_tags(
    col: &mut Collection,
    targets: &[String],
    destination: Option<&str>,
    progress: &mut dyn Progress,
) -> StoreResult<usize> {
    let mut registry = col.load_tag_registry()?;
    let mut changed = 0usize;

    for target in targets {
        let matched = matcher::pattern_search(target, registry.names())?;
        if matched.is_empty() {
            progress.registry_fallback(target);
            let touched = apply_exact(col, target, destination, progress)?;
            if touched > 0 {
                changed += 1;
                // The registry may still carry the literal name even
                // though the pattern search missed it.
                registry.remove(target);
                if let Some(dst) = destination {
                    registry.insert_if_absent(dst, DEFAULT_MARKER);
                }
            }
        } else {
            for tag in matched {
                changed += 1;
                registry.remove(&tag);
                if let Some(dst) = destination {
                    registry.insert_if_absent(dst, DEFAULT_MARKER);
                }
                apply_exact(col, &tag, destination, progress)?;
            }
        }
    }

    if changed > 0 {
        col.save_tag_registry(&registry)?;
    }
    Ok(changed)
}

/// Rewrites one exact tag across every note carrying it.
///
/// The storage layer's `LIKE` prefilter over-matches (searching `a`
/// also returns notes tagged `ab`), so membership is re-verified with
/// an exact-token check before any row is rewritten. The new tag
/// string is the canonical form: deduplicated, sorted, space-padded.
fn apply_exact(
    col: &mut Collection,
    tag: &str,
    destination: Option<&str>,
    progress: &mut dyn Progress,
) -> StoreResult<usize> {
    let candidates = col.notes_with_tag_like(tag)?;
    let mut touched = 0usize;

    for row in candidates {
        let mut tags = TagSet::parse(&row.tags);
        if !tags.remove(tag) {
            // Prefilter over-match; leave the note alone.
            continue;
        }
        if let Some(dst) = destination {
            tags.insert(dst);
        }
        col.update_note_tags(row.id, &tags.encode())?;
        touched += 1;
    }

    if touched > 0 {
        progress.tag_applied(tag, destination, touched);
    } else {
        progress.tag_missing(tag);
    }
    Ok(touched)
}
