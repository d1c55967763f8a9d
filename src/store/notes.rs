//! Row-level access to the `notes` and `cards` tables.

use chrono::Utc;

use super::{Collection, StoreResult};

/// One row of the `notes` table, as the reconciliation engines see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub id: i64,
    pub model_id: i64,
    /// Raw separator-joined field blob.
    pub fields: String,
    /// Raw space-padded tag string.
    pub tags: String,
    /// The sort field, used only for human-readable labels.
    pub sort_field: String,
}

/// One row of the `cards` table. Scheduling attributes are read-only
/// presentation data for this tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRow {
    pub id: i64,
    pub note_id: i64,
    pub deck_id: i64,
    /// Due offset in days from the collection creation date.
    pub due: i64,
    pub interval: i64,
    pub ease_factor: i64,
    pub reps: i64,
    pub lapses: i64,
}

const NOTE_COLUMNS: &str = "id, mid, flds, tags, sfld";

fn note_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<NoteRow> {
    Ok(NoteRow {
        id: row.get(0)?,
        model_id: row.get(1)?,
        fields: row.get(2)?,
        tags: row.get(3)?,
        sort_field: row.get(4)?,
    })
}

impl Collection {
    /// Fetches a single note by id.
    pub fn note(&self, id: i64) -> StoreResult<Option<NoteRow>> {
        let sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1");
        match self.conn.query_row(&sql, [id], note_from_row) {
            Ok(row) => Ok(Some(row)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Scans every note, in id order.
    pub fn all_notes(&self) -> StoreResult<Vec<NoteRow>> {
        let sql = format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], note_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Broad substring prefilter over tag strings.
    ///
    /// `LIKE '%tag%'` also returns notes whose tags merely contain the
    /// token as a substring (searching `a` returns `ab`), so callers
    /// must re-verify membership with an exact-token check before
    /// touching a row.
    pub fn notes_with_tag_like(&self, tag: &str) -> StoreResult<Vec<NoteRow>> {
        let sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE tags LIKE ?1 ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let pattern = format!("%{tag}%");
        let rows = stmt.query_map([pattern], note_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Rewrites a note's tag string, bumping its modification timestamp
    /// and marking it unsynced. Returns `false` when no such note
    /// exists.
    pub fn update_note_tags(&mut self, id: i64, tags: &str) -> StoreResult<bool> {
        let changed = self.conn.execute(
            "UPDATE notes SET tags = ?1, mod = ?2, usn = ?3 WHERE id = ?4",
            rusqlite::params![tags, Utc::now().timestamp(), -1, id],
        )?;
        if changed > 0 {
            self.dirty = true;
        }
        Ok(changed > 0)
    }

    /// Rewrites a note's field blob, bumping its modification timestamp
    /// and marking it unsynced. Returns `false` when no such note
    /// exists.
    pub fn update_note_fields(&mut self, id: i64, blob: &str) -> StoreResult<bool> {
        let changed = self.conn.execute(
            "UPDATE notes SET flds = ?1, mod = ?2, usn = ?3 WHERE id = ?4",
            rusqlite::params![blob, Utc::now().timestamp(), -1, id],
        )?;
        if changed > 0 {
            self.dirty = true;
        }
        Ok(changed > 0)
    }

    /// Scans every card, in id order.
    pub fn all_cards(&self) -> StoreResult<Vec<CardRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, nid, did, due, ivl, factor, reps, lapses FROM cards ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CardRow {
                id: row.get(0)?,
                note_id: row.get(1)?,
                deck_id: row.get(2)?,
                due: row.get(3)?,
                interval: row.get(4)?,
                ease_factor: row.get(5)?,
                reps: row.get(6)?,
                lapses: row.get(7)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

#[cfg(test)]
mod tests {
    use crate::store::testutil::seeded_collection;
    use pretty_assertions::assert_eq;

    #[test]
    fn note_lookup_by_id() {
        let col = seeded_collection();
        let note = col.note(1).unwrap().expect("note 1 seeded");
        assert_eq!(note.model_id, 1000);
        assert_eq!(note.tags, " algebra math ");
    }

    #[test]
    fn note_lookup_missing_is_none() {
        let col = seeded_collection();
        assert!(col.note(999).unwrap().is_none());
    }

    #[test]
    fn tag_like_prefilter_over_matches() {
        let col = seeded_collection();
        // "math" is a substring of nothing else seeded, but "a" is a
        // substring of several tags; the prefilter is expected to
        // return all of them.
        let rows = col.notes_with_tag_like("a").unwrap();
        assert!(rows.len() >= 2);
    }

    #[test]
    fn update_note_tags_marks_dirty_and_unsynced() {
        let mut col = seeded_collection();
        assert!(col.update_note_tags(1, " rewritten ").unwrap());
        assert!(col.is_dirty());
        let (tags, usn): (String, i64) = col
            .conn()
            .query_row("SELECT tags, usn FROM notes WHERE id = 1", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!(tags, " rewritten ");
        assert_eq!(usn, -1);
    }

    #[test]
    fn update_missing_note_reports_false_and_stays_clean() {
        let mut col = seeded_collection();
        assert!(!col.update_note_tags(999, " x ").unwrap());
        assert!(!col.is_dirty());
    }

    #[test]
    fn card_scan_reads_scheduling_fields() {
        let col = seeded_collection();
        let cards = col.all_cards().unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].note_id, 1);
        assert_eq!(cards[0].ease_factor, 2500);
    }
}
