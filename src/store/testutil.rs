//! In-memory collection fixtures for unit tests.

use super::Collection;

/// Minimal slice of the flashcard application's schema: the three
/// tables this tool touches, with only the columns it reads or writes
/// plus the sync bookkeeping ones.
pub(crate) const FIXTURE_SCHEMA: &str = "
    CREATE TABLE col (
        id INTEGER PRIMARY KEY,
        crt INTEGER NOT NULL DEFAULT 0,
        mod INTEGER NOT NULL DEFAULT 0,
        usn INTEGER NOT NULL DEFAULT 0,
        models TEXT NOT NULL DEFAULT '{}',
        decks TEXT NOT NULL DEFAULT '{}',
        tags TEXT NOT NULL DEFAULT '{}'
    );
    CREATE TABLE notes (
        id INTEGER PRIMARY KEY,
        mid INTEGER NOT NULL,
        mod INTEGER NOT NULL DEFAULT 0,
        usn INTEGER NOT NULL DEFAULT 0,
        tags TEXT NOT NULL DEFAULT '',
        flds TEXT NOT NULL DEFAULT '',
        sfld TEXT NOT NULL DEFAULT ''
    );
    CREATE TABLE cards (
        id INTEGER PRIMARY KEY,
        nid INTEGER NOT NULL,
        did INTEGER NOT NULL,
        due INTEGER NOT NULL DEFAULT 0,
        ivl INTEGER NOT NULL DEFAULT 0,
        factor INTEGER NOT NULL DEFAULT 0,
        reps INTEGER NOT NULL DEFAULT 0,
        lapses INTEGER NOT NULL DEFAULT 0
    );
";

const FIXTURE_MODELS: &str = r#"{
    "1000": {"name": "Basic", "flds": [{"name": "Front", "ord": 0}, {"name": "Back", "ord": 1}]},
    "2000": {"name": "Cloze", "flds": [{"name": "Text", "ord": 0}]}
}"#;

const FIXTURE_DECKS: &str = r#"{"1": {"name": "Default"}}"#;

/// An in-memory collection with two models, one deck, a small tag
/// registry and a couple of notes.
pub(crate) fn seeded_collection() -> Collection {
    let col = Collection::open_in_memory().expect("in-memory open");
    col.conn().execute_batch(FIXTURE_SCHEMA).expect("schema");
    col.conn()
        .execute(
            "INSERT INTO col (id, crt, mod, usn, models, decks, tags)
             VALUES (1, 0, 0, 0, ?1, ?2, ?3)",
            rusqlite::params![
                FIXTURE_MODELS,
                FIXTURE_DECKS,
                r#"{"algebra": -1, "math": -1, "ab": -1}"#
            ],
        )
        .expect("col row");
    col.conn()
        .execute_batch(
            "INSERT INTO notes (id, mid, tags, flds, sfld) VALUES
                (1, 1000, ' algebra math ', 'What is x?\u{001f}x is x', 'What is x?');
             INSERT INTO notes (id, mid, tags, flds, sfld) VALUES
                (2, 1000, ' ab ', 'front two\u{001f}back two', 'front two');
             INSERT INTO cards (id, nid, did, due, ivl, factor, reps, lapses)
                VALUES (10, 1, 1, 5, 10, 2500, 3, 1);",
        )
        .expect("seed rows");
    col
}

/// Adds one note row to a fixture collection.
pub(crate) fn insert_note(col: &Collection, id: i64, mid: i64, tags: &str, flds: &str, sfld: &str) {
    col.conn()
        .execute(
            "INSERT INTO notes (id, mid, tags, flds, sfld) VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![id, mid, tags, flds, sfld],
        )
        .expect("insert note");
}
