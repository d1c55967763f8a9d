//! Shared test harness: a throwaway collection file with the slice of
//! the flashcard application's schema this tool touches.

use assert_cmd::Command;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCHEMA: &str = "
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

const MODELS: &str = r#"{
    "1000": {"name": "Basic", "flds": [{"name": "Front", "ord": 0}, {"name": "Back", "ord": 1}]}
}"#;

const DECKS: &str = r#"{"1": {"name": "Default"}}"#;

/// A collection file in a temp directory, cleaned up on drop.
pub struct TestCollection {
    _dir: TempDir,
    path: PathBuf,
}

#[allow(dead_code)] // not every integration test uses every helper
impl TestCollection {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp directory");
        let path = dir.path().join("collection.anki2");
        let conn = Connection::open(&path).expect("create collection file");
        conn.execute_batch(SCHEMA).expect("create schema");
        conn.execute(
            "INSERT INTO col (id, crt, mod, usn, models, decks, tags)
             VALUES (1, 0, 0, 0, ?1, ?2, '{}')",
            rusqlite::params![MODELS, DECKS],
        )
        .expect("seed col row");
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a fresh connection for fixture setup and assertions.
    pub fn conn(&self) -> Connection {
        Connection::open(&self.path).expect("open collection")
    }

    pub fn add_note(&self, id: i64, fields: &[&str], tags: &str) {
        let blob = fields.join("\u{1f}");
        let sfld = fields.first().copied().unwrap_or("");
        self.conn()
            .execute(
                "INSERT INTO notes (id, mid, tags, flds, sfld) VALUES (?1, 1000, ?2, ?3, ?4)",
                rusqlite::params![id, tags, blob, sfld],
            )
            .expect("insert note");
    }

    pub fn add_card(&self, id: i64, note_id: i64, deck_id: i64) {
        self.conn()
            .execute(
                "INSERT INTO cards (id, nid, did, due, ivl, factor, reps, lapses)
                 VALUES (?1, ?2, ?3, 5, 10, 2500, 3, 1)",
                rusqlite::params![id, note_id, deck_id],
            )
            .expect("insert card");
    }

    /// Replaces the tag registry with `{tag: -1, ...}`.
    pub fn set_registry(&self, tags: &[&str]) {
        let entries: Vec<String> = tags.iter().map(|t| format!("\"{t}\": -1")).collect();
        let blob = format!("{{{}}}", entries.join(", "));
        self.conn()
            .execute("UPDATE col SET tags = ?1 WHERE id = 1", [blob])
            .expect("set registry");
    }

    pub fn note_tags(&self, id: i64) -> String {
        self.conn()
            .query_row("SELECT tags FROM notes WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .expect("note exists")
    }

    pub fn note_fields(&self, id: i64) -> String {
        self.conn()
            .query_row("SELECT flds FROM notes WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .expect("note exists")
    }

    pub fn registry_raw(&self) -> String {
        self.conn()
            .query_row("SELECT tags FROM col WHERE id = 1", [], |row| row.get(0))
            .expect("col row exists")
    }

    /// A command pre-pointed at this collection.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("ankistry").expect("binary builds");
        cmd.arg("-c").arg(&self.path);
        cmd
    }
}

impl Default for TestCollection {
    fn default() -> Self {
        Self::new()
    }
}
