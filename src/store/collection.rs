//! Collection session: connection lifetime, the pending transaction,
//! and collection-level metadata blobs.

use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, OpenFlags};

use super::{StoreError, StoreResult};
use crate::domain::{Model, ModelRegistry, TagRegistry, decode_models};

/// An open collection database.
///
/// A transaction is begun when the collection is opened and every write
/// stays pending inside it. Nothing is durable until [`commit`] is
/// called; dropping the session (including by process death) rolls the
/// whole invocation back. This is the safety net for a user's only copy
/// of their data.
///
/// The model registry is decoded lazily from the metadata row on first
/// use and cached for the life of the session, never across sessions.
///
/// [`commit`]: Collection::commit
#[derive(Debug)]
pub struct Collection {
    pub(super) conn: Connection,
    models: Option<ModelRegistry>,
    pub(super) dirty: bool,
    finished: bool,
}

impl Collection {
    /// Opens an existing collection file.
    ///
    /// The file must already exist: this tool never creates a
    /// collection, it only reconciles one the flashcard application
    /// made.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE)
            .map_err(|source| StoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Self::begin(conn)
    }

    /// Opens an empty in-memory collection. Used by tests that build
    /// their own fixture schema.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::begin(Connection::open_in_memory()?)
    }

    fn begin(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch("BEGIN")?;
        Ok(Self {
            conn,
            models: None,
            dirty: false,
            finished: false,
        })
    }

    /// Raw connection access for test fixtures. Writes through it
    /// bypass dirty tracking, so it never leaves the crate.
    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Whether any write is pending in the session transaction.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Makes all pending writes durable and ends the session.
    pub fn commit(mut self) -> StoreResult<()> {
        self.conn.execute_batch("COMMIT")?;
        self.finished = true;
        Ok(())
    }

    /// Discards all pending writes explicitly. Equivalent to dropping
    /// the session, but makes the intent visible at the call site.
    pub fn rollback(mut self) -> StoreResult<()> {
        self.conn.execute_batch("ROLLBACK")?;
        self.finished = true;
        Ok(())
    }

    // ===========================================
    // Metadata blobs
    // ===========================================

    /// Reads one of the JSON blobs off the collection metadata row.
    pub fn meta_blob(&self, column: MetaColumn) -> StoreResult<String> {
        let sql = match column {
            MetaColumn::Tags => "SELECT tags FROM col WHERE id = 1",
            MetaColumn::Models => "SELECT models FROM col WHERE id = 1",
            MetaColumn::Decks => "SELECT decks FROM col WHERE id = 1",
        };
        match self.conn.query_row(sql, [], |row| row.get::<_, String>(0)) {
            Ok(raw) => Ok(raw),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::MissingMeta),
            Err(e) => Err(e.into()),
        }
    }

    /// Decodes the collection's tag registry.
    pub fn load_tag_registry(&self) -> StoreResult<TagRegistry> {
        let raw = self.meta_blob(MetaColumn::Tags)?;
        Ok(TagRegistry::decode(&raw)?)
    }

    /// Writes the whole registry back, bumping the metadata
    /// modification timestamp (milliseconds) and resetting the sync
    /// counter so an external sync protocol knows a full re-sync is
    /// needed. The marker is set here, never interpreted.
    pub fn save_tag_registry(&mut self, registry: &TagRegistry) -> StoreResult<()> {
        self.conn.execute(
            "UPDATE col SET tags = ?1, mod = ?2, usn = ?3 WHERE id = 1",
            rusqlite::params![registry.encode(), Utc::now().timestamp_millis(), -1],
        )?;
        self.dirty = true;
        Ok(())
    }

    // ===========================================
    // Model schema cache
    // ===========================================

    /// Returns the session's model registry, decoding it on first use.
    pub fn models(&mut self) -> StoreResult<&ModelRegistry> {
        if self.models.is_none() {
            let raw = self.meta_blob(MetaColumn::Models)?;
            let registry = decode_models(&raw).map_err(|e| {
                StoreError::MalformedInput(format!("couldn't decode models blob: {e}"))
            })?;
            self.models = Some(registry);
        }
        Ok(self.models.as_ref().expect("model cache populated above"))
    }

    /// Looks up a single model schema by id.
    pub fn model(&mut self, model_id: i64) -> StoreResult<&Model> {
        self.models()?
            .get(&model_id)
            .ok_or(StoreError::SchemaNotFound { model_id })
    }
}

impl Drop for Collection {
    fn drop(&mut self) {
        if !self.finished {
            // Best effort; we may be unwinding.
            let _ = self.conn.execute_batch("ROLLBACK");
        }
    }
}

/// The metadata columns this tool reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaColumn {
    Tags,
    Models,
    Decks,
}
