//! # Rehearse Store
//!
//! SQLite-backed annotation store: named collections of training examples
//! with get/add/drop and transactional replace. Collections are opaque
//! multisets keyed by name; examples are stored as JSON rows with their
//! content hash.

pub mod error;

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use rehearse_core::TrainingExample;

pub use error::{Result, StoreError};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS datasets (
    id   INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS examples (
    id         INTEGER PRIMARY KEY,
    dataset_id INTEGER NOT NULL REFERENCES datasets(id) ON DELETE CASCADE,
    hash       TEXT NOT NULL,
    content    TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_examples_dataset ON examples(dataset_id);
";

/// Connection to the annotation store.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (and initializes if needed) a store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Opens an in-memory store, useful for tests and dry runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Names of all collections, sorted.
    pub fn dataset_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM datasets ORDER BY name")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(names)
    }

    /// All examples of a collection, or `None` if the collection does not
    /// exist. An existing-but-empty collection yields an empty vec.
    pub fn get_dataset(&self, name: &str) -> Result<Option<Vec<TrainingExample>>> {
        let Some(dataset_id) = self.dataset_id(name)? else {
            return Ok(None);
        };

        let mut stmt = self
            .conn
            .prepare("SELECT content FROM examples WHERE dataset_id = ?1 ORDER BY id")?;
        let mut examples = Vec::new();
        let rows = stmt.query_map(params![dataset_id], |row| row.get::<_, String>(0))?;
        for content in rows {
            examples.push(serde_json::from_str(&content?)?);
        }
        Ok(Some(examples))
    }

    /// Number of examples in a collection.
    ///
    /// # Errors
    ///
    /// `StoreError::UnknownDataset` if the collection does not exist.
    pub fn len(&self, name: &str) -> Result<usize> {
        let dataset_id = self
            .dataset_id(name)?
            .ok_or_else(|| StoreError::UnknownDataset { name: name.into() })?;
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM examples WHERE dataset_id = ?1",
            params![dataset_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Appends examples to a collection, creating it if absent.
    pub fn add_examples(&mut self, name: &str, examples: &[TrainingExample]) -> Result<()> {
        let tx = self.conn.transaction()?;
        let dataset_id = Self::ensure_dataset(&tx, name)?;
        Self::insert_examples(&tx, dataset_id, examples)?;
        tx.commit()?;
        debug!(dataset = name, count = examples.len(), "added examples");
        Ok(())
    }

    /// Drops a collection and its examples. Dropping a missing collection
    /// is a no-op.
    pub fn drop_dataset(&mut self, name: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM datasets WHERE name = ?1", params![name])?;
        Ok(())
    }

    /// Replaces a collection's contents in one transaction.
    ///
    /// Readers never observe an empty-collection window: until the commit
    /// the old rows remain visible, after it only the new ones are.
    /// Replacing a missing collection creates it, so re-publishing is
    /// idempotent.
    pub fn replace_dataset(&mut self, name: &str, examples: &[TrainingExample]) -> Result<()> {
        let tx = self.conn.transaction()?;
        let dataset_id = Self::ensure_dataset(&tx, name)?;
        tx.execute(
            "DELETE FROM examples WHERE dataset_id = ?1",
            params![dataset_id],
        )?;
        Self::insert_examples(&tx, dataset_id, examples)?;
        tx.commit()?;
        debug!(dataset = name, count = examples.len(), "replaced dataset");
        Ok(())
    }

    fn dataset_id(&self, name: &str) -> Result<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM datasets WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    fn ensure_dataset(conn: &Connection, name: &str) -> Result<i64> {
        conn.execute(
            "INSERT OR IGNORE INTO datasets (name) VALUES (?1)",
            params![name],
        )?;
        let id = conn.query_row(
            "SELECT id FROM datasets WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    fn insert_examples(
        conn: &Connection,
        dataset_id: i64,
        examples: &[TrainingExample],
    ) -> Result<()> {
        let mut stmt = conn.prepare(
            "INSERT INTO examples (dataset_id, hash, content) VALUES (?1, ?2, ?3)",
        )?;
        for example in examples {
            let content = serde_json::to_string(example)?;
            stmt.execute(params![dataset_id, example.hash, content])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rehearse_core::{Label, Span};

    fn example(text: &str) -> TrainingExample {
        TrainingExample::new(text, vec![Span::new(0, 1, Label::Misc)], "test")
    }

    #[test]
    fn get_missing_dataset_is_none() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.get_dataset("nope").unwrap().is_none());
    }

    #[test]
    fn add_then_get_roundtrips() {
        let mut store = Store::open_in_memory().unwrap();
        let examples = vec![example("alpha beta"), example("gamma delta")];
        store.add_examples("collected", &examples).unwrap();

        let back = store.get_dataset("collected").unwrap().unwrap();
        assert_eq!(back, examples);
        assert_eq!(store.len("collected").unwrap(), 2);
    }

    #[test]
    fn add_appends_to_existing_collection() {
        let mut store = Store::open_in_memory().unwrap();
        store.add_examples("d", &[example("one")]).unwrap();
        store.add_examples("d", &[example("two")]).unwrap();
        assert_eq!(store.len("d").unwrap(), 2);
    }

    #[test]
    fn drop_removes_collection() {
        let mut store = Store::open_in_memory().unwrap();
        store.add_examples("d", &[example("one")]).unwrap();
        store.drop_dataset("d").unwrap();
        assert!(store.get_dataset("d").unwrap().is_none());
        // Dropping again is a no-op.
        store.drop_dataset("d").unwrap();
    }

    #[test]
    fn replace_swaps_contents() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .add_examples("augmented_for_training", &[example("old one"), example("old two")])
            .unwrap();

        let fresh = vec![example("new one")];
        store.replace_dataset("augmented_for_training", &fresh).unwrap();

        let back = store.get_dataset("augmented_for_training").unwrap().unwrap();
        assert_eq!(back, fresh);
    }

    #[test]
    fn replace_creates_missing_collection() {
        let mut store = Store::open_in_memory().unwrap();
        store.replace_dataset("fresh", &[example("one")]).unwrap();
        assert_eq!(store.len("fresh").unwrap(), 1);
    }

    #[test]
    fn replace_is_idempotent() {
        let mut store = Store::open_in_memory().unwrap();
        let examples = vec![example("same"), example("rows")];
        store.replace_dataset("d", &examples).unwrap();
        store.replace_dataset("d", &examples).unwrap();
        assert_eq!(store.get_dataset("d").unwrap().unwrap(), examples);
    }

    #[test]
    fn len_of_missing_dataset_errors() {
        let store = Store::open_in_memory().unwrap();
        assert!(matches!(
            store.len("missing"),
            Err(StoreError::UnknownDataset { .. })
        ));
    }

    #[test]
    fn store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("annotations.db");

        {
            let mut store = Store::open(&path).unwrap();
            store.add_examples("d", &[example("persisted")]).unwrap();
        }

        let store = Store::open(&path).unwrap();
        let back = store.get_dataset("d").unwrap().unwrap();
        assert_eq!(back[0].text, "persisted");
    }
}
