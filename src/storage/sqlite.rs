//! SQLite-backed key-value store
//!
//! One table, one row per key. Survives process restarts; lives under the
//! user cache directory by default.

use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};

use super::{KeyValueStore, Result};
use crate::error::StorageError;

/// Schema version - increment to trigger nuke-and-rebuild
const SCHEMA_VERSION: i32 = 2;

const DB_FILE: &str = "storage.db";

/// Persistent [`KeyValueStore`] in a single SQLite file
pub struct SqliteStore {
    conn: Connection,
    dir: PathBuf,
}

impl SqliteStore {
    /// Open or create the store at the default cache location
    pub fn open() -> Result<Self> {
        let dir = Self::default_dir()?;
        Self::open_at(&dir)
    }

    /// Default store directory (~/.cache/orgbrand on Linux)
    pub fn default_dir() -> Result<PathBuf> {
        let cache_base = dirs::cache_dir().ok_or(StorageError::NoCacheDir)?;
        Ok(cache_base.join("orgbrand"))
    }

    /// Open the store in a specific directory
    pub fn open_at(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .map_err(|e| StorageError::Io(format!("Failed to create store dir: {}", e)))?;

        let db_path = dir.join(DB_FILE);
        let conn = Connection::open(&db_path)?;

        // Check schema version - nuke if mismatched
        let version: i32 = conn
            .pragma_query_value(None, "user_version", |r| r.get(0))
            .unwrap_or(0);

        if version != 0 && version != SCHEMA_VERSION {
            log::info!(
                "Store schema version mismatch ({} != {}), rebuilding",
                version,
                SCHEMA_VERSION
            );
            drop(conn);
            std::fs::remove_file(&db_path)
                .map_err(|e| StorageError::Io(format!("Failed to remove store DB: {}", e)))?;
            return Self::open_at(dir);
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            );
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        log::debug!("Opened store at {}", db_path.display());

        Ok(Self {
            conn,
            dir: dir.to_path_buf(),
        })
    }

    /// Directory holding the database file
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl KeyValueStore for SqliteStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", [key])?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv_store ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{Organization, OrganizationLogoCache, cache_key};
    use tempfile::TempDir;

    fn test_store() -> (SqliteStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::open_at(dir.path()).unwrap();
        (store, dir)
    }

    #[test]
    fn test_set_get() {
        let (store, _dir) = test_store();
        store.set_item("k1", "v1").unwrap();

        assert_eq!(store.get_item("k1").unwrap(), Some("v1".to_string()));
        assert_eq!(store.get_item("missing").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let (store, _dir) = test_store();
        store.set_item("k1", "first").unwrap();
        store.set_item("k1", "second").unwrap();

        assert_eq!(store.get_item("k1").unwrap(), Some("second".to_string()));
        assert_eq!(store.keys().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let (store, _dir) = test_store();
        store.remove_item("nothing-here").unwrap();
    }

    #[test]
    fn test_keys_sorted() {
        let (store, _dir) = test_store();
        store.set_item("zeta", "1").unwrap();
        store.set_item("alpha", "2").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = SqliteStore::open_at(dir.path()).unwrap();
            store.set_item("k", "persisted").unwrap();
        }

        let store = SqliteStore::open_at(dir.path()).unwrap();
        assert_eq!(store.get_item("k").unwrap(), Some("persisted".to_string()));
    }

    #[test]
    fn test_schema_mismatch_rebuilds() {
        let dir = TempDir::new().unwrap();
        {
            let store = SqliteStore::open_at(dir.path()).unwrap();
            store.set_item("k", "old").unwrap();
            store
                .conn
                .pragma_update(None, "user_version", SCHEMA_VERSION + 1)
                .unwrap();
        }

        let store = SqliteStore::open_at(dir.path()).unwrap();
        assert_eq!(store.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_cache_clear_all_keeps_foreign_keys() {
        let (store, _dir) = test_store();
        let cache = OrganizationLogoCache::new(&store);

        store.set_item("theme", "dark").unwrap();
        store.set_item(&cache_key("bad@x.com"), "not json").unwrap();
        assert!(
            cache
                .write("a@x.com", Organization::new("org-a", "Alpha", None))
                .is_done()
        );

        let stats = cache.clear_all().into_option().unwrap();
        assert_eq!(stats.entries_removed, 2);
        assert_eq!(store.keys().unwrap(), vec!["theme"]);
    }

    #[test]
    fn test_table_holds_only_key_and_value() {
        let (store, _dir) = test_store();
        let mut stmt = store.conn.prepare("SELECT name FROM pragma_table_info('kv_store')").unwrap();
        let columns: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();

        assert_eq!(columns, vec!["key", "value"]);
    }
}
