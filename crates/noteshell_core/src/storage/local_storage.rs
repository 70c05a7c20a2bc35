//! Key-value local storage contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide `get/set/remove` string semantics over the `local_storage` table.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - Multi-key writes and removals are atomic.
//! - Removing an absent key is not an error.

use super::StorageResult;
use rusqlite::{params, Connection, OptionalExtension};

/// Durable key holding the current access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Durable key holding the current refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Browser-style local storage: string keys to string values.
pub trait LocalStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes every pair or none of them.
    fn set_items(&mut self, items: &[(&str, &str)]) -> StorageResult<()>;

    /// Removes every listed key or none of them.
    fn remove_items(&mut self, keys: &[&str]) -> StorageResult<()>;

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.set_items(&[(key, value)])
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        self.remove_items(&[key])
    }
}

/// SQLite-backed local storage. Owns its connection.
pub struct SqliteLocalStorage {
    conn: Connection,
}

impl SqliteLocalStorage {
    /// Wraps a connection that already has migrations applied.
    ///
    /// Use [`super::open_storage`] instead unless the caller manages
    /// migrations itself.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Read access to the underlying connection, for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl LocalStorage for SqliteLocalStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_items(&mut self, items: &[(&str, &str)]) -> StorageResult<()> {
        let tx = self.conn.transaction()?;
        for (key, value) in items {
            tx.execute(
                "INSERT INTO local_storage (key, value)
                 VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = (strftime('%s', 'now') * 1000);",
                params![key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn remove_items(&mut self, keys: &[&str]) -> StorageResult<()> {
        let tx = self.conn.transaction()?;
        for key in keys {
            tx.execute("DELETE FROM local_storage WHERE key = ?1;", [key])?;
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{LocalStorage, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
    use crate::storage::open_storage_in_memory;

    #[test]
    fn missing_key_reads_as_none() {
        let storage = open_storage_in_memory().unwrap();
        assert_eq!(storage.get_item(ACCESS_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn set_item_overwrites_previous_value() {
        let mut storage = open_storage_in_memory().unwrap();
        storage.set_item(ACCESS_TOKEN_KEY, "first").unwrap();
        storage.set_item(ACCESS_TOKEN_KEY, "second").unwrap();
        assert_eq!(
            storage.get_item(ACCESS_TOKEN_KEY).unwrap().as_deref(),
            Some("second")
        );
    }

    #[test]
    fn remove_items_is_idempotent() {
        let mut storage = open_storage_in_memory().unwrap();
        storage
            .set_items(&[(ACCESS_TOKEN_KEY, "a"), (REFRESH_TOKEN_KEY, "r")])
            .unwrap();

        storage
            .remove_items(&[ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY])
            .unwrap();
        storage
            .remove_items(&[ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY])
            .unwrap();

        assert_eq!(storage.get_item(ACCESS_TOKEN_KEY).unwrap(), None);
        assert_eq!(storage.get_item(REFRESH_TOKEN_KEY).unwrap(), None);
    }
}
