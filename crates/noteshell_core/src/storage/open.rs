//! Connection bootstrap for the local storage file.
//!
//! # Invariants
//! - Returned storage has migrations fully applied.
//! - Every open emits one `storage_open` start event and one outcome event.

use super::migrations::apply_migrations;
use super::{SqliteLocalStorage, StorageError, StorageResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens (or creates) the local storage file and applies pending migrations.
///
/// Missing parent directories are created.
pub fn open_storage(path: impl AsRef<Path>) -> StorageResult<SqliteLocalStorage> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(err) = std::fs::create_dir_all(parent) {
            error!(
                "event=storage_open module=storage status=error mode=file error_code=dir_create_failed error={}",
                err
            );
        }
    }
    open_with("file", || Connection::open(path))
}

/// Opens a throwaway in-memory storage. Nothing survives the process.
pub fn open_storage_in_memory() -> StorageResult<SqliteLocalStorage> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> StorageResult<SqliteLocalStorage> {
    let started_at = Instant::now();
    info!("event=storage_open module=storage status=start mode={mode}");

    let result = connect()
        .map_err(StorageError::from)
        .and_then(|mut conn| bootstrap_connection(&mut conn).map(|()| conn));

    match result {
        Ok(conn) => {
            info!(
                "event=storage_open module=storage status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(SqliteLocalStorage::new(conn))
        }
        Err(err) => {
            error!(
                "event=storage_open module=storage status=error mode={mode} duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> StorageResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}
