use crate::error::{Result, SeatdrawError};
use crate::storage::KeyValueBackend;
use parking_lot::{Mutex, MutexGuard};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

pub const DB_FILE_NAME: &str = "seatdraw.db";

/// Key-value table inside a SQLite database.
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    pub fn new(db_path: &Path) -> Result<Self> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SeatdrawError::internal(format!("Failed to create directory: {}", e))
            })?;
        }

        let conn = Connection::open(db_path)?;
        let backend = Self {
            conn: Mutex::new(conn),
        };

        backend.init_schema()?;
        Ok(backend)
    }

    /// Opens `seatdraw.db` inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Result<Self> {
        Self::new(&data_dir.join(DB_FILE_NAME))
    }

    pub fn in_memory() -> Result<Self> {
        let backend = Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        };
        backend.init_schema()?;
        Ok(backend)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.get_connection();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    pub fn get_connection(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }
}

impl KeyValueBackend for SqliteBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let conn = self.get_connection();

        let value = conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        tracing::debug!("kv lookup for '{}': hit={}", key, value.is_some());
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.get_connection();

        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;

        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let conn = self.get_connection();
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}
