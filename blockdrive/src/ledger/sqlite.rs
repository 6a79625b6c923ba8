use std::path::Path;
use rusqlite::{Connection, OptionalExtension, params};
use super::{Ledger, LedgerError, LedgerVersion};

/// A ledger kept in a single SQLite table.
///
/// Every write is a new row; the current value of a key is its row with the highest
/// sequence number.
#[derive(Debug)]
pub struct SqliteLedger {
    connection: Connection,
}

impl SqliteLedger {
    /// Opens (and if needed initialises) the ledger database at `path`.
    pub fn open(path: &Path) -> Result<Self, LedgerError> {
        Self::init(Connection::open(path)?)
    }

    /// A throwaway ledger that lives only as long as the returned value.
    pub fn open_in_memory() -> Result<Self, LedgerError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(connection: Connection) -> Result<Self, LedgerError> {
        connection.execute_batch(
            "CREATE TABLE IF NOT EXISTS versions (
                seq                 INTEGER PRIMARY KEY AUTOINCREMENT,
                key                 TEXT NOT NULL,
                value               BLOB NOT NULL,
                tx_time             INTEGER NOT NULL
             );
             CREATE INDEX IF NOT EXISTS idx_versions_key ON versions(key, seq);",
        )?;
        Ok(Self { connection })
    }
}

impl Ledger for SqliteLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        let value = self
            .connection
            .query_row(
                "SELECT value FROM versions WHERE key = ?1 ORDER BY seq DESC LIMIT 1",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&mut self, key: &str, value: &[u8], timestamp: i64) -> Result<(), LedgerError> {
        self.connection.execute(
            "INSERT INTO versions (key, value, tx_time) VALUES (?1, ?2, ?3)",
            params![key, value, timestamp],
        )?;
        Ok(())
    }

    fn history(&self, key: &str) -> Result<Vec<LedgerVersion>, LedgerError> {
        let mut stmt = self
            .connection
            .prepare("SELECT seq, tx_time, value FROM versions WHERE key = ?1 ORDER BY seq ASC")?;
        let versions = stmt
            .query_map(params![key], |row| {
                Ok(LedgerVersion {
                    sequence: row.get::<_, i64>(0)? as u64,
                    timestamp: row.get(1)?,
                    value: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(versions)
    }
}
