pub mod memory;
pub mod sqlite;

pub use memory::MemoryLedger;
pub use sqlite::SqliteLedger;

use std::fmt::Debug;

/// Defines errors raised by a ledger backend.
//
// // 定义账本后端可能产生的错误。
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The SQLite database rejected a statement.
    //
    // // SQLite 数据库执行语句失败。
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The backend refused the request (lock poisoned, injected fault, ...).
    //
    // // 后端拒绝了请求（锁中毒、注入的故障等）。
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
}

/// One historical value of a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerVersion {
    /// Position of the write in the ledger's global order.
    pub sequence: u64,
    /// Transaction time the value was written with.
    pub timestamp: i64,
    pub value: Vec<u8>,
}

/// A versioned key-value store.
///
/// Every `put` appends a new version; nothing is ever overwritten in place, so the
/// full history of a key stays readable. Single-key writes are atomic; there is no
/// multi-key transaction.
//
// // 带版本的键值存储。每次 `put` 追加一个新版本，历史永不丢失。
pub trait Ledger: Send + Debug {
    /// Latest value of `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Appends `value` as the newest version of `key`.
    fn put(&mut self, key: &str, value: &[u8], timestamp: i64) -> Result<(), LedgerError>;

    /// All versions of `key`, oldest first. Empty if it was never written.
    fn history(&self, key: &str) -> Result<Vec<LedgerVersion>, LedgerError>;

    fn contains(&self, key: &str) -> Result<bool, LedgerError> {
        Ok(self.get(key)?.is_some())
    }
}
