use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use super::{Ledger, LedgerError, LedgerVersion};

#[derive(Debug, Default)]
struct MemoryState {
    records: HashMap<String, Vec<LedgerVersion>>,
    next_sequence: u64,
    failing_keys: HashSet<String>,
}

/// An in-process ledger.
///
/// Clones share the same state, so a caller can keep a handle after giving the ledger
/// to a [`Drive`](crate::drive::Drive) and inspect it or inject write failures.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later `put` to `key` fail with [`LedgerError::Unavailable`].
    pub fn fail_writes_to(&self, key: &str) -> Result<(), LedgerError> {
        self.lock()?.failing_keys.insert(key.to_string());
        Ok(())
    }

    /// Lifts all injected write failures.
    pub fn clear_failures(&self) -> Result<(), LedgerError> {
        self.lock()?.failing_keys.clear();
        Ok(())
    }

    /// Number of distinct keys ever written.
    pub fn key_count(&self) -> Result<usize, LedgerError> {
        Ok(self.lock()?.records.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, LedgerError> {
        self.state
            .lock()
            .map_err(|_| LedgerError::Unavailable("memory ledger lock poisoned".to_string()))
    }
}

impl Ledger for MemoryLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        let state = self.lock()?;
        Ok(state
            .records
            .get(key)
            .and_then(|versions| versions.last())
            .map(|v| v.value.clone()))
    }

    fn put(&mut self, key: &str, value: &[u8], timestamp: i64) -> Result<(), LedgerError> {
        let mut state = self.lock()?;
        if state.failing_keys.contains(key) {
            return Err(LedgerError::Unavailable(format!("write to '{key}' rejected")));
        }
        state.next_sequence += 1;
        let sequence = state.next_sequence;
        state
            .records
            .entry(key.to_string())
            .or_default()
            .push(LedgerVersion {
                sequence,
                timestamp,
                value: value.to_vec(),
            });
        Ok(())
    }

    fn history(&self, key: &str) -> Result<Vec<LedgerVersion>, LedgerError> {
        Ok(self.lock()?.records.get(key).cloned().unwrap_or_default())
    }
}
