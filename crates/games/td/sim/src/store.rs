//! Persistence for the ledger balance.

use crate::errors::StoreError;
use crate::ledger::Balance;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Backing store for the two economy counters.
pub trait LedgerStore: Send {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Balance>, StoreError>;
    fn save(&mut self, balance: Balance) -> Result<(), StoreError>;
}

/// In-memory store. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<Balance>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(balance: Balance) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(balance))),
        }
    }

    /// Last saved balance.
    pub fn saved(&self) -> Option<Balance> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Result<Option<Balance>, StoreError> {
        Ok(self.saved())
    }

    fn save(&mut self, balance: Balance) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(balance);
        Ok(())
    }
}

/// Stores the balance as JSON at `<dir>/<name>.json`.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl AsRef<Path>, name: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", name)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> Result<Option<Balance>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn save(&mut self, balance: Balance) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&balance)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}
