use std::cell::{Cell, RefCell};
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use thiserror::Error;

use super::ledger::{GameLedger, LedgerObserver};
use super::serialization::{Snapshot, SnapshotError};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to access snapshot store {path:?}: {source}")]
    Io {
        #[source]
        source: io::Error,
        path: PathBuf,
    },
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("stored snapshot is unreadable: {0}")]
    Decode(#[from] SnapshotError),
    #[error("snapshot store unavailable")]
    Unavailable,
}

/// Storage for the single saved game.
pub trait PersistenceAdapter {
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistError>;

    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>, PersistError>;
}

/// In-process store holding the JSON text of the last save. Clones share
/// the same slot, so a caller can keep a handle after handing one to the
/// ledger.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
    available: Rc<Cell<bool>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            slot: Rc::new(RefCell::new(None)),
            available: Rc::new(Cell::new(true)),
            saves: Rc::new(Cell::new(0)),
        }
    }

    pub fn with_json(json: impl Into<String>) -> Self {
        let store = Self::new();
        store.slot.replace(Some(json.into()));
        store
    }

    /// While unavailable, every save and load fails.
    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    pub fn saves(&self) -> usize {
        self.saves.get()
    }

    pub fn json(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PersistenceAdapter for MemoryStore {
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistError> {
        if !self.available.get() {
            return Err(PersistError::Unavailable);
        }
        let json = serde_json::to_string(snapshot)?;
        self.slot.replace(Some(json));
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>, PersistError> {
        if !self.available.get() {
            return Err(PersistError::Unavailable);
        }
        match self.slot.borrow().as_deref() {
            Some(json) => Ok(Some(Snapshot::from_json(json)?)),
            None => Ok(None),
        }
    }
}

/// Observer that saves a snapshot after every committed mutation.
///
/// Store failures are logged and swallowed: the in-memory ledger stays
/// authoritative for the session.
#[derive(Debug)]
pub struct PersistOnChange<A> {
    adapter: A,
}

impl<A: PersistenceAdapter> PersistOnChange<A> {
    pub fn new(adapter: A) -> Self {
        Self { adapter }
    }
}

impl<A: PersistenceAdapter> LedgerObserver for PersistOnChange<A> {
    fn ledger_changed(&mut self, ledger: &GameLedger) {
        let snapshot = Snapshot::capture(ledger);
        if let Err(err) = self.adapter.save(&snapshot) {
            tracing::warn!(
                target: "wiezen_core::persistence",
                error = %err,
                rounds = snapshot.rounds.len(),
                "failed to persist game; keeping in-memory state"
            );
        }
    }
}
