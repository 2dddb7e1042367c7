#![deny(warnings)]
pub mod error;
pub mod game;
pub mod model;

pub use error::ScoringError;
pub use game::ledger::{GameLedger, LedgerObserver, RoundResult};
pub use game::persistence::{MemoryStore, PersistError, PersistOnChange, PersistenceAdapter};
pub use game::serialization::{Snapshot, SnapshotError};
pub use model::catalog::RoundCatalog;
pub use model::player::{Player, Seat};
pub use model::rule::{RoundRule, RuleSpec};
pub use model::score::{SeatDeltas, allocate};
