use core::fmt;
use std::array;

use crate::error::ScoringError;
use crate::game::persistence::PersistenceAdapter;
use crate::game::serialization::Snapshot;
use crate::model::player::{Player, Seat};
use crate::model::rule::RoundRule;
use crate::model::score::{SeatDeltas, allocate};

pub const DEFAULT_PLAYER_NAMES: [&str; 4] = ["Speler 1", "Speler 2", "Speler 3", "Speler 4"];

/// Outcome of one contract: who attacked and how many tricks they took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    pub attackers: Vec<Seat>,
    pub tricks: u8,
}

impl RoundResult {
    pub fn new(attackers: impl Into<Vec<Seat>>, tricks: u8) -> Self {
        Self {
            attackers: attackers.into(),
            tricks,
        }
    }

    pub fn solo(attacker: Seat, tricks: u8) -> Self {
        Self::new(vec![attacker], tricks)
    }
}

/// Told about every committed mutation, after it is complete.
pub trait LedgerObserver {
    fn ledger_changed(&mut self, ledger: &GameLedger);
}

impl<F> LedgerObserver for F
where
    F: FnMut(&GameLedger),
{
    fn ledger_changed(&mut self, ledger: &GameLedger) {
        self(ledger)
    }
}

/// Score sheet for one game at a four-seat table.
///
/// Every committed round adds exactly one label to the round history and
/// exactly one delta to each player, so all histories share one length.
pub struct GameLedger {
    players: [Player; 4],
    rounds: Vec<String>,
    dealer: Seat,
    observer: Option<Box<dyn LedgerObserver>>,
}

impl GameLedger {
    pub fn new() -> Self {
        let players = array::from_fn(|index| {
            Player::with_history(DEFAULT_PLAYER_NAMES[index].to_string(), Vec::new())
        });
        Self::from_parts(players, Vec::new(), Seat::North)
    }

    pub fn with_names(names: [String; 4]) -> Result<Self, ScoringError> {
        let [a, b, c, d] = names;
        let players = [Player::new(a)?, Player::new(b)?, Player::new(c)?, Player::new(d)?];
        Ok(Self::from_parts(players, Vec::new(), Seat::North))
    }

    pub(crate) fn from_parts(players: [Player; 4], rounds: Vec<String>, dealer: Seat) -> Self {
        Self {
            players,
            rounds,
            dealer,
            observer: None,
        }
    }

    /// Restores the stored game, or starts a fresh one when the store is
    /// empty, unreadable or holds a snapshot that fails validation.
    pub fn load_or_new<A>(adapter: &A) -> Self
    where
        A: PersistenceAdapter + ?Sized,
    {
        Self::load_or_else(adapter, Self::new)
    }

    /// Like [`GameLedger::load_or_new`], with `fresh` building the game
    /// used whenever nothing valid was stored.
    pub fn load_or_else<A, F>(adapter: &A, fresh: F) -> Self
    where
        A: PersistenceAdapter + ?Sized,
        F: FnOnce() -> Self,
    {
        match adapter.load() {
            Ok(Some(snapshot)) => match snapshot.restore() {
                Ok(ledger) => ledger,
                Err(err) => {
                    tracing::warn!(
                        target: "wiezen_core::ledger",
                        error = %err,
                        "discarding invalid snapshot; starting new game"
                    );
                    fresh()
                }
            },
            Ok(None) => fresh(),
            Err(err) => {
                tracing::warn!(
                    target: "wiezen_core::ledger",
                    error = %err,
                    "error loading game, starting new game"
                );
                fresh()
            }
        }
    }

    pub fn set_observer(&mut self, observer: impl LedgerObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn players(&self) -> &[Player; 4] {
        &self.players
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn rounds(&self) -> &[String] {
        &self.rounds
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn totals(&self) -> [i32; 4] {
        array::from_fn(|index| self.players[index].total())
    }

    /// Highest total; ties go to the earlier seat.
    pub fn leader(&self) -> Seat {
        let totals = self.totals();
        Seat::LOOP
            .iter()
            .copied()
            .fold(Seat::North, |best, seat| {
                if totals[seat.index()] > totals[best.index()] {
                    seat
                } else {
                    best
                }
            })
    }

    /// Scores one hand played under `rule`.
    ///
    /// Several results are only accepted for rules that may be played
    /// simultaneously. They commit as a single round labelled
    /// `"<name> × n"` with one summed delta per player, or not at all.
    /// Returns the deltas committed for each seat.
    pub fn add_round(
        &mut self,
        rule: &RoundRule,
        results: &[RoundResult],
    ) -> Result<SeatDeltas, ScoringError> {
        let deltas = match results {
            [] => return Err(ScoringError::EmptyResultSet),
            [result] => self.apply(rule, result)?,
            many => self.apply_simultaneous(rule, many)?,
        };
        self.dealer = self.dealer.next();

        tracing::debug!(
            target: "wiezen_core::ledger",
            rule = rule.name(),
            results = results.len(),
            ?deltas,
            dealer = %self.dealer,
            "round committed"
        );
        self.notify();
        Ok(deltas)
    }

    /// Drops the most recent round. Returns its label, or `None` without
    /// notifying when there is nothing to remove.
    pub fn remove_last_round(&mut self) -> Option<String> {
        let label = self.pop_entry()?;
        tracing::debug!(target: "wiezen_core::ledger", round = %label, "round removed");
        self.notify();
        Some(label)
    }

    /// Clears every score and the round history, keeping player names.
    pub fn reset(&mut self) {
        self.players = array::from_fn(|index| self.players[index].cleared());
        self.rounds.clear();
        self.dealer = Seat::North;
        self.notify();
    }

    pub fn rename_player(
        &mut self,
        seat: Seat,
        name: impl Into<String>,
    ) -> Result<(), ScoringError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ScoringError::EmptyPlayerName);
        }
        self.players[seat.index()].set_name(name);
        self.notify();
        Ok(())
    }

    fn apply(
        &mut self,
        rule: &RoundRule,
        result: &RoundResult,
    ) -> Result<SeatDeltas, ScoringError> {
        let deltas = allocate(rule, &result.attackers, result.tricks)?;
        for (player, delta) in self.players.iter_mut().zip(deltas) {
            player.push_delta(delta);
        }
        self.rounds.push(rule.name().to_string());
        Ok(deltas)
    }

    fn apply_simultaneous(
        &mut self,
        rule: &RoundRule,
        results: &[RoundResult],
    ) -> Result<SeatDeltas, ScoringError> {
        if !rule.is_simultaneous() {
            return Err(ScoringError::RuleNotSimultaneousEligible(
                rule.name().to_string(),
            ));
        }

        for (applied, result) in results.iter().enumerate() {
            if let Err(err) = self.apply(rule, result) {
                for _ in 0..applied {
                    self.pop_entry();
                }
                tracing::warn!(
                    target: "wiezen_core::ledger",
                    rule = rule.name(),
                    failed_at = applied,
                    error = %err,
                    "simultaneous round rolled back"
                );
                return Err(err);
            }
        }

        let count = results.len();
        self.rounds.truncate(self.rounds.len() - count);
        self.rounds.push(format!("{} × {count}", rule.name()));

        let mut combined = [0; 4];
        for (player, total) in self.players.iter_mut().zip(combined.iter_mut()) {
            *total = player.collapse_tail(count);
        }
        Ok(combined)
    }

    fn pop_entry(&mut self) -> Option<String> {
        let label = self.rounds.pop()?;
        for player in self.players.iter_mut() {
            player.pop_delta();
        }
        Some(label)
    }

    fn notify(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            observer.ledger_changed(self);
            self.observer = Some(observer);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}

impl Default for GameLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GameLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameLedger")
            .field("players", &self.players)
            .field("rounds", &self.rounds)
            .field("dealer", &self.dealer)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
