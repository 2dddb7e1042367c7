use super::ledger::GameLedger;
use crate::model::player::{Player, Seat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub name: String,
    pub scores: Vec<i32>,
}

/// Persisted form of a [`GameLedger`]; restoring it is lossless.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    pub players: Vec<PlayerSnapshot>,
    pub rounds: Vec<String>,
    pub dealer: u8,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to decode snapshot: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("snapshot has {0} players, expected 4")]
    PlayerCount(usize),
    #[error("player {0} has an empty name")]
    EmptyName(usize),
    #[error("player {seat} has {actual} scores for {expected} rounds")]
    HistoryLength {
        seat: usize,
        expected: usize,
        actual: usize,
    },
    #[error("dealer index {0} is outside 0..4")]
    Dealer(u8),
}

impl Snapshot {
    pub fn capture(ledger: &GameLedger) -> Self {
        Snapshot {
            players: ledger
                .players()
                .iter()
                .map(|player| PlayerSnapshot {
                    name: player.name().to_string(),
                    scores: player.history().to_vec(),
                })
                .collect(),
            rounds: ledger.rounds().to_vec(),
            dealer: ledger.dealer().index() as u8,
        }
    }

    pub fn restore(self) -> Result<GameLedger, SnapshotError> {
        let dealer = Seat::from_index(usize::from(self.dealer))
            .ok_or(SnapshotError::Dealer(self.dealer))?;
        let expected = self.rounds.len();

        let players: [PlayerSnapshot; 4] = self
            .players
            .try_into()
            .map_err(|players: Vec<PlayerSnapshot>| SnapshotError::PlayerCount(players.len()))?;

        for (seat, player) in players.iter().enumerate() {
            if player.name.trim().is_empty() {
                return Err(SnapshotError::EmptyName(seat));
            }
            if player.scores.len() != expected {
                return Err(SnapshotError::HistoryLength {
                    seat,
                    expected,
                    actual: player.scores.len(),
                });
            }
        }

        let players = players.map(|player| Player::with_history(player.name, player.scores));
        Ok(GameLedger::from_parts(players, self.rounds, dealer))
    }

    pub fn to_json(ledger: &GameLedger) -> serde_json::Result<String> {
        let snapshot = Self::capture(ledger);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayerSnapshot, Snapshot, SnapshotError};
    use crate::game::ledger::{GameLedger, RoundResult};
    use crate::model::catalog::{miserie, vraag_en_mee};
    use crate::model::player::Seat;

    fn played_ledger() -> GameLedger {
        let mut ledger = GameLedger::new();
        ledger.rename_player(Seat::West, "Marie").unwrap();
        ledger
            .add_round(
                &vraag_en_mee().unwrap(),
                &[RoundResult::new([Seat::North, Seat::South], 10)],
            )
            .unwrap();
        ledger
            .add_round(
                &miserie().unwrap(),
                &[RoundResult::solo(Seat::East, 0), RoundResult::solo(Seat::West, 2)],
            )
            .unwrap();
        ledger
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let json = Snapshot::to_json(&played_ledger()).unwrap();
        assert!(json.contains("\"dealer\": 2"));
        assert!(json.contains("\"Miserie × 2\""));
        assert!(json.contains("\"name\": \"Marie\""));
    }

    #[test]
    fn snapshot_roundtrip_is_lossless() {
        let ledger = played_ledger();
        let json = Snapshot::to_json(&ledger).unwrap();
        let restored = Snapshot::from_json(&json).unwrap().restore().unwrap();

        assert_eq!(Snapshot::capture(&restored), Snapshot::capture(&ledger));
        assert_eq!(restored.totals(), ledger.totals());
        assert_eq!(restored.dealer(), Seat::South);
    }

    #[test]
    fn reads_the_stored_browser_format() {
        let stored = r#"{
            "players": [
                {"name": "Speler 1", "scores": [4, 0]},
                {"name": "Speler 2", "scores": [-4, 28]},
                {"name": "Speler 3", "scores": [4, 0]},
                {"name": "Marie", "scores": [-4, -28]}
            ],
            "rounds": ["Vraag en mee", "Miserie × 2"],
            "dealer": 2
        }"#;

        let ledger = Snapshot::from_json(stored).unwrap().restore().unwrap();
        assert_eq!(ledger.totals(), [4, 24, 4, -32]);
        assert_eq!(ledger.dealer(), Seat::South);
        assert_eq!(ledger.rounds()[1], "Miserie × 2");
    }

    #[test]
    fn rejects_mismatched_history_lengths() {
        let mut snapshot = Snapshot::capture(&played_ledger());
        snapshot.players[1].scores.pop();
        assert!(matches!(
            snapshot.restore(),
            Err(SnapshotError::HistoryLength { seat: 1, expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn rejects_wrong_player_count() {
        let mut snapshot = Snapshot::capture(&GameLedger::new());
        snapshot.players.push(PlayerSnapshot {
            name: "Extra".to_string(),
            scores: Vec::new(),
        });
        assert!(matches!(snapshot.restore(), Err(SnapshotError::PlayerCount(5))));
    }

    #[test]
    fn rejects_dealer_out_of_range() {
        let mut snapshot = Snapshot::capture(&GameLedger::new());
        snapshot.dealer = 4;
        assert!(matches!(snapshot.restore(), Err(SnapshotError::Dealer(4))));
    }

    #[test]
    fn rejects_blank_names() {
        let mut snapshot = Snapshot::capture(&GameLedger::new());
        snapshot.players[3].name = " ".to_string();
        assert!(matches!(snapshot.restore(), Err(SnapshotError::EmptyName(3))));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        assert!(matches!(
            Snapshot::from_json("{\"players\": 3}"),
            Err(SnapshotError::Decode(_))
        ));
    }
}
