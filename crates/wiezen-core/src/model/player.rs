use core::fmt;
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// Seating position at the table. Index order is seating order and the
/// dealer rotates through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Seat {
    pub const LOOP: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::North),
            1 => Some(Seat::East),
            2 => Some(Seat::South),
            3 => Some(Seat::West),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> Seat {
        match self {
            Seat::North => Seat::East,
            Seat::East => Seat::South,
            Seat::South => Seat::West,
            Seat::West => Seat::North,
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Number of distinct seats in `seats`; repeats count once.
    pub fn distinct_count(seats: &[Seat]) -> usize {
        seats.iter().fold(0u8, |mask, seat| mask | seat.bit()).count_ones() as usize
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seat::North => "North",
            Seat::East => "East",
            Seat::South => "South",
            Seat::West => "West",
        };
        f.write_str(label)
    }
}

/// A named player and the per-round score deltas they have collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    history: Vec<i32>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Result<Self, ScoringError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ScoringError::EmptyPlayerName);
        }
        Ok(Self {
            name,
            history: Vec::new(),
        })
    }

    pub(crate) fn with_history(name: String, history: Vec<i32>) -> Self {
        Self { name, history }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn history(&self) -> &[i32] {
        &self.history
    }

    pub fn total(&self) -> i32 {
        self.history.iter().sum()
    }

    pub(crate) fn push_delta(&mut self, delta: i32) {
        self.history.push(delta);
    }

    pub(crate) fn pop_delta(&mut self) -> Option<i32> {
        self.history.pop()
    }

    /// Replaces the last `count` deltas with their sum and returns it.
    pub(crate) fn collapse_tail(&mut self, count: usize) -> i32 {
        let start = self.history.len().saturating_sub(count);
        let total = self.history.drain(start..).sum();
        self.history.push(total);
        total
    }

    /// Fresh player carrying the same name and no history.
    pub(crate) fn cleared(&self) -> Self {
        Self::with_history(self.name.clone(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::{Player, Seat};
    use crate::error::ScoringError;

    #[test]
    fn next_wraps_around() {
        assert_eq!(Seat::West.next(), Seat::North);
    }

    #[test]
    fn index_roundtrip() {
        for (i, seat) in Seat::LOOP.iter().enumerate() {
            assert_eq!(Seat::from_index(i), Some(*seat));
            assert_eq!(seat.index(), i);
        }
        assert_eq!(Seat::from_index(4), None);
    }

    #[test]
    fn distinct_count_ignores_repeats() {
        assert_eq!(Seat::distinct_count(&[]), 0);
        assert_eq!(Seat::distinct_count(&[Seat::East, Seat::East]), 1);
        assert_eq!(Seat::distinct_count(&[Seat::North, Seat::West]), 2);
    }

    #[test]
    fn player_total_sums_history() {
        let mut player = Player::new("Speler 1").unwrap();
        player.push_delta(12);
        player.push_delta(-4);
        assert_eq!(player.total(), 8);
        assert_eq!(player.pop_delta(), Some(-4));
        assert_eq!(player.history(), &[12]);
    }

    #[test]
    fn collapse_tail_sums_recent_deltas() {
        let mut player = Player::new("Speler 1").unwrap();
        for delta in [4, 21, -7, 7] {
            player.push_delta(delta);
        }
        assert_eq!(player.collapse_tail(3), 21);
        assert_eq!(player.history(), &[4, 21]);
        assert_eq!(player.total(), 25);
    }

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(Player::new("  "), Err(ScoringError::EmptyPlayerName));
    }

    #[test]
    fn cleared_keeps_name_only() {
        let mut player = Player::new("Anna").unwrap();
        player.push_delta(5);
        let fresh = player.cleared();
        assert_eq!(fresh.name(), "Anna");
        assert!(fresh.history().is_empty());
    }
}
