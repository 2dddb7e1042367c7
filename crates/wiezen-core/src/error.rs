use thiserror::Error;

/// Validation failures raised by rule construction, score allocation and
/// ledger mutation. None of them are retried; they surface unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("trick count {0} is outside 0..=13")]
    InvalidTrickCount(u8),
    #[error("abondance cannot target {0} tricks (expected 9, 10, 11 or 12)")]
    InvalidVariantTarget(u8),
    #[error("{rule} needs exactly {expected} attacker(s), got {actual}")]
    AttackerCountMismatch {
        rule: String,
        expected: u8,
        actual: usize,
    },
    #[error("{0} cannot be played simultaneously")]
    RuleNotSimultaneousEligible(String),
    #[error("no results provided")]
    EmptyResultSet,
    #[error("attacker count {0} is outside 1..=2")]
    InvalidAttackerCount(u8),
    #[error("tricks target {0} is outside 0..=13")]
    InvalidTricksTarget(u8),
    #[error("rule name must not be empty")]
    EmptyRuleName,
    #[error("{rule}: team score {score} at {tricks} tricks does not split evenly")]
    UnevenSplit { rule: String, tricks: u8, score: i32 },
    #[error("{rule}: team score at {tricks} tricks does not fit in 32 bits")]
    ScoreOverflow { rule: String, tricks: u8 },
    #[error("player name must not be empty")]
    EmptyPlayerName,
}
