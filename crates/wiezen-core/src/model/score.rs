use crate::error::ScoringError;
use crate::model::player::Seat;
use crate::model::rule::RoundRule;

/// Score change for each seat, indexed by [`Seat::index`].
pub type SeatDeltas = [i32; 4];

/// Splits the team score of one contract over the table.
///
/// Attackers share the team score, defenders share its negation. Both
/// divisions are exact because [`RoundRule::new`] refuses coefficients
/// that would leave a remainder, so the result always sums to zero.
pub fn allocate(
    rule: &RoundRule,
    attackers: &[Seat],
    tricks: u8,
) -> Result<SeatDeltas, ScoringError> {
    let actual = Seat::distinct_count(attackers);
    if actual != usize::from(rule.attackers()) {
        return Err(ScoringError::AttackerCountMismatch {
            rule: rule.name().to_string(),
            expected: rule.attackers(),
            actual,
        });
    }

    let team = rule.team_score(tricks)?;
    let attacker_share = team / i32::from(rule.attackers());
    let defender_share = -team / i32::from(rule.defenders());

    let mut deltas = [defender_share; 4];
    for seat in attackers {
        deltas[seat.index()] = attacker_share;
    }
    Ok(deltas)
}

pub fn sum(deltas: &SeatDeltas) -> i32 {
    deltas.iter().sum()
}
