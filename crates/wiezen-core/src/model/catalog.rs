use crate::error::ScoringError;
use crate::model::rule::{RoundRule, RuleSpec};

/// Abondance targets that may be bid, with the points each is worth.
pub const ABONDANCE_BASES: [(u8, i32); 4] = [(9, 15), (10, 18), (11, 24), (12, 27)];

/// The contracts that can be scored, in the order they are offered.
#[derive(Debug, Clone)]
pub struct RoundCatalog {
    rules: Vec<RoundRule>,
}

impl RoundCatalog {
    pub fn standard() -> Self {
        let rules = [
            alleen(),
            vraag_en_mee(),
            abondance(9),
            abondance(10),
            miserie(),
            abondance(11),
            abondance(12),
            troel(),
            troela(),
            open_miserie(),
            solo(),
            solo_slim(),
        ]
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .expect("standard catalog coefficients split evenly");

        Self { rules }
    }

    pub fn get(&self, name: &str) -> Option<&RoundRule> {
        self.rules.iter().find(|rule| rule.name() == name)
    }

    /// Case-insensitive lookup for user-typed names.
    pub fn find(&self, name: &str) -> Option<&RoundRule> {
        let needle = name.trim();
        self.rules
            .iter()
            .find(|rule| rule.name().eq_ignore_ascii_case(needle))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoundRule> {
        self.rules.iter()
    }

    pub fn simultaneous(&self) -> impl Iterator<Item = &RoundRule> {
        self.rules.iter().filter(|rule| rule.is_simultaneous())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RoundCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

pub fn alleen() -> Result<RoundRule, ScoringError> {
    RoundRule::new(RuleSpec {
        success_base: 6,
        failure_base: -12,
        extra_trick_bonus: 3,
        missing_trick_penalty: -6,
        sweep_doubles: true,
        ..RuleSpec::new("Alleen", 1, 5)
    })
}

pub fn vraag_en_mee() -> Result<RoundRule, ScoringError> {
    RoundRule::new(RuleSpec {
        success_base: 4,
        failure_base: -12,
        extra_trick_bonus: 2,
        missing_trick_penalty: -4,
        sweep_doubles: true,
        ..RuleSpec::new("Vraag en mee", 2, 8)
    })
}

/// Solo bid on a fixed number of tricks, one of [`ABONDANCE_BASES`].
pub fn abondance(target: u8) -> Result<RoundRule, ScoringError> {
    let (_, base) = ABONDANCE_BASES
        .into_iter()
        .find(|(allowed, _)| *allowed == target)
        .ok_or(ScoringError::InvalidVariantTarget(target))?;
    RoundRule::new(RuleSpec {
        success_base: base,
        failure_base: -base,
        ..RuleSpec::new(format!("Abondance {target}"), 1, target)
    })
}

pub fn troel() -> Result<RoundRule, ScoringError> {
    RoundRule::new(RuleSpec {
        success_base: 8,
        failure_base: -12,
        extra_trick_bonus: 4,
        missing_trick_penalty: -4,
        sweep_doubles: true,
        ..RuleSpec::new("Troel", 2, 8)
    })
}

pub fn troela() -> Result<RoundRule, ScoringError> {
    RoundRule::new(RuleSpec {
        success_base: 8,
        failure_base: -12,
        extra_trick_bonus: 4,
        missing_trick_penalty: -4,
        sweep_doubles: true,
        ..RuleSpec::new("Troela", 2, 9)
    })
}

pub fn solo() -> Result<RoundRule, ScoringError> {
    RoundRule::new(RuleSpec {
        success_base: 75,
        failure_base: -75,
        ..RuleSpec::new("Solo", 1, 13)
    })
}

pub fn solo_slim() -> Result<RoundRule, ScoringError> {
    RoundRule::new(RuleSpec {
        success_base: 90,
        failure_base: -90,
        ..RuleSpec::new("Solo slim", 1, 13)
    })
}

pub fn miserie() -> Result<RoundRule, ScoringError> {
    RoundRule::new(RuleSpec {
        simultaneous: true,
        custom_score: Some(miserie_score),
        ..RuleSpec::new("Miserie", 1, 0)
    })
}

pub fn open_miserie() -> Result<RoundRule, ScoringError> {
    RoundRule::new(RuleSpec {
        simultaneous: true,
        custom_score: Some(open_miserie_score),
        ..RuleSpec::new("Open miserie", 1, 0)
    })
}

fn miserie_score(tricks: u8) -> i32 {
    if tricks > 0 { -21 } else { 21 }
}

fn open_miserie_score(tricks: u8) -> i32 {
    if tricks > 0 { -42 } else { 42 }
}
