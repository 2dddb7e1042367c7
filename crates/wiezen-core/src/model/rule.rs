use crate::error::ScoringError;

pub const TOTAL_TRICKS: u8 = 13;
pub const TABLE_SIZE: u8 = 4;

/// Overrides the default formula entirely (miserie-style contracts).
pub type CustomScore = fn(u8) -> i32;

/// Coefficients for a contract, checked by [`RoundRule::new`].
///
/// Optional coefficients default to zero/off, so variants are written as
/// `RuleSpec { success_base: 6, ..RuleSpec::new("Alleen", 1, 5) }`.
#[derive(Debug, Clone)]
pub struct RuleSpec {
    pub name: String,
    pub attackers: u8,
    pub tricks_target: u8,
    pub success_base: i32,
    pub failure_base: i32,
    pub extra_trick_bonus: i32,
    pub missing_trick_penalty: i32,
    pub sweep_doubles: bool,
    pub simultaneous: bool,
    pub custom_score: Option<CustomScore>,
}

impl RuleSpec {
    pub fn new(name: impl Into<String>, attackers: u8, tricks_target: u8) -> Self {
        Self {
            name: name.into(),
            attackers,
            tricks_target,
            success_base: 0,
            failure_base: 0,
            extra_trick_bonus: 0,
            missing_trick_penalty: 0,
            sweep_doubles: false,
            simultaneous: false,
            custom_score: None,
        }
    }
}

/// Immutable scoring rule for one contract.
#[derive(Debug, Clone)]
pub struct RoundRule {
    spec: RuleSpec,
}

impl RoundRule {
    /// Validates the coefficients. Every rule must split its team score
    /// into whole points for both sides at every trick count, so ledger
    /// deltas stay integral and sum to zero.
    pub fn new(spec: RuleSpec) -> Result<Self, ScoringError> {
        if spec.name.trim().is_empty() {
            return Err(ScoringError::EmptyRuleName);
        }
        if !(1..=2).contains(&spec.attackers) {
            return Err(ScoringError::InvalidAttackerCount(spec.attackers));
        }
        if spec.tricks_target > TOTAL_TRICKS {
            return Err(ScoringError::InvalidTricksTarget(spec.tricks_target));
        }

        let rule = Self { spec };
        let defenders = i32::from(rule.defenders());
        let attackers = i32::from(rule.attackers());
        for tricks in 0..=TOTAL_TRICKS {
            let score = rule.checked_score(tricks)?;
            if score % attackers != 0 || score % defenders != 0 {
                return Err(ScoringError::UnevenSplit {
                    rule: rule.spec.name.clone(),
                    tricks,
                    score,
                });
            }
        }
        Ok(rule)
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn attackers(&self) -> u8 {
        self.spec.attackers
    }

    pub fn defenders(&self) -> u8 {
        TABLE_SIZE - self.spec.attackers
    }

    pub fn tricks_target(&self) -> u8 {
        self.spec.tricks_target
    }

    pub fn is_simultaneous(&self) -> bool {
        self.spec.simultaneous
    }

    pub fn has_custom_score(&self) -> bool {
        self.spec.custom_score.is_some()
    }

    /// Raw points for the attacking team when it takes `tricks` tricks.
    pub fn team_score(&self, tricks: u8) -> Result<i32, ScoringError> {
        if tricks > TOTAL_TRICKS {
            return Err(ScoringError::InvalidTrickCount(tricks));
        }
        self.checked_score(tricks)
    }

    fn checked_score(&self, tricks: u8) -> Result<i32, ScoringError> {
        self.evaluate(tricks).ok_or_else(|| ScoringError::ScoreOverflow {
            rule: self.spec.name.clone(),
            tricks,
        })
    }

    /// `None` when the points do not fit in an `i32`.
    fn evaluate(&self, tricks: u8) -> Option<i32> {
        let spec = &self.spec;
        let won = i32::from(tricks);
        let target = i32::from(spec.tricks_target);

        let points = match spec.custom_score {
            Some(custom) => custom(tricks),
            None if won >= target => (won - target)
                .checked_mul(spec.extra_trick_bonus)?
                .checked_add(spec.success_base)?,
            None => (target - (won + 1))
                .checked_mul(spec.missing_trick_penalty)?
                .checked_add(spec.failure_base)?,
        };

        if spec.sweep_doubles && tricks >= TOTAL_TRICKS {
            points.checked_mul(2)
        } else {
            Some(points)
        }
    }
}
