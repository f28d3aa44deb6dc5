//! Answers to decisions and protocol validation.
//!
//! Validation here is about the protocol: the answer has the right shape,
//! is in bounds, and only names candidates the decision offered. Whether a
//! named object still exists is not checked here; resumers re-check every
//! reference against the current snapshot and degrade gracefully.

use serde::{Deserialize, Serialize};

use crate::cards::Color;
use crate::core::{EntityId, Target};
use crate::engine::{EngineError, EngineResult};

use super::decision::{Decision, DecisionKind};

/// A player's answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionResponse {
    YesNo(bool),
    Number(u32),
    Cards(Vec<EntityId>),
    Targets(Vec<Target>),
    Order(Vec<EntityId>),
    Distribution(Vec<(Target, u32)>),
    ManaSources(Vec<EntityId>),
    Color(Color),
    Choice(usize),
}

impl DecisionResponse {
    /// Short name matching `DecisionKind::name`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            DecisionResponse::YesNo(_) => "yes/no",
            DecisionResponse::Number(_) => "number",
            DecisionResponse::Cards(_) => "cards",
            DecisionResponse::Targets(_) => "targets",
            DecisionResponse::Order(_) => "order",
            DecisionResponse::Distribution(_) => "distribution",
            DecisionResponse::ManaSources(_) => "mana sources",
            DecisionResponse::Color(_) => "color",
            DecisionResponse::Choice(_) => "option",
        }
    }

    fn mismatch(self, expected: &'static str) -> EngineError {
        EngineError::ResponseMismatch { expected, got: self.name() }
    }

    // === Accessors ===

    pub fn into_yes_no(self) -> EngineResult<bool> {
        match self {
            DecisionResponse::YesNo(b) => Ok(b),
            other => Err(other.mismatch("yes/no")),
        }
    }

    pub fn into_number(self) -> EngineResult<u32> {
        match self {
            DecisionResponse::Number(n) => Ok(n),
            other => Err(other.mismatch("number")),
        }
    }

    pub fn into_cards(self) -> EngineResult<Vec<EntityId>> {
        match self {
            DecisionResponse::Cards(cards) => Ok(cards),
            other => Err(other.mismatch("cards")),
        }
    }

    pub fn into_targets(self) -> EngineResult<Vec<Target>> {
        match self {
            DecisionResponse::Targets(targets) => Ok(targets),
            other => Err(other.mismatch("targets")),
        }
    }

    pub fn into_order(self) -> EngineResult<Vec<EntityId>> {
        match self {
            DecisionResponse::Order(order) => Ok(order),
            other => Err(other.mismatch("order")),
        }
    }

    pub fn into_distribution(self) -> EngineResult<Vec<(Target, u32)>> {
        match self {
            DecisionResponse::Distribution(split) => Ok(split),
            other => Err(other.mismatch("distribution")),
        }
    }

    pub fn into_mana_sources(self) -> EngineResult<Vec<EntityId>> {
        match self {
            DecisionResponse::ManaSources(sources) => Ok(sources),
            other => Err(other.mismatch("mana sources")),
        }
    }

    pub fn into_color(self) -> EngineResult<Color> {
        match self {
            DecisionResponse::Color(color) => Ok(color),
            other => Err(other.mismatch("color")),
        }
    }

    pub fn into_choice(self) -> EngineResult<usize> {
        match self {
            DecisionResponse::Choice(index) => Ok(index),
            other => Err(other.mismatch("option")),
        }
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidResponse(message.into())
}

fn check_distinct_subset<T: PartialEq + std::fmt::Display>(chosen: &[T], candidates: &[T]) -> EngineResult<()> {
    for (i, item) in chosen.iter().enumerate() {
        if !candidates.contains(item) {
            return Err(invalid(format!("{item} was not offered")));
        }
        if chosen[..i].contains(item) {
            return Err(invalid(format!("{item} chosen more than once")));
        }
    }
    Ok(())
}

fn check_count(len: usize, min: usize, max: usize) -> EngineResult<()> {
    if len < min || len > max {
        return Err(invalid(format!("expected between {min} and {max} choices, got {len}")));
    }
    Ok(())
}

impl Decision {
    /// Check that `response` answers this decision.
    pub fn validate(&self, response: &DecisionResponse) -> EngineResult<()> {
        match (&self.kind, response) {
            (DecisionKind::YesNo, DecisionResponse::YesNo(_)) => Ok(()),

            (DecisionKind::Number { min, max }, DecisionResponse::Number(n)) => {
                if n < min || n > max {
                    return Err(invalid(format!("{n} is outside {min}..={max}")));
                }
                Ok(())
            }

            (DecisionKind::SelectCards { candidates, min, max }, DecisionResponse::Cards(cards)) => {
                check_count(cards.len(), *min, *max)?;
                check_distinct_subset(cards, candidates)
            }

            (DecisionKind::ChooseTargets { candidates, min, max }, DecisionResponse::Targets(targets)) => {
                check_count(targets.len(), *min, *max)?;
                check_distinct_subset(targets, candidates)
            }

            (DecisionKind::Order { objects }, DecisionResponse::Order(order)) => {
                if order.len() != objects.len() {
                    return Err(invalid(format!("order must list all {} objects", objects.len())));
                }
                check_distinct_subset(order, objects)
            }

            (DecisionKind::Distribute { total, targets, min_per_target }, DecisionResponse::Distribution(split)) => {
                let named: Vec<Target> = split.iter().map(|(t, _)| *t).collect();
                check_distinct_subset(&named, targets)?;
                if let Some((target, amount)) = split.iter().find(|(_, a)| a < min_per_target) {
                    return Err(invalid(format!("{target} assigned {amount}, minimum is {min_per_target}")));
                }
                let sum = split
                    .iter()
                    .try_fold(0u32, |acc, (_, a)| acc.checked_add(*a))
                    .ok_or_else(|| invalid("distribution total overflows"))?;
                if sum != *total {
                    return Err(invalid(format!("distribution sums to {sum}, expected {total}")));
                }
                Ok(())
            }

            (DecisionKind::ManaSources { sources, amount }, DecisionResponse::ManaSources(picked)) => {
                check_count(picked.len(), 0, *amount as usize)?;
                check_distinct_subset(picked, sources)
            }

            (DecisionKind::Color { allowed }, DecisionResponse::Color(color)) => {
                if !allowed.contains(color) {
                    return Err(invalid(format!("{color} is not an allowed color")));
                }
                Ok(())
            }

            (DecisionKind::ChooseOption { options }, DecisionResponse::Choice(index)) => {
                if *index >= options.len() {
                    return Err(invalid(format!("option {index} out of range ({} options)", options.len())));
                }
                Ok(())
            }

            (kind, response) => Err(EngineError::ResponseMismatch { expected: kind.name(), got: response.name() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    fn decision(kind: DecisionKind) -> Decision {
        Decision::new(PlayerId::new(0), kind, "test")
    }

    #[test]
    fn test_shape_mismatch() {
        let d = decision(DecisionKind::YesNo);
        assert_eq!(
            d.validate(&DecisionResponse::Number(1)),
            Err(EngineError::ResponseMismatch { expected: "yes/no", got: "number" })
        );
        assert!(d.validate(&DecisionResponse::YesNo(true)).is_ok());
    }

    #[test]
    fn test_number_bounds() {
        let d = decision(DecisionKind::Number { min: 0, max: 5 });
        assert!(d.validate(&DecisionResponse::Number(5)).is_ok());
        assert!(d.validate(&DecisionResponse::Number(6)).is_err());
    }

    #[test]
    fn test_select_cards() {
        let d = decision(DecisionKind::SelectCards { candidates: vec![EntityId(1), EntityId(2)], min: 1, max: 1 });
        assert!(d.validate(&DecisionResponse::Cards(vec![EntityId(2)])).is_ok());
        assert!(d.validate(&DecisionResponse::Cards(vec![])).is_err());
        assert!(d.validate(&DecisionResponse::Cards(vec![EntityId(3)])).is_err());
    }

    #[test]
    fn test_duplicates_rejected() {
        let d = decision(DecisionKind::SelectCards { candidates: vec![EntityId(1), EntityId(2)], min: 0, max: 2 });
        assert!(d.validate(&DecisionResponse::Cards(vec![EntityId(1), EntityId(1)])).is_err());
    }

    #[test]
    fn test_order_must_be_permutation() {
        let d = decision(DecisionKind::Order { objects: vec![EntityId(1), EntityId(2), EntityId(3)] });
        assert!(d.validate(&DecisionResponse::Order(vec![EntityId(3), EntityId(1), EntityId(2)])).is_ok());
        assert!(d.validate(&DecisionResponse::Order(vec![EntityId(3), EntityId(1)])).is_err());
        assert!(d.validate(&DecisionResponse::Order(vec![EntityId(3), EntityId(3), EntityId(1)])).is_err());
    }

    #[test]
    fn test_distribution() {
        let a = Target::Object(EntityId(1));
        let b = Target::Object(EntityId(2));
        let d = decision(DecisionKind::Distribute { total: 3, targets: vec![a, b], min_per_target: 1 });
        assert!(d.validate(&DecisionResponse::Distribution(vec![(a, 2), (b, 1)])).is_ok());
        assert!(d.validate(&DecisionResponse::Distribution(vec![(a, 3), (b, 0)])).is_err());
        assert!(d.validate(&DecisionResponse::Distribution(vec![(a, 1), (b, 1)])).is_err());
    }

    #[test]
    fn test_distribution_overflow_is_invalid() {
        let a = Target::Object(EntityId(1));
        let b = Target::Object(EntityId(2));
        let d = decision(DecisionKind::Distribute { total: 5, targets: vec![a, b], min_per_target: 1 });
        let err = d.validate(&DecisionResponse::Distribution(vec![(a, u32::MAX), (b, 6)])).unwrap_err();
        assert!(matches!(err, EngineError::InvalidResponse(_)));
    }

    #[test]
    fn test_mana_sources_may_decline() {
        let d = decision(DecisionKind::ManaSources { sources: vec![EntityId(1), EntityId(2)], amount: 1 });
        assert!(d.validate(&DecisionResponse::ManaSources(vec![])).is_ok());
        assert!(d.validate(&DecisionResponse::ManaSources(vec![EntityId(1), EntityId(2)])).is_err());
    }

    #[test]
    fn test_color_and_option() {
        let d = decision(DecisionKind::Color { allowed: vec![Color::Red] });
        assert!(d.validate(&DecisionResponse::Color(Color::Red)).is_ok());
        assert!(d.validate(&DecisionResponse::Color(Color::Blue)).is_err());

        let d = decision(DecisionKind::ChooseOption { options: vec!["a".into(), "b".into()] });
        assert!(d.validate(&DecisionResponse::Choice(1)).is_ok());
        assert!(d.validate(&DecisionResponse::Choice(2)).is_err());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(DecisionResponse::YesNo(true).into_yes_no(), Ok(true));
        assert!(DecisionResponse::YesNo(true).into_cards().is_err());
    }
}
