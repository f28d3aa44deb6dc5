//! Effect targeting system.
//!
//! Defines how effects select their targets:
//! - `TargetRequirement`: What can be targeted and how many
//! - `TargetFilter`: Extra restrictions on candidates
//! - `CardFilter`: Card characteristic matching, shared with non-targeted
//!   choices (sacrifice, put from hand)
//! - `TargetFinder`: Computes legal candidates from a snapshot

use serde::{Deserialize, Serialize};

use crate::cards::{CardData, CardType, Keyword};
use crate::core::{EntityId, GameState, PlayerId, Target};
use crate::layers::{LayerProjector, ProjectedObject, ProjectedView, Projector};
use crate::zones::Zone;

/// Characteristic filter for cards and permanents.
///
/// An empty filter matches everything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardFilter {
    /// Required card type.
    pub card_type: Option<CardType>,
    /// Only permanent cards.
    pub permanent: bool,
    /// Required subtype.
    pub subtype: Option<String>,
}

impl CardFilter {
    /// Match any card.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Match permanent cards.
    #[must_use]
    pub fn permanent() -> Self {
        Self { permanent: true, ..Self::default() }
    }

    /// Match cards of one type.
    #[must_use]
    pub fn of_type(card_type: CardType) -> Self {
        Self { card_type: Some(card_type), ..Self::default() }
    }

    /// Match creatures.
    #[must_use]
    pub fn creature() -> Self {
        Self::of_type(CardType::Creature)
    }

    /// Additionally require a subtype (builder pattern).
    #[must_use]
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    /// Check printed card data (cards in hidden or non-battlefield zones).
    #[must_use]
    pub fn matches(&self, card: &CardData) -> bool {
        self.card_type.is_none_or(|t| card.is(t))
            && (!self.permanent || card.is_permanent())
            && self.subtype.as_deref().is_none_or(|s| card.has_subtype(s))
    }

    /// Check projected characteristics (battlefield permanents).
    #[must_use]
    pub fn matches_projected(&self, object: &ProjectedObject) -> bool {
        self.card_type.is_none_or(|t| object.is(t))
            && self
                .subtype
                .as_deref()
                .is_none_or(|s| object.subtypes.iter().any(|x| x.eq_ignore_ascii_case(s)) || object.has_creature_type(s))
    }
}

/// The kind of thing that can be targeted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// Target players.
    Player,
    /// Target permanents on the battlefield.
    Permanent,
    /// Target players or permanents ("any target").
    Any,
    /// Target spells or abilities on the stack.
    StackObject,
}

/// Number of targets to select.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetCount {
    /// Exactly N targets.
    Exactly(usize),
    /// Up to N targets.
    UpTo(usize),
    /// Between min and max targets.
    Range { min: usize, max: usize },
}

impl TargetCount {
    /// Inclusive `(min, max)` bounds.
    #[must_use]
    pub const fn bounds(self) -> (usize, usize) {
        match self {
            TargetCount::Exactly(n) => (n, n),
            TargetCount::UpTo(n) => (0, n),
            TargetCount::Range { min, max } => (min, max),
        }
    }
}

/// Filters for valid targets.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetFilter {
    // === Player Filters ===

    /// Player target must be an opponent of the controller.
    Opponent,
    /// Player target must be the controller.
    You,

    // === Object Filters ===

    /// Permanent must match the card filter (projected characteristics).
    Matches(CardFilter),
    /// Permanent must be controlled by the controller.
    ControlledByYou,
    /// Permanent must be controlled by an opponent.
    ControlledByOpponent,

    // === Generic Filters ===

    /// Target must not be the source entity.
    NotSource,
}

/// Specification for effect targeting.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetRequirement {
    pub kind: TargetKind,
    pub filters: Vec<TargetFilter>,
    pub count: TargetCount,
}

impl TargetRequirement {
    /// Create a requirement for exactly one target of a kind.
    #[must_use]
    pub fn single(kind: TargetKind) -> Self {
        Self { kind, filters: Vec::new(), count: TargetCount::Exactly(1) }
    }

    /// Target player.
    #[must_use]
    pub fn player() -> Self {
        Self::single(TargetKind::Player)
    }

    /// Target opponent.
    #[must_use]
    pub fn opponent() -> Self {
        Self::player().with_filter(TargetFilter::Opponent)
    }

    /// Target creature.
    #[must_use]
    pub fn creature() -> Self {
        Self::single(TargetKind::Permanent).with_filter(TargetFilter::Matches(CardFilter::creature()))
    }

    /// Target permanent.
    #[must_use]
    pub fn permanent() -> Self {
        Self::single(TargetKind::Permanent)
    }

    /// Any target: a player, or a creature or planeswalker.
    #[must_use]
    pub fn creature_or_player() -> Self {
        Self::single(TargetKind::Any)
    }

    /// Target spell.
    #[must_use]
    pub fn spell() -> Self {
        Self::single(TargetKind::StackObject)
    }

    /// Add a filter (builder pattern).
    #[must_use]
    pub fn with_filter(mut self, filter: TargetFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set the count (builder pattern).
    #[must_use]
    pub fn with_count(mut self, count: TargetCount) -> Self {
        self.count = count;
        self
    }
}

/// Computes legal targets from a snapshot.
///
/// Candidates are returned in a deterministic order: players in turn order
/// from the controller, then permanents in seating order, then stack
/// objects from the top down.
pub trait TargetFinder: Send + Sync {
    /// Every legal target for `requirement`.
    fn find_legal_targets(
        &self,
        state: &GameState,
        requirement: &TargetRequirement,
        controller: PlayerId,
        source: Option<EntityId>,
    ) -> Vec<Target>;

    /// Whether a single target is still legal.
    fn is_legal(
        &self,
        state: &GameState,
        requirement: &TargetRequirement,
        controller: PlayerId,
        source: Option<EntityId>,
        target: Target,
    ) -> bool {
        self.find_legal_targets(state, requirement, controller, source).contains(&target)
    }
}

/// Default finder, checking permanents through the layer projector.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardTargetFinder {
    projector: LayerProjector,
}

impl StandardTargetFinder {
    fn passes_player(filters: &[TargetFilter], controller: PlayerId, player: PlayerId) -> bool {
        filters.iter().all(|filter| match filter {
            TargetFilter::Opponent => player != controller,
            TargetFilter::You => player == controller,
            TargetFilter::NotSource => true,
            TargetFilter::Matches(_) | TargetFilter::ControlledByYou | TargetFilter::ControlledByOpponent => false,
        })
    }

    fn passes_object(
        filters: &[TargetFilter],
        controller: PlayerId,
        source: Option<EntityId>,
        object: &ProjectedObject,
    ) -> bool {
        // Hexproof: opponents of the permanent's controller cannot target it.
        if object.has_keyword(Keyword::Hexproof) && object.controller != controller {
            return false;
        }
        filters.iter().all(|filter| match filter {
            TargetFilter::Matches(card_filter) => card_filter.matches_projected(object),
            TargetFilter::ControlledByYou => object.controller == controller,
            TargetFilter::ControlledByOpponent => object.controller != controller,
            TargetFilter::NotSource => source != Some(object.id),
            TargetFilter::Opponent | TargetFilter::You => false,
        })
    }

    fn players(state: &GameState, requirement: &TargetRequirement, controller: PlayerId) -> Vec<Target> {
        PlayerId::turn_order_from(controller, state.player_count())
            .filter(|p| state.is_in_game(*p))
            .filter(|p| Self::passes_player(&requirement.filters, controller, *p))
            .map(Target::Player)
            .collect()
    }

    fn permanents(
        view: &ProjectedView,
        state: &GameState,
        requirement: &TargetRequirement,
        controller: PlayerId,
        source: Option<EntityId>,
        any_target: bool,
    ) -> Vec<Target> {
        state
            .zones()
            .cards_in_all(Zone::Battlefield)
            .filter_map(|id| view.get(id))
            .filter(|o| !any_target || o.is(CardType::Creature) || o.is(CardType::Planeswalker))
            .filter(|o| Self::passes_object(&requirement.filters, controller, source, o))
            .map(|o| Target::Object(o.id))
            .collect()
    }
}

impl TargetFinder for StandardTargetFinder {
    fn find_legal_targets(
        &self,
        state: &GameState,
        requirement: &TargetRequirement,
        controller: PlayerId,
        source: Option<EntityId>,
    ) -> Vec<Target> {
        match requirement.kind {
            TargetKind::Player => Self::players(state, requirement, controller),
            TargetKind::Permanent => {
                let view = self.projector.project(state);
                Self::permanents(&view, state, requirement, controller, source, false)
            }
            TargetKind::Any => {
                let view = self.projector.project(state);
                let mut targets = Self::players(state, requirement, controller);
                targets.extend(Self::permanents(&view, state, requirement, controller, source, true));
                targets
            }
            TargetKind::StackObject => state
                .stack()
                .iter()
                .rev()
                .map(|object| object.id)
                .filter(|id| source != Some(*id))
                .map(Target::Object)
                .collect(),
        }
    }
}
