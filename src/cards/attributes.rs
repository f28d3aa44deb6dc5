//! Card characteristic vocabulary: colors, card types, keywords, counters.
//!
//! These are the closed sets the engine itself has to reason about (which
//! cards are permanents, which objects are creatures, which color a player
//! named). Open-ended characteristics such as subtypes stay strings.

use serde::{Deserialize, Serialize};

/// One of the five colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl Color {
    /// All colors in canonical order.
    pub const ALL: [Color; 5] = [Color::White, Color::Blue, Color::Black, Color::Red, Color::Green];
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::White => "white",
            Color::Blue => "blue",
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
        };
        f.write_str(name)
    }
}

/// Card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardType {
    Artifact,
    Creature,
    Enchantment,
    Land,
    Planeswalker,
    Instant,
    Sorcery,
}

impl CardType {
    /// Whether cards of this type stay on the battlefield after resolving.
    #[must_use]
    pub const fn is_permanent(self) -> bool {
        !matches!(self, CardType::Instant | CardType::Sorcery)
    }
}

/// Keyword abilities the projector can grant or remove.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Flying,
    Trample,
    Haste,
    Vigilance,
    Lifelink,
    Deathtouch,
    Hexproof,
    Indestructible,
}

/// Counter kinds that can be placed on objects.
///
/// Unit variants only, so counter maps serialize with plain string keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CounterKind {
    /// +1/+1 counter.
    PlusOne,
    /// -1/-1 counter.
    MinusOne,
    Loyalty,
    Charge,
    Time,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permanent_types() {
        assert!(CardType::Creature.is_permanent());
        assert!(CardType::Land.is_permanent());
        assert!(!CardType::Instant.is_permanent());
        assert!(!CardType::Sorcery.is_permanent());
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::Green.to_string(), "green");
        assert_eq!(Color::ALL.len(), 5);
    }
}
