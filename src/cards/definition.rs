//! Card data - the printed characteristics of a card.
//!
//! `CardData` holds what is printed on a card: name, types, subtypes,
//! colors, power/toughness, keywords and (for lands and mana rocks) the
//! color of mana it taps for. Continuous effects never rewrite it; the
//! projector derives current characteristics on top of it.
//!
//! ## Example
//!
//! ```
//! use ccg_rules::cards::{CardData, CardType, Color};
//!
//! let elf = CardData::creature("Llanowar Elves", 1, 1)
//!     .with_subtype("Elf")
//!     .with_color(Color::Green)
//!     .with_mana_output(Color::Green);
//!
//! assert!(elf.is(CardType::Creature));
//! assert!(elf.has_subtype("Elf"));
//! assert!(elf.is_mana_source());
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::attributes::{CardType, Color, Keyword};

/// Printed characteristics of a card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardData {
    /// Card name.
    pub name: String,

    /// Card types (most cards have one).
    pub card_types: SmallVec<[CardType; 2]>,

    /// Subtypes (creature types, "Aura", land types).
    pub subtypes: Vec<String>,

    /// Colors.
    pub colors: SmallVec<[Color; 2]>,

    /// Printed power, for creatures.
    pub power: Option<i32>,

    /// Printed toughness, for creatures.
    pub toughness: Option<i32>,

    /// Printed keyword abilities.
    pub keywords: SmallVec<[Keyword; 2]>,

    /// Color of mana produced by tapping this permanent, if any.
    pub mana_output: Option<Color>,
}

impl CardData {
    /// Create card data with a single card type.
    pub fn new(name: impl Into<String>, card_type: CardType) -> Self {
        let mut card_types = SmallVec::new();
        card_types.push(card_type);
        Self {
            name: name.into(),
            card_types,
            subtypes: Vec::new(),
            colors: SmallVec::new(),
            power: None,
            toughness: None,
            keywords: SmallVec::new(),
            mana_output: None,
        }
    }

    /// Create a creature card.
    pub fn creature(name: impl Into<String>, power: i32, toughness: i32) -> Self {
        let mut data = Self::new(name, CardType::Creature);
        data.power = Some(power);
        data.toughness = Some(toughness);
        data
    }

    /// Create an Aura enchantment card.
    pub fn aura(name: impl Into<String>) -> Self {
        Self::new(name, CardType::Enchantment).with_subtype("Aura")
    }

    /// Create a land that taps for one mana of `color`.
    pub fn land(name: impl Into<String>, color: Color) -> Self {
        Self::new(name, CardType::Land).with_mana_output(color)
    }

    /// Add another card type.
    #[must_use]
    pub fn with_type(mut self, card_type: CardType) -> Self {
        if !self.card_types.contains(&card_type) {
            self.card_types.push(card_type);
        }
        self
    }

    /// Add a subtype.
    #[must_use]
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtypes.push(subtype.into());
        self
    }

    /// Add a color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        if !self.colors.contains(&color) {
            self.colors.push(color);
        }
        self
    }

    /// Add a keyword ability.
    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        self.keywords.push(keyword);
        self
    }

    /// Make this card a mana source.
    #[must_use]
    pub fn with_mana_output(mut self, color: Color) -> Self {
        self.mana_output = Some(color);
        self
    }

    /// Check for a card type.
    #[must_use]
    pub fn is(&self, card_type: CardType) -> bool {
        self.card_types.contains(&card_type)
    }

    /// Check for a subtype (case-sensitive).
    #[must_use]
    pub fn has_subtype(&self, subtype: &str) -> bool {
        self.subtypes.iter().any(|s| s == subtype)
    }

    /// Whether this card can exist on the battlefield.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        self.card_types.iter().any(|t| t.is_permanent())
    }

    /// Whether this card is an Aura.
    #[must_use]
    pub fn is_aura(&self) -> bool {
        self.is(CardType::Enchantment) && self.has_subtype("Aura")
    }

    /// Whether tapping this permanent produces mana.
    #[must_use]
    pub fn is_mana_source(&self) -> bool {
        self.mana_output.is_some()
    }
}
