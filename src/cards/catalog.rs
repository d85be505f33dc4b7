//! The fixed card catalog.
//!
//! Six cards, identical for every game. The catalog is attached to each
//! game at creation and a "played card" is a lookup into it by id, not
//! an instance with its own state.

use serde::{Deserialize, Serialize};

use super::definition::{Card, CardKind, StatusKind};

/// Registry of the cards available in a game.
///
/// ## Example
///
/// ```
/// use cryptoclash::cards::{CardCatalog, CardKind};
///
/// let catalog = CardCatalog::standard();
/// let fire = catalog.get("fire-strike").unwrap();
/// assert_eq!(fire.kind, CardKind::Attack);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCatalog {
    cards: Vec<Card>,
}

impl CardCatalog {
    /// The standard six-card set. Stats are a balance contract; the
    /// damage numbers, armor grants, and status templates here are what
    /// the market tiers were tuned against.
    #[must_use]
    pub fn standard() -> Self {
        let cards = vec![
            Card::new("fire-strike", "Fire Strike", CardKind::Attack)
                .with_damage(25)
                .with_description("Deal 25 damage. Gets +10 damage if crypto goes up."),
            Card::new("ice-shard", "Ice Shard", CardKind::Attack)
                .with_damage(20)
                .with_status(StatusKind::Weakness, 5, 2)
                .with_description("Deal 20 damage and apply weakness (-5 damage) for 2 turns."),
            Card::new("shield-wall", "Shield Wall", CardKind::Defense)
                .with_armor(15)
                .with_description("Gain 15 armor to block incoming damage."),
            Card::new("poison-dart", "Poison Dart", CardKind::Special)
                .with_damage(10)
                .with_status(StatusKind::Poison, 8, 3)
                .with_description("Deal 10 damage and poison for 8 damage per turn for 3 turns."),
            Card::new("berserker-rage", "Berserker Rage", CardKind::Special)
                .with_damage(15)
                .with_status(StatusKind::Strength, 10, 2)
                .with_description("Deal 15 damage and gain +10 attack damage for 2 turns."),
            Card::new("healing-potion", "Healing Potion", CardKind::Defense)
                .with_armor(5)
                .with_description("Gain 5 armor and remove all negative status effects."),
        ];
        Self { cards }
    }

    /// Look up a card by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// All cards of the given kind.
    pub fn of_kind(&self, kind: CardKind) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |c| c.kind == kind)
    }

    /// All cards, in catalog order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Iterate over all cards.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Number of cards in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for CardCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
