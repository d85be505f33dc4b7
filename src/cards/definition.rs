//! Card definitions - static move data.
//!
//! A `Card` holds the immutable properties of a move: its damage, its
//! armor grant, and the status effect it inflicts on the opposing
//! combatant. Runtime state (HP, armor, active effects) lives on
//! `Combatant`; playing a card never mutates the card.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Card category. Drives the AI policy and the market adjustments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Attack,
    Defense,
    Special,
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardKind::Attack => write!(f, "attack"),
            CardKind::Defense => write!(f, "defense"),
            CardKind::Special => write!(f, "special"),
        }
    }
}

/// Status effect category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Poison,
    Strength,
    Weakness,
    Shield,
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusKind::Poison => write!(f, "poison"),
            StatusKind::Strength => write!(f, "strength"),
            StatusKind::Weakness => write!(f, "weakness"),
            StatusKind::Shield => write!(f, "shield"),
        }
    }
}

/// Template for the status effect a card inflicts.
///
/// Templates always land on the opposing combatant of whoever played
/// the card; a buff like strength works by being "inflicted" through
/// the card the buffing side played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTemplate {
    pub kind: StatusKind,
    pub magnitude: i64,
    /// Duration in turns.
    pub duration: u32,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use cryptoclash::cards::{Card, CardKind};
///
/// let strike = Card::new("quick-jab", "Quick Jab", CardKind::Attack)
///     .with_damage(5)
///     .with_description("Deal 5 damage.");
///
/// assert_eq!(strike.base_damage(), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Stable slug identifying the card (e.g. `"fire-strike"`).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Card category.
    pub kind: CardKind,

    /// Declared damage, if the card deals any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage: Option<i64>,

    /// Armor granted to the side that plays the card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub armor: Option<i64>,

    /// Status effect inflicted on the opposing combatant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusTemplate>,

    /// Flavor/help text.
    pub description: String,
}

impl Card {
    /// Create a new card definition.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            damage: None,
            armor: None,
            status: None,
            description: String::new(),
        }
    }

    /// Set the declared damage (builder pattern).
    #[must_use]
    pub fn with_damage(mut self, damage: i64) -> Self {
        self.damage = Some(damage);
        self
    }

    /// Set the armor grant (builder pattern).
    #[must_use]
    pub fn with_armor(mut self, armor: i64) -> Self {
        self.armor = Some(armor);
        self
    }

    /// Set the status effect template (builder pattern).
    #[must_use]
    pub fn with_status(mut self, kind: StatusKind, magnitude: i64, duration: u32) -> Self {
        self.status = Some(StatusTemplate {
            kind,
            magnitude,
            duration,
        });
        self
    }

    /// Set the description text (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declared damage, or 0 if the card deals none.
    #[must_use]
    pub fn base_damage(&self) -> i64 {
        self.damage.unwrap_or(0)
    }
}
