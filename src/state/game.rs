//! Game state: combatants, turn records, and the session lifecycle.
//!
//! A `Game` is the full mutable state of one battle. Combatants are
//! created with the game and never replaced; combat resolution and
//! status ticking are the only things that mutate them. Turn history is
//! an insertion-ordered persistent vector of immutable records.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::cards::{CardCatalog, StatusKind};
use crate::cards::Card;
use crate::market::MarketSignal;

/// Starting and maximum hit points for every combatant.
pub const MAX_HP: i64 = 100;

/// Unique, unguessable game identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(String);

impl GameId {
    /// Wrap a raw id string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A timed modifier attached to one combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub magnitude: i64,
    /// Turns left. Always >= 1 while attached.
    pub remaining: u32,
}

/// A participant: the human player or the AI opponent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub hp: i64,
    pub max_hp: i64,
    pub armor: i64,
    pub effects: SmallVec<[StatusEffect; 4]>,
}

impl Combatant {
    /// A fresh combatant at full HP with no armor or effects.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hp: MAX_HP,
            max_hp: MAX_HP,
            armor: 0,
            effects: SmallVec::new(),
        }
    }

    /// First active effect of `kind`, if any.
    ///
    /// Deliberately a first-match lookup, not an aggregate: when effects
    /// of the same kind stack, only the first influences damage.
    #[must_use]
    pub fn effect_of(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Reset to the freshly-created state, keeping the name.
    pub fn reset(&mut self) {
        self.hp = self.max_hp;
        self.armor = 0;
        self.effects.clear();
    }
}

/// Whether a game is still accepting turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Finished,
}

/// Which side won a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Player,
    Opponent,
}

/// Immutable snapshot of one resolved turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn_number: u32,
    pub player_card: Card,
    pub opponent_card: Card,
    pub signal: MarketSignal,
    /// Gross (pre-armor) damage aimed at the player this turn.
    pub damage_to_player: i64,
    /// Gross (pre-armor) damage aimed at the opponent this turn.
    pub damage_to_opponent: i64,
    pub player_hp_after: i64,
    pub opponent_hp_after: i64,
    pub summary: String,
}

/// Full state of one battle session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub player: Combatant,
    pub opponent: Combatant,
    /// Turn about to be played. Starts at 1, increments after each
    /// resolved turn.
    pub current_turn: u32,
    pub status: GameStatus,
    pub winner: Option<Winner>,
    pub history: Vector<TurnRecord>,
    pub catalog: CardCatalog,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
}

impl Game {
    /// A fresh game with the standard catalog.
    #[must_use]
    pub fn new(id: GameId, player_name: impl Into<String>, created_at: u64) -> Self {
        Self {
            id,
            player: Combatant::new(player_name),
            opponent: Combatant::new("AI Opponent"),
            current_turn: 1,
            status: GameStatus::Playing,
            winner: None,
            history: Vector::new(),
            catalog: CardCatalog::standard(),
            created_at,
        }
    }

    /// Reset to initial values in place. Id and creation time survive.
    pub fn reset(&mut self) {
        self.player.reset();
        self.opponent.reset();
        self.current_turn = 1;
        self.status = GameStatus::Playing;
        self.winner = None;
        self.history = Vector::new();
    }

    /// Evaluate the win condition after a resolved turn.
    ///
    /// The player's zero-check runs first, so a turn that drops both
    /// sides to 0 is a loss for the player.
    pub fn evaluate_winner(&mut self) -> Option<Winner> {
        if self.player.hp <= 0 {
            self.status = GameStatus::Finished;
            self.winner = Some(Winner::Opponent);
        } else if self.opponent.hp <= 0 {
            self.status = GameStatus::Finished;
            self.winner = Some(Winner::Player);
        }
        self.winner
    }

    /// Whether the game still accepts turns.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::StatusKind;

    fn game() -> Game {
        Game::new(GameId::new("test-game"), "Tester", 1_000)
    }

    #[test]
    fn test_new_game_initial_state() {
        let game = game();

        assert_eq!(game.player.hp, MAX_HP);
        assert_eq!(game.player.armor, 0);
        assert!(game.player.effects.is_empty());
        assert_eq!(game.opponent.name, "AI Opponent");
        assert_eq!(game.current_turn, 1);
        assert_eq!(game.status, GameStatus::Playing);
        assert!(game.winner.is_none());
        assert!(game.history.is_empty());
        assert_eq!(game.catalog.len(), 6);
        assert_eq!(game.created_at, 1_000);
    }

    #[test]
    fn test_reset_preserves_identity() {
        let mut game = game();
        game.player.hp = 12;
        game.player.armor = 7;
        game.player.effects.push(StatusEffect {
            kind: StatusKind::Poison,
            magnitude: 8,
            remaining: 2,
        });
        game.opponent.hp = 0;
        game.current_turn = 9;
        game.status = GameStatus::Finished;
        game.winner = Some(Winner::Player);

        game.reset();

        assert_eq!(game.id, GameId::new("test-game"));
        assert_eq!(game.created_at, 1_000);
        assert_eq!(game.player.hp, MAX_HP);
        assert_eq!(game.player.armor, 0);
        assert!(game.player.effects.is_empty());
        assert_eq!(game.opponent.hp, MAX_HP);
        assert_eq!(game.current_turn, 1);
        assert_eq!(game.status, GameStatus::Playing);
        assert!(game.winner.is_none());
        assert!(game.history.is_empty());
    }

    #[test]
    fn test_win_evaluation_prefers_player_zero() {
        let mut game = game();
        game.player.hp = 0;
        game.opponent.hp = 0;

        assert_eq!(game.evaluate_winner(), Some(Winner::Opponent));
        assert_eq!(game.status, GameStatus::Finished);
    }

    #[test]
    fn test_win_evaluation_opponent_down() {
        let mut game = game();
        game.opponent.hp = 0;

        assert_eq!(game.evaluate_winner(), Some(Winner::Player));
    }

    #[test]
    fn test_win_evaluation_no_winner_while_both_alive() {
        let mut game = game();
        game.player.hp = 1;
        game.opponent.hp = 1;

        assert_eq!(game.evaluate_winner(), None);
        assert!(game.is_playing());
    }

    #[test]
    fn test_effect_of_returns_first_match() {
        let mut combatant = Combatant::new("Tester");
        combatant.effects.push(StatusEffect {
            kind: StatusKind::Strength,
            magnitude: 10,
            remaining: 2,
        });
        combatant.effects.push(StatusEffect {
            kind: StatusKind::Strength,
            magnitude: 99,
            remaining: 2,
        });

        let found = combatant.effect_of(StatusKind::Strength).unwrap();
        assert_eq!(found.magnitude, 10);
        assert!(combatant.effect_of(StatusKind::Shield).is_none());
    }

    #[test]
    fn test_game_serde_round_trip() {
        let game = game();
        let json = serde_json::to_string(&game).unwrap();
        let back: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(game, back);
    }
}
