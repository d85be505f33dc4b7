//! Game state and the authoritative store.

mod game;
mod store;

pub use game::{Combatant, Game, GameId, GameStatus, StatusEffect, TurnRecord, Winner, MAX_HP};
pub use store::{GameStore, CACHE_MAX_AGE_MILLIS, GAME_MAX_AGE_MILLIS, READ_CACHE_TTL_MILLIS};
