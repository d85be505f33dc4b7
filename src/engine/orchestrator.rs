//! The turn orchestrator and boundary facade.
//!
//! `GameEngine` is the single entry point the outer layers call:
//! create/get/play/restart plus eviction and the active-game gauge.
//! A turn is resolved while holding the game's lock, so concurrent
//! turns against the same id serialize; the expensive external call
//! (the market feed) happens inside that window by design, matching
//! the one-turn-at-a-time contract.

use std::sync::{Arc, Mutex};

use tracing::debug;

use super::events::{EventSink, GameEvent};
use crate::cards::{Card, CardCatalog, CardKind};
use crate::combat::{apply_combat, resolve_damage, tick_effects};
use crate::core::{Clock, EngineRng, SystemClock};
use crate::market::{MarketSignal, SignalProvider};
use crate::state::{Game, GameId, GameStatus, GameStore, TurnRecord};

/// Probability that the AI answers an attack with a defense card.
const AI_DEFENSE_BIAS: f64 = 0.7;

/// The battle engine: store, market provider, AI, and event channel.
pub struct GameEngine {
    store: GameStore,
    provider: Mutex<SignalProvider>,
    rng: Mutex<EngineRng>,
    sinks: Vec<Arc<dyn EventSink>>,
}

impl GameEngine {
    /// Engine with entropy seeding, the system clock, and a synthetic
    /// market feed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed_internal(EngineRng::from_entropy())
    }

    /// Deterministic engine for tests and replays.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_seed_internal(EngineRng::new(seed))
    }

    fn with_seed_internal(mut rng: EngineRng) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let provider = SignalProvider::synthetic(&mut rng, Arc::clone(&clock));
        Self::with_parts(rng, clock, provider)
    }

    /// Engine assembled from explicit parts.
    #[must_use]
    pub fn with_parts(mut rng: EngineRng, clock: Arc<dyn Clock>, provider: SignalProvider) -> Self {
        let store = GameStore::new(rng.fork(), clock);
        Self {
            store,
            provider: Mutex::new(provider),
            rng: Mutex::new(rng),
            sinks: Vec::new(),
        }
    }

    /// Attach an event consumer.
    pub fn subscribe(&mut self, sink: Arc<dyn EventSink>) {
        self.sinks.push(sink);
    }

    fn emit(&self, event: GameEvent) {
        for sink in &self.sinks {
            sink.publish(&event);
        }
    }

    // === Boundary operations ===

    /// Create a new game for `player_name`.
    ///
    /// The name is free text; length caps and sanitization are the
    /// caller's concern.
    pub fn create_game(&self, player_name: &str) -> Game {
        let game = self.store.create(player_name);
        self.emit(GameEvent::GameCreated {
            game_id: game.id.clone(),
            player_name: player_name.to_string(),
            timestamp: game.created_at,
        });
        game
    }

    /// Snapshot of a game, if it exists.
    #[must_use]
    pub fn get_game(&self, id: &GameId) -> Option<Game> {
        self.store.get(id)
    }

    /// Reset a game in place, keeping its id.
    pub fn restart_game(&self, id: &GameId) -> Option<Game> {
        let game = self.store.restart(id)?;
        self.emit(GameEvent::GameRestarted {
            game_id: game.id.clone(),
        });
        Some(game)
    }

    /// Number of stored games still in play.
    #[must_use]
    pub fn active_game_count(&self) -> usize {
        self.store.active_count()
    }

    /// Run one eviction pass. Callers schedule this (roughly every 60s).
    pub fn evict_expired(&self) -> usize {
        let count = self.store.evict();
        if count > 0 {
            self.emit(GameEvent::GamesEvicted { count });
        }
        count
    }

    /// Resolve one turn of `id` with the player's chosen card.
    ///
    /// `None` covers both an unknown game and an invalid move; the
    /// distinction is published as a `TurnRejected` event, not encoded
    /// in the return value.
    pub fn play_turn(&self, id: &GameId, card_id: &str) -> Option<Game> {
        let Some(handle) = self.store.checkout(id) else {
            self.reject(id, "game not found");
            return None;
        };
        let mut game = handle.lock().expect("game lock poisoned");

        if !game.is_playing() {
            self.reject(id, "game is not in a playable state");
            return None;
        }
        let Some(player_card) = game.catalog.get(card_id).cloned() else {
            self.reject(id, "card not in catalog");
            return None;
        };

        let (opponent_card, signal) = {
            let mut rng = self.rng.lock().expect("engine rng lock poisoned");
            let opponent_card =
                choose_opponent_card(&game.catalog, &player_card, &mut rng).clone();
            let signal = self
                .provider
                .lock()
                .expect("signal provider lock poisoned")
                .fetch(&mut rng);
            (opponent_card, signal)
        };

        resolve_turn(&mut game, &player_card, &opponent_card, &signal);

        if game.status == GameStatus::Finished {
            if let Some(winner) = game.winner {
                self.emit(GameEvent::GameFinished {
                    game_id: id.clone(),
                    winner,
                    total_turns: game.current_turn,
                });
            }
        }

        let snapshot = game.clone();
        drop(game);
        self.store.write_back(&snapshot);

        let summary = snapshot
            .history
            .last()
            .map(|t| t.summary.clone())
            .unwrap_or_default();
        debug!(game_id = %id, turn = snapshot.current_turn - 1, %summary, "turn resolved");
        self.emit(GameEvent::TurnCompleted {
            game_id: id.clone(),
            turn_number: snapshot.current_turn - 1,
            player_card: player_card.name,
            opponent_card: opponent_card.name,
            summary,
        });

        Some(snapshot)
    }

    fn reject(&self, id: &GameId, reason: &str) {
        debug!(game_id = %id, reason, "turn rejected");
        self.emit(GameEvent::TurnRejected {
            game_id: id.clone(),
            reason: reason.to_string(),
        });
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Reactive opponent policy.
///
/// Against an attack card the AI reaches for a uniformly random defense
/// card 70% of the time; otherwise (the remaining 30%, a non-attack
/// card, or a catalog without defense cards) it plays a uniformly
/// random card from the whole catalog.
pub fn choose_opponent_card<'a>(
    catalog: &'a CardCatalog,
    player_card: &Card,
    rng: &mut EngineRng,
) -> &'a Card {
    if player_card.kind == CardKind::Attack {
        let defense: Vec<&Card> = catalog.of_kind(CardKind::Defense).collect();
        if !defense.is_empty() && rng.gen_bool(AI_DEFENSE_BIAS) {
            return defense[rng.gen_range_usize(0..defense.len())];
        }
    }

    let cards = catalog.cards();
    &cards[rng.gen_range_usize(0..cards.len())]
}

/// Resolve one full turn against explicit inputs.
///
/// This is the deterministic core of `play_turn`: damage math, state
/// application, the turn record, the turn counter, the win check, then
/// effect ticks. Callers must pass a game that is still playing.
pub fn resolve_turn(
    game: &mut Game,
    player_card: &Card,
    opponent_card: &Card,
    signal: &MarketSignal,
) {
    let totals = resolve_damage(
        player_card,
        opponent_card,
        signal,
        &game.player,
        &game.opponent,
    );
    apply_combat(
        &mut game.player,
        &mut game.opponent,
        player_card,
        opponent_card,
        totals,
    );

    let summary = format!(
        "{} vs {} - {}",
        player_card.name, opponent_card.name, signal.impact.description
    );
    game.history.push_back(TurnRecord {
        turn_number: game.current_turn,
        player_card: player_card.clone(),
        opponent_card: opponent_card.clone(),
        signal: signal.clone(),
        damage_to_player: totals.by_opponent,
        damage_to_opponent: totals.by_player,
        player_hp_after: game.player.hp,
        opponent_hp_after: game.opponent.hp,
        summary,
    });
    game.current_turn += 1;

    game.evaluate_winner();

    // Ticks run after the win check: a lethal poison tick is recorded
    // in the state but cannot rewrite the turn that just resolved.
    tick_effects(&mut game.player);
    tick_effects(&mut game.opponent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_prefers_defense_against_attack() {
        let catalog = CardCatalog::standard();
        let fire = catalog.get("fire-strike").unwrap();
        let mut rng = EngineRng::new(42);

        let defense_picks = (0..10_000)
            .filter(|_| {
                choose_opponent_card(&catalog, fire, &mut rng).kind == CardKind::Defense
            })
            .count();

        // 70% defense bias plus the 30% uniform branch's own defense
        // hits: expected ~0.7 + 0.3 * (2/6) = 0.8.
        assert!(
            (7_700..8_300).contains(&defense_picks),
            "got {defense_picks} defense picks"
        );
    }

    #[test]
    fn test_ai_is_uniform_against_non_attack() {
        let catalog = CardCatalog::standard();
        let wall = catalog.get("shield-wall").unwrap();
        let mut rng = EngineRng::new(42);

        let defense_picks = (0..10_000)
            .filter(|_| {
                choose_opponent_card(&catalog, wall, &mut rng).kind == CardKind::Defense
            })
            .count();

        // Uniform over 6 cards, 2 of them defense: ~1/3.
        assert!(
            (3_000..3_700).contains(&defense_picks),
            "got {defense_picks} defense picks"
        );
    }
}
