//! The authoritative game store.
//!
//! Owns every live `Game` behind a per-game lock, with a short-TTL read
//! cache in front, unguessable id generation, and time-based eviction.
//!
//! ## Concurrency
//!
//! The map of games is behind an `RwLock`; each game is behind its own
//! `Arc<Mutex<_>>`. Mutating operations (`play_turn`, `restart`) hold
//! the per-game lock for their whole duration, so concurrent turns
//! against the same id serialize instead of interleaving their
//! read-modify-write. Eviction skips any game whose lock is currently
//! held.

use std::sync::{Arc, Mutex, RwLock};

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use super::game::{Game, GameId, GameStatus};
use crate::core::{Clock, EngineRng};

/// Games older than this are evicted from the authoritative store.
pub const GAME_MAX_AGE_MILLIS: u64 = 24 * 60 * 60 * 1000;

/// Read-cache entries are served for this long.
pub const READ_CACHE_TTL_MILLIS: u64 = 30_000;

/// Read-cache entries older than this are evicted outright.
pub const CACHE_MAX_AGE_MILLIS: u64 = 5 * 60 * 1000;

struct CacheEntry {
    snapshot: Game,
    cached_at: u64,
}

/// In-memory mapping from game id to game state.
pub struct GameStore {
    games: RwLock<FxHashMap<GameId, Arc<Mutex<Game>>>>,
    cache: Mutex<FxHashMap<GameId, CacheEntry>>,
    clock: Arc<dyn Clock>,
    rng: Mutex<EngineRng>,
}

impl GameStore {
    /// Create an empty store.
    #[must_use]
    pub fn new(rng: EngineRng, clock: Arc<dyn Clock>) -> Self {
        Self {
            games: RwLock::new(FxHashMap::default()),
            cache: Mutex::new(FxHashMap::default()),
            clock,
            rng: Mutex::new(rng),
        }
    }

    /// Allocate a fresh game for `player_name`. Returns a snapshot.
    pub fn create(&self, player_name: &str) -> Game {
        let now = self.clock.now_millis();
        let id = self.generate_id(now);
        let game = Game::new(id.clone(), player_name, now);

        self.write_cache(&game, now);
        self.games
            .write()
            .expect("game map lock poisoned")
            .insert(id.clone(), Arc::new(Mutex::new(game.clone())));

        debug!(game_id = %id, player = player_name, "created game");
        game
    }

    /// Read-through snapshot lookup.
    ///
    /// Cache entries younger than `READ_CACHE_TTL_MILLIS` are served
    /// directly; otherwise the authoritative game is read and the cache
    /// refreshed.
    #[must_use]
    pub fn get(&self, id: &GameId) -> Option<Game> {
        let now = self.clock.now_millis();

        {
            let cache = self.cache.lock().expect("read cache lock poisoned");
            if let Some(entry) = cache.get(id) {
                if now.saturating_sub(entry.cached_at) < READ_CACHE_TTL_MILLIS {
                    return Some(entry.snapshot.clone());
                }
            }
        }

        let handle = self.checkout(id)?;
        let snapshot = handle.lock().expect("game lock poisoned").clone();
        self.write_cache(&snapshot, now);
        Some(snapshot)
    }

    /// Handle for in-place mutation. Callers hold the returned game's
    /// lock for the whole operation.
    pub(crate) fn checkout(&self, id: &GameId) -> Option<Arc<Mutex<Game>>> {
        self.games
            .read()
            .expect("game map lock poisoned")
            .get(id)
            .cloned()
    }

    /// Refresh the read cache after a mutation.
    pub(crate) fn write_back(&self, game: &Game) {
        self.write_cache(game, self.clock.now_millis());
    }

    /// Reset a game to its initial values in place. Id is preserved.
    pub fn restart(&self, id: &GameId) -> Option<Game> {
        let handle = self.checkout(id)?;

        let mut game = handle.lock().expect("game lock poisoned");
        game.reset();
        let snapshot = game.clone();
        drop(game);

        self.write_back(&snapshot);
        debug!(game_id = %id, "restarted game");
        Some(snapshot)
    }

    /// Drop expired games and stale cache entries.
    ///
    /// The two age limits are independent: games expire after 24 hours,
    /// cache entries after 5 minutes. A game whose lock is held by an
    /// in-flight turn is skipped until the next pass. Returns the
    /// number of games removed.
    pub fn evict(&self) -> usize {
        let now = self.clock.now_millis();
        let mut removed = Vec::new();

        {
            let mut games = self.games.write().expect("game map lock poisoned");
            games.retain(|id, handle| {
                let Ok(game) = handle.try_lock() else {
                    return true;
                };
                if now.saturating_sub(game.created_at) > GAME_MAX_AGE_MILLIS {
                    removed.push(id.clone());
                    false
                } else {
                    true
                }
            });
        }

        {
            let mut cache = self.cache.lock().expect("read cache lock poisoned");
            for id in &removed {
                cache.remove(id);
            }
            cache.retain(|_, entry| now.saturating_sub(entry.cached_at) <= CACHE_MAX_AGE_MILLIS);
        }

        if !removed.is_empty() {
            info!(evicted = removed.len(), "evicted expired games");
        }
        removed.len()
    }

    /// Number of stored games still in play.
    #[must_use]
    pub fn active_count(&self) -> usize {
        let games = self.games.read().expect("game map lock poisoned");
        games
            .values()
            .filter(|handle| handle.lock().expect("game lock poisoned").status == GameStatus::Playing)
            .count()
    }

    /// Total number of stored games, finished included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.read().expect("game map lock poisoned").len()
    }

    /// Check whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Time component plus two independent random components, all
    /// base 36. Unguessable enough for casual multi-tenant play.
    fn generate_id(&self, now: u64) -> GameId {
        let mut rng = self.rng.lock().expect("store rng lock poisoned");
        let raw = format!(
            "{}{}{}",
            to_base36(u128::from(now)),
            random_base36(&mut rng, 13),
            random_base36(&mut rng, 6)
        );
        GameId::new(raw)
    }

    fn write_cache(&self, game: &Game, now: u64) {
        self.cache
            .lock()
            .expect("read cache lock poisoned")
            .insert(
                game.id.clone(),
                CacheEntry {
                    snapshot: game.clone(),
                    cached_at: now,
                },
            );
    }
}

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ascii")
}

fn random_base36(rng: &mut EngineRng, len: usize) -> String {
    (0..len)
        .map(|_| BASE36_DIGITS[rng.gen_range_usize(0..36)] as char)
        .collect()
}
