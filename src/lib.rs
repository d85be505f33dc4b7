//! # cryptoclash
//!
//! A turn-based card battle engine whose outcomes are modulated by live
//! cryptocurrency price movements.
//!
//! ## Design Principles
//!
//! 1. **Deterministic core**: all randomness flows through a seeded
//!    RNG; whole sessions replay from a seed, and the turn resolution
//!    itself (`resolve_turn`) is a pure function of its inputs.
//!
//! 2. **The market is a boundary**: gameplay consumes a `MarketSignal`
//!    contract. Feeds can be live, cached, scripted, or synthetic, and
//!    a feed failure degrades to synthetic data instead of aborting a
//!    turn.
//!
//! 3. **Explicit ownership**: the game store, signal provider, and
//!    event sinks are owned components wired into `GameEngine` at
//!    construction, not ambient globals.
//!
//! ## Modules
//!
//! - `core`: deterministic RNG and the clock abstraction
//! - `cards`: card definitions and the fixed six-card catalog
//! - `market`: quotes, signals, impact tiers, feeds, and the provider
//! - `combat`: the damage resolver and status effect processor
//! - `state`: combatants, games, turn records, and the game store
//! - `engine`: the turn orchestrator, boundary facade, and events
//!
//! ## Example
//!
//! ```
//! use cryptoclash::GameEngine;
//!
//! let engine = GameEngine::with_seed(42);
//! let game = engine.create_game("Alice");
//!
//! let after = engine.play_turn(&game.id, "fire-strike").unwrap();
//! assert_eq!(after.current_turn, 2);
//! assert_eq!(after.history.len(), 1);
//! ```

pub mod cards;
pub mod combat;
pub mod core;
pub mod engine;
pub mod market;
pub mod state;

// Re-export commonly used types
pub use crate::cards::{Card, CardCatalog, CardKind, StatusKind, StatusTemplate};

pub use crate::combat::{apply_combat, resolve_damage, tick_effects, DamageTotals};

pub use crate::core::{Clock, EngineRng, ManualClock, SystemClock};

pub use crate::engine::{
    choose_opponent_card, resolve_turn, EventLog, EventSink, GameEngine, GameEvent,
};

pub use crate::market::{
    CachedFeed, CryptoPair, Direction, FeedError, MarketFeed, MarketImpact, MarketQuote,
    MarketSignal, ScriptedFeed, SignalProvider, SyntheticFeed, ROSTER,
};

pub use crate::state::{
    Combatant, Game, GameId, GameStatus, GameStore, StatusEffect, TurnRecord, Winner, MAX_HP,
};
