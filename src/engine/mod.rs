//! The turn orchestrator, boundary facade, and event channel.

mod events;
mod orchestrator;

pub use events::{EventLog, EventSink, GameEvent};
pub use orchestrator::{choose_opponent_card, resolve_turn, GameEngine};
