//! Typed engine events.
//!
//! The orchestrator publishes to `EventSink`s instead of calling
//! consumers directly; analytics and logging subscribe without the
//! engine depending on their implementations. Rejected turns surface
//! here with a reason, since the return value deliberately collapses
//! "not found" and "invalid move" into one absent result.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::state::{GameId, Winner};

/// Something notable the engine did.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameCreated {
        game_id: GameId,
        player_name: String,
        timestamp: u64,
    },
    TurnCompleted {
        game_id: GameId,
        turn_number: u32,
        player_card: String,
        opponent_card: String,
        summary: String,
    },
    TurnRejected {
        game_id: GameId,
        reason: String,
    },
    GameFinished {
        game_id: GameId,
        winner: Winner,
        total_turns: u32,
    },
    GameRestarted {
        game_id: GameId,
    },
    GamesEvicted {
        count: usize,
    },
}

/// Consumer of engine events.
pub trait EventSink: Send + Sync {
    /// Receive one event. Implementations must not block the engine.
    fn publish(&self, event: &GameEvent);
}

/// Buffering sink for analytics aggregation and tests.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<GameEvent>>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything published so far.
    #[must_use]
    pub fn snapshot(&self) -> Vec<GameEvent> {
        self.events.lock().expect("event log lock poisoned").clone()
    }

    /// Number of events published so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().expect("event log lock poisoned").len()
    }

    /// Check whether anything has been published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count events matching a predicate (aggregate queries).
    pub fn count_where<F>(&self, predicate: F) -> usize
    where
        F: Fn(&GameEvent) -> bool,
    {
        self.events
            .lock()
            .expect("event log lock poisoned")
            .iter()
            .filter(|e| predicate(e))
            .count()
    }
}

impl EventSink for EventLog {
    fn publish(&self, event: &GameEvent) {
        self.events
            .lock()
            .expect("event log lock poisoned")
            .push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_collects_in_order() {
        let log = EventLog::new();
        assert!(log.is_empty());

        log.publish(&GameEvent::GamesEvicted { count: 1 });
        log.publish(&GameEvent::GamesEvicted { count: 2 });

        let events = log.snapshot();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], GameEvent::GamesEvicted { count: 2 });
    }

    #[test]
    fn test_count_where() {
        let log = EventLog::new();
        log.publish(&GameEvent::GamesEvicted { count: 1 });
        log.publish(&GameEvent::TurnRejected {
            game_id: GameId::new("g"),
            reason: "card not in catalog".to_string(),
        });

        let rejections =
            log.count_where(|e| matches!(e, GameEvent::TurnRejected { .. }));
        assert_eq!(rejections, 1);
    }
}
