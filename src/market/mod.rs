//! Market data: quotes, signals, feeds, and the per-turn provider.

mod feed;
mod provider;
mod signal;

pub use feed::{CachedFeed, CryptoPair, FeedError, MarketFeed, ScriptedFeed, SyntheticFeed, ROSTER};
pub use provider::SignalProvider;
pub use signal::{Direction, MarketImpact, MarketQuote, MarketSignal};
