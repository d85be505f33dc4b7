//! Market data feeds.
//!
//! `MarketFeed` is the boundary to price data. The crate ships a
//! synthetic feed (bounded random swings), a scripted feed for
//! deterministic tests, and a TTL cache combinator. A live exchange
//! client implements the same trait outside the crate; its timeouts and
//! transport failures surface here as `FeedError` and are absorbed by
//! the `SignalProvider` fallback, never by gameplay code.

use std::collections::VecDeque;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::signal::{Direction, MarketQuote};
use crate::core::{Clock, EngineRng};

/// A tradeable pair the engine can sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CryptoPair {
    pub symbol: &'static str,
    pub display_name: &'static str,
    /// Anchor price for synthetic quotes.
    pub base_price: f64,
}

/// The six pairs the engine samples from.
pub const ROSTER: [CryptoPair; 6] = [
    CryptoPair {
        symbol: "BTC",
        display_name: "Bitcoin",
        base_price: 45_000.0,
    },
    CryptoPair {
        symbol: "ETH",
        display_name: "Ethereum",
        base_price: 2_500.0,
    },
    CryptoPair {
        symbol: "BNB",
        display_name: "Binance Coin",
        base_price: 300.0,
    },
    CryptoPair {
        symbol: "ADA",
        display_name: "Cardano",
        base_price: 0.5,
    },
    CryptoPair {
        symbol: "SOL",
        display_name: "Solana",
        base_price: 100.0,
    },
    CryptoPair {
        symbol: "MATIC",
        display_name: "Polygon",
        base_price: 0.8,
    },
];

/// Feed failure. Only ever observed inside the provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedError {
    /// Upstream returned an error or an unusable payload.
    Unavailable(String),
    /// The bounded request window elapsed.
    TimedOut,
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Unavailable(reason) => write!(f, "feed unavailable: {}", reason),
            FeedError::TimedOut => write!(f, "feed request timed out"),
        }
    }
}

impl Error for FeedError {}

/// Source of price quotes.
pub trait MarketFeed: Send {
    /// Fetch a quote for one pair.
    fn quote(&mut self, pair: &CryptoPair) -> Result<MarketQuote, FeedError>;
}

/// Locally generated quotes with swings in the +/-5% range.
///
/// Serves both as a standalone feed and as the provider's fallback when
/// a live feed fails.
#[derive(Debug)]
pub struct SyntheticFeed {
    rng: EngineRng,
    clock: Arc<dyn Clock>,
}

impl SyntheticFeed {
    /// Create a synthetic feed with its own RNG stream.
    #[must_use]
    pub fn new(rng: EngineRng, clock: Arc<dyn Clock>) -> Self {
        Self { rng, clock }
    }

    /// Build one synthetic quote for `pair`.
    pub fn generate(&mut self, pair: &CryptoPair) -> MarketQuote {
        let percent_change = round2((self.rng.gen_unit() - 0.5) * 10.0);
        let price = round2(pair.base_price * (1.0 + percent_change / 100.0));

        MarketQuote {
            symbol: pair.symbol.to_string(),
            display_name: pair.display_name.to_string(),
            price,
            percent_change,
            direction: Direction::from_percent(percent_change),
            timestamp: self.clock.now_millis(),
        }
    }
}

impl MarketFeed for SyntheticFeed {
    fn quote(&mut self, pair: &CryptoPair) -> Result<MarketQuote, FeedError> {
        Ok(self.generate(pair))
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Feed that replays queued results. Used by tests and replays.
#[derive(Debug, Default)]
pub struct ScriptedFeed {
    queue: VecDeque<Result<MarketQuote, FeedError>>,
}

impl ScriptedFeed {
    /// Create an empty scripted feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful quote.
    pub fn push_quote(&mut self, quote: MarketQuote) {
        self.queue.push_back(Ok(quote));
    }

    /// Queue a failure.
    pub fn push_error(&mut self, error: FeedError) {
        self.queue.push_back(Err(error));
    }
}

impl MarketFeed for ScriptedFeed {
    fn quote(&mut self, _pair: &CryptoPair) -> Result<MarketQuote, FeedError> {
        self.queue
            .pop_front()
            .unwrap_or_else(|| Err(FeedError::Unavailable("script exhausted".to_string())))
    }
}

/// TTL cache over an inner feed, keyed by symbol.
#[derive(Debug)]
pub struct CachedFeed<F> {
    inner: F,
    cache: FxHashMap<String, (MarketQuote, u64)>,
    ttl_millis: u64,
    clock: Arc<dyn Clock>,
}

impl<F: MarketFeed> CachedFeed<F> {
    /// How long a cached quote is served before refetching.
    pub const DEFAULT_TTL_MILLIS: u64 = 30_000;

    /// Wrap a feed with the default 30s TTL.
    #[must_use]
    pub fn new(inner: F, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            cache: FxHashMap::default(),
            ttl_millis: Self::DEFAULT_TTL_MILLIS,
            clock,
        }
    }

    /// Override the TTL (builder pattern).
    #[must_use]
    pub fn with_ttl(mut self, ttl_millis: u64) -> Self {
        self.ttl_millis = ttl_millis;
        self
    }
}

impl<F: MarketFeed> MarketFeed for CachedFeed<F> {
    fn quote(&mut self, pair: &CryptoPair) -> Result<MarketQuote, FeedError> {
        let now = self.clock.now_millis();

        if let Some((quote, fetched_at)) = self.cache.get(pair.symbol) {
            if now.saturating_sub(*fetched_at) < self.ttl_millis {
                return Ok(quote.clone());
            }
        }

        let quote = self.inner.quote(pair)?;
        self.cache.insert(pair.symbol.to_string(), (quote.clone(), now));
        Ok(quote)
    }
}
