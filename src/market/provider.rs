//! The per-turn signal provider.
//!
//! Wraps a `MarketFeed` with the degradation policy: one attempt
//! against the feed, then a synthetic quote. A turn can therefore
//! always obtain a signal; upstream failures are logged and recovered
//! exactly once per call, never retried and never propagated.

use std::sync::Arc;

use tracing::warn;

use super::feed::{CryptoPair, MarketFeed, SyntheticFeed, ROSTER};
use super::signal::MarketSignal;
use crate::core::{Clock, EngineRng};

/// Produces one fresh `MarketSignal` per turn.
pub struct SignalProvider {
    feed: Box<dyn MarketFeed>,
    fallback: SyntheticFeed,
    pairs: Vec<CryptoPair>,
}

impl SignalProvider {
    /// Provider over an arbitrary feed with a synthetic fallback.
    #[must_use]
    pub fn new(feed: Box<dyn MarketFeed>, fallback: SyntheticFeed) -> Self {
        Self {
            feed,
            fallback,
            pairs: ROSTER.to_vec(),
        }
    }

    /// Provider backed purely by synthetic data.
    #[must_use]
    pub fn synthetic(rng: &mut EngineRng, clock: Arc<dyn Clock>) -> Self {
        let feed = SyntheticFeed::new(rng.fork(), Arc::clone(&clock));
        let fallback = SyntheticFeed::new(rng.fork(), clock);
        Self::new(Box::new(feed), fallback)
    }

    /// The pairs the provider samples from.
    #[must_use]
    pub fn pairs(&self) -> &[CryptoPair] {
        &self.pairs
    }

    /// Fetch a fresh signal for a uniformly random pair.
    pub fn fetch(&mut self, rng: &mut EngineRng) -> MarketSignal {
        let pair = self.pairs[rng.gen_range_usize(0..self.pairs.len())];

        let quote = match self.feed.quote(&pair) {
            Ok(quote) => quote,
            Err(err) => {
                warn!(symbol = pair.symbol, error = %err, "market feed failed, degrading to synthetic quote");
                self.fallback.generate(&pair)
            }
        };

        MarketSignal::from_quote(quote)
    }
}
