//! Market signal types.
//!
//! A `MarketQuote` is the raw price observation a feed returns. A
//! `MarketSignal` is the per-turn gameplay input: the quote fields plus
//! the derived `MarketImpact` (damage multiplier and flat bonus).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a price move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction implied by a percent change. Zero counts as up.
    #[must_use]
    pub fn from_percent(percent_change: f64) -> Self {
        if percent_change >= 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    /// Uppercase label used in impact descriptions.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// A raw price observation for one pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    pub symbol: String,
    pub display_name: String,
    pub price: f64,
    pub percent_change: f64,
    pub direction: Direction,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

/// Gameplay effect derived from a quote.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketImpact {
    /// Attack damage multiplier.
    pub multiplier: f64,
    /// Flat bonus added to attack damage when the market moved up.
    pub bonus_damage: i64,
    /// Human-readable description for the turn log.
    pub description: String,
}

impl MarketImpact {
    /// Tier table on absolute percent change.
    ///
    /// The boundaries and values are a balance contract: >= 10% doubles
    /// attack damage, >= 5% gives 1.5x, >= 2% gives 1.2x, anything
    /// smaller is a flat 1.0x with a small bonus.
    #[must_use]
    pub fn from_quote(quote: &MarketQuote) -> Self {
        let abs = quote.percent_change.abs();
        let label = quote.direction.label();

        if abs >= 10.0 {
            Self {
                multiplier: 2.0,
                bonus_damage: 20,
                description: format!(
                    "MASSIVE {} MOVE! {:.2}% - Double damage!",
                    label, quote.percent_change
                ),
            }
        } else if abs >= 5.0 {
            Self {
                multiplier: 1.5,
                bonus_damage: 15,
                description: format!(
                    "BIG {} MOVE! {:.2}% - 1.5x damage!",
                    label, quote.percent_change
                ),
            }
        } else if abs >= 2.0 {
            Self {
                multiplier: 1.2,
                bonus_damage: 10,
                description: format!("{} trend! {:.2}% - Bonus damage!", label, quote.percent_change),
            }
        } else {
            Self {
                multiplier: 1.0,
                bonus_damage: 5,
                description: format!("Stable market. {:.2}% - Small bonus.", quote.percent_change),
            }
        }
    }

    /// Reward scale for raw volatility, independent of direction.
    #[must_use]
    pub fn volatility_bonus(percent_change: f64) -> i64 {
        let abs = percent_change.abs();

        if abs >= 15.0 {
            30
        } else if abs >= 10.0 {
            25
        } else if abs >= 5.0 {
            15
        } else if abs >= 2.0 {
            10
        } else {
            5
        }
    }
}

/// The per-turn market input driving damage adjustments.
///
/// Produced fresh for every turn; persisted only inside the turn record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketSignal {
    pub symbol: String,
    pub display_name: String,
    pub direction: Direction,
    pub percent_change: f64,
    pub price: f64,
    pub timestamp: u64,
    pub impact: MarketImpact,
}

impl MarketSignal {
    /// Derive the full signal from a quote.
    #[must_use]
    pub fn from_quote(quote: MarketQuote) -> Self {
        let impact = MarketImpact::from_quote(&quote);
        Self {
            symbol: quote.symbol,
            display_name: quote.display_name,
            direction: quote.direction,
            percent_change: quote.percent_change,
            price: quote.price,
            timestamp: quote.timestamp,
            impact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(percent_change: f64) -> MarketQuote {
        MarketQuote {
            symbol: "BTC".to_string(),
            display_name: "Bitcoin".to_string(),
            price: 45_000.0,
            percent_change,
            direction: Direction::from_percent(percent_change),
            timestamp: 0,
        }
    }

    #[test]
    fn test_tier_boundaries() {
        let massive = MarketImpact::from_quote(&quote(10.0));
        assert_eq!(massive.multiplier, 2.0);
        assert_eq!(massive.bonus_damage, 20);

        let big = MarketImpact::from_quote(&quote(9.99));
        assert_eq!(big.multiplier, 1.5);
        assert_eq!(big.bonus_damage, 15);

        let trend = MarketImpact::from_quote(&quote(4.99));
        assert_eq!(trend.multiplier, 1.2);
        assert_eq!(trend.bonus_damage, 10);

        let stable = MarketImpact::from_quote(&quote(1.99));
        assert_eq!(stable.multiplier, 1.0);
        assert_eq!(stable.bonus_damage, 5);
    }

    #[test]
    fn test_tiers_use_absolute_change() {
        let crash = MarketImpact::from_quote(&quote(-12.5));
        assert_eq!(crash.multiplier, 2.0);
        assert_eq!(crash.bonus_damage, 20);
        assert!(crash.description.contains("DOWN"));
    }

    #[test]
    fn test_direction_from_percent() {
        assert_eq!(Direction::from_percent(0.0), Direction::Up);
        assert_eq!(Direction::from_percent(3.2), Direction::Up);
        assert_eq!(Direction::from_percent(-0.01), Direction::Down);
    }

    #[test]
    fn test_volatility_bonus_table() {
        assert_eq!(MarketImpact::volatility_bonus(16.0), 30);
        assert_eq!(MarketImpact::volatility_bonus(-11.0), 25);
        assert_eq!(MarketImpact::volatility_bonus(7.0), 15);
        assert_eq!(MarketImpact::volatility_bonus(2.0), 10);
        assert_eq!(MarketImpact::volatility_bonus(0.3), 5);
    }

    #[test]
    fn test_signal_from_quote_carries_fields() {
        let signal = MarketSignal::from_quote(quote(6.0));
        assert_eq!(signal.symbol, "BTC");
        assert_eq!(signal.direction, Direction::Up);
        assert_eq!(signal.impact.multiplier, 1.5);
    }
}
