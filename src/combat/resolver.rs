//! Combat resolution.
//!
//! `resolve_damage` is the pure half: it computes each side's gross
//! damage figure from the cards, the market signal, and active
//! strength/weakness effects. `apply_combat` then lands armor grants,
//! status templates, HP damage, and armor consumption, in the exact
//! order the rest of the balance was tuned against.

use crate::cards::{Card, CardKind, StatusKind};
use crate::market::{Direction, MarketSignal};
use crate::state::{Combatant, StatusEffect};

/// Flat damage reward for a defensive posture in a sharply falling
/// market.
const FLIGHT_TO_SAFETY_BONUS: i64 = 10;

/// Gross (pre-armor) damage each side puts out this turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageTotals {
    /// Damage the player's card aims at the opponent.
    pub by_player: i64,
    /// Damage the opponent's card aims at the player.
    pub by_opponent: i64,
}

/// Compute both sides' gross damage figures.
#[must_use]
pub fn resolve_damage(
    player_card: &Card,
    opponent_card: &Card,
    signal: &MarketSignal,
    player: &Combatant,
    opponent: &Combatant,
) -> DamageTotals {
    DamageTotals {
        by_player: side_damage(player_card, signal, player),
        by_opponent: side_damage(opponent_card, signal, opponent),
    }
}

fn side_damage(card: &Card, signal: &MarketSignal, side: &Combatant) -> i64 {
    let mut damage = card.base_damage();

    // Attacks ride the market: scaled by the tier multiplier, with the
    // flat bonus only on an upward move.
    if card.kind == CardKind::Attack {
        damage = scale(damage, signal.impact.multiplier);
        if signal.direction == Direction::Up {
            damage += signal.impact.bonus_damage;
        }
    }

    // Flight to safety: a falling market beyond 5% rewards defense.
    // Independent of the attack adjustment, cumulative when both apply.
    if signal.direction == Direction::Down
        && signal.percent_change.abs() > 5.0
        && card.kind == CardKind::Defense
    {
        damage += FLIGHT_TO_SAFETY_BONUS;
    }

    // First-match lookups only; stacked effects beyond the first are
    // inert for damage purposes.
    if let Some(strength) = side.effect_of(StatusKind::Strength) {
        damage += strength.magnitude;
    }
    if let Some(weakness) = side.effect_of(StatusKind::Weakness) {
        damage = (damage - weakness.magnitude).max(0);
    }

    damage
}

fn scale(damage: i64, multiplier: f64) -> i64 {
    (damage as f64 * multiplier).floor() as i64
}

/// Apply a resolved turn to both combatants.
///
/// Order matters and is a behavioral contract:
/// 1. Armor granted by this turn's cards lands first, so it already
///    blocks this turn's incoming damage.
/// 2. Each card's status template lands on the opposing combatant.
/// 3. HP damage received = max(0, incoming - armor), floored at 0 HP.
/// 4. Armor is then worn down by the attacker's full gross output,
///    floored at 0. Armor that blocked a hit is consumed again by the
///    same hit; the compounding is deliberate parity with the tuned
///    balance.
pub fn apply_combat(
    player: &mut Combatant,
    opponent: &mut Combatant,
    player_card: &Card,
    opponent_card: &Card,
    totals: DamageTotals,
) {
    if let Some(armor) = player_card.armor {
        player.armor += armor;
    }
    if let Some(armor) = opponent_card.armor {
        opponent.armor += armor;
    }

    if let Some(template) = player_card.status {
        opponent.effects.push(StatusEffect {
            kind: template.kind,
            magnitude: template.magnitude,
            remaining: template.duration,
        });
    }
    if let Some(template) = opponent_card.status {
        player.effects.push(StatusEffect {
            kind: template.kind,
            magnitude: template.magnitude,
            remaining: template.duration,
        });
    }

    let to_player = (totals.by_opponent - player.armor).max(0);
    let to_opponent = (totals.by_player - opponent.armor).max(0);

    player.hp = (player.hp - to_player).max(0);
    opponent.hp = (opponent.hp - to_opponent).max(0);

    player.armor = (player.armor - totals.by_opponent).max(0);
    opponent.armor = (opponent.armor - totals.by_player).max(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardCatalog;
    use crate::market::MarketQuote;

    fn signal(direction: Direction, percent_change: f64) -> MarketSignal {
        MarketSignal::from_quote(MarketQuote {
            symbol: "BTC".to_string(),
            display_name: "Bitcoin".to_string(),
            price: 45_000.0,
            percent_change,
            direction,
            timestamp: 0,
        })
    }

    fn combatants() -> (Combatant, Combatant) {
        (Combatant::new("Player"), Combatant::new("AI Opponent"))
    }

    #[test]
    fn test_attack_scales_with_up_market() {
        let catalog = CardCatalog::standard();
        let fire = catalog.get("fire-strike").unwrap();
        let (player, opponent) = combatants();

        // 7.5% up: tier >= 5 gives 1.5x and +15.
        let signal = signal(Direction::Up, 7.5);
        let totals = resolve_damage(fire, fire, &signal, &player, &opponent);

        assert_eq!(totals.by_player, 52);
        assert_eq!(totals.by_opponent, 52);
    }

    #[test]
    fn test_down_market_gives_no_flat_bonus() {
        let catalog = CardCatalog::standard();
        let fire = catalog.get("fire-strike").unwrap();
        let (player, opponent) = combatants();

        let signal = signal(Direction::Down, -7.5);
        let totals = resolve_damage(fire, fire, &signal, &player, &opponent);

        // Multiplier still applies, the +15 does not.
        assert_eq!(totals.by_player, 37);
    }

    #[test]
    fn test_flight_to_safety_rewards_defense() {
        let catalog = CardCatalog::standard();
        let wall = catalog.get("shield-wall").unwrap();
        let fire = catalog.get("fire-strike").unwrap();
        let (player, opponent) = combatants();

        let crash = signal(Direction::Down, -6.0);
        let totals = resolve_damage(wall, fire, &crash, &player, &opponent);
        assert_eq!(totals.by_player, 10);

        // A mild dip (<= 5%) earns nothing.
        let dip = signal(Direction::Down, -4.0);
        let totals = resolve_damage(wall, fire, &dip, &player, &opponent);
        assert_eq!(totals.by_player, 0);
    }

    #[test]
    fn test_strength_and_weakness_adjustments() {
        let catalog = CardCatalog::standard();
        let dart = catalog.get("poison-dart").unwrap();
        let (mut player, opponent) = combatants();

        player.effects.push(StatusEffect {
            kind: StatusKind::Strength,
            magnitude: 10,
            remaining: 2,
        });
        player.effects.push(StatusEffect {
            kind: StatusKind::Strength,
            magnitude: 50,
            remaining: 2,
        });

        // Special card ignores the multiplier; strength adds 10, and the
        // second strength stack is inert (first match only).
        let flat = signal(Direction::Down, -0.5);
        let totals = resolve_damage(dart, dart, &flat, &player, &opponent);
        assert_eq!(totals.by_player, 20);
        assert_eq!(totals.by_opponent, 10);
    }

    #[test]
    fn test_weakness_floors_at_zero() {
        let catalog = CardCatalog::standard();
        let wall = catalog.get("shield-wall").unwrap();
        let (mut player, opponent) = combatants();

        player.effects.push(StatusEffect {
            kind: StatusKind::Weakness,
            magnitude: 5,
            remaining: 2,
        });

        let flat = signal(Direction::Down, -0.5);
        let totals = resolve_damage(wall, wall, &flat, &player, &opponent);
        assert_eq!(totals.by_player, 0);
    }

    #[test]
    fn test_armor_blocks_then_is_consumed_twice() {
        let catalog = CardCatalog::standard();
        let wall = catalog.get("shield-wall").unwrap();
        let fire = catalog.get("fire-strike").unwrap();
        let (mut player, mut opponent) = combatants();

        // Down 0.5%: fire deals a flat 25, wall deals 0 and grants 15.
        let totals = DamageTotals {
            by_player: 0,
            by_opponent: 25,
        };
        apply_combat(&mut player, &mut opponent, wall, fire, totals);

        // 15 armor blocks 15 of the 25.
        assert_eq!(player.hp, 90);
        // Armor is then reduced by the full gross 25, not the 10 overflow.
        assert_eq!(player.armor, 0);
        assert_eq!(opponent.hp, 100);
        assert_eq!(opponent.armor, 0);
    }

    #[test]
    fn test_fresh_armor_blocks_same_turn() {
        let catalog = CardCatalog::standard();
        let wall = catalog.get("shield-wall").unwrap();
        let dart = catalog.get("poison-dart").unwrap();
        let (mut player, mut opponent) = combatants();

        let totals = DamageTotals {
            by_player: 0,
            by_opponent: 10,
        };
        apply_combat(&mut player, &mut opponent, wall, dart, totals);

        // Armor granted this turn fully absorbs the 10 incoming.
        assert_eq!(player.hp, 100);
        assert_eq!(player.armor, 5);
        // The dart's poison template landed on the player.
        assert_eq!(player.effects.len(), 1);
        assert_eq!(player.effects[0].kind, StatusKind::Poison);
        assert_eq!(player.effects[0].remaining, 3);
        assert!(opponent.effects.is_empty());
    }

    #[test]
    fn test_status_templates_land_on_opposing_side() {
        let catalog = CardCatalog::standard();
        let rage = catalog.get("berserker-rage").unwrap();
        let shard = catalog.get("ice-shard").unwrap();
        let (mut player, mut opponent) = combatants();

        let totals = DamageTotals::default();
        apply_combat(&mut player, &mut opponent, rage, shard, totals);

        // Rage's strength template lands on the opponent; templates
        // always land on the opposing combatant, buffs included.
        assert_eq!(opponent.effects[0].kind, StatusKind::Strength);
        assert_eq!(player.effects[0].kind, StatusKind::Weakness);
    }

    #[test]
    fn test_hp_floors_at_zero() {
        let catalog = CardCatalog::standard();
        let fire = catalog.get("fire-strike").unwrap();
        let (mut player, mut opponent) = combatants();
        opponent.hp = 10;

        let totals = DamageTotals {
            by_player: 52,
            by_opponent: 0,
        };
        apply_combat(&mut player, &mut opponent, fire, fire, totals);

        assert_eq!(opponent.hp, 0);
    }
}
