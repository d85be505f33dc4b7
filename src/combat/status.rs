//! Per-turn status effect ticking.

use crate::cards::StatusKind;
use crate::state::Combatant;

/// Apply one turn's worth of effect ticks to a combatant.
///
/// Every poison effect deals its magnitude (HP floors at 0), then every
/// effect loses one turn of duration, then expired effects are dropped.
/// Runs once per resolved turn, after the win condition has been
/// evaluated, so a lethal poison tick never rewrites the turn that just
/// resolved.
pub fn tick_effects(combatant: &mut Combatant) {
    for effect in &mut combatant.effects {
        if effect.kind == StatusKind::Poison {
            combatant.hp = (combatant.hp - effect.magnitude).max(0);
        }
        effect.remaining -= 1;
    }
    combatant.effects.retain(|e| e.remaining > 0);
}
