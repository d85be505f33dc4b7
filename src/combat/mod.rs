//! Combat resolution and status effect processing.

mod resolver;
mod status;

pub use resolver::{apply_combat, resolve_damage, DamageTotals};
pub use status::tick_effects;
