//! Damage calculation.

use crate::entity::EntityState;
use crate::tile::Direction;

/// Damage `defender` actually takes from `attacker` when hit from `from`.
///
/// ```text
/// final_damage = max(attacker.damage - defender.shield(from), 0)
/// ```
pub fn effective_damage(attacker: &EntityState, defender: &EntityState, from: Direction) -> i32 {
    (attacker.attack.damage - defender.blocks_damage(from)).max(0)
}
