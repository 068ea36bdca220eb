//! Evasion checks.

use crate::entity::EntityState;

/// Only players dodge. A roll (1-100) at or under the player's dodge chance
/// avoids the hit; a dodge chance of 0 never does.
pub fn check_dodge(defender: &EntityState, roll: u32) -> bool {
    defender.is_player() && roll <= u32::from(defender.dodge)
}
