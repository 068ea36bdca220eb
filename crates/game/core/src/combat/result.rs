//! Combat result types and attack resolution.

use crate::entity::EntityState;
use crate::tile::{Direction, TileCoord};

use super::damage::effective_damage;
use super::hit::check_dodge;

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    Hit,
    /// The defender evaded the attack.
    Dodged,
    /// Shielding absorbed all of the damage.
    Blocked,
}

/// Both combatants after resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackResult {
    pub attacker: EntityState,
    pub defender: EntityState,
    pub outcome: AttackOutcome,
    pub damage: i32,
}

/// Where an attack happened and how it went, recorded on the transformation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatOutcome {
    pub attacker: TileCoord,
    /// `None` when the attacker swung at nothing.
    pub defender: Option<TileCoord>,
    pub outcome: Option<AttackOutcome>,
    pub damage: i32,
}

/// Resolve one attack. `from` is the side of the defender the attack comes
/// from; `dodge_roll` is a d100 roll.
///
/// The attacker's per-turn attack counter always increments, even when the
/// defender dodges. Defender hp may go negative.
pub fn simulate(
    attacker: &EntityState,
    defender: &EntityState,
    from: Direction,
    dodge_roll: u32,
) -> AttackResult {
    let attacker_after = attacker.did_attack();

    if check_dodge(defender, dodge_roll) {
        return AttackResult {
            attacker: attacker_after,
            defender: defender.clone(),
            outcome: AttackOutcome::Dodged,
            damage: 0,
        };
    }

    let damage = effective_damage(attacker, defender, from);
    let outcome = if damage == 0 && attacker.attack.damage > 0 {
        AttackOutcome::Blocked
    } else {
        AttackOutcome::Hit
    };

    AttackResult {
        attacker: attacker_after,
        defender: defender.was_attacked(attacker.attack.damage, from),
        outcome,
        damage,
    }
}
