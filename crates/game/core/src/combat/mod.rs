//! Combat resolution.
//!
//! Pure functions over two [`EntityState`](crate::entity::EntityState)s. The
//! board looks the combatants up, passes in a dodge roll drawn from the run
//! RNG, and writes both returned entities back.
//!
//! - `simulate`: complete resolution (dodge check + shielded damage)
//! - `check_dodge`: player-only evasion roll
//! - `effective_damage`: damage after directional shielding

pub mod damage;
pub mod hit;
pub mod result;

pub use damage::effective_damage;
pub use hit::check_dodge;
pub use result::{AttackOutcome, AttackResult, CombatOutcome, simulate};
