use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::tile::{Direction, TileCoord};

/// Inclusive distance band an attack reaches along each of its directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackRange {
    pub lower: i32,
    pub upper: i32,
}

impl AttackRange {
    pub const fn new(lower: i32, upper: i32) -> Self {
        Self { lower, upper }
    }

    pub const fn adjacent() -> Self {
        Self::new(1, 1)
    }
}

/// How, where and how often an entity attacks.
///
/// `attacks_this_turn` is reset during every turn-resolution phase;
/// `turns` only advances when a real turn passes and drives the
/// `frequency` cadence.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackModel {
    pub damage: i32,
    /// Attack every `frequency` turns; 0 or 1 means every turn.
    pub frequency: u32,
    pub range: AttackRange,
    pub directions: ArrayVec<Direction, { GameConfig::MAX_ATTACK_DIRECTIONS }>,
    pub attacks_per_turn: u32,
    pub attacks_this_turn: u32,
    pub turns: u32,
}

impl AttackModel {
    pub fn new(damage: i32, directions: &[Direction], range: AttackRange) -> Self {
        Self {
            damage,
            frequency: 0,
            range,
            directions: directions
                .iter()
                .copied()
                .take(GameConfig::MAX_ATTACK_DIRECTIONS)
                .collect(),
            attacks_per_turn: 1,
            attacks_this_turn: 0,
            turns: 0,
        }
    }

    #[must_use]
    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }

    #[must_use]
    pub fn with_attacks_per_turn(mut self, attacks_per_turn: u32) -> Self {
        self.attacks_per_turn = attacks_per_turn;
        self
    }

    #[must_use]
    pub fn did_attack(&self) -> Self {
        Self {
            attacks_this_turn: self.attacks_this_turn.saturating_add(1),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn reset_attack(&self) -> Self {
        Self {
            attacks_this_turn: 0,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn increment_turns(&self) -> Self {
        Self {
            turns: self.turns.wrapping_add(1),
            ..self.clone()
        }
    }

    /// True on turns that fall on the attack cadence.
    pub const fn is_charged(&self) -> bool {
        self.frequency <= 1 || self.turns % self.frequency == 0
    }

    pub const fn will_attack_next_turn(&self) -> bool {
        self.frequency <= 1 || (self.turns + 1) % self.frequency == 0
    }

    /// Every coordinate this attack reaches from `origin`, bounded by `size`.
    pub fn targets_from(&self, origin: TileCoord, size: usize) -> Vec<TileCoord> {
        let mut targets = Vec::new();
        for direction in &self.directions {
            for distance in self.range.lower.max(1)..=self.range.upper {
                let target = origin.step(*direction, distance);
                if target.in_bounds(size) {
                    targets.push(target);
                }
            }
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_gates_charge() {
        let attack = AttackModel::new(1, &[Direction::South], AttackRange::adjacent())
            .with_frequency(3);
        assert!(attack.is_charged());
        let attack = attack.increment_turns();
        assert!(!attack.is_charged());
        let attack = attack.increment_turns();
        assert!(attack.will_attack_next_turn());
        assert!(attack.increment_turns().is_charged());
    }

    #[test]
    fn targets_respect_range_and_bounds() {
        let attack = AttackModel::new(1, &[Direction::East, Direction::West], AttackRange::new(1, 2));
        let targets = attack.targets_from(TileCoord::new(0, 0), 4);
        assert_eq!(targets, vec![TileCoord::new(0, 1), TileCoord::new(0, 2)]);
    }
}
