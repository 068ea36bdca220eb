//! Entity roster loader.
//!
//! RON format: `Vec<EntitySpec>`, one entry per entity kind. The player
//! entry is optional; monsters missing from the file keep no template, and
//! any level that spawns them fails validation.

use std::path::Path;

use downfall_core::entity::{AttackModel, AttackRange, CarryModel, EntityCatalog, EntityKind, EntityState};
use downfall_core::tile::Direction;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One roster entry as written in data files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpec {
    pub kind: EntityKind,
    pub hp: i32,
    pub damage: i32,
    pub directions: Vec<Direction>,
    /// Inclusive (lower, upper) distance along each direction.
    #[serde(default = "EntitySpec::adjacent")]
    pub range: (i32, i32),
    #[serde(default)]
    pub frequency: u32,
    #[serde(default)]
    pub gold: u32,
    #[serde(default)]
    pub gems: u32,
}

impl EntitySpec {
    fn adjacent() -> (i32, i32) {
        (1, 1)
    }

    pub fn into_state(self) -> EntityState {
        let attack = AttackModel::new(
            self.damage,
            &self.directions,
            AttackRange::new(self.range.0, self.range.1),
        )
        .with_frequency(self.frequency);
        let carry = CarryModel::new(self.gold, self.gems);
        match self.kind {
            EntityKind::Player => EntityState {
                hp: self.hp,
                original_hp: self.hp,
                attack,
                ..EntityState::player(self.hp, self.damage)
            }
            .with_carry(carry),
            kind => EntityState::new(kind, self.hp, attack).with_carry(carry),
        }
    }
}

/// Loader for entity rosters from RON files.
pub struct EntityLoader;

impl EntityLoader {
    pub fn load(path: &Path) -> LoadResult<EntityCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EntityCatalog> {
        let specs: Vec<EntitySpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse entity roster RON: {}", e))?;

        let mut templates: Vec<EntityState> = Vec::with_capacity(specs.len());
        for spec in specs {
            if templates.iter().any(|template| template.kind == spec.kind) {
                anyhow::bail!("Entity '{}' is defined twice", spec.kind);
            }
            if spec.hp <= 0 {
                anyhow::bail!("Entity '{}' must start with positive hp", spec.kind);
            }
            templates.push(spec.into_state());
        }
        Ok(EntityCatalog::new(templates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = r#"[
        (kind: Player, hp: 4, damage: 1, directions: [South]),
        (kind: Rat, hp: 2, damage: 1, directions: [South], frequency: 1, gold: 3),
        (kind: Bat, hp: 1, damage: 1, directions: [East, West], range: (1, 2), frequency: 3),
    ]"#;

    #[test]
    fn parses_roster() {
        let catalog = EntityLoader::parse(ROSTER).unwrap();
        let rat = catalog.spawn(EntityKind::Rat).unwrap();
        assert_eq!(rat.carry.gold, 3);
        assert_eq!(rat.attack.directions.as_slice(), &[Direction::South]);

        let bat = catalog.get(EntityKind::Bat).unwrap();
        assert_eq!(bat.attack.range, AttackRange::new(1, 2));

        let player = catalog.get(EntityKind::Player).unwrap();
        assert_eq!(player.hp, 4);
        assert!(player.pickaxe.is_some());
    }

    #[test]
    fn rejects_duplicates_and_dead_templates() {
        let twice = "[(kind: Rat, hp: 2, damage: 1, directions: []), (kind: Rat, hp: 2, damage: 1, directions: [])]";
        assert!(EntityLoader::parse(twice).is_err());
        let dead = "[(kind: Rat, hp: 0, damage: 1, directions: [])]";
        assert!(EntityLoader::parse(dead).is_err());
    }
}
