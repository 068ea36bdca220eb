use crate::entity::{AttackModel, AttackRange, CarryModel, EntityKind, EntityState};
use crate::tile::Direction;

/// Templates the generator clones when it spawns a monster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityCatalog {
    pub templates: Vec<EntityState>,
}

impl EntityCatalog {
    pub fn new(templates: Vec<EntityState>) -> Self {
        Self { templates }
    }

    pub fn get(&self, kind: EntityKind) -> Option<&EntityState> {
        self.templates.iter().find(|template| template.kind == kind)
    }

    /// A fresh copy of the template for `kind`.
    pub fn spawn(&self, kind: EntityKind) -> Option<EntityState> {
        self.get(kind).cloned()
    }

    /// Built-in roster used when no content file overrides it.
    pub fn standard() -> Self {
        use Direction::{East, North, South, West};

        let monster = |kind, hp, damage, directions: &[Direction], range, frequency, gold| {
            let attack = AttackModel::new(damage, directions, range).with_frequency(frequency);
            EntityState::new(kind, hp, attack).with_carry(CarryModel::new(gold, 0))
        };
        let adjacent = AttackRange::adjacent();

        Self::new(vec![
            EntityState::player(3, 1),
            monster(EntityKind::Rat, 2, 1, &[South], adjacent, 1, 1),
            monster(EntityKind::Alamo, 2, 1, &[East, West], adjacent, 2, 2),
            monster(EntityKind::Bat, 1, 1, &[East, West], AttackRange::new(1, 2), 3, 1),
            monster(EntityKind::Dragon, 3, 2, &[South], AttackRange::new(1, 2), 3, 4),
            monster(EntityKind::Wizard, 2, 1, &[North, South], AttackRange::new(1, 3), 4, 3),
            monster(EntityKind::LavaHorse, 3, 2, &[East, West], adjacent, 2, 3),
            monster(EntityKind::Sally, 2, 1, &[North, South, East, West], adjacent, 3, 2),
        ])
    }
}

impl Default for EntityCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
