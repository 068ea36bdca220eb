use crate::input::InputType;
use crate::transformation::Transformation;

/// Decides whether the moves settled since the last `ReffingFinished` used
/// up a turn. Mining a group, rotating, a monster dying and collecting an
/// item do; items and runes used by the player are free.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnWatcher {
    new_turn: bool,
}

impl TurnWatcher {
    pub const fn new() -> Self {
        Self { new_turn: false }
    }

    pub const fn is_new_turn(&self) -> bool {
        self.new_turn
    }

    pub fn observe(&mut self, transformation: &Transformation) {
        match &transformation.input {
            InputType::Touch { tile_type, .. }
                if !tile_type.is_monster() && !transformation.removed.is_empty() =>
            {
                self.new_turn = true;
            }
            InputType::RotateLeft
            | InputType::RotateRight
            | InputType::MonsterDies { .. }
            | InputType::CollectItem { .. } => self.new_turn = true,
            InputType::ItemUsed { .. } | InputType::RuneUsed { .. } => self.new_turn = false,
            _ => {}
        }
    }

    /// Reports and clears the pending turn.
    pub fn take(&mut self) -> bool {
        core::mem::take(&mut self.new_turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::AbilityKind;
    use crate::entity::EntityKind;
    use crate::tile::{Color, Item, TileCoord, TileType};
    use crate::transformation::TileTransformation;

    fn transformation(input: InputType) -> Transformation {
        Transformation::new(input, Vec::new())
    }

    #[test]
    fn mining_counts_as_a_turn() {
        let mut watcher = TurnWatcher::new();
        let mut mined = transformation(InputType::Touch {
            coord: TileCoord::new(0, 0),
            tile_type: TileType::rock(Color::Red),
        });
        watcher.observe(&mined);
        assert!(!watcher.is_new_turn());

        mined.removed.push(TileTransformation::in_place(TileCoord::new(0, 0)));
        watcher.observe(&mined);
        assert!(watcher.take());
        assert!(!watcher.take());
    }

    #[test]
    fn items_do_not_use_a_turn() {
        let mut watcher = TurnWatcher::new();
        watcher.observe(&transformation(InputType::RotateLeft));
        assert!(watcher.is_new_turn());
        watcher.observe(&transformation(InputType::ItemUsed {
            ability: AbilityKind::LesserHealingPotion,
            targets: Vec::new(),
        }));
        assert!(!watcher.is_new_turn());
        watcher.observe(&transformation(InputType::GameWin));
        assert!(!watcher.take());
    }

    #[test]
    fn deaths_and_pickups_use_a_turn() {
        let mut watcher = TurnWatcher::new();
        watcher.observe(&transformation(InputType::ItemUsed {
            ability: AbilityKind::KillMonsterPotion,
            targets: vec![TileCoord::new(2, 2)],
        }));
        watcher.observe(&transformation(InputType::MonsterDies {
            coord: TileCoord::new(2, 2),
            kind: EntityKind::Rat,
        }));
        assert!(watcher.take());

        watcher.observe(&transformation(InputType::CollectItem {
            coord: TileCoord::new(0, 1),
            item: Item::gold(3),
        }));
        assert!(watcher.take());

        watcher.observe(&transformation(InputType::Attack {
            attacker: TileCoord::new(1, 1),
            defender: None,
        }));
        assert!(!watcher.take());
    }
}
