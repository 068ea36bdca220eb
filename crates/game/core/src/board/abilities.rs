//! Ability and rune effects on the board.
//!
//! Malformed requests (ability not held, wrong target count, a target of the
//! wrong kind, an uncharged rune) are answered with `None` and leave the
//! board untouched.

use crate::entity::{AbilityKind, AbilityTarget, EntityState, Heal, RuneKind};
use crate::input::InputType;
use crate::tile::{TileCoord, TileType};
use crate::transformation::{TileTransformation, Transformation};

use super::Board;

impl Board {
    fn targets_match(&self, targets: &[TileCoord], kind: AbilityTarget) -> bool {
        targets.iter().all(|&coord| match (self.tile_type(coord), kind) {
            (Some(tile), AbilityTarget::Rock) => tile.is_rock(),
            (Some(tile), AbilityTarget::Monster) => tile.is_monster(),
            (None, _) => false,
        })
    }

    fn has_duplicates(targets: &[TileCoord]) -> bool {
        targets
            .iter()
            .enumerate()
            .any(|(idx, coord)| targets[..idx].contains(coord))
    }

    pub(super) fn use_item(
        &mut self,
        input: &InputType,
        ability: AbilityKind,
        targets: &[TileCoord],
    ) -> Option<Transformation> {
        let player_coord = self.player?;
        let player = self.entity_at(player_coord).ok()?.clone();
        if player.ability_count(ability) == 0 {
            return None;
        }
        let rules = ability.rules();
        if targets.len() != rules.target_count || Self::has_duplicates(targets) {
            return None;
        }
        if let Some(kind) = rules.target {
            if !self.targets_match(targets, kind) {
                return None;
            }
        }

        let player = player.use_ability(ability);
        match ability {
            AbilityKind::LesserHealingPotion
            | AbilityKind::GreaterHealingPotion
            | AbilityKind::GreatestHealingPotion => {
                let healed = match rules.heal {
                    Some(Heal::Amount(amount)) => player.heal(amount),
                    Some(Heal::Full) => player.revive(),
                    None => player,
                };
                self.put_entity(player_coord, healed);
                Some(self.finish(input))
            }
            AbilityKind::Dynamite => {
                self.put_entity(player_coord, player);
                let settled = self.remove_and_refill(targets);
                Some(self.finish_settled(input, settled))
            }
            AbilityKind::RockASwap => {
                self.put_entity(player_coord, player);
                let (a, b) = (targets[0], targets[1]);
                self.swap(a, b);
                let mut transformation = self.finish(input);
                transformation.moved = vec![TileTransformation::new(a, b), TileTransformation::new(b, a)];
                Some(transformation)
            }
            AbilityKind::TransmogrificationPotion => {
                let target = targets[0];
                let current = self.tile_type(target)?.entity_kind();
                let replacement = self.generator.monster(current, &mut self.rng)?;
                self.put_entity(player_coord, player);
                self.set(target, TileType::Monster(replacement));
                Some(self.finish(input))
            }
            AbilityKind::KillMonsterPotion => {
                let target = targets[0];
                let mut monster = self.entity_at(target).ok()?.clone();
                monster.hp = 0;
                self.put_entity(player_coord, player);
                self.put_entity(target, monster);
                Some(self.finish(input))
            }
            AbilityKind::MassMinePickaxe => {
                let color = self.tile_type(targets[0])?.rock_color()?;
                let rocks: Vec<TileCoord> = self
                    .coords()
                    .filter(|&coord| {
                        self.tile_type(coord)
                            .and_then(TileType::rock_color)
                            .is_some_and(|other| other == color)
                    })
                    .collect();
                self.put_entity(player_coord, player);
                let settled = self.remove_and_refill(&rocks);
                Some(self.finish_settled(input, settled))
            }
            AbilityKind::Helmet | AbilityKind::DoubleAttack => None,
        }
    }

    pub(super) fn use_rune(
        &mut self,
        input: &InputType,
        kind: RuneKind,
        targets: &[TileCoord],
    ) -> Option<Transformation> {
        let player_coord = self.player?;
        let player = self.entity_at(player_coord).ok()?.clone();
        let rune = *player.rune(kind)?;
        if !rune.is_charged()
            || targets.is_empty()
            || targets.len() > rune.target_count
            || Self::has_duplicates(targets)
        {
            return None;
        }
        let player = player.reset_rune(kind);

        match kind {
            RuneKind::GetSwifty => {
                let [target] = targets else {
                    return None;
                };
                let swappable = self
                    .tile_type(*target)
                    .is_some_and(|tile| tile.is_rock() || tile.is_monster() || matches!(tile, TileType::Item(_)));
                if !player_coord.is_orthogonal_neighbor(*target) || !swappable {
                    return None;
                }
                self.put_entity(player_coord, player);
                self.swap(player_coord, *target);
                let mut transformation = self.finish(input);
                transformation.moved = vec![
                    TileTransformation::new(player_coord, *target),
                    TileTransformation::new(*target, player_coord),
                ];
                Some(transformation)
            }
            RuneKind::RainEmbers => {
                if !self.targets_match(targets, AbilityTarget::Monster) {
                    return None;
                }
                self.put_entity(player_coord, player);
                for &target in targets {
                    if let Ok(monster) = self.entity_at(target) {
                        let burned = EntityState {
                            hp: monster.hp - 1,
                            ..monster.clone()
                        };
                        self.put_entity(target, burned);
                    }
                }
                Some(self.finish(input))
            }
            RuneKind::TransformRock => {
                if !self.targets_match(targets, AbilityTarget::Rock) {
                    return None;
                }
                let color = self.tile_type(targets[0])?.rock_color()?;
                self.put_entity(player_coord, player);
                for &target in &targets[1..] {
                    self.set(target, TileType::rock(color));
                }
                Some(self.finish(input))
            }
        }
    }
}
