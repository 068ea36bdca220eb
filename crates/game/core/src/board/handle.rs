use crate::combat::{self, CombatOutcome};
use crate::config::GameConfig;
use crate::env::RollContext;
use crate::input::InputType;
use crate::tile::{Direction, Item, TileCoord, TileFlags, TileType};
use crate::transformation::{MatchedGroup, TileTransformation, Transformation};

use super::gravity::Settled;
use super::{Board, BoardError, Rotation, find_neighbors, rotate_tiles};

impl Board {
    /// Applies one input and reports what changed.
    pub fn handle(&mut self, input: &InputType) -> Result<Option<Transformation>, BoardError> {
        self.clear_flags();
        match input {
            InputType::Touch { coord, tile_type } => Ok(self.touch_tile(input, *coord, tile_type)),
            InputType::RotateLeft => Ok(Some(self.rotate(input, Rotation::Left))),
            InputType::RotateRight => Ok(Some(self.rotate(input, Rotation::Right))),
            InputType::Attack { attacker, defender } => {
                self.attack(input, *attacker, *defender).map(Some)
            }
            InputType::AttackArea { attacker, targets } => {
                self.attack_area(input, *attacker, targets).map(Some)
            }
            InputType::MonsterDies { coord, .. } => self.monster_dies(input, *coord).map(Some),
            InputType::CollectItem { coord, .. } => self.collect_item(input, *coord).map(Some),
            InputType::ReffingFinished { new_turn } => Ok(Some(self.finish_reffing(input, *new_turn))),
            InputType::ItemUsed { ability, targets } => Ok(self.use_item(input, *ability, targets)),
            InputType::RuneUsed { rune, targets } => Ok(self.use_rune(input, *rune, targets)),
            InputType::GameWin => Ok(Some(self.step_onto_exit(input))),
            InputType::UnlockExit => Ok(self.unlock_exit(input)),
            InputType::PlayerAwarded { reward } => Ok(self.award(input, *reward)),
            InputType::AnimationsFinished
            | InputType::GameLose { .. }
            | InputType::NewTurn
            | InputType::Pause
            | InputType::Play
            | InputType::SelectLevel => Ok(None),
        }
    }

    pub(crate) fn finish(&self, input: &InputType) -> Transformation {
        Transformation::new(input.clone(), self.snapshot())
    }

    pub(crate) fn finish_settled(&self, input: &InputType, settled: Settled) -> Transformation {
        let mut transformation = self.finish(input);
        transformation.removed = settled.removed;
        transformation.shift_down = settled.shift_down;
        transformation.new_tiles = settled.new_tiles;
        transformation
    }

    fn touch_tile(
        &mut self,
        input: &InputType,
        coord: TileCoord,
        expected: &TileType,
    ) -> Option<Transformation> {
        let current = self.tile_type(coord)?.clone();
        if !current.same_kind(expected) {
            return None;
        }
        match current {
            TileType::Rock { color } => {
                let found = find_neighbors(&self.tiles, coord);
                if found.len() < GameConfig::MIN_GROUP_SIZE {
                    return None;
                }

                let mut removed = found.group.clone();
                let mut destroyed = 0;
                for &pillar in &found.pillars {
                    if let Some(tile) = self.tile_mut(pillar) {
                        if let TileType::Pillar(data) = &mut tile.tile_type {
                            data.health = data.health.saturating_sub(1);
                            if data.health == 0 {
                                removed.push(pillar);
                                destroyed += 1;
                            }
                        }
                    }
                }

                if let Some(player_coord) = self.player {
                    if let Ok(player) = self.entity_at(player_coord) {
                        let charged = player.progress_runes(color, found.len());
                        self.put_entity(player_coord, charged);
                    }
                }

                let settled = self.remove_and_refill(&removed);
                let mut transformation = self.finish_settled(input, settled);
                transformation.matched = Some(MatchedGroup {
                    color,
                    size: found.len(),
                });
                transformation.pillars_damaged = found.pillars;
                transformation.pillars_destroyed = destroyed;
                Some(transformation)
            }
            TileType::Monster(monster) => {
                for target in monster.attack.targets_from(coord, self.size) {
                    if let Some(tile) = self.tile_mut(target) {
                        tile.flags |= TileFlags::ATTACK_PENDING;
                    }
                }
                if let Some(tile) = self.tile_mut(coord) {
                    tile.flags |= TileFlags::HIGHLIGHTED;
                }
                Some(self.finish(input))
            }
            _ => None,
        }
    }

    fn rotate(&mut self, input: &InputType, rotation: Rotation) -> Transformation {
        let (rotated, moves) = rotate_tiles(&self.tiles, rotation);
        self.tiles = rotated;
        self.refresh_markers();

        let has_gaps = self.tiles.iter().flatten().any(|tile| tile.tile_type.is_empty());
        let mut transformation = if has_gaps {
            let settled = self.remove_and_refill(&[]);
            self.finish_settled(input, settled)
        } else {
            self.finish(input)
        };
        transformation.moved = moves;
        transformation
    }

    fn attack(
        &mut self,
        input: &InputType,
        attacker: TileCoord,
        defender: Option<TileCoord>,
    ) -> Result<Transformation, BoardError> {
        let attacker_state = self.entity_at(attacker)?.clone();

        let Some(defender) = defender else {
            self.put_entity(attacker, attacker_state.did_attack());
            let mut transformation = self.finish(input);
            transformation.combat.push(CombatOutcome {
                attacker,
                defender: None,
                outcome: None,
                damage: 0,
            });
            return Ok(transformation);
        };

        let defender_state = self.entity_at(defender)?.clone();
        let from = defender
            .direction_to(attacker)
            .ok_or(BoardError::NoLineOfAttack { attacker, defender })?;
        let roll = self.rng.roll_d100(RollContext::Combat);
        let result = combat::simulate(&attacker_state, &defender_state, from, roll);

        self.put_entity(attacker, result.attacker);
        self.put_entity(defender, result.defender);
        if let Some(tile) = self.tile_mut(defender) {
            tile.flags |= TileFlags::TARGETED;
        }

        let mut transformation = self.finish(input);
        transformation.combat.push(CombatOutcome {
            attacker,
            defender: Some(defender),
            outcome: Some(result.outcome),
            damage: result.damage,
        });
        Ok(transformation)
    }

    fn attack_area(
        &mut self,
        input: &InputType,
        attacker: TileCoord,
        targets: &[TileCoord],
    ) -> Result<Transformation, BoardError> {
        let attacker_state = self.entity_at(attacker)?.clone();
        let mut outcomes = Vec::new();

        for &target in targets {
            if target == attacker {
                continue;
            }
            let Ok(defender_state) = self.entity_at(target).cloned() else {
                continue;
            };
            let fallback = if target.row > attacker.row {
                Direction::South
            } else {
                Direction::North
            };
            let from = target.direction_to(attacker).unwrap_or(fallback);
            let roll = self.rng.roll_d100(RollContext::Combat);
            let result = combat::simulate(&attacker_state, &defender_state, from, roll);
            self.put_entity(target, result.defender);
            outcomes.push(CombatOutcome {
                attacker,
                defender: Some(target),
                outcome: Some(result.outcome),
                damage: result.damage,
            });
        }

        self.put_entity(attacker, attacker_state.did_attack());
        let mut transformation = self.finish(input);
        transformation.combat = outcomes;
        Ok(transformation)
    }

    fn monster_dies(&mut self, input: &InputType, coord: TileCoord) -> Result<Transformation, BoardError> {
        let monster = match self.tile_type(coord) {
            Some(TileType::Monster(monster)) => monster.clone(),
            _ => return Err(BoardError::unexpected(coord, "a monster")),
        };
        let gold = monster.carry.gold * self.gold_multiplier / 100;
        if gold > 0 {
            self.set(coord, TileType::Item(Item::gold(gold)));
            return Ok(self.finish(input));
        }
        let settled = self.remove_and_refill(&[coord]);
        Ok(self.finish_settled(input, settled))
    }

    fn collect_item(&mut self, input: &InputType, coord: TileCoord) -> Result<Transformation, BoardError> {
        let item = match self.tile_type(coord) {
            Some(TileType::Item(item)) => *item,
            _ => return Err(BoardError::unexpected(coord, "an item")),
        };
        let player_coord = self.player.ok_or(BoardError::PlayerCount(0))?;
        let player = self.entity_at(player_coord)?;
        let player = player.earn(item.amount, item.kind).reset_attacks();
        self.put_entity(player_coord, player);

        let settled = self.remove_and_refill(&[coord]);
        Ok(self.finish_settled(input, settled))
    }

    /// The player always re-arms. Monsters re-arm only when a turn passed,
    /// so free moves (items, runes) never hand them another attack.
    fn finish_reffing(&mut self, input: &InputType, new_turn: bool) -> Transformation {
        for tile in self.tiles.iter_mut().flatten() {
            tile.tile_type = match &tile.tile_type {
                TileType::Player(player) => TileType::Player(player.reset_attacks()),
                TileType::Monster(monster) if new_turn => {
                    TileType::Monster(monster.reset_attacks().increment_attack_turns())
                }
                _ => continue,
            };
        }
        self.finish(input)
    }

    fn step_onto_exit(&mut self, input: &InputType) -> Transformation {
        if self.tutorial {
            return self.finish(input);
        }
        let (Some(player), Some(exit)) = (self.player, self.exit) else {
            return self.finish(input);
        };
        let below = player.row_below();
        if !below.in_bounds(self.size) || below != exit {
            return self.finish(input);
        }
        self.swap(player, exit);
        let mut transformation = self.finish(input);
        transformation.moved = vec![TileTransformation::new(player, exit)];
        transformation
    }

    fn unlock_exit(&mut self, input: &InputType) -> Option<Transformation> {
        let exit = self.exit?;
        let tile = self.tile_mut(exit)?;
        tile.tile_type = TileType::Exit { blocked: false };
        Some(self.finish(input))
    }

    fn award(&mut self, input: &InputType, reward: Item) -> Option<Transformation> {
        let coord = self.player?;
        let player = self.entity_at(coord).ok()?.earn(reward.amount, reward.kind);
        self.put_entity(coord, player);
        Some(self.finish(input))
    }
}
