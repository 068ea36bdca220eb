//! Tile generation.
//!
//! The board asks a [`TileStrategy`] for replacement tiles whenever gravity
//! leaves holes. [`TileGenerator`] is the standard level strategy; a
//! [`ScriptedTiles`] strategy replays a fixed sequence for tutorials and
//! tests. Neither ever produces a player or an exit.

use std::collections::VecDeque;

use crate::entity::{EntityCatalog, EntityKind, EntityState};
use crate::env::{LevelConfig, MonsterRatio, RollContext, RunRng, TileSource};
use crate::tile::{Color, Item, TileType};

/// What the strategy may know about the board it fills.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationContext {
    pub board_size: usize,
    pub monsters_on_board: usize,
    pub player_luck: u8,
}

pub trait TileStrategy: core::fmt::Debug + Send {
    /// Produce `count` tiles for the given board state.
    fn tiles(&mut self, ctx: &GenerationContext, count: usize, rng: &mut RunRng) -> Vec<TileType>;

    /// A monster of a different kind than `exclude`, if the level has one.
    fn monster(&mut self, exclude: Option<EntityKind>, rng: &mut RunRng) -> Option<EntityState>;
}

/// Level-driven generator: weighted rocks, capped monsters and gems.
#[derive(Clone, Debug)]
pub struct TileGenerator {
    source: TileSource,
    monster_ratios: Vec<MonsterRatio>,
    max_monsters: usize,
    monster_chance: u32,
    max_spawn_gems: u32,
    gem_chance: u32,
    gems_spawned: u32,
    catalog: EntityCatalog,
}

impl TileGenerator {
    pub fn new(level: &LevelConfig, catalog: EntityCatalog) -> Self {
        Self {
            source: level.tiles.clone(),
            monster_ratios: level.monster_ratios.clone(),
            max_monsters: level.max_monsters(),
            monster_chance: level.monster_chance,
            max_spawn_gems: level.max_spawn_gems,
            gem_chance: level.gem_chance,
            gems_spawned: 0,
            catalog,
        }
    }

    pub const fn max_monsters(&self) -> usize {
        self.max_monsters
    }

    pub const fn gems_spawned(&self) -> u32 {
        self.gems_spawned
    }

    fn rock(&self, rng: &mut RunRng) -> Color {
        match &self.source {
            TileSource::Uniform(colors) => {
                let idx = rng.index(RollContext::Generator, colors.len()).unwrap_or(0);
                colors.get(idx).copied().unwrap_or(Color::Blue)
            }
            TileSource::Weighted(entries) => {
                let total = self.source.total_weight().max(1);
                let mut roll = rng.next_u32(RollContext::Generator) % total;
                for entry in entries {
                    if roll < entry.weight {
                        return entry.color;
                    }
                    roll -= entry.weight;
                }
                entries.first().map_or(Color::Blue, |entry| entry.color)
            }
        }
    }

    fn spawn_for_roll(&self, rng: &mut RunRng) -> Option<EntityState> {
        let roll = rng.roll_d100(RollContext::Generator) - 1;
        let kind = self
            .monster_ratios
            .iter()
            .find(|ratio| ratio.range.contains(roll))?
            .kind;
        self.catalog.spawn(kind)
    }
}

impl TileStrategy for TileGenerator {
    fn tiles(&mut self, ctx: &GenerationContext, count: usize, rng: &mut RunRng) -> Vec<TileType> {
        let mut monsters = ctx.monsters_on_board;
        let gem_chance = self.gem_chance + u32::from(ctx.player_luck) / 10;
        let mut out = Vec::with_capacity(count);

        for _ in 0..count {
            if monsters < self.max_monsters && rng.chance(RollContext::Generator, self.monster_chance) {
                if let Some(monster) = self.spawn_for_roll(rng) {
                    monsters += 1;
                    out.push(TileType::Monster(monster));
                    continue;
                }
            }
            if self.gems_spawned < self.max_spawn_gems && rng.chance(RollContext::Generator, gem_chance) {
                self.gems_spawned += 1;
                out.push(TileType::Item(Item::gem(1)));
                continue;
            }
            out.push(TileType::rock(self.rock(rng)));
        }
        out
    }

    fn monster(&mut self, exclude: Option<EntityKind>, rng: &mut RunRng) -> Option<EntityState> {
        let kinds: Vec<EntityKind> = self
            .monster_ratios
            .iter()
            .map(|ratio| ratio.kind)
            .filter(|kind| Some(*kind) != exclude)
            .collect();
        let idx = rng.index(RollContext::Ability, kinds.len())?;
        self.catalog.spawn(kinds[idx])
    }
}

/// Replays a fixed list of tiles, cycling when it runs out.
#[derive(Clone, Debug, Default)]
pub struct ScriptedTiles {
    script: VecDeque<TileType>,
    monsters: Vec<EntityState>,
}

impl ScriptedTiles {
    pub fn new(script: impl IntoIterator<Item = TileType>) -> Self {
        Self {
            script: script.into_iter().collect(),
            monsters: Vec::new(),
        }
    }

    /// Monsters handed out by [`TileStrategy::monster`], in order.
    #[must_use]
    pub fn with_monsters(mut self, monsters: Vec<EntityState>) -> Self {
        self.monsters = monsters;
        self
    }
}

impl TileStrategy for ScriptedTiles {
    fn tiles(&mut self, _ctx: &GenerationContext, count: usize, _rng: &mut RunRng) -> Vec<TileType> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            match self.script.pop_front() {
                Some(tile) => {
                    self.script.push_back(tile.clone());
                    out.push(tile);
                }
                None => out.push(TileType::rock(Color::Blue)),
            }
        }
        out
    }

    fn monster(&mut self, exclude: Option<EntityKind>, _rng: &mut RunRng) -> Option<EntityState> {
        let idx = self
            .monsters
            .iter()
            .position(|monster| Some(monster.kind) != exclude)?;
        Some(self.monsters.remove(idx))
    }
}
