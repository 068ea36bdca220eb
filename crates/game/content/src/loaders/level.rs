//! Level layout loader.
//!
//! Level files describe a single board. Only `board_size` is required; every
//! other field falls back to the quiet default of [`LevelConfig::new`].
//! Monster mixes are written as relative widths and chained into d100 bands
//! on load.

use std::path::Path;

use downfall_core::entity::{EntityCatalog, EntityKind, StoreOffer};
use downfall_core::env::{Difficulty, LevelConfig, PillarPlacement, TileSource, monster_ratios};
use downfall_core::goals::LevelGoal;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Level data structure for RON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSpec {
    #[serde(default)]
    pub depth: u32,
    pub board_size: usize,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tiles: Option<TileSource>,
    /// (kind, width) pairs; widths must add up to 100.
    #[serde(default)]
    pub monsters: Vec<(EntityKind, u32)>,
    #[serde(default)]
    pub max_monster_ratio: u32,
    #[serde(default)]
    pub monster_chance: u32,
    #[serde(default)]
    pub starting_monsters: usize,
    #[serde(default)]
    pub max_spawn_gems: u32,
    #[serde(default)]
    pub gem_chance: u32,
    #[serde(default)]
    pub pillars: Vec<PillarPlacement>,
    #[serde(default)]
    pub goals: Vec<LevelGoal>,
    #[serde(default)]
    pub goals_to_unlock_exit: usize,
    #[serde(default)]
    pub store_offers: Vec<StoreOffer>,
    #[serde(default)]
    pub max_turns: u32,
    #[serde(default)]
    pub gold_multiplier: Option<u32>,
    #[serde(default)]
    pub tutorial: bool,
}

impl LevelSpec {
    pub fn into_config(self) -> LevelConfig {
        let mut level = LevelConfig::new(self.board_size)
            .with_monsters(monster_ratios(&self.monsters), self.max_monster_ratio, self.monster_chance)
            .with_pillars(self.pillars)
            .with_goals(self.goals, self.goals_to_unlock_exit)
            .with_max_turns(self.max_turns);
        if let Some(tiles) = self.tiles {
            level = level.with_tiles(tiles);
        }
        level.depth = self.depth;
        level.difficulty = self.difficulty;
        level.starting_monsters = self.starting_monsters;
        level.max_spawn_gems = self.max_spawn_gems;
        level.gem_chance = self.gem_chance;
        level.store_offers = self.store_offers;
        level.gold_multiplier = self
            .gold_multiplier
            .unwrap_or_else(|| self.difficulty.gold_multiplier());
        level.tutorial = self.tutorial;
        level
    }
}

/// Loader for level layouts from RON files.
pub struct LevelLoader;

impl LevelLoader {
    /// Load and validate a level against the roster it will spawn from.
    pub fn load(path: &Path, catalog: &EntityCatalog) -> LoadResult<LevelConfig> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
            .map_err(|e| anyhow::anyhow!("Invalid level {}: {}", path.display(), e))
    }

    pub fn parse(content: &str, catalog: &EntityCatalog) -> LoadResult<LevelConfig> {
        let spec: LevelSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse level RON: {}", e))?;
        let level = spec.into_config();
        level.validate_with(catalog)?;
        Ok(level)
    }
}
