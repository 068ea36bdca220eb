//! Level configuration handed to the board at construction.
//!
//! All ratios are integer percentages so that generation stays exact.

use strum::EnumIter;

use crate::config::GameConfig;
use crate::entity::{EntityCatalog, EntityKind, StoreOffer};
use crate::env::ConfigError;
use crate::goals::LevelGoal;
use crate::tile::{Color, PillarData, TileCoord};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Monster density multiplier in percent.
    pub const fn multiplier(self) -> u32 {
        match self {
            Self::Easy => 50,
            Self::Normal => 100,
            Self::Hard => 150,
        }
    }

    /// Turn budget for levels that impose one.
    pub const fn move_budget(self) -> u32 {
        match self {
            Self::Easy => 20,
            Self::Normal => 15,
            Self::Hard => 10,
        }
    }

    /// Percentage applied to monster gold drops.
    pub const fn gold_multiplier(self) -> u32 {
        match self {
            Self::Easy => 150,
            Self::Normal => 100,
            Self::Hard => 75,
        }
    }

    /// Expected monster count for a board of `tiles` tiles, at least one.
    pub const fn max_expected_monsters(self, tiles: usize) -> usize {
        let expected = tiles * self.multiplier() as usize / 500;
        if expected == 0 { 1 } else { expected }
    }
}

/// Half-open band `[lower, upper)` on a d100 roll (0-based).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeModel {
    pub lower: u32,
    pub upper: u32,
}

impl RangeModel {
    pub const fn new(lower: u32, upper: u32) -> Self {
        Self { lower, upper }
    }

    /// The band of `width` that starts where this one ends.
    pub const fn next(self, width: u32) -> Self {
        Self::new(self.upper, self.upper + width)
    }

    pub const fn contains(self, value: u32) -> bool {
        value >= self.lower && value < self.upper
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterRatio {
    pub kind: EntityKind,
    pub range: RangeModel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedRock {
    pub color: Color,
    pub weight: u32,
}

/// Where generated rocks come from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileSource {
    Weighted(Vec<WeightedRock>),
    Uniform(Vec<Color>),
}

impl TileSource {
    pub fn total_weight(&self) -> u32 {
        match self {
            Self::Weighted(entries) => entries.iter().map(|entry| entry.weight).sum(),
            Self::Uniform(colors) => colors.len() as u32,
        }
    }

    /// Colors the source can ever produce.
    pub fn colors(&self) -> Vec<Color> {
        match self {
            Self::Weighted(entries) => entries
                .iter()
                .filter(|entry| entry.weight > 0)
                .map(|entry| entry.color)
                .collect(),
            Self::Uniform(colors) => colors.clone(),
        }
    }
}

impl Default for TileSource {
    fn default() -> Self {
        Self::Weighted(
            [Color::Red, Color::Blue, Color::Purple]
                .into_iter()
                .map(|color| WeightedRock { color, weight: 33 })
                .collect(),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PillarPlacement {
    pub coord: TileCoord,
    pub pillar: PillarData,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelConfig {
    pub depth: u32,
    pub board_size: usize,
    pub difficulty: Difficulty,
    pub tiles: TileSource,
    pub monster_ratios: Vec<MonsterRatio>,
    /// Ceiling on monsters as a percentage of board tiles; 0 disables monsters.
    pub max_monster_ratio: u32,
    /// Chance that a generated tile is a monster while under the ceiling.
    pub monster_chance: u32,
    pub starting_monsters: usize,
    pub max_spawn_gems: u32,
    pub gem_chance: u32,
    pub pillars: Vec<PillarPlacement>,
    pub goals: Vec<LevelGoal>,
    pub goals_to_unlock_exit: usize,
    pub store_offers: Vec<StoreOffer>,
    /// Turns allowed before the run is lost; 0 means unlimited.
    pub max_turns: u32,
    /// Percentage applied to gold dropped by monsters.
    pub gold_multiplier: u32,
    pub tutorial: bool,
}

impl LevelConfig {
    pub const DEFAULT_GEM_CHANCE: u32 = 2;
    pub const DEFAULT_MAX_SPAWN_GEMS: u32 = 3;
    pub const DEFAULT_GOALS_TO_UNLOCK_EXIT: usize = 2;

    /// A plain rock level: no monsters, pillars or goals.
    pub fn new(board_size: usize) -> Self {
        Self {
            depth: 0,
            board_size,
            difficulty: Difficulty::Normal,
            tiles: TileSource::default(),
            monster_ratios: Vec::new(),
            max_monster_ratio: 0,
            monster_chance: 0,
            starting_monsters: 0,
            max_spawn_gems: 0,
            gem_chance: 0,
            pillars: Vec::new(),
            goals: Vec::new(),
            goals_to_unlock_exit: 0,
            store_offers: Vec::new(),
            max_turns: 0,
            gold_multiplier: 100,
            tutorial: false,
        }
    }

    #[must_use]
    pub fn with_tiles(mut self, tiles: TileSource) -> Self {
        self.tiles = tiles;
        self
    }

    #[must_use]
    pub fn with_monsters(mut self, ratios: Vec<MonsterRatio>, max_ratio: u32, chance: u32) -> Self {
        self.monster_ratios = ratios;
        self.max_monster_ratio = max_ratio;
        self.monster_chance = chance;
        self
    }

    #[must_use]
    pub fn with_goals(mut self, goals: Vec<LevelGoal>, needed: usize) -> Self {
        self.goals = goals;
        self.goals_to_unlock_exit = needed;
        self
    }

    #[must_use]
    pub fn with_pillars(mut self, pillars: Vec<PillarPlacement>) -> Self {
        self.pillars = pillars;
        self
    }

    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub const fn tile_count(&self) -> usize {
        self.board_size * self.board_size
    }

    /// Monster ceiling on the board, scaled by difficulty.
    pub fn max_monsters(&self) -> usize {
        if self.max_monster_ratio == 0 || self.monster_ratios.is_empty() {
            return 0;
        }
        let scaled = self.tile_count() * self.max_monster_ratio as usize
            * self.difficulty.multiplier() as usize
            / 10_000;
        scaled.max(1)
    }

    /// Monster kind for a 0-based d100 roll.
    pub fn monster_for_roll(&self, roll: u32) -> Option<EntityKind> {
        self.monster_ratios
            .iter()
            .find(|ratio| ratio.range.contains(roll))
            .map(|ratio| ratio.kind)
    }

    /// Rejects malformed content before a board is ever built from it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(GameConfig::MIN_BOARD_SIZE..=GameConfig::MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::BoardSize {
                size: self.board_size,
                min: GameConfig::MIN_BOARD_SIZE,
                max: GameConfig::MAX_BOARD_SIZE,
            });
        }
        if self.tiles.total_weight() == 0 {
            return Err(ConfigError::EmptyTileTable);
        }
        for (field, value) in [
            ("max_monster_ratio", self.max_monster_ratio),
            ("monster_chance", self.monster_chance),
            ("gem_chance", self.gem_chance),
        ] {
            if value > 100 {
                return Err(ConfigError::Percentage { field, value });
            }
        }
        self.validate_monster_ratios()?;
        self.validate_pillars()?;

        if self.goals_to_unlock_exit > self.goals.len() {
            return Err(ConfigError::UnreachableExit {
                needed: self.goals_to_unlock_exit,
                available: self.goals.len(),
            });
        }
        let required = self.pillars.len() + self.starting_monsters + 2;
        if required > self.tile_count() {
            return Err(ConfigError::Overcrowded {
                tiles: self.tile_count(),
                required,
            });
        }
        Ok(())
    }

    /// Also checks that every monster kind the level may spawn has a template.
    pub fn validate_with(&self, catalog: &EntityCatalog) -> Result<(), ConfigError> {
        self.validate()?;
        match self
            .monster_ratios
            .iter()
            .find(|ratio| catalog.get(ratio.kind).is_none())
        {
            Some(missing) => Err(ConfigError::MissingTemplate(missing.kind.to_string())),
            None => Ok(()),
        }
    }

    fn validate_monster_ratios(&self) -> Result<(), ConfigError> {
        if self.monster_ratios.is_empty() {
            return Ok(());
        }
        let mut expected = 0;
        for ratio in &self.monster_ratios {
            if ratio.range.lower != expected || ratio.range.upper <= ratio.range.lower {
                return Err(ConfigError::MonsterRatioGap {
                    kind: ratio.kind.to_string(),
                    lower: ratio.range.lower,
                    upper: ratio.range.upper,
                    expected,
                });
            }
            expected = ratio.range.upper;
        }
        if expected != 100 {
            return Err(ConfigError::MonsterRatioCoverage { covered: expected });
        }
        Ok(())
    }

    fn validate_pillars(&self) -> Result<(), ConfigError> {
        for (idx, placement) in self.pillars.iter().enumerate() {
            if !placement.coord.in_bounds(self.board_size) {
                return Err(ConfigError::PillarOutOfBounds(placement.coord));
            }
            if placement.pillar.health == 0 {
                return Err(ConfigError::DeadPillar(placement.coord));
            }
            if self.pillars[..idx]
                .iter()
                .any(|other| other.coord == placement.coord)
            {
                return Err(ConfigError::DuplicatePillar(placement.coord));
            }
        }
        // The exit goes on the bottom row and the player on the top row.
        for row in [0, self.board_size - 1] {
            let pillars = self
                .pillars
                .iter()
                .filter(|placement| placement.coord.row == row as i32)
                .count();
            if pillars >= self.board_size {
                return Err(ConfigError::RowBlocked { row });
            }
        }
        Ok(())
    }
}

/// Builds contiguous monster bands from `(kind, width)` pairs.
pub fn monster_ratios(widths: &[(EntityKind, u32)]) -> Vec<MonsterRatio> {
    let mut range = RangeModel::new(0, 0);
    widths
        .iter()
        .map(|&(kind, width)| {
            range = range.next(width);
            MonsterRatio { kind, range }
        })
        .collect()
}
