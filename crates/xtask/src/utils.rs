//! Shared helpers for xtask commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use downfall_content::{ContentFactory, StandardLevels};
use downfall_core::{
    Board, Difficulty, EntityCatalog, EntityKind, EntityState, GameConfig, InputType, ItemKind,
    LevelConfig, TileCoord, TileType, find_neighbors,
};

/// Which level to load and how to seed it.
#[derive(Args, Debug, Clone)]
pub struct LevelArgs {
    /// Content directory (defaults to the bundled data)
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Level file name under `levels/`, without extension.
    /// If not provided, the standard campaign level at `--depth` is used
    #[arg(short, long, value_name = "NAME")]
    pub level: Option<String>,

    /// Campaign depth (0-based)
    #[arg(long, default_value_t = 0)]
    pub depth: u32,

    /// Difficulty override (easy, normal, hard)
    #[arg(long, value_parser = parse_difficulty)]
    pub difficulty: Option<Difficulty>,

    /// Seed override
    #[arg(short, long)]
    pub seed: Option<u64>,
}

pub struct LoadedLevel {
    pub config: GameConfig,
    pub catalog: EntityCatalog,
    pub level: LevelConfig,
    pub seed: u64,
}

impl LoadedLevel {
    /// The player entering the level, from the roster when it has one.
    pub fn player(&self) -> EntityState {
        self.catalog
            .spawn(EntityKind::Player)
            .unwrap_or_else(|| EntityState::player(3, 1))
    }
}

impl LevelArgs {
    pub fn factory(&self) -> ContentFactory {
        ContentFactory::new(self.data_dir.clone().unwrap_or_else(default_data_dir))
    }

    pub fn load(&self) -> Result<LoadedLevel> {
        let factory = self.factory();
        let mut config = factory.load_config().unwrap_or_else(|err| {
            tracing::warn!("Using default game config: {err}");
            GameConfig::default()
        });
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        let seed = self.seed.unwrap_or(config.default_seed);
        let catalog = factory.load_entities()?;

        let level = match &self.level {
            Some(name) => factory.load_level(name, &catalog)?,
            None => StandardLevels::new(config.difficulty, seed)
                .level(self.depth)
                .with_context(|| {
                    format!(
                        "Depth {} is past the last campaign level ({})",
                        self.depth,
                        StandardLevels::DEPTHS - 1
                    )
                })?,
        };

        Ok(LoadedLevel {
            config,
            catalog,
            level,
            seed,
        })
    }
}

pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../game/content/data")
}

fn parse_difficulty(value: &str) -> Result<Difficulty, String> {
    match value.to_ascii_lowercase().as_str() {
        "easy" => Ok(Difficulty::Easy),
        "normal" => Ok(Difficulty::Normal),
        "hard" => Ok(Difficulty::Hard),
        other => Err(format!("unknown difficulty '{other}' (expected easy, normal or hard)")),
    }
}

/// Greedy auto-play: the largest minable group, or a left turn when there
/// is none.
pub fn next_move(board: &Board) -> InputType {
    let size = board.size() as i32;
    (0..size)
        .flat_map(|row| (0..size).map(move |col| TileCoord::new(row, col)))
        .filter(|&coord| board.tile_type(coord).is_some_and(TileType::is_rock))
        .map(|coord| (coord, find_neighbors(board.tiles(), coord).len()))
        .filter(|&(_, len)| len >= GameConfig::MIN_GROUP_SIZE)
        .max_by_key(|&(coord, len)| (len, std::cmp::Reverse(coord)))
        .and_then(|(coord, _)| board.touch(coord))
        .unwrap_or(InputType::RotateLeft)
}

fn glyph(tile_type: &TileType) -> char {
    match tile_type {
        TileType::Empty => '.',
        TileType::Rock { color } => match color {
            downfall_core::Color::Blue => 'b',
            downfall_core::Color::Red => 'r',
            downfall_core::Color::Purple => 'p',
            downfall_core::Color::Brown => 'n',
            downfall_core::Color::Green => 'g',
        },
        TileType::Pillar(_) => '#',
        TileType::Player(_) => '@',
        TileType::Monster(monster) => match monster.kind {
            EntityKind::Player => '@',
            EntityKind::Rat => 'R',
            EntityKind::Bat => 'B',
            EntityKind::Dragon => 'D',
            EntityKind::Alamo => 'A',
            EntityKind::Wizard => 'W',
            EntityKind::LavaHorse => 'L',
            EntityKind::Sally => 'S',
        },
        TileType::Item(item) => match item.kind {
            ItemKind::Gold => '$',
            ItemKind::Gem => '*',
        },
        TileType::Exit { blocked: true } => 'X',
        TileType::Exit { blocked: false } => 'E',
    }
}

/// The board as text, top row first.
pub fn render_board(board: &Board) -> String {
    board
        .tiles()
        .iter()
        .rev()
        .map(|row| {
            row.iter()
                .map(|tile| glyph(&tile.tile_type).to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
