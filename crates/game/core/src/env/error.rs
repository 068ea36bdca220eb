use crate::error::{ErrorSeverity, GameError};
use crate::tile::TileCoord;

/// Malformed level content. Always fatal: the level cannot be played.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("board size {size} is outside {min}..={max}")]
    BoardSize { size: usize, min: usize, max: usize },

    #[error("tile chance table is empty or has zero total weight")]
    EmptyTileTable,

    #[error("monster ratio for {kind} covers {lower}..{upper}, expected to start at {expected}")]
    MonsterRatioGap {
        kind: String,
        lower: u32,
        upper: u32,
        expected: u32,
    },

    #[error("monster ratios cover 0..{covered}, expected 0..100")]
    MonsterRatioCoverage { covered: u32 },

    #[error("{field} is {value}%, above 100%")]
    Percentage { field: &'static str, value: u32 },

    #[error("pillar at {0} is outside the board")]
    PillarOutOfBounds(TileCoord),

    #[error("two pillars share {0}")]
    DuplicatePillar(TileCoord),

    #[error("pillar at {0} has no health")]
    DeadPillar(TileCoord),

    #[error("pillars fill row {row}, leaving no room for the exit or the player")]
    RowBlocked { row: usize },

    #[error("{needed} goals needed to unlock the exit but only {available} are defined")]
    UnreachableExit { needed: usize, available: usize },

    #[error("board of {tiles} tiles cannot hold {required} fixed tiles")]
    Overcrowded { tiles: usize, required: usize },

    #[error("monster kind {0} has no template")]
    MissingTemplate(String),
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BoardSize { .. } => "CONFIG_BOARD_SIZE",
            Self::EmptyTileTable => "CONFIG_EMPTY_TILE_TABLE",
            Self::MonsterRatioGap { .. } => "CONFIG_MONSTER_RATIO_GAP",
            Self::MonsterRatioCoverage { .. } => "CONFIG_MONSTER_RATIO_COVERAGE",
            Self::Percentage { .. } => "CONFIG_PERCENTAGE",
            Self::PillarOutOfBounds(_) => "CONFIG_PILLAR_OUT_OF_BOUNDS",
            Self::DuplicatePillar(_) => "CONFIG_DUPLICATE_PILLAR",
            Self::DeadPillar(_) => "CONFIG_DEAD_PILLAR",
            Self::RowBlocked { .. } => "CONFIG_ROW_BLOCKED",
            Self::UnreachableExit { .. } => "CONFIG_UNREACHABLE_EXIT",
            Self::Overcrowded { .. } => "CONFIG_OVERCROWDED",
            Self::MissingTemplate(_) => "CONFIG_MISSING_TEMPLATE",
        }
    }
}
