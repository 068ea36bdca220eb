use crate::env::Difficulty;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Difficulty applied when a host does not pick one explicitly.
    pub difficulty: Difficulty,

    /// Seed used when the host does not provide one.
    pub default_seed: u64,

    /// When set, the runtime settles every transformation immediately instead
    /// of waiting for the renderer to report that animations finished.
    pub auto_settle: bool,

    /// Capacity of each event bus topic.
    pub event_buffer: usize,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Smallest connected group a touch may remove.
    pub const MIN_GROUP_SIZE: usize = 3;
    pub const MIN_BOARD_SIZE: usize = 3;
    pub const MAX_BOARD_SIZE: usize = 12;
    pub const MAX_RUNE_SLOTS: usize = 4;
    pub const MAX_ATTACK_DIRECTIONS: usize = 4;
    /// Number of quarter turns the referee explores when searching for moves.
    pub const ROTATIONS_TO_PROBE: usize = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SEED: u64 = 0x00D0_F411;
    pub const DEFAULT_EVENT_BUFFER: usize = 256;
    pub const DEFAULT_PILLAR_HEALTH: u8 = 3;

    pub fn new() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            default_seed: Self::DEFAULT_SEED,
            auto_settle: true,
            event_buffer: Self::DEFAULT_EVENT_BUFFER,
        }
    }

    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
