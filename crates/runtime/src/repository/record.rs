use downfall_core::{EntityState, GoalTracking, Input, LevelConfig};
use serde::{Deserialize, Serialize};

/// A run through one level.
///
/// `player` is the player as they entered the level; `inputs` holds the
/// host inputs the simulation actually applied, in order. Rule
/// consequences are not recorded because replay derives them again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub seed: u64,
    pub depth: u32,
    pub level: LevelConfig,
    pub player: EntityState,
    pub goal_tracking: Vec<GoalTracking>,
    pub inputs: Vec<Input>,
    /// Hex SHA-256 of the board after the last input.
    pub state_root: String,
}

impl RunRecord {
    pub fn new(seed: u64, level: LevelConfig, player: EntityState) -> Self {
        Self {
            seed,
            depth: level.depth,
            level,
            player,
            goal_tracking: Vec::new(),
            inputs: Vec::new(),
            state_root: String::new(),
        }
    }
}
