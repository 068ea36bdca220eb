//! Everything the board reads but never owns: level configuration, the
//! content validation errors for it, and the deterministic RNG.

mod error;
mod level;
mod rng;

pub use error::ConfigError;
pub use level::{
    Difficulty, LevelConfig, MonsterRatio, PillarPlacement, RangeModel, TileSource, WeightedRock,
    monster_ratios,
};
pub use rng::{PcgRng, RngOracle, RollContext, RunRng, compute_seed};
