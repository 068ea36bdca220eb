//! Deterministic rules for the Downfall tile-mining roguelike.
//!
//! `downfall-core` owns the board (matching, gravity, rotation, combat and
//! ability effects), the referee that turns a settled board into the next
//! rule consequence, the phase machine that gates inputs, and the level goal
//! tracker. Everything is synchronous and driven by a single seeded RNG, so
//! the same seed and input log always produce the same board.
//!
//! Hosts feed [`InputType`] values to [`Board::handle`] and render the
//! returned [`Transformation`]s; `downfall-runtime` wires the pieces into a
//! queue-driven simulation.
pub mod board;
pub mod combat;
pub mod config;
pub mod engine;
pub mod entity;
pub mod env;
pub mod error;
pub mod generator;
pub mod goals;
pub mod input;
pub mod referee;
pub mod tile;
pub mod transformation;

pub use board::{Board, BoardError, NeighborGroup, Rotation, find_neighbors, legal_move_exists, rotate_tiles};
pub use combat::{AttackOutcome, CombatOutcome};
pub use config::GameConfig;
pub use engine::{GamePhase, TurnWatcher};
pub use entity::{
    AbilityKind, AttackModel, AttackRange, CarryModel, EffectModel, EntityCatalog, EntityKind,
    EntityState, Pickaxe, Rune, RuneKind, StoreOffer,
};
pub use env::{ConfigError, Difficulty, LevelConfig, RollContext, RunRng};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use generator::{GenerationContext, ScriptedTiles, TileGenerator, TileStrategy};
pub use goals::{GoalTarget, GoalTracking, LevelGoal, LevelGoalTracker};
pub use input::{Input, InputType, LoseReason};
pub use referee::Referee;
pub use tile::{Color, Direction, Item, ItemKind, PillarData, Tile, TileCoord, TileFlags, TileType};
pub use transformation::{MatchedGroup, TileTransformation, Transformation};
