//! Level and entity content for Downfall.
//!
//! Two sources of content live here:
//! - [`StandardLevels`]: the built-in seven-level campaign plus tutorials,
//!   derived deterministically from a seed
//! - loaders for RON/TOML data files (level layouts, entity rosters, game
//!   configuration), behind the default `loaders` feature
//!
//! Everything produced here is validated core configuration; nothing in this
//! crate appears in game state.

pub mod levels;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use levels::StandardLevels;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, EntityLoader, LevelLoader};
