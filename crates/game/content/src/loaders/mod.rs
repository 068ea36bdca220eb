//! Content loaders for reading game data from files.
//!
//! Levels and entity rosters are RON; game configuration is TOML. Every
//! loaded level is validated against the roster before it is handed out.

pub mod config;
pub mod entities;
pub mod factory;
pub mod level;

pub use config::ConfigLoader;
pub use entities::{EntityLoader, EntitySpec};
pub use factory::ContentFactory;
pub use level::{LevelLoader, LevelSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
