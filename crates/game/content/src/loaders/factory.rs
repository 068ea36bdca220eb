//! Content factory for loading a whole data directory.

use std::path::{Path, PathBuf};

use downfall_core::{EntityCatalog, GameConfig, LevelConfig};

use crate::loaders::{ConfigLoader, EntityLoader, LevelLoader, LoadResult};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── entities.ron
/// └── levels/
///     ├── first.ron
///     └── pillars.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load the entity roster from `entities.ron`, falling back to the
    /// built-in roster when the file is absent.
    pub fn load_entities(&self) -> LoadResult<EntityCatalog> {
        let path = self.data_dir.join("entities.ron");
        if !path.exists() {
            return Ok(EntityCatalog::standard());
        }
        EntityLoader::load(&path)
    }

    /// Load a level from `levels/{level_name}.ron`.
    pub fn load_level(&self, level_name: &str, catalog: &EntityCatalog) -> LoadResult<LevelConfig> {
        let path = self.levels_dir().join(format!("{}.ron", level_name));
        LevelLoader::load(&path, catalog)
    }

    /// Names of every level file, sorted.
    pub fn level_names(&self) -> LoadResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(self.levels_dir())? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    names.push(stem.to_owned());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn levels_dir(&self) -> PathBuf {
        self.data_dir.join("levels")
    }
}
