//! Game configuration
//!
//! One JSON file per playable level:
//!
//! ```json
//! {
//!   "level": "mario1.csv",
//!   "player": "MarioPlayer",
//!   "scroller": "Manual,5,10,-1,-1",
//!   "view_blocks": 15,
//!   "seed": 7,
//!   "next_level": "mario2.json"
//! }
//! ```
//!
//! Relative level and generation paths resolve under `data_dir` unless they
//! start with `.`; every missing key takes its default.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_VIEW_BLOCKS;
use crate::error::ModelError;
use crate::sim::LevelConfig;

/// Directory holding level and generation files
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Level CSV file
    pub level: PathBuf,
    /// Kind built for player cells
    pub player: String,
    /// Scroller configuration line
    pub scroller: String,
    /// Chunk generation spec for generating scrollers
    pub generator: Option<PathBuf>,
    /// Tiles visible along each axis
    pub view_blocks: f64,
    /// Seed for every random choice in the level
    pub seed: u64,
    /// Configuration of the level that follows this one
    pub next_level: Option<PathBuf>,
    pub data_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            level: PathBuf::new(),
            player: "MarioPlayer".to_string(),
            scroller: "Manual,-1,-1,-1,-1".to_string(),
            generator: None,
            view_blocks: DEFAULT_VIEW_BLOCKS,
            seed: 0,
            next_level: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl GameConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let json = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ModelError::FileNotFound(path.to_path_buf()),
            _ => ModelError::Io(e),
        })?;
        let config = Self::from_json(&json).map_err(|e| match e {
            ModelError::InvalidConfigFile { message, .. } => ModelError::InvalidConfigFile {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;
        log::info!("Loaded configuration {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ModelError::InvalidConfigFile {
            path: PathBuf::new(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.level.as_os_str().is_empty() {
            return Err(ModelError::InvalidConfigKey {
                key: "level".to_string(),
                value: String::new(),
            });
        }
        if !(self.view_blocks.is_finite() && self.view_blocks > 0.0) {
            return Err(ModelError::InvalidConfigKey {
                key: "view_blocks".to_string(),
                value: self.view_blocks.to_string(),
            });
        }
        Ok(())
    }

    /// Level file after data directory resolution
    pub fn level_path(&self) -> PathBuf {
        self.resolve(&self.level)
    }

    pub fn generator_path(&self) -> Option<PathBuf> {
        self.generator.as_deref().map(|p| self.resolve(p))
    }

    pub fn next_level_path(&self) -> Option<&Path> {
        self.next_level.as_deref()
    }

    pub fn level_config(&self) -> LevelConfig {
        LevelConfig {
            view_blocks: self.view_blocks,
            seed: self.seed,
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        let explicit = path.is_absolute()
            || matches!(
                path.components().next(),
                Some(Component::CurDir | Component::ParentDir)
            );
        if explicit {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelErrorReason;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config = GameConfig::from_json(r#"{ "level": "mario.csv" }"#).unwrap();
        assert_eq!(config.player, "MarioPlayer");
        assert_eq!(config.view_blocks, DEFAULT_VIEW_BLOCKS);
        assert_eq!(config.level_path(), Path::new("data").join("mario.csv"));
        assert!(config.generator_path().is_none());
    }

    #[test]
    fn test_explicit_paths_are_kept() {
        let config = GameConfig::from_json(
            r#"{ "level": "./levels/one.csv", "generator": "../gen.json", "data_dir": "assets" }"#,
        )
        .unwrap();
        assert_eq!(config.level_path(), PathBuf::from("./levels/one.csv"));
        assert_eq!(config.generator_path(), Some(PathBuf::from("../gen.json")));
    }

    #[test]
    fn test_invalid_values() {
        let err = GameConfig::from_json(r#"{ "level": "a.csv", "view_blocks": 0 }"#).unwrap_err();
        assert_eq!(err.reason(), ModelErrorReason::InvalidConfigKey);

        let err = GameConfig::from_json("{}").unwrap_err();
        assert_eq!(err.reason(), ModelErrorReason::InvalidConfigKey);

        let err = GameConfig::from_json(r#"{ "level": 3 }"#).unwrap_err();
        assert_eq!(err.reason(), ModelErrorReason::InvalidConfigFile);
    }

    #[test]
    fn test_load_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flappy.json");
        fs::write(
            &path,
            r#"{ "level": "flappy.csv", "player": "FlappyPlayer", "seed": 9, "next_level": "doodle.json" }"#,
        )
        .unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.level_config().seed, 9);
        assert_eq!(config.next_level_path(), Some(Path::new("doodle.json")));

        let err = GameConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.reason(), ModelErrorReason::FileNotFound);

        fs::write(&path, "not json").unwrap();
        match GameConfig::load(&path).unwrap_err() {
            ModelError::InvalidConfigFile { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
