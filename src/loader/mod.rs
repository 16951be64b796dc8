//! Turning level files into level snapshots

pub mod factory;
pub mod level_loader;

pub use factory::{EMPTY_CODE, EntityFactory, PLAYER_CODE};
pub use level_loader::{LEVEL_EXTENSION, LevelLoader, validate_level_path};
