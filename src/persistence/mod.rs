//! Writing a running level back to a level file
//!
//! The saved grid has the dimensions of the originally loaded level. Each
//! cell holds the code of the entity whose top-left corner truncates to that
//! tile, or the empty code. Entities scrolled outside the original grid are
//! not saved.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ModelError;
use crate::loader::{EMPTY_CODE, EntityFactory, LEVEL_EXTENSION};
use crate::sim::Level;

#[derive(Debug, Clone, Copy)]
pub struct LevelSaver<'a> {
    factory: &'a EntityFactory,
}

impl<'a> LevelSaver<'a> {
    pub fn new(factory: &'a EntityFactory) -> Self {
        Self { factory }
    }

    /// Render the level as CSV, rows separated by `\n`, no trailing newline
    pub fn to_csv(&self, level: &Level) -> String {
        (0..level.level_length())
            .map(|y| {
                (0..level.level_width())
                    .map(|x| {
                        level
                            .entity_at(x as i64, y as i64)
                            .map_or(EMPTY_CODE, |e| self.factory.code_for(e.kind))
                    })
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write the level, replacing any other extension with `.csv`
    ///
    /// Returns the path actually written.
    pub fn save(&self, level: &Level, path: &Path) -> Result<PathBuf, ModelError> {
        let path = csv_path(path);
        fs::write(&path, self.to_csv(level))?;
        log::info!("Saved level to {}", path.display());
        Ok(path)
    }
}

fn csv_path(path: &Path) -> PathBuf {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(LEVEL_EXTENSION));
    if is_csv {
        path.to_path_buf()
    } else {
        path.with_extension(LEVEL_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LevelLoader;
    use crate::sim::{EntityKind, LevelConfig};
    use tempfile::TempDir;

    const GRID: &str = "0,0,5\n1,0,0\n2,6,2";

    fn level(factory: &EntityFactory) -> Level {
        let snapshot = LevelLoader::new(factory).parse(GRID);
        Level::new(snapshot, LevelConfig::default())
    }

    #[test]
    fn test_unchanged_level_saves_identically() {
        let factory = EntityFactory::default();
        let level = level(&factory);
        assert_eq!(LevelSaver::new(&factory).to_csv(&level), GRID);
    }

    #[test]
    fn test_saves_current_positions() {
        let factory = EntityFactory::with_player_name("FlappyPlayer").unwrap();
        let mut level = level(&factory);
        let player = level.player_ids()[0];
        level.translate_entity(player, 1.4, 0.0);
        level.add_entity(EntityKind::Enemy, 0.0, 0.0);

        let csv = LevelSaver::new(&factory).to_csv(&level);
        assert_eq!(csv, "3,0,5\n0,1,0\n2,6,2");
    }

    #[test]
    fn test_extension_is_forced() {
        let dir = TempDir::new().unwrap();
        let factory = EntityFactory::default();
        let level = level(&factory);
        let saver = LevelSaver::new(&factory);

        let written = saver.save(&level, &dir.path().join("my_level.txt")).unwrap();
        assert_eq!(written, dir.path().join("my_level.csv"));
        assert_eq!(fs::read_to_string(&written).unwrap(), GRID);

        let written = saver.save(&level, &dir.path().join("plain")).unwrap();
        assert_eq!(written.extension().unwrap(), "csv");

        // Saved files load back
        let snapshot = LevelLoader::new(&factory).from_path(&written).unwrap();
        assert_eq!((snapshot.length, snapshot.width), (3, 3));
    }
}
