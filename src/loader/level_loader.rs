//! CSV level files
//!
//! One line per tile row, one comma-separated code per tile column. Row
//! index becomes the y coordinate, column index the x coordinate.

use std::fs;
use std::path::Path;

use super::factory::EntityFactory;
use crate::error::ModelError;
use crate::sim::LevelSnapshot;

/// Extension every level file must carry
pub const LEVEL_EXTENSION: &str = "csv";

/// Reads level files into snapshots
#[derive(Debug, Clone, Copy)]
pub struct LevelLoader<'a> {
    factory: &'a EntityFactory,
}

impl<'a> LevelLoader<'a> {
    pub fn new(factory: &'a EntityFactory) -> Self {
        Self { factory }
    }

    /// Validate and parse a level file
    pub fn from_path(&self, path: &Path) -> Result<LevelSnapshot, ModelError> {
        validate_level_path(path)?;
        let contents = fs::read_to_string(path)?;
        let snapshot = self.parse(&contents);
        log::info!(
            "Loaded level {}: {} rows, {} columns, {} entities",
            path.display(),
            snapshot.length,
            snapshot.width,
            snapshot.placements.len()
        );
        Ok(snapshot)
    }

    /// Parse CSV text; unknown codes are skipped
    pub fn parse(&self, contents: &str) -> LevelSnapshot {
        let mut snapshot = LevelSnapshot::default();
        for (y, line) in contents.lines().enumerate() {
            let cells: Vec<&str> = line.split(',').collect();
            for (x, code) in cells.iter().enumerate() {
                match self.factory.create_placement(code, x as f64, y as f64) {
                    Some(placement) => snapshot.placements.push(placement),
                    None if !is_empty_code(code) => {
                        log::warn!("Unknown entity code {code:?} at ({x}, {y})");
                    }
                    None => {}
                }
            }
            snapshot.width = snapshot.width.max(cells.len());
            snapshot.length = y + 1;
        }
        snapshot
    }
}

fn is_empty_code(code: &str) -> bool {
    let code = code.trim();
    code.is_empty() || code == super::factory::EMPTY_CODE
}

/// Reject directories, missing files and non-CSV files, in that order
pub fn validate_level_path(path: &Path) -> Result<(), ModelError> {
    if path.is_dir() {
        return Err(ModelError::Directory(path.to_path_buf()));
    }
    if !path.exists() {
        return Err(ModelError::FileNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(ModelError::NotAFile(path.to_path_buf()));
    }
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(LEVEL_EXTENSION));
    if !is_csv {
        return Err(ModelError::WrongExtension {
            path: path.to_path_buf(),
            expected: LEVEL_EXTENSION,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelErrorReason;
    use crate::sim::{EntityKind, Placement};
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_parse_grid() {
        let factory = EntityFactory::default();
        let snapshot = LevelLoader::new(&factory).parse("0,0,5\n1,0\n2,2,2,2");
        assert_eq!(snapshot.length, 3);
        assert_eq!(snapshot.width, 4);
        assert_eq!(snapshot.placements.len(), 6);
        assert_eq!(snapshot.placements[0], Placement::new(EntityKind::Goal, 2.0, 0.0));
        assert_eq!(snapshot.placements[1], Placement::new(EntityKind::MarioPlayer, 0.0, 1.0));
        assert_eq!(snapshot.placements[5], Placement::new(EntityKind::Block, 3.0, 2.0));
    }

    #[test]
    fn test_unknown_codes_are_skipped() {
        let factory = EntityFactory::default();
        let snapshot = LevelLoader::new(&factory).parse("2,x,9,,2");
        assert_eq!(snapshot.placements.len(), 2);
        assert_eq!(snapshot.width, 5);
    }

    #[test]
    fn test_loads_file_with_configured_player() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "level.csv", "0,1,0\n2,2,2\n");
        let factory = EntityFactory::with_player_name("DoodlePlayer").unwrap();
        let snapshot = LevelLoader::new(&factory).from_path(&path).unwrap();
        assert_eq!(snapshot.length, 2);
        assert_eq!(snapshot.width, 3);
        assert_eq!(snapshot.placements[0].kind, EntityKind::DoodlePlayer);
    }

    #[test]
    fn test_path_validation() {
        let dir = TempDir::new().unwrap();
        let factory = EntityFactory::default();
        let loader = LevelLoader::new(&factory);

        let err = loader.from_path(dir.path()).unwrap_err();
        assert_eq!(err.reason(), ModelErrorReason::Directory);

        let err = loader.from_path(&dir.path().join("missing.csv")).unwrap_err();
        assert_eq!(err.reason(), ModelErrorReason::FileNotFound);

        let txt = write(&dir, "level.txt", "2,2");
        let err = loader.from_path(&txt).unwrap_err();
        assert_eq!(err.reason(), ModelErrorReason::WrongExtension);
    }
}
