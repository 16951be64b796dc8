//! A playable level built from configuration
//!
//! Wires the entity factory, level loader, level and scroller together, and
//! is the only type a front end needs to drive.

use std::path::{Path, PathBuf};

use crate::config::GameConfig;
use crate::error::ModelError;
use crate::input::{Command, KeyPressFunctions};
use crate::loader::{EntityFactory, LevelLoader};
use crate::persistence::LevelSaver;
use crate::scroll::{Scroller, ScrollerFactory};
use crate::sim::{Entity, Level};

#[derive(Debug)]
pub struct GameModel {
    config: GameConfig,
    factory: EntityFactory,
    level: Level,
}

impl GameModel {
    /// Load the configured level and its scroller
    pub fn new(config: GameConfig) -> Result<Self, ModelError> {
        let factory = EntityFactory::with_player_name(&config.player)?;
        let snapshot = LevelLoader::new(&factory).from_path(&config.level_path())?;
        let level = Level::new(snapshot, config.level_config());

        let mut model = Self {
            config,
            factory,
            level,
        };
        let scroller = model.build_scroller()?;
        model.level.set_scroller(scroller);
        Ok(model)
    }

    pub fn from_config_path(path: &Path) -> Result<Self, ModelError> {
        Self::new(GameConfig::load(path)?)
    }

    fn build_scroller(&self) -> Result<Box<dyn Scroller>, ModelError> {
        ScrollerFactory::new(self.factory, self.config.view_blocks, self.config.seed)
            .build(&self.config.scroller, self.config.generator_path().as_deref())
    }

    /// Advance the level by one step
    pub fn update_game(&mut self) {
        self.level.step();
    }

    /// Reload the level file from disk and start over with a fresh scroller
    pub fn reset_level(&mut self) -> Result<(), ModelError> {
        let snapshot = LevelLoader::new(&self.factory).from_path(&self.config.level_path())?;
        let scroller = self.build_scroller()?;
        self.level.set_or_reset_level(snapshot);
        self.level.set_level_won(false);
        self.level.set_level_lost(false);
        self.level.set_scroller(scroller);
        Ok(())
    }

    pub fn apply_command(&mut self, command: Command) {
        self.level.key_press_functions_mut().apply(command);
    }

    pub fn key_press_functions(&mut self) -> &mut KeyPressFunctions {
        self.level.key_press_functions_mut()
    }

    pub fn all_entities_in_level(&self) -> Vec<Entity> {
        self.level.copy_of_entity_list()
    }

    pub fn score(&self) -> u64 {
        self.level.score()
    }

    pub fn is_level_won(&self) -> bool {
        self.level.is_level_won()
    }

    pub fn is_level_lost(&self) -> bool {
        self.level.is_level_lost()
    }

    pub fn next_config_path(&self) -> Option<&Path> {
        self.config.next_level_path()
    }

    /// Save the running level as a level file
    pub fn save_level(&mut self, path: &Path) -> Result<PathBuf, ModelError> {
        self.level.set_is_saving(true);
        let result = LevelSaver::new(&self.factory).save(&self.level, path);
        self.level.set_is_saving(false);
        result
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }
}
