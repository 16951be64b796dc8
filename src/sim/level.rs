//! The level aggregate
//!
//! Owns every entity, the active scroller, the input flags and the score.
//! The per-frame pipeline lives in [`super::tick`].

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::arena::EntityArena;
use super::entity::{Entity, EntityId, EntityKind, Placement};
use crate::consts::*;
use crate::input::KeyPressFunctions;
use crate::scroll::Scroller;

/// Initial contents of a level, as produced by a loader
///
/// `reinitialize` rebuilds fresh entities from this, so nothing that happens
/// during play leaks back into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub placements: Vec<Placement>,
    /// Number of rows
    pub length: usize,
    /// Widest row, in tiles
    pub width: usize,
}

/// Explicit per-level settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Tiles visible along each axis; bounds the player and the fall-out check
    pub view_blocks: f64,
    /// Seed for power-up modifier selection
    pub seed: u64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            view_blocks: DEFAULT_VIEW_BLOCKS,
            seed: 0,
        }
    }
}

pub struct Level {
    pub(super) entities: EntityArena,
    /// Levels without a scroller keep a fixed view
    pub(super) scroller: Option<Box<dyn Scroller>>,
    pub(super) input: KeyPressFunctions,
    pub(super) snapshot: LevelSnapshot,
    pub(super) config: LevelConfig,
    pub(super) score: u64,
    pub(super) level_won: bool,
    pub(super) level_lost: bool,
    pub(super) is_saving: bool,
}

impl Level {
    /// Build a level from a loader snapshot, without a scroller
    pub fn new(snapshot: LevelSnapshot, config: LevelConfig) -> Self {
        let entities = EntityArena::from_placements(&snapshot.placements, config.seed);
        log::debug!(
            "Level built: {}x{} tiles, {} entities",
            snapshot.width,
            snapshot.length,
            entities.len()
        );
        Self {
            entities,
            scroller: None,
            input: KeyPressFunctions::default(),
            snapshot,
            config,
            score: 0,
            level_won: false,
            level_lost: false,
            is_saving: false,
        }
    }

    pub fn with_scroller(mut self, scroller: Box<dyn Scroller>) -> Self {
        self.scroller = Some(scroller);
        self
    }

    pub fn set_scroller(&mut self, scroller: Box<dyn Scroller>) {
        self.scroller = Some(scroller);
    }

    /// Replace the level contents with a new snapshot and zero the score
    pub fn set_or_reset_level(&mut self, snapshot: LevelSnapshot) {
        self.entities = EntityArena::from_placements(&snapshot.placements, self.config.seed);
        self.snapshot = snapshot;
        self.score = 0;
    }

    /// Start over from the original snapshot
    pub fn reinitialize(&mut self) {
        let snapshot = self.snapshot.clone();
        self.set_or_reset_level(snapshot);
        if let Some(scroller) = self.scroller.as_mut() {
            scroller.reset();
        }
        self.level_lost = false;
        self.level_won = false;
        log::info!("Level reinitialized ({} entities)", self.entities.len());
    }

    /// Insert a new entity; power-ups receive a random modifier
    pub fn add_entity(&mut self, kind: EntityKind, x: f64, y: f64) -> EntityId {
        self.entities.insert_empowered(kind, DVec2::new(x, y))
    }

    /// Remove an entity from the level; enemies are worth ENEMY_SCORE
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        let removed = self.entities.remove(id)?;
        if removed.kind.is_enemy() {
            self.score += ENEMY_SCORE;
        }
        Some(removed)
    }

    /// Entity whose top-left corner truncates to (x, y)
    pub fn entity_at(&self, x: i64, y: i64) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|e| e.hitbox.x_left() as i64 == x && e.hitbox.y_top() as i64 == y)
    }

    pub fn translate_all_entities(&mut self, x_change: f64, y_change: f64) {
        self.entities.translate_all(DVec2::new(x_change, y_change));
    }

    pub fn translate_entity(&mut self, id: EntityId, x_change: f64, y_change: f64) {
        if let Some(entity) = self.entities.get_mut(id) {
            entity.hitbox.translate(DVec2::new(x_change, y_change));
        }
    }

    /// Clamp a player horizontally to `[0, view_blocks]`
    pub fn keep_player_in_bounds(&mut self, id: EntityId) {
        let max_x = self.config.view_blocks;
        if let Some(player) = self.entities.get_mut(id) {
            if player.hitbox.x_left() < 0.0 {
                player.hitbox.set_x_left(0.0);
            } else if player.hitbox.x_right() > max_x {
                player.hitbox.set_x_right(max_x);
            }
        }
    }

    pub fn set_level_won(&mut self, won: bool) {
        if won && !self.level_won {
            log::info!("Level won with score {}", self.score);
        }
        self.level_won = won;
    }

    pub fn set_level_lost(&mut self, lost: bool) {
        if lost && !self.level_lost {
            log::info!("Level lost with score {}", self.score);
        }
        self.level_lost = lost;
    }

    pub fn is_level_won(&self) -> bool {
        self.level_won
    }

    pub fn is_level_lost(&self) -> bool {
        self.level_lost
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn set_is_saving(&mut self, saving: bool) {
        self.is_saving = saving;
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Rows in the original level grid
    pub fn level_length(&self) -> usize {
        self.snapshot.length
    }

    /// Columns in the original level grid
    pub fn level_width(&self) -> usize {
        self.snapshot.width
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn key_press_functions(&self) -> &KeyPressFunctions {
        &self.input
    }

    pub fn key_press_functions_mut(&mut self) -> &mut KeyPressFunctions {
        &mut self.input
    }

    /// Owned copy of every entity (for rendering)
    pub fn copy_of_entity_list(&self) -> Vec<Entity> {
        self.entities.to_vec()
    }

    /// Live view of the level's entities
    pub fn entities(&self) -> &EntityArena {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityArena {
        &mut self.entities
    }

    pub fn player_ids(&self) -> Vec<EntityId> {
        self.entities.players().map(|p| p.id).collect()
    }

    pub fn first_player(&self) -> Option<&Entity> {
        self.entities.first_player()
    }

    pub fn first_player_mut(&mut self) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.kind.is_player())
    }
}

impl std::fmt::Debug for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Level")
            .field("entities", &self.entities.len())
            .field("score", &self.score)
            .field("level_won", &self.level_won)
            .field("level_lost", &self.level_lost)
            .finish_non_exhaustive()
    }
}
