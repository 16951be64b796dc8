//! Tile Platformer - a tile-based 2D platformer engine core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, modifiers, level step)
//! - `scroll`: Viewport scrolling strategies
//! - `loader`: Entity code factory and CSV level loading
//! - `generator`: Procedural level-chunk generation
//! - `persistence`: Writing a running level back to a level file
//! - `game`: Ties configuration, loader, level and scroller together
//! - `config`, `input`, `error`: JSON configuration, input commands, error types

pub mod config;
pub mod error;
pub mod game;
pub mod generator;
pub mod input;
pub mod loader;
pub mod persistence;
pub mod scroll;
pub mod sim;

pub use config::GameConfig;
pub use error::{GenerationError, ModelError, ModelErrorReason};
pub use game::GameModel;
pub use input::{Command, KeyPressFunctions};

/// Engine configuration constants
pub mod consts {
    /// Simulation steps per second (driven by an external timer)
    pub const FRAMES_PER_SECOND: u32 = 60;

    /// Power-ups added during play last this many seconds
    pub const MODIFIER_DURATION_SECS: u32 = 10;
    /// Magnitude of a power-up modifier
    pub const MODIFIER_VALUE: f64 = 1.5;

    /// Score awarded whenever an enemy leaves the level
    pub const ENEMY_SCORE: u64 = 100;

    /// Default number of tiles visible along each axis
    pub const DEFAULT_VIEW_BLOCKS: f64 = 15.0;

    /// Downward acceleration per step (tiles/step²)
    pub const GRAVITY_FACTOR: f64 = 0.015;
    /// Overlap left in place when snapping an entity onto a surface
    pub const MIN_COLLISION: f64 = 0.01;

    /// Living entity defaults
    pub const DEFAULT_HEALTH: f64 = 100.0;
    pub const DEFAULT_COLLISION_DAMAGE: f64 = 100.0;

    /// Penetration thresholds for classifying a hitbox overlap
    pub const CORNER_GLITCH_AVOIDANCE_OFFSET: f64 = 0.005;
    pub const MAX_SIDE_INTERSECT: f64 = 0.5;
    pub const MAX_TOP_INTERSECT: f64 = 0.35;
    pub const MAX_BOTTOM_INTERSECT: f64 = 1.0 - MAX_TOP_INTERSECT;
}

/// True if `value` lies strictly between `low` and `high`
#[inline]
pub fn strictly_between(value: f64, low: f64, high: f64) -> bool {
    value > low && value < high
}
