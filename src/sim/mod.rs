//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per call, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (insertion order of entities)
//! - No rendering or platform dependencies

pub mod arena;
pub mod collision;
pub mod direction;
pub mod entity;
pub mod hitbox;
pub mod level;
pub mod modifier;
pub mod movement;
pub mod tick;

pub use arena::EntityArena;
pub use collision::{apply_modifier, check_collision};
pub use direction::{CollisionDirections, Direction};
pub use entity::{
    Damageable, Empowering, Entity, EntityId, EntityKind, Placement, PlayerState, Spawner, Team,
    Winnable,
};
pub use hitbox::{HitBox, TILE_SIZE};
pub use level::{Level, LevelConfig, LevelSnapshot};
pub use modifier::{Modifier, ModifierKind, Modifiers};
pub use movement::MoveInput;
