//! Per-kind movement policies
//!
//! Velocity updates read the input flags (players) or chase the first player
//! (enemies). Position updates apply gravity and translate by velocity.

use super::direction::Direction;
use super::entity::{Entity, EntityKind};
use super::modifier::ModifierKind;
use crate::consts::GRAVITY_FACTOR;

const MARIO_JUMP_SPEED: f64 = -0.35;
const MARIO_MAX_MOVE_SPEED: f64 = 0.15;
const MARIO_MOVE_ACCELERATION: f64 = 0.015;

const DOODLE_JUMP_SPEED: f64 = -0.4;
pub(crate) const DOODLE_POWER_JUMP_SPEED: f64 = -0.6;
const DOODLE_MOVEMENT_SPEED: f64 = 0.2;

const FLAPPY_JUMP_SPEED: f64 = -0.25;

const ENEMY_MOVEMENT_SPEED: f64 = 0.1;
const ENEMY_MIN_DISTANCE_TO_PLAYER: f64 = 0.06;
const ZERO_G_VELOCITY_MULTIPLIER: f64 = 0.6;

/// Player control flags for one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Recompute a player's velocity from input
pub fn update_player_velocity(entity: &mut Entity, input: MoveInput) {
    match entity.kind {
        EntityKind::MarioPlayer => update_mario_velocity(entity, input),
        EntityKind::DoodlePlayer => update_doodle_velocity(entity, input),
        EntityKind::FlappyPlayer => update_flappy_velocity(entity, input),
        _ => {}
    }
}

fn modifier_value(entity: &Entity, kind: ModifierKind) -> f64 {
    entity.modifiers().map(|m| m.value(kind)).unwrap_or(1.0)
}

fn update_mario_velocity(entity: &mut Entity, input: MoveInput) {
    let speed_mod = modifier_value(entity, ModifierKind::MovementSpeed);
    let jump_mod = modifier_value(entity, ModifierKind::JumpSpeed);
    let grounded = entity.grounded;

    let Some(player) = entity.player.as_mut() else {
        return;
    };

    // A short hop precedes the real jump so jumping into a ceiling doesn't jitter
    if input.jump && grounded {
        if player.jump_grace {
            entity.vel.y = -(MARIO_MOVE_ACCELERATION * jump_mod);
            player.jump_grace = false;
        } else {
            entity.vel.y = MARIO_JUMP_SPEED * jump_mod;
            entity.grounded = false;
            player.jump_grace = true;
        }
    } else {
        player.jump_grace = true;
    }

    let max_speed = MARIO_MAX_MOVE_SPEED * speed_mod;
    let accel = MARIO_MOVE_ACCELERATION * speed_mod;
    if input.right && entity.vel.x < max_speed {
        entity.vel.x += accel;
    }
    if input.left && entity.vel.x > -max_speed {
        entity.vel.x -= accel;
    }
    // Coast to a stop
    if input.right == input.left && entity.vel.x < 0.0 {
        entity.vel.x += accel;
    }
    if input.right == input.left && entity.vel.x > 0.0 {
        entity.vel.x -= accel;
    }
    if entity.vel.x.abs() < MARIO_MOVE_ACCELERATION {
        entity.vel.x = 0.0;
    }
}

fn update_doodle_velocity(entity: &mut Entity, input: MoveInput) {
    if input.right && entity.vel.x <= 0.0 {
        entity.vel.x = DOODLE_MOVEMENT_SPEED;
    }
    if input.left && entity.vel.x >= 0.0 {
        entity.vel.x = -DOODLE_MOVEMENT_SPEED;
    }
    if input.right == input.left {
        entity.vel.x = 0.0;
    }
    apply_player_gravity(entity);
}

fn update_flappy_velocity(entity: &mut Entity, input: MoveInput) {
    let Some(player) = entity.player.as_mut() else {
        return;
    };
    if player.immobilized {
        return;
    }
    if input.jump && !player.jump_held {
        entity.vel.y = FLAPPY_JUMP_SPEED;
        player.jump_held = true;
    } else if !input.jump {
        player.jump_held = false;
    }
}

/// Steer an enemy toward `target_x` (the first player's left edge)
pub fn update_enemy_velocity(entity: &mut Entity, target_x: f64) {
    let x = entity.hitbox.x_left();
    entity.vel.x = if target_x < x - ENEMY_MIN_DISTANCE_TO_PLAYER {
        -ENEMY_MOVEMENT_SPEED
    } else if target_x > x + ENEMY_MIN_DISTANCE_TO_PLAYER {
        ENEMY_MOVEMENT_SPEED
    } else {
        0.0
    };
}

/// Gravity scaled down by an active anti-gravity modifier
fn apply_player_gravity(entity: &mut Entity) {
    let anti_gravity = modifier_value(entity, ModifierKind::AntiGravity);
    let adjusted = 1.0 - (anti_gravity - 1.0);
    entity.vel.y += GRAVITY_FACTOR * adjusted;
}

fn apply_enemy_gravity(entity: &mut Entity) {
    entity.vel.y += GRAVITY_FACTOR;
}

/// Apply gravity per kind, translate, and clear this step's contacts
pub fn update_position(entity: &mut Entity) {
    let resting = entity.current_collision.contains(Direction::Bottom);
    match entity.kind {
        EntityKind::MarioPlayer => {
            if !resting {
                apply_player_gravity(entity);
            }
        }
        EntityKind::DoodlePlayer => {
            if resting && entity.vel.y > 0.0 {
                entity.vel.y = DOODLE_JUMP_SPEED;
            }
        }
        EntityKind::FlappyPlayer => apply_player_gravity(entity),
        EntityKind::Enemy => {
            if !resting {
                apply_enemy_gravity(entity);
            }
        }
        EntityKind::ZeroGEnemy => entity.vel.x *= ZERO_G_VELOCITY_MULTIPLIER,
        _ => return,
    }
    entity.translate_by_velocity();
}
