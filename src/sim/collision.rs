//! Collision response between a movable entity and any other entity
//!
//! The movable entity detects the sides it touches, resolves its own position
//! and velocity, then applies damage and the player-only interactions
//! (power-ups, spawners, goals) to the other entity.

use super::direction::{CollisionDirections, Direction};
use super::entity::{Entity, EntityKind};
use super::hitbox::HitBox;
use super::movement::DOODLE_POWER_JUMP_SPEED;
use super::modifier::Modifier;
use crate::consts::MIN_COLLISION;

/// Run one pairwise collision check of `mover` against `other`
///
/// Returns the resolved directions (after any policy adjustments).
pub fn check_collision(mover: &mut Entity, other: &mut Entity) -> CollisionDirections {
    let mut directions = mover.hitbox.collision_directions(&other.hitbox);
    mover.current_collision.add_all(&directions);
    process_current_collision(mover, &other.hitbox, &mut directions);

    if let (Some(attacker), Some(victim)) = (mover.damageable.as_ref(), other.damageable.as_mut()) {
        attacker.attempt_apply_damage(victim, &directions);
    }

    if mover.kind.is_player() && !directions.is_empty() {
        if let Some(empowering) = other.empowering.as_mut() {
            if !empowering.has_applied {
                if let Some(modifier) = empowering.modifier {
                    apply_modifier(mover, modifier);
                }
                empowering.has_applied = true;
            }
        }
        if let Some(spawner) = other.spawner.as_mut() {
            spawner.attempt_create_and_add_spawn(&other.hitbox, &directions);
        }
        if let Some(winnable) = other.winnable.as_mut() {
            winnable.has_won = true;
        }
    }

    directions
}

/// Hand a modifier to a player
pub fn apply_modifier(player: &mut Entity, modifier: Modifier) {
    match player.kind {
        // Doodle converts any power-up into an immediate big jump
        EntityKind::DoodlePlayer => player.vel.y = DOODLE_POWER_JUMP_SPEED,
        _ => {
            if let Some(state) = player.player.as_mut() {
                state.modifiers.apply(modifier);
            }
        }
    }
}

/// Resolve the mover's position/velocity for one contact, per kind
pub fn process_current_collision(
    mover: &mut Entity,
    other: &HitBox,
    directions: &mut CollisionDirections,
) {
    match mover.kind {
        EntityKind::DoodlePlayer => {
            // Only lands on things while falling, passes through otherwise
            if directions.contains(Direction::Bottom) && mover.vel.y > 0.0 {
                mover.hitbox.set_y_bottom(other.y_top());
            }
        }
        EntityKind::FlappyPlayer => {
            if directions.does_collide() {
                if let Some(state) = mover.player.as_mut() {
                    state.immobilized = true;
                }
            }
        }
        _ => resolve_solid_contact(mover, other, directions),
    }
}

/// Default response: snap out of the other box and stop moving into it
///
/// Side snaps only happen without a simultaneous floor/ceiling contact (and
/// vice versa) so corner overlaps don't push the mover sideways.
pub fn resolve_solid_contact(
    mover: &mut Entity,
    other: &HitBox,
    directions: &mut CollisionDirections,
) {
    let horizontal = directions.contains_horizontal_collision();
    let vertical = directions.contains_vertical_collision();

    if directions.contains(Direction::Bottom) && !horizontal {
        mover.grounded = true;
        mover.hitbox.set_y_bottom(other.y_top() + MIN_COLLISION);
        if mover.vel.y > 0.0 {
            mover.vel.y = 0.0;
        }
    }
    if directions.contains(Direction::Top) && !horizontal {
        mover.hitbox.set_y_top(other.y_bottom() - MIN_COLLISION);
        if mover.vel.y < 0.0 {
            mover.vel.y = 0.0;
        }
    }
    if directions.contains(Direction::Right) && !vertical {
        mover.hitbox.set_x_right(other.x_left() + MIN_COLLISION);
        if mover.vel.x > 0.0 {
            mover.vel.x = 0.0;
        }
    }
    if directions.contains(Direction::Left) && !vertical {
        mover.hitbox.set_x_left(other.x_right() - MIN_COLLISION);
        if mover.vel.x < 0.0 {
            mover.vel.x = 0.0;
        }
    }

    // Lets an entity be stomped even when slightly offset to the side
    if directions.contains(Direction::Top) && mover.vel.y >= 0.0 {
        directions.remove(Direction::Right);
        directions.remove(Direction::Left);
    }
}
