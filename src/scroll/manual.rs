//! Player-driven scrolling

use glam::DVec2;

use super::{ALWAYS_SCROLL, NO_SCROLL, Scroller};
use crate::sim::{Entity, EntityArena, EntityId};

/// Scrolls against the player's velocity once it crosses a screen bound
///
/// Each bound is a tile coordinate, or [`NO_SCROLL`] / [`ALWAYS_SCROLL`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualScroller {
    left: f64,
    right: f64,
    up: f64,
    down: f64,
}

fn bound_crossed(bound: f64, crossed: bool) -> bool {
    (crossed && bound != NO_SCROLL) || bound == ALWAYS_SCROLL
}

impl ManualScroller {
    pub fn new(left: f64, right: f64, up: f64, down: f64) -> Self {
        Self {
            left,
            right,
            up,
            down,
        }
    }

    /// World shift that cancels the player's motion past the bounds
    pub fn scroll_amount(&self, player: &Entity) -> DVec2 {
        let hitbox = &player.hitbox;
        let vel = player.vel;
        let mut amount = DVec2::ZERO;

        if bound_crossed(self.left, hitbox.x_left() < self.left) && vel.x < 0.0 {
            amount.x -= vel.x;
        }
        if bound_crossed(self.right, hitbox.x_right() > self.right) && vel.x > 0.0 {
            amount.x -= vel.x;
        }
        if bound_crossed(self.up, hitbox.y_top() < self.up) && vel.y < 0.0 {
            amount.y -= vel.y;
        }
        if bound_crossed(self.down, hitbox.y_bottom() > self.down) && vel.y > 0.0 {
            amount.y -= vel.y;
        }
        amount
    }

    /// Apply one scroll and return the shift used
    pub(super) fn shift(&self, entities: &mut EntityArena, player: EntityId) -> DVec2 {
        let amount = entities
            .get(player)
            .map(|p| self.scroll_amount(p))
            .unwrap_or(DVec2::ZERO);
        entities.translate_all(amount);
        amount
    }
}

impl Scroller for ManualScroller {
    fn scroll(&mut self, entities: &mut EntityArena, player: EntityId) -> i64 {
        self.shift(entities, player);
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::tests::{ENEMY, PLAYER, WALL, sample_arena};

    const X_VEL: f64 = 0.15;
    const Y_VEL: f64 = 0.35;

    fn with_velocity(vel: DVec2) -> (EntityArena, EntityId) {
        let (mut arena, player) = sample_arena();
        arena.get_mut(player).unwrap().vel = vel;
        (arena, player)
    }

    #[test]
    fn test_always_scroll_cancels_motion() {
        let (mut arena, player) = with_velocity(DVec2::new(X_VEL, Y_VEL));
        let mut scroller = ManualScroller::new(ALWAYS_SCROLL, ALWAYS_SCROLL, ALWAYS_SCROLL, ALWAYS_SCROLL);
        assert_eq!(scroller.scroll(&mut arena, player), 0);

        let shift = DVec2::new(-X_VEL, -Y_VEL);
        assert_eq!(arena.get(player).unwrap().hitbox.pos, PLAYER + shift);
        assert_eq!(arena.blocks().next().unwrap().hitbox.pos, WALL + shift);
        assert_eq!(arena.enemies().next().unwrap().hitbox.pos, ENEMY + shift);
    }

    #[test]
    fn test_no_scroll_never_moves() {
        let (mut arena, player) = with_velocity(DVec2::new(-X_VEL, -Y_VEL));
        ManualScroller::new(NO_SCROLL, NO_SCROLL, NO_SCROLL, NO_SCROLL).scroll(&mut arena, player);
        assert_eq!(arena.get(player).unwrap().hitbox.pos, PLAYER);
    }

    #[test]
    fn test_bounds_only_past_threshold() {
        // Player right edge is at 5.0
        let (mut arena, player) = with_velocity(DVec2::new(X_VEL, 0.0));
        ManualScroller::new(NO_SCROLL, 6.0, NO_SCROLL, NO_SCROLL).scroll(&mut arena, player);
        assert_eq!(arena.get(player).unwrap().hitbox.pos, PLAYER);

        ManualScroller::new(NO_SCROLL, 4.5, NO_SCROLL, NO_SCROLL).scroll(&mut arena, player);
        assert_eq!(arena.get(player).unwrap().hitbox.pos, PLAYER - DVec2::new(X_VEL, 0.0));
    }

    #[test]
    fn test_direction_must_match_bound() {
        // Moving right never triggers the left bound
        let (mut arena, player) = with_velocity(DVec2::new(X_VEL, 0.0));
        ManualScroller::new(ALWAYS_SCROLL, NO_SCROLL, NO_SCROLL, NO_SCROLL).scroll(&mut arena, player);
        assert_eq!(arena.get(player).unwrap().hitbox.pos, PLAYER);

        // Rising past the upper bound scrolls the world down
        let (mut arena, player) = with_velocity(DVec2::new(0.0, -Y_VEL));
        ManualScroller::new(NO_SCROLL, NO_SCROLL, 6.0, NO_SCROLL).scroll(&mut arena, player);
        assert_eq!(arena.get(player).unwrap().hitbox.pos, PLAYER + DVec2::new(0.0, Y_VEL));
    }
}
