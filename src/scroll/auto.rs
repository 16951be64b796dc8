//! Constant-velocity scrolling

use glam::DVec2;

use super::Scroller;
use crate::sim::{EntityArena, EntityId};

/// Score earned per automatic scroll
pub const AUTO_SCROLL_SCORE: i64 = 1;

/// Moves the whole world by a fixed vector every step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoScroller {
    delta: DVec2,
    /// Counter-move the player so it stays put on screen
    lock_player: bool,
}

impl AutoScroller {
    pub fn new(x_scroll: f64, y_scroll: f64, lock_player: bool) -> Self {
        Self {
            delta: DVec2::new(x_scroll, y_scroll),
            lock_player,
        }
    }

    /// Scroller that never moves anything
    pub fn still() -> Self {
        Self::new(0.0, 0.0, false)
    }

    pub fn delta(&self) -> DVec2 {
        self.delta
    }

    pub(super) fn shift(&self, entities: &mut EntityArena, player: EntityId) {
        entities.translate_all(self.delta);
        if self.lock_player {
            if let Some(player) = entities.get_mut(player) {
                player.hitbox.translate(-self.delta);
            }
        }
    }
}

impl Scroller for AutoScroller {
    fn scroll(&mut self, entities: &mut EntityArena, player: EntityId) -> i64 {
        self.shift(entities, player);
        AUTO_SCROLL_SCORE
    }
}
