//! Axis-aligned hitbox geometry
//!
//! Screen coordinates: x grows to the right, y grows downward, one unit per tile.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::direction::{CollisionDirections, Direction};
use crate::consts::*;
use crate::strictly_between;

/// Default hitbox extent (one tile)
pub const TILE_SIZE: DVec2 = DVec2::ONE;

/// Axis-aligned box with mutable top-left corner and fixed size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitBox {
    /// Top-left corner
    pub pos: DVec2,
    size: DVec2,
}

impl HitBox {
    /// One-tile hitbox with its top-left corner at (x, y)
    pub fn new(x: f64, y: f64) -> Self {
        Self::with_size(x, y, TILE_SIZE)
    }

    pub fn with_size(x: f64, y: f64, size: DVec2) -> Self {
        Self {
            pos: DVec2::new(x, y),
            size,
        }
    }

    #[inline]
    pub fn size(&self) -> DVec2 {
        self.size
    }

    #[inline]
    pub fn x_left(&self) -> f64 {
        self.pos.x
    }

    #[inline]
    pub fn x_right(&self) -> f64 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn y_top(&self) -> f64 {
        self.pos.y
    }

    #[inline]
    pub fn y_bottom(&self) -> f64 {
        self.pos.y + self.size.y
    }

    pub fn set_x_left(&mut self, x_left: f64) {
        self.pos.x = x_left;
    }

    pub fn set_x_right(&mut self, x_right: f64) {
        self.pos.x = x_right - self.size.x;
    }

    pub fn set_y_top(&mut self, y_top: f64) {
        self.pos.y = y_top;
    }

    pub fn set_y_bottom(&mut self, y_bottom: f64) {
        self.pos.y = y_bottom - self.size.y;
    }

    pub fn translate_x(&mut self, delta: f64) {
        self.pos.x += delta;
    }

    pub fn translate_y(&mut self, delta: f64) {
        self.pos.y += delta;
    }

    pub fn translate(&mut self, delta: DVec2) {
        self.pos += delta;
    }

    /// True if the projections overlap on both axes (touching edges do not count)
    pub fn overlaps(&self, other: &HitBox) -> bool {
        self.x_right() > other.x_left()
            && self.x_left() < other.x_right()
            && self.y_bottom() > other.y_top()
            && self.y_top() < other.y_bottom()
    }

    /// Sides of this box that touch `other`
    ///
    /// Each side is reported when its penetration depth is strictly inside
    /// `(CORNER_GLITCH_AVOIDANCE_OFFSET, max)`. The bottom allows deeper
    /// penetration than the top so that corner overlaps while walking resolve
    /// as floor contacts instead of side contacts.
    pub fn collision_directions(&self, other: &HitBox) -> CollisionDirections {
        let mut directions = CollisionDirections::empty();
        if !self.overlaps(other) {
            return directions;
        }

        let low = CORNER_GLITCH_AVOIDANCE_OFFSET;
        if strictly_between(self.y_bottom() - other.y_top(), low, MAX_BOTTOM_INTERSECT) {
            directions.add(Direction::Bottom);
        }
        if strictly_between(other.y_bottom() - self.y_top(), low, MAX_TOP_INTERSECT) {
            directions.add(Direction::Top);
        }
        if strictly_between(self.x_right() - other.x_left(), low, MAX_SIDE_INTERSECT) {
            directions.add(Direction::Right);
        }
        if strictly_between(other.x_right() - self.x_left(), low, MAX_SIDE_INTERSECT) {
            directions.add(Direction::Left);
        }
        directions
    }
}
