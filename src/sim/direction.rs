//! Collision directions
//!
//! A collision is described by the sides of the *checking* entity that touch
//! the other entity: BOTTOM means "the other entity is under me".

use serde::{Deserialize, Serialize};

/// A side of an axis-aligned hitbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Left,
    Top,
    Bottom,
    /// Sentinel for "no contact"; never counts as a collision
    None,
}

impl Direction {
    /// The four real sides, in set iteration order
    pub const CARDINALS: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Top,
        Direction::Bottom,
    ];

    const ALL: [Direction; 5] = [
        Direction::Right,
        Direction::Left,
        Direction::Top,
        Direction::Bottom,
        Direction::None,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        match self {
            Direction::Right => 1 << 0,
            Direction::Left => 1 << 1,
            Direction::Top => 1 << 2,
            Direction::Bottom => 1 << 3,
            Direction::None => 1 << 4,
        }
    }
}

/// Set of collision directions (each direction at most once)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CollisionDirections {
    bits: u8,
}

impl CollisionDirections {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// All four cardinal directions
    pub fn all() -> Self {
        Self::from(Direction::CARDINALS.as_slice())
    }

    pub fn add(&mut self, direction: Direction) {
        self.bits |= direction.bit();
    }

    /// Union `other` into this set
    pub fn add_all(&mut self, other: &CollisionDirections) {
        self.bits |= other.bits;
    }

    pub fn remove(&mut self, direction: Direction) {
        self.bits &= !direction.bit();
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.bits & direction.bit() != 0
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|d| self.contains(*d))
    }

    /// True if the two sets share at least one direction
    pub fn one_is_contained_in(&self, other: &CollisionDirections) -> bool {
        self.bits & other.bits != 0
    }

    /// Exactly one of TOP/BOTTOM
    pub fn contains_vertical_collision(&self) -> bool {
        self.contains(Direction::Top) ^ self.contains(Direction::Bottom)
    }

    /// Exactly one of LEFT/RIGHT
    pub fn contains_horizontal_collision(&self) -> bool {
        self.contains(Direction::Right) ^ self.contains(Direction::Left)
    }

    pub fn does_collide(&self) -> bool {
        !self.is_empty() && !self.contains(Direction::None)
    }

    /// New set with every direction flipped
    pub fn opposites(&self) -> CollisionDirections {
        self.iter().map(Direction::opposite).collect()
    }
}

impl From<&[Direction]> for CollisionDirections {
    fn from(directions: &[Direction]) -> Self {
        directions.iter().copied().collect()
    }
}

impl FromIterator<Direction> for CollisionDirections {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = CollisionDirections::empty();
        for direction in iter {
            set.add(direction);
        }
        set
    }
}
