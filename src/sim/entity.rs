//! Entities and their capability components
//!
//! Every game object is a flat [`Entity`] with a kind tag and a set of
//! optional capabilities. The step pipeline selects behaviour by checking
//! which capabilities are present, and per-kind policies by matching on
//! [`EntityKind`].

use std::collections::VecDeque;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::direction::{CollisionDirections, Direction};
use super::hitbox::HitBox;
use super::modifier::{Modifier, Modifiers};
use crate::consts::*;

/// Stable handle of an entity inside a level
pub type EntityId = u32;

/// Concrete entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    MarioPlayer,
    DoodlePlayer,
    FlappyPlayer,
    Enemy,
    ZeroGEnemy,
    Block,
    PowerUpBlock,
    PowerUp,
    Goal,
}

impl EntityKind {
    pub const ALL: [EntityKind; 9] = [
        EntityKind::MarioPlayer,
        EntityKind::DoodlePlayer,
        EntityKind::FlappyPlayer,
        EntityKind::Enemy,
        EntityKind::ZeroGEnemy,
        EntityKind::Block,
        EntityKind::PowerUpBlock,
        EntityKind::PowerUp,
        EntityKind::Goal,
    ];

    pub const PLAYERS: [EntityKind; 3] = [
        EntityKind::MarioPlayer,
        EntityKind::DoodlePlayer,
        EntityKind::FlappyPlayer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::MarioPlayer => "MarioPlayer",
            EntityKind::DoodlePlayer => "DoodlePlayer",
            EntityKind::FlappyPlayer => "FlappyPlayer",
            EntityKind::Enemy => "Enemy",
            EntityKind::ZeroGEnemy => "ZeroGEnemy",
            EntityKind::Block => "Block",
            EntityKind::PowerUpBlock => "PowerUpBlock",
            EntityKind::PowerUp => "PowerUp",
            EntityKind::Goal => "Goal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s.trim())
    }

    /// Name shown to the view layer (texture key)
    pub fn type_name(&self) -> &'static str {
        match self {
            k if k.is_player() => "Player",
            EntityKind::ZeroGEnemy => "Enemy",
            k => k.as_str(),
        }
    }

    pub fn is_player(&self) -> bool {
        Self::PLAYERS.contains(self)
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self, EntityKind::Enemy | EntityKind::ZeroGEnemy)
    }

    pub fn is_block(&self) -> bool {
        matches!(self, EntityKind::Block | EntityKind::PowerUpBlock)
    }

    pub fn is_power_up(&self) -> bool {
        *self == EntityKind::PowerUp
    }

    /// Players and enemies move and run collision checks
    pub fn is_movable(&self) -> bool {
        self.is_player() || self.is_enemy()
    }
}

/// An entity kind at a position, not yet part of a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub kind: EntityKind,
    pub pos: DVec2,
}

impl Placement {
    pub fn new(kind: EntityKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            pos: DVec2::new(x, y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    Player,
    Enemy,
}

/// Health and contact damage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Damageable {
    pub health: f64,
    pub collision_damage: f64,
    pub team: Team,
    /// Sides through which this entity hurts others
    pub deals: CollisionDirections,
    /// Sides through which this entity can be hurt
    pub accepts: CollisionDirections,
}

impl Damageable {
    fn player() -> Self {
        Self {
            health: DEFAULT_HEALTH,
            collision_damage: DEFAULT_COLLISION_DAMAGE,
            team: Team::Player,
            deals: CollisionDirections::from([Direction::Bottom].as_slice()),
            accepts: CollisionDirections::all(),
        }
    }

    fn enemy() -> Self {
        Self {
            health: DEFAULT_HEALTH,
            collision_damage: DEFAULT_COLLISION_DAMAGE,
            team: Team::Enemy,
            deals: CollisionDirections::from(
                [Direction::Bottom, Direction::Left, Direction::Right].as_slice(),
            ),
            accepts: CollisionDirections::all(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn can_apply_damage_to(&self, direction: Direction) -> bool {
        self.deals.contains(direction)
    }

    pub fn can_receive_damage_from(&self, direction: Direction) -> bool {
        self.accepts.contains(direction)
    }

    pub fn is_on_same_team(&self, other: &Damageable) -> bool {
        self.team == other.team
    }

    /// Hurt `victim` once for every colliding side this entity can hit through
    pub fn attempt_apply_damage(&self, victim: &mut Damageable, directions: &CollisionDirections) {
        if directions.is_empty() || self.is_on_same_team(victim) {
            return;
        }
        for direction in directions.iter() {
            if self.can_apply_damage_to(direction)
                && victim.can_receive_damage_from(direction.opposite())
            {
                victim.health -= self.collision_damage;
            }
        }
    }
}

/// Player-only state: modifiers and input latches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub modifiers: Modifiers,
    /// Mario: next jump press is the short pre-jump hop
    pub jump_grace: bool,
    /// Flappy: jump key is still held from the last flap
    pub jump_held: bool,
    /// Flappy: crashed into something, input ignored from now on
    pub immobilized: bool,
}

impl PlayerState {
    fn new() -> Self {
        Self {
            jump_grace: true,
            ..Default::default()
        }
    }
}

/// Carries a modifier handed to the first player that touches it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Empowering {
    pub modifier: Option<Modifier>,
    pub has_applied: bool,
}

/// Produces new entities when hit from the right side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    pub spawn_kind: EntityKind,
    /// Created but not yet inserted into the level
    pub pending: VecDeque<Placement>,
    /// Spawns still allowed
    pub max_spawn_count: u32,
    /// Sides (as seen by the spawner) that trigger a spawn
    pub required: CollisionDirections,
}

impl Spawner {
    fn power_up_block() -> Self {
        Self {
            spawn_kind: EntityKind::PowerUp,
            pending: VecDeque::new(),
            max_spawn_count: 1,
            required: CollisionDirections::from([Direction::Bottom].as_slice()),
        }
    }

    /// Pop the oldest pending spawn, if any
    pub fn attempt_spawn_entity(&mut self) -> Option<Placement> {
        self.pending.pop_front()
    }

    /// React to a collision reported by the *other* entity
    ///
    /// `directions` are the sides of the colliding entity, so they are flipped
    /// before checking against the required set. The spawn lands next to the
    /// spawner on the side that was hit.
    pub fn attempt_create_and_add_spawn(&mut self, hitbox: &HitBox, directions: &CollisionDirections) {
        let seen = directions.opposites();
        if !self.required.one_is_contained_in(&seen) {
            return;
        }

        let size = hitbox.size();
        let mut pos = hitbox.pos;
        if seen.contains(Direction::Top) {
            pos.y += size.y;
        }
        if seen.contains(Direction::Bottom) {
            pos.y -= size.y;
        }
        if seen.contains(Direction::Left) {
            pos.x += size.x;
        }
        if seen.contains(Direction::Right) {
            pos.x -= size.x;
        }
        self.create_and_add_spawn(pos);
    }

    pub fn create_and_add_spawn(&mut self, pos: DVec2) {
        if self.max_spawn_count > 0 {
            self.pending.push_back(Placement {
                kind: self.spawn_kind,
                pos,
            });
            self.max_spawn_count -= 1;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winnable {
    pub has_won: bool,
}

/// A game object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub hitbox: HitBox,
    pub vel: DVec2,
    /// Resting on something this step
    pub grounded: bool,
    /// Union of all sides touched since the last position update
    pub current_collision: CollisionDirections,
    pub damageable: Option<Damageable>,
    pub player: Option<PlayerState>,
    pub empowering: Option<Empowering>,
    pub spawner: Option<Spawner>,
    pub winnable: Option<Winnable>,
}

impl Entity {
    /// Build an entity of `kind` with its top-left corner at `pos`
    pub fn new(id: EntityId, kind: EntityKind, pos: DVec2) -> Self {
        let mut entity = Self {
            id,
            kind,
            hitbox: HitBox::new(pos.x, pos.y),
            vel: DVec2::ZERO,
            grounded: true,
            current_collision: CollisionDirections::empty(),
            damageable: None,
            player: None,
            empowering: None,
            spawner: None,
            winnable: None,
        };

        match kind {
            EntityKind::MarioPlayer | EntityKind::FlappyPlayer => {
                entity.damageable = Some(Damageable::player());
                entity.player = Some(PlayerState::new());
            }
            EntityKind::DoodlePlayer => {
                entity.damageable = Some(Damageable::player());
                entity.player = Some(PlayerState::new());
                entity.grounded = false;
            }
            EntityKind::Enemy | EntityKind::ZeroGEnemy => {
                entity.damageable = Some(Damageable::enemy());
            }
            EntityKind::PowerUpBlock => {
                entity.spawner = Some(Spawner::power_up_block());
            }
            EntityKind::PowerUp => {
                entity.empowering = Some(Empowering::default());
            }
            EntityKind::Goal => {
                entity.winnable = Some(Winnable::default());
            }
            EntityKind::Block => {}
        }

        entity
    }

    pub fn from_placement(id: EntityId, placement: &Placement) -> Self {
        Self::new(id, placement.kind, placement.pos)
    }

    pub fn is_movable(&self) -> bool {
        self.kind.is_movable()
    }

    /// Out of health (entities without health never die)
    pub fn is_dead(&self) -> bool {
        self.damageable.as_ref().is_some_and(Damageable::is_dead)
    }

    pub fn health(&self) -> Option<f64> {
        self.damageable.as_ref().map(|d| d.health)
    }

    pub fn has_won(&self) -> bool {
        self.winnable.is_some_and(|w| w.has_won)
    }

    pub fn has_applied_modifier(&self) -> bool {
        self.empowering.as_ref().is_some_and(|e| e.has_applied)
    }

    pub fn modifiers(&self) -> Option<&Modifiers> {
        self.player.as_ref().map(|p| &p.modifiers)
    }

    /// Move by the current velocity and forget this step's contacts
    pub fn translate_by_velocity(&mut self) {
        self.hitbox.translate(self.vel);
        self.current_collision.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(EntityKind::from_str("Koopa"), None);
        assert_eq!(EntityKind::ZeroGEnemy.type_name(), "Enemy");
        assert_eq!(EntityKind::DoodlePlayer.type_name(), "Player");
    }

    #[test]
    fn test_capabilities_by_kind() {
        let mario = Entity::new(1, EntityKind::MarioPlayer, DVec2::ZERO);
        assert!(mario.is_movable());
        assert!(mario.player.is_some());
        assert_eq!(mario.health(), Some(100.0));

        let block = Entity::new(2, EntityKind::PowerUpBlock, DVec2::ZERO);
        assert!(!block.is_movable());
        assert!(block.spawner.is_some());
        assert!(!block.is_dead());

        let goal = Entity::new(3, EntityKind::Goal, DVec2::ZERO);
        assert!(!goal.has_won());

        let doodle = Entity::new(4, EntityKind::DoodlePlayer, DVec2::ZERO);
        assert!(!doodle.grounded);
    }

    #[test]
    fn test_damage_requires_matching_sides_and_teams() {
        let player = Damageable::player();
        let mut enemy = Damageable::enemy();

        // Player stomps: its BOTTOM meets the enemy's TOP
        player.attempt_apply_damage(&mut enemy, &CollisionDirections::from([Direction::Bottom].as_slice()));
        assert!(enemy.is_dead());

        // Player cannot hurt from the side
        let mut enemy = Damageable::enemy();
        player.attempt_apply_damage(&mut enemy, &CollisionDirections::from([Direction::Right].as_slice()));
        assert_eq!(enemy.health, 100.0);

        // Same team never hurts
        let mut other_player = Damageable::player();
        player.attempt_apply_damage(&mut other_player, &CollisionDirections::from([Direction::Bottom].as_slice()));
        assert_eq!(other_player.health, 100.0);

        // Nothing happens without a collision
        let mut enemy = Damageable::enemy();
        player.attempt_apply_damage(&mut enemy, &CollisionDirections::empty());
        assert_eq!(enemy.health, 100.0);
    }

    #[test]
    fn test_spawner_from_below() {
        let hitbox = HitBox::new(4.0, 4.0);
        let mut spawner = Spawner::power_up_block();

        // Player below the block reports TOP, the block perceives BOTTOM
        spawner.attempt_create_and_add_spawn(&hitbox, &CollisionDirections::from([Direction::Top].as_slice()));
        let spawn = spawner.attempt_spawn_entity().unwrap();
        assert_eq!(spawn.kind, EntityKind::PowerUp);
        assert_eq!(spawn.pos, DVec2::new(4.0, 3.0));
        assert_eq!(spawner.max_spawn_count, 0);

        // Exhausted
        spawner.attempt_create_and_add_spawn(&hitbox, &CollisionDirections::from([Direction::Top].as_slice()));
        assert!(spawner.attempt_spawn_entity().is_none());
    }

    #[test]
    fn test_spawner_ignores_wrong_side() {
        let hitbox = HitBox::new(4.0, 4.0);
        let mut spawner = Spawner::power_up_block();
        spawner.attempt_create_and_add_spawn(&hitbox, &CollisionDirections::from([Direction::Bottom].as_slice()));
        assert!(spawner.pending.is_empty());
        assert_eq!(spawner.max_spawn_count, 1);
    }

    #[test]
    fn test_empty_spawn_queue_yields_nothing() {
        let mut spawner = Spawner::power_up_block();
        for _ in 0..5 {
            assert!(spawner.attempt_spawn_entity().is_none());
        }
    }
}
