//! Single ownership store for all entities of a level
//!
//! Entities live in one `Vec`, in insertion order, addressed by a stable
//! [`EntityId`]. Role views (players, enemies, movables, ...) are filtered
//! iterators over that order, so every entity exists exactly once.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityId, EntityKind, Placement};
use super::modifier::Modifier;
use crate::consts::*;

#[derive(Debug, Clone)]
pub struct EntityArena {
    entities: Vec<Entity>,
    next_id: EntityId,
    /// Drives power-up modifier selection
    rng: Pcg32,
}

impl EntityArena {
    pub fn new(seed: u64) -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Build an arena holding fresh entities for each placement
    pub fn from_placements(placements: &[Placement], seed: u64) -> Self {
        let mut arena = Self::new(seed);
        for placement in placements {
            arena.insert(placement.kind, placement.pos);
        }
        arena
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Create an entity and store it
    pub fn insert(&mut self, kind: EntityKind, pos: DVec2) -> EntityId {
        let id = self.next_entity_id();
        self.entities.push(Entity::new(id, kind, pos));
        id
    }

    /// Create a power-up carrying a random modifier, or any other entity as-is
    pub fn insert_empowered(&mut self, kind: EntityKind, pos: DVec2) -> EntityId {
        let id = self.insert(kind, pos);
        if kind.is_power_up() {
            let duration = f64::from(MODIFIER_DURATION_SECS * FRAMES_PER_SECOND);
            let modifier = Modifier::random(&mut self.rng, MODIFIER_VALUE, duration);
            if let Some(empowering) = self.get_mut(id).and_then(|e| e.empowering.as_mut()) {
                empowering.modifier = Some(modifier);
            }
        }
        id
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.index_of(id)?;
        Some(self.entities.remove(index))
    }

    /// Drop every entity matching `predicate`, returning how many went
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&Entity) -> bool) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| !predicate(e));
        before - self.entities.len()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Two distinct entities borrowed mutably at once
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut Entity, &mut Entity)> {
        if a == b || a >= self.entities.len() || b >= self.entities.len() {
            return None;
        }
        if a < b {
            let (head, tail) = self.entities.split_at_mut(b);
            Some((&mut head[a], &mut tail[0]))
        } else {
            let (head, tail) = self.entities.split_at_mut(a);
            Some((&mut tail[0], &mut head[b]))
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// IDs of entities matching `predicate`, in insertion order
    pub fn ids_where(&self, predicate: impl Fn(&Entity) -> bool) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| predicate(e))
            .map(|e| e.id)
            .collect()
    }

    pub fn players(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind.is_player())
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind.is_enemy())
    }

    pub fn movables(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_movable())
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind.is_block())
    }

    pub fn power_ups(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind.is_power_up())
    }

    pub fn winnables(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.winnable.is_some())
    }

    pub fn first_player(&self) -> Option<&Entity> {
        self.players().next()
    }

    /// Shift every entity
    pub fn translate_all(&mut self, delta: DVec2) {
        for entity in &mut self.entities {
            entity.hitbox.translate(delta);
        }
    }

    /// Owned snapshot for readers outside the simulation
    pub fn to_vec(&self) -> Vec<Entity> {
        self.entities.clone()
    }
}
