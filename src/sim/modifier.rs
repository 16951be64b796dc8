//! Timed player modifiers granted by power-ups

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// What a modifier scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModifierKind {
    MovementSpeed,
    JumpSpeed,
    AntiGravity,
}

impl ModifierKind {
    pub const ALL: [ModifierKind; 3] = [
        ModifierKind::MovementSpeed,
        ModifierKind::JumpSpeed,
        ModifierKind::AntiGravity,
    ];

    /// Uniformly pick a kind
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A multiplicative effect that lasts a number of steps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub kind: ModifierKind,
    pub value: f64,
    /// Remaining steps
    pub duration: f64,
}

impl Modifier {
    pub fn new(kind: ModifierKind, value: f64, duration: f64) -> Self {
        Self {
            kind,
            value,
            duration,
        }
    }

    /// Modifier of a random kind
    pub fn random<R: Rng + ?Sized>(rng: &mut R, value: f64, duration: f64) -> Self {
        Self::new(ModifierKind::random(rng), value, duration)
    }

    /// Consume one step of duration
    pub fn update_duration(&mut self) {
        self.duration -= 1.0;
    }

    pub fn is_expired(&self) -> bool {
        self.duration <= 0.0
    }
}

/// Active modifiers of one player, at most one per kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    active: BTreeMap<ModifierKind, Modifier>,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the modifier of the same kind
    pub fn apply(&mut self, modifier: Modifier) {
        self.active.insert(modifier.kind, modifier);
    }

    pub fn remove(&mut self, kind: ModifierKind) {
        self.active.remove(&kind);
    }

    pub fn get(&self, kind: ModifierKind) -> Option<&Modifier> {
        self.active.get(&kind)
    }

    pub fn contains(&self, kind: ModifierKind) -> bool {
        self.active.contains_key(&kind)
    }

    /// Multiplier for `kind` (1.0 when inactive)
    pub fn value(&self, kind: ModifierKind) -> f64 {
        self.active.get(&kind).map(|m| m.value).unwrap_or(1.0)
    }

    /// Tick every modifier once and drop the expired ones
    pub fn update(&mut self) {
        for modifier in self.active.values_mut() {
            modifier.update_duration();
        }
        self.active.retain(|_, m| !m.is_expired());
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }
}
