//! Mapping between level-file codes and entity kinds

use crate::error::ModelError;
use crate::sim::{EntityKind, Placement};

/// Code of an empty cell
pub const EMPTY_CODE: &str = "0";
/// Code of the configured player kind
pub const PLAYER_CODE: &str = "1";

const FIXED_CODES: [(&str, EntityKind); 6] = [
    ("2", EntityKind::Block),
    ("3", EntityKind::Enemy),
    ("4", EntityKind::PowerUp),
    ("5", EntityKind::Goal),
    ("6", EntityKind::PowerUpBlock),
    ("7", EntityKind::ZeroGEnemy),
];

/// Decodes level-file cells into entity kinds and back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityFactory {
    player: EntityKind,
}

impl Default for EntityFactory {
    fn default() -> Self {
        Self {
            player: EntityKind::MarioPlayer,
        }
    }
}

impl EntityFactory {
    /// Factory whose player code builds `player`
    ///
    /// Non-player kinds are rejected.
    pub fn new(player: EntityKind) -> Result<Self, ModelError> {
        if !player.is_player() {
            return Err(ModelError::InvalidConfigKey {
                key: "player".to_string(),
                value: player.as_str().to_string(),
            });
        }
        Ok(Self { player })
    }

    /// Factory for a player kind given by name, e.g. `"DoodlePlayer"`
    pub fn with_player_name(name: &str) -> Result<Self, ModelError> {
        let kind = EntityKind::from_str(name)
            .filter(EntityKind::is_player)
            .ok_or_else(|| ModelError::InvalidConfigKey {
                key: "player".to_string(),
                value: name.to_string(),
            })?;
        Ok(Self { player: kind })
    }

    pub fn player_kind(&self) -> EntityKind {
        self.player
    }

    /// Kind for a code; `None` for empty or unknown cells
    pub fn decode(&self, code: &str) -> Option<EntityKind> {
        let code = code.trim();
        if code == PLAYER_CODE {
            return Some(self.player);
        }
        FIXED_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, kind)| *kind)
    }

    /// Placement for a code at a tile position
    pub fn create_placement(&self, code: &str, x: f64, y: f64) -> Option<Placement> {
        self.decode(code).map(|kind| Placement::new(kind, x, y))
    }

    /// Code written back for a kind; any player kind saves as the player code
    pub fn code_for(&self, kind: EntityKind) -> &'static str {
        if kind.is_player() {
            return PLAYER_CODE;
        }
        FIXED_CODES
            .iter()
            .find(|(_, k)| *k == kind)
            .map(|(code, _)| *code)
            .unwrap_or(EMPTY_CODE)
    }
}
