//! Player input flags and the commands that toggle them
//!
//! The level reads these flags once per step; it never sees raw key events.

use serde::{Deserialize, Serialize};

/// Discrete input actions, usually bound to key press/release pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    PauseGame,
    ResumeGame,
    StartMovingPlayerLeft,
    StopMovingPlayerLeft,
    StartMovingPlayerRight,
    StopMovingPlayerRight,
    StartPlayerJumping,
    StopPlayerJumping,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::PauseGame,
        Command::ResumeGame,
        Command::StartMovingPlayerLeft,
        Command::StopMovingPlayerLeft,
        Command::StartMovingPlayerRight,
        Command::StopMovingPlayerRight,
        Command::StartPlayerJumping,
        Command::StopPlayerJumping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::PauseGame => "PauseGame",
            Command::ResumeGame => "ResumeGame",
            Command::StartMovingPlayerLeft => "StartMovingPlayerLeft",
            Command::StopMovingPlayerLeft => "StopMovingPlayerLeft",
            Command::StartMovingPlayerRight => "StartMovingPlayerRight",
            Command::StopMovingPlayerRight => "StopMovingPlayerRight",
            Command::StartPlayerJumping => "StartPlayerJumping",
            Command::StopPlayerJumping => "StopPlayerJumping",
        }
    }

    /// Parse a command name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|command| command.as_str().eq_ignore_ascii_case(s))
    }
}

/// Key state as seen by the level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPressFunctions {
    paused: bool,
    moving_left: bool,
    moving_right: bool,
    jumping: bool,
}

impl KeyPressFunctions {
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::PauseGame => self.paused = true,
            Command::ResumeGame => self.paused = false,
            Command::StartMovingPlayerLeft => self.moving_left = true,
            Command::StopMovingPlayerLeft => self.moving_left = false,
            Command::StartMovingPlayerRight => self.moving_right = true,
            Command::StopMovingPlayerRight => self.moving_right = false,
            Command::StartPlayerJumping => self.jumping = true,
            Command::StopPlayerJumping => self.jumping = false,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_moving_left(&self) -> bool {
        self.moving_left
    }

    pub fn is_moving_right(&self) -> bool {
        self.moving_right
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    /// Release every movement key (pause state is kept)
    pub fn release_all(&mut self) {
        self.moving_left = false;
        self.moving_right = false;
        self.jumping = false;
    }
}
