//! Error types for level construction
//!
//! Everything fallible happens before a level exists; once built, a level
//! steps without errors.

use std::path::PathBuf;

use thiserror::Error;

/// Coarse failure category, suitable for picking a user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelErrorReason {
    InvalidConfigKey,
    InvalidConfigFile,
    FileNotFound,
    Directory,
    NotAFile,
    WrongExtension,
    MalformedArguments,
    GenerationFailed,
    Io,
}

/// Errors raised while loading configuration, levels and scrollers
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid value {value:?} for configuration key {key:?}")]
    InvalidConfigKey { key: String, value: String },

    #[error("invalid configuration file {path}: {message}")]
    InvalidConfigFile { path: PathBuf, message: String },

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("expected a file, found a directory: {0}")]
    Directory(PathBuf),

    #[error("not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("expected a .{expected} file: {path}")]
    WrongExtension {
        path: PathBuf,
        expected: &'static str,
    },

    #[error("malformed scroller arguments {args:?}: {message}")]
    MalformedScroller { args: String, message: String },

    #[error("level generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ModelError {
    pub fn reason(&self) -> ModelErrorReason {
        match self {
            ModelError::InvalidConfigKey { .. } => ModelErrorReason::InvalidConfigKey,
            ModelError::InvalidConfigFile { .. } => ModelErrorReason::InvalidConfigFile,
            ModelError::FileNotFound(_) => ModelErrorReason::FileNotFound,
            ModelError::Directory(_) => ModelErrorReason::Directory,
            ModelError::NotAFile(_) => ModelErrorReason::NotAFile,
            ModelError::WrongExtension { .. } => ModelErrorReason::WrongExtension,
            ModelError::MalformedScroller { .. } => ModelErrorReason::MalformedArguments,
            ModelError::Generation(_) => ModelErrorReason::GenerationFailed,
            ModelError::Io(_) => ModelErrorReason::Io,
        }
    }
}

/// Errors raised while reading a chunk generation specification
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid generation spec: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to build instruction: {0}")]
    Instruction(String),

    #[error("failed to build randomizer from {0:?}")]
    Randomizer(String),

    #[error("malformed growth direction {0:?}")]
    Direction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reasons() {
        let err = ModelError::WrongExtension {
            path: PathBuf::from("level.txt"),
            expected: "csv",
        };
        assert_eq!(err.reason(), ModelErrorReason::WrongExtension);
        assert!(err.to_string().contains("level.txt"));

        let err: ModelError = GenerationError::Randomizer("R(1;".into()).into();
        assert_eq!(err.reason(), ModelErrorReason::GenerationFailed);
    }
}
