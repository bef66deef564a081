//! Centralized error types for the game.
//!
//! Every fallible operation in the library returns a [`GameResult`]. The
//! per-area enums convert into [`GameError`] through `#[from]`, so callers can
//! propagate with `?` and still match on the specific failure when needed.

use std::io;
use std::path::PathBuf;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("Save error: {0}")]
    Save(#[from] SaveError),

    #[error("Ranking error: {0}")]
    Ranking(#[from] RankingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors raised while loading a level file.
#[derive(thiserror::Error, Debug)]
pub enum MapError {
    #[error("Could not read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Board has no player start ('P')")]
    MissingPlayerStart,

    #[error("Board dimensions must be non-zero, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
}

impl MapError {
    /// Whether the level file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MapError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Errors raised by the save-game codec.
#[derive(thiserror::Error, Debug)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Not a save file (magic {found:#010x})")]
    InvalidMagic { found: u32 },

    #[error("Unsupported save version {found}")]
    UnsupportedVersion { found: u16 },

    #[error("Save data truncated: needed {needed} bytes at offset {offset}, {available} available")]
    Truncated { offset: usize, needed: usize, available: usize },

    #[error("Save data has {extra} unexpected trailing bytes")]
    TrailingBytes { extra: usize },

    #[error("Invalid direction byte {0}")]
    InvalidDirection(u8),

    #[error("Invalid map dimensions {rows}x{cols}")]
    InvalidDimensions { rows: u32, cols: u32 },

    #[error("Position ({row}, {col}) lies outside the saved map")]
    PositionOutOfBounds { row: i32, col: i32 },

    #[error("Position ({row}, {col}) lies on a wall")]
    PositionOnWall { row: i32, col: i32 },

    #[error("Saved map path is not valid UTF-8")]
    InvalidPath,
}

/// Errors raised by the ranking file.
#[derive(thiserror::Error, Debug)]
pub enum RankingError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Ranking file has {actual} bytes, expected {expected}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Errors raised while reading configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{0}")]
    Extract(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::Extract(Box::new(error))
    }
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
