use std::io;
use std::path::PathBuf;

use pacman_grid::error::{GameError, GameResult, MapError, RankingError, SaveError};

#[test]
fn test_game_error_from_map_error() {
    let game_error: GameError = MapError::MissingPlayerStart.into();
    assert!(matches!(game_error, GameError::Map(MapError::MissingPlayerStart)));
}

#[test]
fn test_game_error_from_save_error() {
    let game_error: GameError = SaveError::InvalidDirection(7).into();
    assert!(matches!(game_error, GameError::Save(SaveError::InvalidDirection(7))));
}

#[test]
fn test_game_error_from_ranking_error() {
    let game_error: GameError = RankingError::InvalidLength { expected: 200, actual: 3 }.into();
    assert!(matches!(game_error, GameError::Ranking(_)));
}

#[test]
fn test_game_error_from_io_error() {
    let game_error: GameError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
    assert!(matches!(game_error, GameError::Io(_)));
}

#[test]
fn test_map_error_not_found() {
    let missing = MapError::Io {
        path: PathBuf::from("mapa9.txt"),
        source: io::Error::from(io::ErrorKind::NotFound),
    };
    let denied = MapError::Io {
        path: PathBuf::from("mapa9.txt"),
        source: io::Error::from(io::ErrorKind::PermissionDenied),
    };
    assert!(missing.is_not_found());
    assert!(!denied.is_not_found());
    assert!(!MapError::MissingPlayerStart.is_not_found());
}

#[test]
fn test_error_display() {
    let error = GameError::Save(SaveError::UnsupportedVersion { found: 9 });
    assert_eq!(error.to_string(), "Save error: Unsupported save version 9");

    let error = SaveError::Truncated {
        offset: 4,
        needed: 2,
        available: 1,
    };
    assert_eq!(
        error.to_string(),
        "Save data truncated: needed 2 bytes at offset 4, 1 available"
    );
}

#[test]
fn test_question_mark_converts() {
    fn parse() -> Result<(), MapError> {
        Err(MapError::MissingPlayerStart)
    }
    fn load() -> GameResult<()> {
        parse()?;
        Ok(())
    }
    assert!(matches!(load(), Err(GameError::Map(_))));
}
