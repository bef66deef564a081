#![allow(dead_code)]

use std::fs;

use pacman_grid::config::GameConfig;
use pacman_grid::constants::{PACMAN_START_LIVES, PACMAN_STEP_INTERVAL};
use pacman_grid::entity::ghost::Ghost;
use pacman_grid::entity::pacman::Pacman;
use pacman_grid::events::Input;
use pacman_grid::game::Session;
use pacman_grid::map::direction::Direction;
use pacman_grid::map::Map;
use pacman_grid::save::SaveGame;
use tempfile::TempDir;

/// Builds a map sized to fit `lines` exactly.
pub fn board(lines: &[&str]) -> Map {
    let cols = lines.iter().map(|line| line.len()).max().unwrap_or(0);
    Map::parse(lines, lines.len(), cols).unwrap()
}

/// A configuration whose every file lives inside `dir`.
pub fn test_config(dir: &TempDir) -> GameConfig {
    GameConfig {
        maps_dir: dir.path().join("maps"),
        save_path: dir.path().join("game.sav"),
        ranking_path: dir.path().join("ranking.dat"),
        seed: Some(1),
        ..GameConfig::default()
    }
}

/// A session already playing `lines`, with its files redirected into a temporary directory.
pub fn session(lines: &[&str]) -> (Session, TempDir) {
    let dir = TempDir::new().unwrap();
    let session = Session::from_map(test_config(&dir), board(lines));
    (session, dir)
}

/// A session resumed from a level 1 save of `lines`, after `arrange` has edited it.
///
/// Lets a test start from any score, lives or entity layout through the public load path.
pub fn resumed(lines: &[&str], arrange: impl FnOnce(&mut SaveGame)) -> (Session, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let map = board(lines);
    let mut save = SaveGame {
        level: 1,
        score: 0,
        lives: PACMAN_START_LIVES,
        pellets_remaining: map.pellets_remaining(),
        map_path: config.level_path(1),
        pacman: Pacman::new(map.pacman_start()),
        ghosts: map.ghost_starts().iter().copied().map(Ghost::new).collect(),
        map,
    };
    arrange(&mut save);

    let path = dir.path().join("arranged.sav");
    save.write_to(&path).unwrap();
    let mut session = Session::new(config);
    session.load_game_from(&path).unwrap();
    session.drain_events();
    (session, dir)
}

/// Writes level `level` into the maps directory of `dir`.
pub fn write_level(dir: &TempDir, level: u32, lines: &[&str]) {
    let maps = dir.path().join("maps");
    fs::create_dir_all(&maps).unwrap();
    fs::write(maps.join(format!("mapa{level}.txt")), lines.join("\n")).unwrap();
}

/// Advances exactly one player step while holding `direction`.
pub fn step(session: &mut Session, direction: Direction) {
    session.update(PACMAN_STEP_INTERVAL, &Input::direction(direction));
}

/// Advances exactly one player step with no keys held.
pub fn idle_step(session: &mut Session) {
    session.update(PACMAN_STEP_INTERVAL, &Input::idle());
}
