use pacman_grid::constants::{score, GHOST_STEP_INTERVAL_VULNERABLE, POWER_MODE_DURATION};
use pacman_grid::events::{GameEvent, Input};
use pacman_grid::map::direction::{Direction, GridPosition};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

use common::{resumed, session, step};

// The ghost is walled in so it never reaches the player.
const BOARD: [&str; 3] = ["##########", "#Po.o.#F##", "##########"];

#[test]
fn test_power_pellet_sets_same_duration_everywhere() {
    let (mut session, _dir) = session(&BOARD);

    step(&mut session, Direction::Right);

    assert_that(&session.score()).is_equal_to(score::POWER_PELLET);
    let pacman = session.pacman();
    assert!(pacman.powered);
    assert_eq!(pacman.power_time_left, POWER_MODE_DURATION);
    for ghost in session.ghosts() {
        assert!(ghost.vulnerable);
        assert_eq!(ghost.vulnerable_time_left, pacman.power_time_left);
    }
    assert!(session.drain_events().contains(&GameEvent::PowerPelletEaten));
}

#[test]
fn test_power_mode_expires_after_duration() {
    // A single power pellet, plus one out of reach so the level never clears
    let (mut session, _dir) = session(&["########", "#Po..#F#", "#######."]);
    step(&mut session, Direction::Right);

    session.update(POWER_MODE_DURATION / 2.0, &Input::idle());
    assert!(session.pacman().powered);
    assert!(session.ghosts()[0].vulnerable);

    session.update(POWER_MODE_DURATION / 2.0, &Input::idle());
    assert!(!session.pacman().powered);
    assert_eq!(session.pacman().power_time_left, 0.0);
    for ghost in session.ghosts() {
        assert!(!ghost.vulnerable);
        assert_eq!(ghost.vulnerable_time_left, 0.0);
    }
}

#[test]
fn test_second_power_pellet_restarts_timer() {
    let (mut session, _dir) = session(&BOARD);
    step(&mut session, Direction::Right);
    step(&mut session, Direction::Right);

    let before = session.pacman().power_time_left;
    assert!(before < POWER_MODE_DURATION);

    step(&mut session, Direction::Right);
    assert_eq!(session.pacman().position, GridPosition::new(1, 4));
    assert_eq!(session.pacman().power_time_left, POWER_MODE_DURATION);
    assert_eq!(session.ghosts()[0].vulnerable_time_left, POWER_MODE_DURATION);
}

#[test]
fn test_vulnerable_ghost_moves_slower() {
    let (mut session, _dir) = session(&["#########", "#Po....F#", "#########"]);
    step(&mut session, Direction::Right);
    let start = session.ghosts()[0].position;

    // Not enough time for a vulnerable step
    session.update(GHOST_STEP_INTERVAL_VULNERABLE / 4.0, &Input::idle());
    assert_eq!(session.ghosts()[0].position, start);
}

#[test]
fn test_power_reaches_dead_ghosts_and_expires_on_them() {
    // One pellet out of reach keeps the level from clearing
    let (mut session, _dir) = resumed(&["######", "#Po#F#", "#####."], |save| save.ghosts[0].kill());

    step(&mut session, Direction::Right);

    let ghost = &session.ghosts()[0];
    assert!(!ghost.alive);
    assert!(ghost.vulnerable);
    assert_eq!(ghost.vulnerable_time_left, session.pacman().power_time_left);

    session.update(POWER_MODE_DURATION, &Input::idle());
    assert!(!session.pacman().powered);
    assert!(!session.ghosts()[0].vulnerable);
    assert_eq!(session.ghosts()[0].vulnerable_time_left, 0.0);
}
