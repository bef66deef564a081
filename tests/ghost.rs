use pacman_grid::entity::ghost::{Ghost, GhostAi};
use pacman_grid::map::direction::{Direction, GridPosition};
use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use speculoos::prelude::*;

mod common;

use common::board;

const CROSS: [&str; 5] = ["#####", "#P.##", "#...#", "##.##", "#####"];

fn ghost_at(row: i32, col: i32, direction: Option<Direction>) -> Ghost {
    let mut ghost = Ghost::new(GridPosition::new(row, col));
    ghost.direction = direction;
    ghost
}

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(3)
}

#[test]
fn test_chases_towards_player_at_junction() {
    let map = board(&CROSS);
    let ghost = ghost_at(2, 2, None);

    let dir = ghost.choose_direction(&map, GridPosition::new(0, 2), false, GhostAi::Pursuit, &mut rng());
    assert_eq!(dir, Some(Direction::Up));
}

#[test]
fn test_flees_from_powered_player() {
    let map = board(&CROSS);
    let ghost = ghost_at(2, 2, None);

    // Down, Left and Right all end three tiles away; Down is enumerated first
    let dir = ghost.choose_direction(&map, GridPosition::new(0, 2), true, GhostAi::Pursuit, &mut rng());
    assert_eq!(dir, Some(Direction::Down));
}

#[test]
fn test_does_not_reverse_at_junction() {
    let map = board(&CROSS);
    let ghost = ghost_at(2, 2, Some(Direction::Right));

    // Left would be closest, but the ghost just came from there
    let dir = ghost.choose_direction(&map, GridPosition::new(2, 0), false, GhostAi::Pursuit, &mut rng());
    assert_eq!(dir, Some(Direction::Up));
}

#[test]
fn test_keeps_going_through_corridor() {
    let map = board(&["#######", "#P....#", "#######"]);
    let ghost = ghost_at(1, 3, Some(Direction::Right));

    let dir = ghost.choose_direction(&map, GridPosition::new(1, 1), false, GhostAi::Pursuit, &mut rng());
    assert_eq!(dir, Some(Direction::Right));
}

#[test]
fn test_turns_back_in_dead_end() {
    let map = board(&["######", "#P...#", "######"]);
    let ghost = ghost_at(1, 4, Some(Direction::Right));

    let dir = ghost.choose_direction(&map, GridPosition::new(1, 1), false, GhostAi::Pursuit, &mut rng());
    assert_eq!(dir, Some(Direction::Left));
}

#[test]
fn test_boxed_in_ghost_stands_still() {
    let map = board(&["#####", "#P#F#", "#####"]);
    let ghost = ghost_at(1, 3, None);

    let dir = ghost.choose_direction(&map, GridPosition::new(1, 1), false, GhostAi::Pursuit, &mut rng());
    assert_eq!(dir, None);
}

#[test]
fn test_wander_picks_a_filtered_candidate() {
    let map = board(&CROSS);
    let ghost = ghost_at(2, 2, Some(Direction::Right));
    let mut rng = rng();

    for _ in 0..50 {
        let dir = ghost.choose_direction(&map, GridPosition::new(2, 0), false, GhostAi::Wander, &mut rng);
        assert_that(&[Some(Direction::Up), Some(Direction::Down), Some(Direction::Right)].contains(&dir)).is_true();
    }
}

#[test]
fn test_same_seed_gives_same_wander_path() {
    let map = board(&CROSS);
    let ghost = ghost_at(2, 2, None);

    let sample = |seed| {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..20)
            .map(|_| ghost.choose_direction(&map, GridPosition::new(0, 0), false, GhostAi::Wander, &mut rng))
            .collect::<Vec<_>>()
    };
    assert_eq!(sample(9), sample(9));
}

#[test]
fn test_respawn_resets_ghost() {
    let mut ghost = ghost_at(2, 2, Some(Direction::Up));
    ghost.make_vulnerable(3.0);
    ghost.move_timer = 0.1;

    ghost.respawn(GridPosition::new(1, 1));

    assert_eq!(ghost, Ghost::new(GridPosition::new(1, 1)));
}
