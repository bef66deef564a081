use glam::IVec2;
use pacman_grid::map::direction::*;
use pretty_assertions::assert_eq;

#[test]
fn test_direction_opposite() {
    let test_cases = [
        (Direction::Up, Direction::Down),
        (Direction::Down, Direction::Up),
        (Direction::Left, Direction::Right),
        (Direction::Right, Direction::Left),
    ];

    for (dir, expected) in test_cases {
        assert_eq!(dir.opposite(), expected);
        assert_eq!(dir.opposite().opposite(), dir);
    }
}

#[test]
fn test_direction_as_ivec2() {
    let test_cases = [
        (Direction::Up, -IVec2::Y),
        (Direction::Down, IVec2::Y),
        (Direction::Left, -IVec2::X),
        (Direction::Right, IVec2::X),
    ];

    for (dir, expected) in test_cases {
        assert_eq!(dir.as_ivec2(), expected);
        assert_eq!(IVec2::from(dir), expected);
    }
}

#[test]
fn test_grid_step_moves_rows_and_columns() {
    let origin = GridPosition::new(5, 5);
    assert_eq!(origin.step(Some(Direction::Up)), GridPosition::new(4, 5));
    assert_eq!(origin.step(Some(Direction::Down)), GridPosition::new(6, 5));
    assert_eq!(origin.step(Some(Direction::Left)), GridPosition::new(5, 4));
    assert_eq!(origin.step(Some(Direction::Right)), GridPosition::new(5, 6));
    assert_eq!(origin.step(None), origin);
}

#[test]
fn test_manhattan_distance() {
    assert_eq!(GridPosition::new(0, 0).manhattan(GridPosition::new(3, -4)), 7);
    assert_eq!(GridPosition::new(2, 2).manhattan(GridPosition::new(2, 2)), 0);
}

#[test]
fn test_direction_byte_codes() {
    assert_eq!(Direction::to_byte(None), 0);
    for dir in Direction::DIRECTIONS {
        let byte = Direction::to_byte(Some(dir));
        assert_eq!(Direction::from_byte(byte), Ok(Some(dir)));
    }
    assert_eq!(Direction::from_byte(5), Err(5));
}
