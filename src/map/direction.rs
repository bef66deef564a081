use glam::IVec2;
use strum_macros::AsRefStr;

/// The four cardinal directions.
///
/// "No direction" is `Option<Direction>::None` wherever an entity may stand still.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The four cardinal directions, in the order ghosts enumerate (and break ties on) them.
    pub const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Returns the opposite direction. Constant time.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the direction as a grid offset, `x` being the column and `y` the row.
    pub fn as_ivec2(self) -> IVec2 {
        self.into()
    }

    /// Stable byte code used by the save format; `0` is reserved for "no direction".
    pub const fn to_byte(dir: Option<Direction>) -> u8 {
        match dir {
            None => 0,
            Some(Direction::Up) => 1,
            Some(Direction::Down) => 2,
            Some(Direction::Left) => 3,
            Some(Direction::Right) => 4,
        }
    }

    /// Inverse of [`Direction::to_byte`]. Unknown codes yield `Err` with the offending byte.
    pub const fn from_byte(byte: u8) -> Result<Option<Direction>, u8> {
        match byte {
            0 => Ok(None),
            1 => Ok(Some(Direction::Up)),
            2 => Ok(Some(Direction::Down)),
            3 => Ok(Some(Direction::Left)),
            4 => Ok(Some(Direction::Right)),
            other => Err(other),
        }
    }
}

impl From<Direction> for IVec2 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => -IVec2::Y,
            Direction::Down => IVec2::Y,
            Direction::Left => -IVec2::X,
            Direction::Right => IVec2::X,
        }
    }
}

/// A (row, col) cell coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPosition {
    pub row: i32,
    pub col: i32,
}

impl GridPosition {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell in `dir`, or the same cell for no direction.
    pub fn step(self, dir: Option<Direction>) -> GridPosition {
        match dir {
            Some(dir) => {
                let offset = dir.as_ivec2();
                GridPosition::new(self.row + offset.y, self.col + offset.x)
            }
            None => self,
        }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(self, other: GridPosition) -> u32 {
        let delta = (IVec2::new(self.col, self.row) - IVec2::new(other.col, other.row)).abs();
        (delta.x + delta.y) as u32
    }

    /// Whether the two cells share a row or a column.
    pub fn shares_axis(self, other: GridPosition) -> bool {
        self.row == other.row || self.col == other.col
    }
}
