//! Map parsing functionality for converting raw level text into structured data.

use tracing::trace;

use crate::error::MapError;
use crate::map::direction::GridPosition;

/// One grid cell's symbolic content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tile {
    /// Walkable floor. Consumed pellets and out-of-bounds reads both come back as this.
    #[default]
    Empty,
    Wall,
    Pellet,
    PowerPellet,
    Portal,
    PlayerStart,
    GhostStart,
}

impl Tile {
    /// The level-file character for this tile.
    pub const fn as_char(self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Wall => '#',
            Tile::Pellet => '.',
            Tile::PowerPellet => 'o',
            Tile::Portal => 'T',
            Tile::PlayerStart => 'P',
            Tile::GhostStart => 'F',
        }
    }

    pub const fn is_wall(self) -> bool {
        matches!(self, Tile::Wall)
    }

    /// Regular and power pellets both count towards clearing a level.
    pub const fn is_pellet(self) -> bool {
        matches!(self, Tile::Pellet | Tile::PowerPellet)
    }
}

/// Represents the parsed data from a raw level layout.
#[derive(Debug, Clone)]
pub struct ParsedMap {
    pub rows: usize,
    pub cols: usize,
    /// Row-major tiles, `rows * cols` long.
    pub tiles: Vec<Tile>,
    pub pacman_start: GridPosition,
    /// Ghost start tiles in row-major scan order.
    pub ghost_starts: Vec<GridPosition>,
    /// Portal tiles in row-major scan order.
    pub portals: Vec<GridPosition>,
    pub pellets: u32,
}

/// Parser for converting raw level layouts into structured map data.
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into a map tile.
    ///
    /// Anything outside the level vocabulary is floor.
    pub fn parse_character(c: char) -> Tile {
        match c {
            '#' => Tile::Wall,
            '.' => Tile::Pellet,
            'o' => Tile::PowerPellet,
            'T' => Tile::Portal,
            'P' => Tile::PlayerStart,
            'F' => Tile::GhostStart,
            _ => Tile::Empty,
        }
    }

    /// Parses a raw layout into a `rows` x `cols` grid.
    ///
    /// Short lines and missing rows are filled with floor, longer lines and extra rows
    /// are ignored, and a trailing `\r` is stripped.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero or the board has no `P` tile.
    /// When several `P` tiles exist, the last one in scan order is the start.
    pub fn parse_board<S: AsRef<str>>(lines: &[S], rows: usize, cols: usize) -> Result<ParsedMap, MapError> {
        if rows == 0 || cols == 0 {
            return Err(MapError::InvalidDimensions { rows, cols });
        }

        let mut tiles = vec![Tile::Empty; rows * cols];
        let mut pacman_start = None;
        let mut ghost_starts = Vec::new();
        let mut portals = Vec::new();
        let mut pellets = 0;

        for (row, line) in lines.iter().take(rows).enumerate() {
            let line = line.as_ref().trim_end_matches(['\r', '\n']);
            for (col, character) in line.chars().take(cols).enumerate() {
                let tile = Self::parse_character(character);
                let position = GridPosition::new(row as i32, col as i32);

                match tile {
                    Tile::PlayerStart => pacman_start = Some(position),
                    Tile::GhostStart => ghost_starts.push(position),
                    Tile::Portal => portals.push(position),
                    Tile::Pellet | Tile::PowerPellet => pellets += 1,
                    _ => {}
                }

                tiles[row * cols + col] = tile;
            }
        }

        let pacman_start = pacman_start.ok_or(MapError::MissingPlayerStart)?;
        trace!(
            rows,
            cols,
            ghosts = ghost_starts.len(),
            portals = portals.len(),
            pellets,
            "Parsed board"
        );

        Ok(ParsedMap {
            rows,
            cols,
            tiles,
            pacman_start,
            ghost_starts,
            portals,
            pellets,
        })
    }
}
