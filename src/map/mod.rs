//! This module defines the game map and provides functions for interacting with it.
//!
//! A [`Map`] is created wholesale from one level file and replaced on every level
//! change. The only mutation it sees during play is pellet consumption.

pub mod direction;
pub mod parser;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::constants::{MAP_COLS, MAP_ROWS};
use crate::error::MapError;
use direction::{Direction, GridPosition};
use parser::{MapTileParser, ParsedMap, Tile};

/// The grid of one level plus the special tiles found while loading it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Map {
    rows: usize,
    cols: usize,
    cells: Vec<Tile>,
    pacman_start: GridPosition,
    ghost_starts: Vec<GridPosition>,
    portals: Vec<GridPosition>,
    pellets_initial: u32,
    pellets_remaining: u32,
}

impl From<ParsedMap> for Map {
    fn from(parsed: ParsedMap) -> Self {
        Self {
            rows: parsed.rows,
            cols: parsed.cols,
            cells: parsed.tiles,
            pacman_start: parsed.pacman_start,
            ghost_starts: parsed.ghost_starts,
            portals: parsed.portals,
            pellets_initial: parsed.pellets,
            pellets_remaining: parsed.pellets,
        }
    }
}

impl Map {
    /// Loads a level file as a `MAP_ROWS` x `MAP_COLS` grid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lines: Vec<&str> = text.lines().collect();
        let map = Self::parse(&lines, MAP_ROWS, MAP_COLS)?;
        debug!(
            path = %path.display(),
            pellets = map.pellets_initial,
            ghosts = map.ghost_starts.len(),
            portals = map.portals.len(),
            "Loaded level file"
        );
        Ok(map)
    }

    /// Builds a map of arbitrary size from in-memory lines.
    pub fn parse<S: AsRef<str>>(lines: &[S], rows: usize, cols: usize) -> Result<Self, MapError> {
        MapTileParser::parse_board(lines, rows, cols).map(Map::from)
    }

    /// Rebuilds a map from previously saved parts.
    ///
    /// The remaining-pellet count is recomputed from `cells`, which stays authoritative.
    pub(crate) fn from_saved(
        rows: usize,
        cols: usize,
        cells: Vec<Tile>,
        pacman_start: GridPosition,
        ghost_starts: Vec<GridPosition>,
        portals: Vec<GridPosition>,
        pellets_initial: u32,
    ) -> Self {
        let mut map = Self {
            rows,
            cols,
            cells,
            pacman_start,
            ghost_starts,
            portals,
            pellets_initial,
            pellets_remaining: 0,
        };
        map.pellets_remaining = map.count_pellets();
        map
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major tiles.
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    pub fn pacman_start(&self) -> GridPosition {
        self.pacman_start
    }

    pub fn ghost_starts(&self) -> &[GridPosition] {
        &self.ghost_starts
    }

    pub fn portals(&self) -> &[GridPosition] {
        &self.portals
    }

    pub fn pellets_initial(&self) -> u32 {
        self.pellets_initial
    }

    pub fn pellets_remaining(&self) -> u32 {
        self.pellets_remaining
    }

    fn index(&self, pos: GridPosition) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.row as usize * self.cols + pos.col as usize)
    }

    pub fn in_bounds(&self, pos: GridPosition) -> bool {
        pos.row >= 0 && (pos.row as usize) < self.rows && pos.col >= 0 && (pos.col as usize) < self.cols
    }

    /// The tile at `pos`, or [`Tile::Empty`] outside the grid.
    pub fn get(&self, pos: GridPosition) -> Tile {
        self.index(pos).map_or(Tile::Empty, |i| self.cells[i])
    }

    /// Overwrites the tile at `pos`; does nothing outside the grid.
    ///
    /// The pellet counters are not touched; use [`Map::consume_pellet`] during play.
    pub fn set(&mut self, pos: GridPosition, tile: Tile) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = tile;
        }
    }

    /// A move is legal iff the destination is inside the grid and not a wall.
    pub fn is_legal_move(&self, from: GridPosition, dir: Option<Direction>) -> bool {
        let Some(dir) = dir else {
            return false;
        };
        let next = from.step(Some(dir));
        self.in_bounds(next) && !self.get(next).is_wall()
    }

    /// Clears a pellet at `pos`, returning which kind was eaten.
    ///
    /// The remaining count never drops below zero.
    pub fn consume_pellet(&mut self, pos: GridPosition) -> Option<Tile> {
        let tile = self.get(pos);
        if !tile.is_pellet() {
            return None;
        }
        self.set(pos, Tile::Empty);
        self.pellets_remaining = self.pellets_remaining.saturating_sub(1);
        Some(tile)
    }

    /// Where an entity standing on `pos` is teleported to, if anywhere.
    ///
    /// Only portal tiles teleport, and only when the map has at least two portals. The
    /// exit is the first other portal in scan order sharing a row or column with `pos`;
    /// failing that, the last other portal scanned.
    pub fn portal_exit(&self, pos: GridPosition) -> Option<GridPosition> {
        if self.get(pos) != Tile::Portal || self.portals.len() < 2 {
            return None;
        }

        let mut fallback = None;
        for &portal in self.portals.iter().filter(|&&portal| portal != pos) {
            if portal.shares_axis(pos) {
                return Some(portal);
            }
            fallback = Some(portal);
        }
        fallback
    }

    /// Counts pellet tiles actually present in the grid.
    pub fn count_pellets(&self) -> u32 {
        self.cells.iter().filter(|tile| tile.is_pellet()).count() as u32
    }
}
