//! Save-game codec.
//!
//! Layout (little-endian, fixed width):
//!   HEADER: magic `PMSV`, version (u16), reserved (u16), then level, score, lives,
//!           pellets remaining, pellets initial, rows, cols, ghost count and portal
//!           count (u32 each)
//!   PLAYER: position and start (i32 pairs), direction, pending direction, powered,
//!           reserved (u8 each), power time left and step timer (f32)
//!   MAP:    128-byte NUL-padded path, `rows * cols` level-file characters, ghost
//!           starts and portals (i32 pairs)
//!   GHOSTS: one record per ghost: position (i32 pair), direction, vulnerable, alive,
//!           reserved (u8 each), vulnerable time left and step timer (f32)

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::entity::ghost::Ghost;
use crate::entity::pacman::Pacman;
use crate::error::SaveError;
use crate::map::direction::{Direction, GridPosition};
use crate::map::parser::MapTileParser;
use crate::map::Map;

pub const SAVE_MAGIC: [u8; 4] = *b"PMSV";
pub const SAVE_VERSION: u16 = 1;
/// Bytes reserved for the level file path, terminator included.
pub const PATH_LEN: usize = 128;
/// Largest row or column count accepted when decoding.
const MAX_DIMENSION: u32 = 1024;

/// Everything needed to resume a game exactly where it was left.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveGame {
    pub level: u32,
    pub score: u32,
    pub lives: u32,
    /// Written for reference; decoding recomputes it from the grid.
    pub pellets_remaining: u32,
    pub map_path: PathBuf,
    pub map: Map,
    pub pacman: Pacman,
    /// One per entry in the map's ghost starts, in the same order.
    pub ghosts: Vec<Ghost>,
}

impl SaveGame {
    pub fn encode(&self) -> Result<Vec<u8>, SaveError> {
        let path = self.map_path.to_str().ok_or(SaveError::InvalidPath)?;
        if path.len() >= PATH_LEN {
            return Err(SaveError::InvalidPath);
        }
        let map = &self.map;
        let cells = map.rows() * map.cols();
        let mut out = Vec::with_capacity(96 + PATH_LEN + cells + 24 * self.ghosts.len());

        out.extend_from_slice(&SAVE_MAGIC);
        put_u16(&mut out, SAVE_VERSION);
        put_u16(&mut out, 0);
        for value in [
            self.level,
            self.score,
            self.lives,
            self.pellets_remaining,
            map.pellets_initial(),
            map.rows() as u32,
            map.cols() as u32,
            self.ghosts.len() as u32,
            map.portals().len() as u32,
        ] {
            put_u32(&mut out, value);
        }

        let pacman = &self.pacman;
        put_position(&mut out, pacman.position);
        put_position(&mut out, map.pacman_start());
        out.extend_from_slice(&[
            Direction::to_byte(pacman.direction),
            Direction::to_byte(pacman.pending_direction),
            pacman.powered as u8,
            0,
        ]);
        put_f32(&mut out, pacman.power_time_left);
        put_f32(&mut out, pacman.move_timer);

        let mut path_buf = [0u8; PATH_LEN];
        path_buf[..path.len()].copy_from_slice(path.as_bytes());
        out.extend_from_slice(&path_buf);

        out.extend(map.cells().iter().map(|tile| tile.as_char() as u8));
        for index in 0..self.ghosts.len() {
            put_position(&mut out, map.ghost_starts().get(index).copied().unwrap_or_default());
        }
        for &portal in map.portals() {
            put_position(&mut out, portal);
        }

        for ghost in &self.ghosts {
            put_position(&mut out, ghost.position);
            out.extend_from_slice(&[
                Direction::to_byte(ghost.direction),
                ghost.vulnerable as u8,
                ghost.alive as u8,
                0,
            ]);
            put_f32(&mut out, ghost.vulnerable_time_left);
            put_f32(&mut out, ghost.move_timer);
        }

        Ok(out)
    }

    /// Decodes and validates a complete save.
    pub fn decode(data: &[u8]) -> Result<Self, SaveError> {
        let mut reader = Reader::new(data);

        let magic = reader.take(4)?;
        if magic != SAVE_MAGIC {
            return Err(SaveError::InvalidMagic {
                found: u32::from_le_bytes([magic[0], magic[1], magic[2], magic[3]]),
            });
        }
        let version = reader.u16()?;
        if version != SAVE_VERSION {
            return Err(SaveError::UnsupportedVersion { found: version });
        }
        reader.u16()?;

        let level = reader.u32()?;
        let score = reader.u32()?;
        let lives = reader.u32()?;
        let pellets_remaining = reader.u32()?;
        let pellets_initial = reader.u32()?;
        let rows = reader.u32()?;
        let cols = reader.u32()?;
        let ghost_count = reader.u32()? as usize;
        let portal_count = reader.u32()? as usize;

        if rows == 0 || cols == 0 || rows > MAX_DIMENSION || cols > MAX_DIMENSION {
            return Err(SaveError::InvalidDimensions { rows, cols });
        }
        let (rows, cols) = (rows as usize, cols as usize);
        let in_bounds = |pos: GridPosition| -> Result<GridPosition, SaveError> {
            if pos.row >= 0 && (pos.row as usize) < rows && pos.col >= 0 && (pos.col as usize) < cols {
                Ok(pos)
            } else {
                Err(SaveError::PositionOutOfBounds {
                    row: pos.row,
                    col: pos.col,
                })
            }
        };

        let position = in_bounds(reader.position()?)?;
        let pacman_start = in_bounds(reader.position()?)?;
        let direction = reader.direction()?;
        let pending_direction = reader.direction()?;
        let powered = reader.u8()? != 0;
        reader.u8()?;
        let pacman = Pacman {
            position,
            direction,
            pending_direction,
            powered,
            power_time_left: reader.f32()?,
            move_timer: reader.f32()?,
        };

        let raw_path = reader.take(PATH_LEN)?;
        let end = raw_path.iter().position(|&b| b == 0).unwrap_or(PATH_LEN);
        let map_path = std::str::from_utf8(&raw_path[..end])
            .map(PathBuf::from)
            .map_err(|_| SaveError::InvalidPath)?;

        let cells = reader
            .take(rows * cols)?
            .iter()
            .map(|&b| MapTileParser::parse_character(b as char))
            .collect();

        let ghost_starts = (0..ghost_count)
            .map(|_| reader.position().and_then(in_bounds))
            .collect::<Result<Vec<_>, _>>()?;
        let portals = (0..portal_count)
            .map(|_| reader.position().and_then(in_bounds))
            .collect::<Result<Vec<_>, _>>()?;

        let mut ghosts = Vec::with_capacity(ghost_count.min(reader.remaining()));
        for _ in 0..ghost_count {
            let position = in_bounds(reader.position()?)?;
            let direction = reader.direction()?;
            let vulnerable = reader.u8()? != 0;
            let alive = reader.u8()? != 0;
            reader.u8()?;
            ghosts.push(Ghost {
                position,
                direction,
                vulnerable,
                alive,
                vulnerable_time_left: reader.f32()?,
                move_timer: reader.f32()?,
            });
        }

        reader.finish()?;

        let map = Map::from_saved(rows, cols, cells, pacman_start, ghost_starts, portals, pellets_initial);

        // Entities may only stand where they could have walked.
        let occupied = [pacman.position, map.pacman_start()]
            .into_iter()
            .chain(ghosts.iter().map(|ghost| ghost.position));
        for pos in occupied {
            if map.get(pos).is_wall() {
                return Err(SaveError::PositionOnWall {
                    row: pos.row,
                    col: pos.col,
                });
            }
        }

        if map.pellets_remaining() != pellets_remaining {
            debug!(
                stored = pellets_remaining,
                counted = map.pellets_remaining(),
                "Saved pellet count disagrees with grid, using grid"
            );
        }

        Ok(SaveGame {
            level,
            score,
            lives,
            pellets_remaining: map.pellets_remaining(),
            map_path,
            map,
            pacman,
            ghosts,
        })
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        fs::write(path, self.encode()?)?;
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, SaveError> {
        Self::decode(&fs::read(path)?)
    }
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_f32(out: &mut Vec<u8>, value: f32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_position(out: &mut Vec<u8>, pos: GridPosition) {
    out.extend_from_slice(&pos.row.to_le_bytes());
    out.extend_from_slice(&pos.col.to_le_bytes());
}

/// Bounds-checked cursor over the encoded bytes.
struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], SaveError> {
        if len > self.remaining() {
            return Err(SaveError::Truncated {
                offset: self.offset,
                needed: len,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], SaveError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    fn u8(&mut self) -> Result<u8, SaveError> {
        Ok(self.array::<1>()?[0])
    }

    fn u16(&mut self) -> Result<u16, SaveError> {
        self.array().map(u16::from_le_bytes)
    }

    fn u32(&mut self) -> Result<u32, SaveError> {
        self.array().map(u32::from_le_bytes)
    }

    fn i32(&mut self) -> Result<i32, SaveError> {
        self.array().map(i32::from_le_bytes)
    }

    fn f32(&mut self) -> Result<f32, SaveError> {
        self.array().map(f32::from_le_bytes)
    }

    fn position(&mut self) -> Result<GridPosition, SaveError> {
        Ok(GridPosition::new(self.i32()?, self.i32()?))
    }

    fn direction(&mut self) -> Result<Option<Direction>, SaveError> {
        let byte = self.u8()?;
        Direction::from_byte(byte).map_err(SaveError::InvalidDirection)
    }

    fn finish(self) -> Result<(), SaveError> {
        match self.remaining() {
            0 => Ok(()),
            extra => Err(SaveError::TrailingBytes { extra }),
        }
    }
}
