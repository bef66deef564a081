//! The top-ten score table and its on-disk record layout.
//!
//! The file is a flat array of [`MAX_ENTRIES`] records, each a 16-byte NUL-padded
//! name followed by a little-endian `i32` score, read and written as one block.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::constants::ranking::{EMPTY_NAME, MAX_ENTRIES, NAME_LEN};
use crate::error::RankingError;

/// Bytes in one on-disk record.
pub const RECORD_LEN: usize = NAME_LEN + 4;
/// Bytes in a complete ranking file.
pub const FILE_LEN: usize = RECORD_LEN * MAX_ENTRIES;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingEntry {
    pub name: String,
    pub score: u32,
}

impl Default for RankingEntry {
    fn default() -> Self {
        Self {
            name: EMPTY_NAME.to_string(),
            score: 0,
        }
    }
}

/// Scores sorted from highest to lowest; always exactly [`MAX_ENTRIES`] long.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ranking {
    entries: [RankingEntry; MAX_ENTRIES],
}

impl Ranking {
    pub fn entries(&self) -> &[RankingEntry] {
        &self.entries
    }

    /// The slot `score` would take, or `None` if it does not beat any entry.
    ///
    /// A score has to be strictly greater than an entry to displace it.
    pub fn position_for_score(&self, score: u32) -> Option<usize> {
        self.entries.iter().position(|entry| score > entry.score)
    }

    /// Inserts at `index`, shifting lower entries down and dropping the last one.
    ///
    /// The name is cut to fit the record. Out-of-range indices are ignored.
    pub fn insert(&mut self, index: usize, name: &str, score: u32) {
        if index >= MAX_ENTRIES {
            return;
        }
        self.entries[index..].rotate_right(1);
        self.entries[index] = RankingEntry {
            name: truncate_name(name).to_string(),
            score,
        };
    }

    /// Inserts `score` at its rank, returning the slot used.
    pub fn add(&mut self, name: &str, score: u32) -> Option<usize> {
        let index = self.position_for_score(score)?;
        self.insert(index, name, score);
        Some(index)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(FILE_LEN);
        for entry in &self.entries {
            let mut name = [0u8; NAME_LEN];
            let raw = truncate_name(&entry.name).as_bytes();
            name[..raw.len()].copy_from_slice(raw);
            bytes.extend_from_slice(&name);
            let score = i32::try_from(entry.score).unwrap_or(i32::MAX);
            bytes.extend_from_slice(&score.to_le_bytes());
        }
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RankingError> {
        if bytes.len() != FILE_LEN {
            return Err(RankingError::InvalidLength {
                expected: FILE_LEN,
                actual: bytes.len(),
            });
        }

        let mut ranking = Ranking::default();
        for (entry, record) in ranking.entries.iter_mut().zip(bytes.chunks_exact(RECORD_LEN)) {
            let (name, score) = record.split_at(NAME_LEN);
            let end = name.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
            entry.name = String::from_utf8_lossy(&name[..end]).into_owned();
            let score = i32::from_le_bytes([score[0], score[1], score[2], score[3]]);
            entry.score = u32::try_from(score).unwrap_or(0);
        }
        Ok(ranking)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RankingError> {
        let path = path.as_ref();
        let ranking = Self::from_bytes(&fs::read(path)?)?;
        debug!(path = %path.display(), "Loaded ranking");
        Ok(ranking)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RankingError> {
        let path = path.as_ref();
        fs::write(path, self.to_bytes())?;
        info!(path = %path.display(), "Saved ranking");
        Ok(())
    }
}

/// Longest prefix of `name` that fits a record with its terminator.
fn truncate_name(name: &str) -> &str {
    let max = NAME_LEN - 1;
    if name.len() <= max {
        return name;
    }
    let mut end = max;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}
