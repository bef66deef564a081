use std::fs;

use pacman_grid::constants::ranking::{EMPTY_NAME, MAX_ENTRIES};
use pacman_grid::error::RankingError;
use pacman_grid::ranking::{Ranking, FILE_LEN};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use tempfile::TempDir;

/// Ten entries scoring 1000, 900, ..., 100.
fn full_table() -> Ranking {
    let mut ranking = Ranking::default();
    for i in 1..=10 {
        ranking.add(&format!("P{i}"), i * 100);
    }
    ranking
}

fn assert_sorted(ranking: &Ranking) {
    let scores: Vec<u32> = ranking.entries().iter().map(|entry| entry.score).collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]), "{scores:?}");
    assert_that(&ranking.entries().len()).is_equal_to(MAX_ENTRIES);
}

#[test]
fn test_default_table_is_empty_slots() {
    let ranking = Ranking::default();
    assert_that(&ranking.entries().len()).is_equal_to(MAX_ENTRIES);
    for entry in ranking.entries() {
        assert_eq!(entry.name, EMPTY_NAME);
        assert_that(&entry.score).is_equal_to(0);
    }
}

#[test]
fn test_position_requires_strictly_greater_score() {
    let ranking = full_table();
    assert_eq!(ranking.position_for_score(100), None);
    assert_eq!(ranking.position_for_score(50), None);
    assert_eq!(ranking.position_for_score(101), Some(9));
    assert_eq!(ranking.position_for_score(1000), Some(1));
    assert_eq!(ranking.position_for_score(5000), Some(0));
    assert_eq!(Ranking::default().position_for_score(0), None);
}

#[test]
fn test_insert_above_lowest_drops_it() {
    let mut ranking = full_table();

    let index = ranking.position_for_score(150).unwrap();
    assert_that(&index).is_equal_to(9);
    ranking.insert(index, "NEW", 150);

    assert_eq!(ranking.entries()[9].name, "NEW");
    assert_that(&ranking.entries()[9].score).is_equal_to(150);
    assert!(ranking.entries().iter().all(|entry| entry.score != 100));
    assert_sorted(&ranking);
}

#[test]
fn test_insert_at_top_shifts_everything_down() {
    let mut ranking = full_table();
    ranking.add("TOP", 2000);

    assert_eq!(ranking.entries()[0].name, "TOP");
    assert_eq!(ranking.entries()[1].name, "P10");
    assert_that(&ranking.entries()[9].score).is_equal_to(200);
    assert_sorted(&ranking);
}

#[test]
fn test_many_additions_keep_order_and_capacity() {
    let mut ranking = Ranking::default();
    for score in [5, 80, 20, 999, 1, 300, 300, 42, 7, 650, 12, 64, 128, 256, 3] {
        ranking.add("X", score);
        assert_sorted(&ranking);
    }
    assert_that(&ranking.entries()[0].score).is_equal_to(999);
}

#[test]
fn test_long_names_are_truncated() {
    let mut ranking = Ranking::default();
    ranking.add("ABCDEFGHIJKLMNOPQRSTUVWXYZ", 10);
    assert_eq!(ranking.entries()[0].name, "ABCDEFGHIJKLMNO");
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ranking.dat");
    let ranking = full_table();

    ranking.save(&path).unwrap();

    assert_that(&fs::metadata(&path).unwrap().len()).is_equal_to(FILE_LEN as u64);
    assert_eq!(Ranking::load(&path).unwrap(), ranking);
}

#[test]
fn test_short_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ranking.dat");
    fs::write(&path, [0u8; 12]).unwrap();

    let result = Ranking::load(&path);
    assert!(matches!(
        result,
        Err(RankingError::InvalidLength {
            expected: FILE_LEN,
            actual: 12
        })
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = Ranking::load(dir.path().join("nope.dat"));
    assert!(matches!(result, Err(RankingError::Io(_))));
}
