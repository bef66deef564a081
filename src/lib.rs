//! Grid-based Pac-Man game library crate.

pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod input;
pub mod map;
pub mod ranking;
pub mod render;
pub mod save;
