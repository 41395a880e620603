//! Core game types and logic (maze, observer, input, level progression).
//!
//! Re-exports:
//! - `config`: Per-level tuning table and built-in variants
//! - `maze`: Maze generation and exit placement
//! - `player`: Observer pose and movement
//! - `process_events`: Input snapshot from the keyboard
//! - `session`: Level state machine

pub mod config;
pub mod maze;
pub mod player;
pub mod process_events;
pub mod session;
