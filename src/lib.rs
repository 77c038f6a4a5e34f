//! Blocky Tetris (workspace facade crate).
//!
//! Re-exports the rules and shared types from the crates under `crates/` as
//! `blocky_tetris::{core,types}` and adds the process-level pieces the
//! `tetris-sim` runner needs.

pub mod logging;
pub mod sim;

pub use blocky_tetris_core as core;
pub use blocky_tetris_types as types;
