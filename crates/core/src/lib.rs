//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules, the state machine, and the simulation clock.
//! It has **no dependencies** on rendering, input devices, or audio, making it:
//!
//! - **Deterministic**: Same config and seed produce identical games
//! - **Testable**: Every rule is reachable without a terminal
//! - **Portable**: Drive it from a TUI, a GUI, a bot, or a test
//!
//! # Module Structure
//!
//! - [`board`]: Fixed-size grid with collision checks, locking and line clearing
//! - [`pieces`]: Tetromino shapes, the `Piece` value type, and kick tables
//! - [`game_state`]: The spawn/fall/lock/clear loop, input handling and timers
//! - [`rng`]: Seeded LCG plus 7-bag or uniform piece queue
//! - [`scoring`]: Line and drop points, levels and gravity intervals
//! - [`config`]: JSON-loadable game configuration
//! - [`events`]: Phase transitions and lock results for drivers to drain
//! - [`snapshot`]: Immutable, serializable view for renderers
//!
//! # Game Rules
//!
//! - **Randomizer**: 7-bag by default, uniform on request
//! - **Rotation**: SRS wall kicks by default, in-place only on request; O never rotates
//! - **Lock**: On the gravity step that finds the piece grounded, or after an
//!   optional lock delay with a 15 move/rotate reset limit
//! - **Hard Drop**: Drops to the ghost row and locks immediately
//! - **Scoring**: Classic 40/100/300/1200 times `level + 1`, plus drop points
//! - **Game Over**: A newly spawned piece that does not fit ends the session
//!
//! # Example
//!
//! ```
//! use blocky_tetris_core::GameState;
//! use blocky_tetris_core::types::{Input, Phase};
//!
//! // Create and start a game
//! let mut game = GameState::with_seed(12345);
//! game.start();
//! assert_eq!(game.phase(), Phase::Falling);
//!
//! // Apply inputs
//! game.apply_input(Input::MoveRight);
//! game.apply_input(Input::RotateCw);
//! game.apply_input(Input::HardDrop);
//!
//! // Hard drop awards points and a new piece is falling
//! assert!(game.score() > 0);
//! assert_eq!(game.snapshot().piece_id, 2);
//! ```
//!
//! # Timing
//!
//! Time only moves through [`GameState::advance`](game_state::GameState::advance):
//! - **Tick Rate**: drivers typically call it every 16ms
//! - **Gravity**: 1000ms at level 0, shrinking per level down to a 120ms floor
//! - **Large deltas**: every gravity step covered by the delta is applied

pub mod board;
pub mod config;
pub mod error;
pub mod events;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod stats;

pub use blocky_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use config::GameConfig;
pub use error::ConfigError;
pub use events::{GameEvent, LockEvent};
pub use game_state::GameState;
pub use pieces::{get_shape, kick_offsets, try_rotate, KickPolicy, Piece};
pub use rng::{PieceQueue, Randomizer, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_line_score, Gravity};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use stats::Stats;
