//! Events emitted by the game loop
//!
//! Renderers and drivers drain these after each call into the game to see
//! every phase transition, including the instantaneous lock/clear/spawn steps
//! that finish inside a single `advance` or `apply_input`.

use serde::{Deserialize, Serialize};

use crate::board::ClearedRows;
use crate::types::{PieceKind, Phase};

/// Upper bound on buffered events; the oldest are dropped first
pub const EVENT_BUFFER_LIMIT: usize = 256;

/// Outcome of merging one piece into the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u8,
    /// Cleared row indices, bottom to top
    pub rows: ClearedRows,
    /// Line clear points awarded (drop points excluded)
    pub points: u32,
}

impl LockEvent {
    pub(crate) fn new(kind: PieceKind, rows: ClearedRows, points: u32) -> Self {
        Self {
            kind,
            lines_cleared: rows.len() as u8,
            rows,
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    PhaseChanged { from: Phase, to: Phase },
    Locked(LockEvent),
    /// The spawn of `blocked` collided; the session is over
    GameOver {
        blocked: PieceKind,
        score: u32,
        lines: u32,
    },
    PauseToggled { paused: bool },
    Reset { session_id: u32 },
}
