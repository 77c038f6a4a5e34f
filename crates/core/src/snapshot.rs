use serde::{Deserialize, Serialize};

use crate::pieces::Piece;
use crate::stats::Stats;
use crate::types::{PieceKind, Phase, Rotation, PREVIEW_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Absolute board cells
    pub cells: [(i8, i8); 4],
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.cells(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimersSnapshot {
    pub gravity_ms: u32,
    pub lock_ms: u32,
}

/// Immutable copy of everything a renderer needs
///
/// `board` holds kind codes per row (0 = empty, see `PieceKind::code`).
/// The active piece is not merged into `board`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    pub board: Vec<Vec<u8>>,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next_queue: [PieceKind; PREVIEW_LEN],
    pub phase: Phase,
    pub paused: bool,
    pub game_over: bool,
    pub session_id: u32,
    pub seed: u32,
    pub piece_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub stats: Stats,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.board.clear();
        self.active = None;
        self.ghost_y = None;
        self.next_queue = [PieceKind::I; PREVIEW_LEN];
        self.phase = Phase::Spawning;
        self.paused = false;
        self.game_over = false;
        self.session_id = 0;
        self.seed = 0;
        self.piece_id = 0;
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.stats = Stats::default();
        self.timers = TimersSnapshot::default();
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused && self.phase == Phase::Falling
    }

    /// Locked cell code at (x, y); the active piece is not included
    pub fn code_at(&self, x: usize, y: usize) -> Option<u8> {
        self.board.get(y).and_then(|row| row.get(x)).copied()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            board: Vec::new(),
            active: None,
            ghost_y: None,
            next_queue: [PieceKind::I; PREVIEW_LEN],
            phase: Phase::Spawning,
            paused: false,
            game_over: false,
            session_id: 0,
            seed: 0,
            piece_id: 0,
            score: 0,
            level: 0,
            lines: 0,
            stats: Stats::default(),
            timers: TimersSnapshot::default(),
        }
    }
}
