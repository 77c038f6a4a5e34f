//! Game state module - the spawn → fall → lock → clear → spawn loop
//!
//! [`GameState`] ties the board, piece queue and scoring together and owns the
//! phase machine:
//!
//! ```text
//! Spawning -> Falling -> Locking -> Clearing -> Spawning -> ...
//!     \
//!      -> GameOver (terminal until reset)
//! ```
//!
//! Time enters only through [`GameState::advance`]; player input enters through
//! [`GameState::apply_input`] (immediate) or [`GameState::queue_input`]
//! (applied at the start of the next `advance`). Locking, clearing and spawning
//! complete within the call that triggered them, so between calls the phase is
//! `Spawning` (not started), `Falling`, or `GameOver`.

use std::collections::VecDeque;

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::events::{GameEvent, LockEvent, EVENT_BUFFER_LIMIT};
use crate::pieces::{try_rotate, Piece};
use crate::rng::PieceQueue;
use crate::scoring::{calculate_drop_score, calculate_level, calculate_line_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
use crate::stats::Stats;
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: Option<Piece>,
    queue: PieceQueue,
    phase: Phase,
    started: bool,
    paused: bool,
    /// Increments on every reset.
    session_id: u32,
    /// Increments on every successful spawn.
    piece_id: u32,
    score: u32,
    level: u32,
    lines: u32,
    stats: Stats,
    gravity_timer_ms: u32,
    lock_timer_ms: u32,
    lock_reset_count: u8,
    pending_inputs: VecDeque<Input>,
    events: VecDeque<GameEvent>,
}

impl GameState {
    /// Create a game on an empty board
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.board_width, config.board_height);
        Ok(Self::build(config, board))
    }

    /// Create a default 10x20 game with the given RNG seed
    pub fn with_seed(seed: u32) -> Self {
        let config = GameConfig::with_seed(seed);
        let board = Board::new(config.board_width, config.board_height);
        Self::build(config, board)
    }

    /// Create a game on a pre-filled board
    ///
    /// The board's dimensions replace the configured ones. A reset starts the
    /// next session on an empty board of the same size.
    pub fn with_board(mut config: GameConfig, board: Board) -> Result<Self, ConfigError> {
        config.board_width = board.width();
        config.board_height = board.height();
        config.validate()?;
        Ok(Self::build(config, board))
    }

    fn build(config: GameConfig, board: Board) -> Self {
        let queue = PieceQueue::new(config.seed, config.randomizer);
        let level = config.start_level;
        Self {
            config,
            board,
            active: None,
            queue,
            phase: Phase::Spawning,
            started: false,
            paused: false,
            session_id: 0,
            piece_id: 0,
            score: 0,
            level,
            lines: 0,
            stats: Stats::default(),
            gravity_timer_ms: 0,
            lock_timer_ms: 0,
            lock_reset_count: 0,
            pending_inputs: VecDeque::new(),
            events: VecDeque::new(),
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        log::debug!(
            "session {} started (seed {}, {}x{})",
            self.session_id,
            self.config.seed,
            self.board.width(),
            self.board.height()
        );
        self.spawn_next();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn next_queue(&self) -> [PieceKind; PREVIEW_LEN] {
        self.queue.preview()
    }

    /// Inputs waiting for the next `advance`
    pub fn pending_inputs(&self) -> usize {
        self.pending_inputs.len()
    }

    /// Current gravity interval based on level
    pub fn drop_interval_ms(&self) -> u32 {
        self.config.gravity.interval_ms(self.level)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_codes(&mut out.board);
        out.width = self.board.width();
        out.height = self.board.height();
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next_queue = self.queue.preview();
        out.phase = self.phase;
        out.paused = self.paused;
        out.game_over = self.game_over();
        out.session_id = self.session_id;
        out.seed = self.config.seed;
        out.piece_id = self.piece_id;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.stats = self.stats;
        out.timers = TimersSnapshot {
            gravity_ms: self.gravity_timer_ms,
            lock_ms: self.lock_timer_ms,
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take all buffered events, oldest first
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= EVENT_BUFFER_LIMIT {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    fn set_phase(&mut self, to: Phase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::debug!("phase {} -> {}", from.as_str(), to.as_str());
        self.phase = to;
        self.push_event(GameEvent::PhaseChanged { from, to });
    }

    /// Draw the next piece and place it, or end the game if it does not fit
    fn spawn_next(&mut self) -> bool {
        self.set_phase(Phase::Spawning);

        let kind = self.queue.draw();
        let piece = Piece::spawn(kind, self.board.width());

        if !self.board.is_valid_position(&piece) {
            self.active = None;
            self.set_phase(Phase::GameOver);
            log::info!(
                "game over: {} blocked at spawn (score {}, lines {}, pieces {})",
                kind.as_str(),
                self.score,
                self.lines,
                self.stats.pieces_locked
            );
            self.push_event(GameEvent::GameOver {
                blocked: kind,
                score: self.score,
                lines: self.lines,
            });
            return false;
        }

        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        self.gravity_timer_ms = 0;
        self.lock_timer_ms = 0;
        self.lock_reset_count = 0;
        log::debug!("spawned {} as piece {}", kind.as_str(), self.piece_id);
        self.set_phase(Phase::Falling);
        true
    }

    /// Lock the active piece, clear rows, score, and spawn the next piece
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.set_phase(Phase::Locking);
        if !self.board.lock(&piece) {
            // Moves are validated before they are committed, so this means the
            // board was edited underneath the piece.
            log::warn!(
                "{} at ({}, {}) overlaps the board; dropped without locking",
                piece.kind.as_str(),
                piece.x,
                piece.y
            );
        }

        self.set_phase(Phase::Clearing);
        let cleared = self.board.clear_full_rows();
        let points = calculate_line_score(cleared.len(), self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(cleared.len() as u32);
        self.level = calculate_level(self.config.start_level, self.lines);
        self.stats.record_lock(cleared.len());
        if !cleared.is_empty() {
            log::debug!(
                "cleared {} line(s) for {} points, level {}",
                cleared.len(),
                points,
                self.level
            );
        }
        self.push_event(GameEvent::Locked(LockEvent::new(piece.kind, cleared, points)));

        self.spawn_next();
    }

    fn accepts_piece_input(&self) -> bool {
        self.started && !self.paused && self.phase == Phase::Falling && self.active.is_some()
    }

    /// Move without touching timers
    fn shift_active(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let moved = active.moved(dx, dy);
        if !self.board.is_valid_position(&moved) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// Lock timer bookkeeping after a successful player move or rotation
    fn after_player_move(&mut self) {
        if self.config.lock_delay_ms == 0 {
            return;
        }
        if self.is_grounded() {
            self.reset_lock_timer();
        } else {
            self.lock_timer_ms = 0;
        }
    }

    /// Reset the lock timer (with reset limit)
    fn reset_lock_timer(&mut self) {
        if self.lock_reset_count < LOCK_RESET_LIMIT {
            self.lock_timer_ms = 0;
            self.lock_reset_count += 1;
        }
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.shift_active(dx, dy) {
            return false;
        }
        self.after_player_move();
        true
    }

    fn try_rotate(&mut self, direction: RotationDirection) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        // O piece doesn't rotate
        if active.kind == PieceKind::O {
            return false;
        }

        let board = &self.board;
        let Some(rotated) = try_rotate(&active, direction, self.config.kick_policy, |p| {
            board.is_valid_position(p)
        }) else {
            return false;
        };

        if rotated.kick != (0, 0) {
            log::trace!("{} kicked by {:?}", active.kind.as_str(), rotated.kick);
        }
        self.active = Some(rotated.piece);
        self.after_player_move();
        true
    }

    fn soft_drop(&mut self) -> bool {
        if !self.try_move(0, 1) {
            return false;
        }
        self.score = self.score.saturating_add(calculate_drop_score(1, false));
        self.stats.soft_drop_cells = self.stats.soft_drop_cells.saturating_add(1);
        true
    }

    /// Drop the active piece to the bottom and lock it
    fn hard_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let distance = self.drop_distance(&active);
        self.active = Some(active.moved(0, distance));
        self.score = self
            .score
            .saturating_add(calculate_drop_score(distance as u32, true));
        self.stats.hard_drops = self.stats.hard_drops.saturating_add(1);

        self.lock_active();
        true
    }

    /// Rows the piece can fall before it collides
    fn drop_distance(&self, piece: &Piece) -> i8 {
        let mut distance = 0;
        while self.board.is_valid_position(&piece.moved(0, distance + 1)) {
            distance += 1;
        }
        distance
    }

    /// Check if the active piece is resting on something
    pub fn is_grounded(&self) -> bool {
        self.active
            .map(|piece| !self.board.is_valid_position(&piece.moved(0, 1)))
            .unwrap_or(false)
    }

    /// Y the active piece would land at
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        Some(active.y + self.drop_distance(&active))
    }

    fn toggle_pause(&mut self) -> bool {
        if !self.started || self.game_over() {
            return false;
        }
        self.paused = !self.paused;
        log::debug!("paused: {}", self.paused);
        self.push_event(GameEvent::PauseToggled {
            paused: self.paused,
        });
        true
    }

    /// Start a fresh session with the same config
    ///
    /// The RNG continues from its current state, so the new session deals a
    /// different sequence. Queued inputs and undrained events are kept.
    pub fn reset(&mut self) {
        let mut config = self.config.clone();
        config.seed = self.queue.seed();
        let session_id = self.session_id.wrapping_add(1);
        let pending_inputs = std::mem::take(&mut self.pending_inputs);
        let events = std::mem::take(&mut self.events);

        let board = Board::new(config.board_width, config.board_height);
        *self = Self::build(config, board);
        self.session_id = session_id;
        self.pending_inputs = pending_inputs;
        self.events = events;

        log::info!("session {} reset (seed {})", session_id, self.config.seed);
        self.push_event(GameEvent::Reset { session_id });
        self.start();
    }

    /// Apply a player input immediately
    ///
    /// Returns false when the input was rejected; a rejected input never
    /// changes the game.
    pub fn apply_input(&mut self, input: Input) -> bool {
        let accepted = match input {
            Input::Pause => self.toggle_pause(),
            Input::Restart => {
                self.reset();
                true
            }
            _ if !self.accepts_piece_input() => false,
            Input::MoveLeft => self.try_move(-1, 0),
            Input::MoveRight => self.try_move(1, 0),
            Input::RotateCw => self.try_rotate(RotationDirection::Clockwise),
            Input::RotateCcw => self.try_rotate(RotationDirection::CounterClockwise),
            Input::SoftDrop => self.soft_drop(),
            Input::HardDrop => self.hard_drop(),
        };
        if !accepted {
            log::trace!("rejected {} in {}", input.as_str(), self.phase.as_str());
        }
        accepted
    }

    /// Queue an input for the start of the next `advance`
    pub fn queue_input(&mut self, input: Input) {
        self.pending_inputs.push_back(input);
    }

    fn apply_pending_inputs(&mut self) -> bool {
        let mut changed = false;
        while let Some(input) = self.pending_inputs.pop_front() {
            changed |= self.apply_input(input);
        }
        changed
    }

    /// Advance the clock by `delta_ms`
    ///
    /// Queued inputs are applied first, then gravity. Large deltas apply every
    /// gravity step they cover, stopping early if the piece locks.
    /// Returns true if anything changed.
    pub fn advance(&mut self, delta_ms: u32) -> bool {
        let mut changed = self.apply_pending_inputs();
        if !self.started || self.paused || self.phase != Phase::Falling {
            return changed;
        }
        changed |= self.apply_gravity(delta_ms);
        changed
    }

    fn apply_gravity(&mut self, delta_ms: u32) -> bool {
        let mut changed = false;
        let interval = self.drop_interval_ms();
        let lock_delay = self.config.lock_delay_ms > 0;
        // Part of this delta spent resting on the stack
        let mut grounded_ms = if lock_delay && self.is_grounded() {
            delta_ms
        } else {
            0
        };
        self.gravity_timer_ms = self.gravity_timer_ms.saturating_add(delta_ms);

        while self.gravity_timer_ms >= interval {
            self.gravity_timer_ms -= interval;
            if self.shift_active(0, 1) {
                self.lock_timer_ms = 0;
                changed = true;
                if lock_delay && self.is_grounded() {
                    // Landed; what is left on the gravity timer came after touchdown.
                    grounded_ms = self.gravity_timer_ms.min(delta_ms);
                }
            } else if self.config.lock_delay_ms == 0 {
                self.lock_active();
                return true;
            } else {
                // Grounded; the lock timer decides from here.
                self.gravity_timer_ms = 0;
                break;
            }
        }

        if lock_delay && self.is_grounded() {
            self.lock_timer_ms = self.lock_timer_ms.saturating_add(grounded_ms);
            if self.lock_timer_ms >= self.config.lock_delay_ms {
                self.lock_active();
                return true;
            }
        }

        changed
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_seed(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::KickPolicy;
    use crate::scoring::Gravity;

    fn started(seed: u32) -> GameState {
        let mut state = GameState::with_seed(seed);
        state.start();
        state
    }

    /// Started game whose active piece has been replaced by `piece`
    fn with_active(board: Board, piece: Piece) -> GameState {
        let mut state = GameState::with_board(GameConfig::default(), board).unwrap();
        state.start();
        state.active = Some(piece);
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::with_seed(12345);

        assert!(!state.started);
        assert_eq!(state.phase, Phase::Spawning);
        assert!(!state.paused);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.session_id, 0);
        assert!(state.active.is_none());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GameConfig {
            board_width: 2,
            ..GameConfig::default()
        };
        assert!(GameState::new(config).is_err());
    }

    #[test]
    fn test_start_spawns_and_falls() {
        let mut state = GameState::with_seed(12345);
        let first = state.next_queue()[0];
        state.start();

        assert!(state.started);
        assert_eq!(state.phase, Phase::Falling);
        assert_eq!(state.piece_id, 1);
        assert_eq!(state.active.unwrap().kind, first);

        let phases: Vec<GameEvent> = state.drain_events().collect();
        assert_eq!(
            phases,
            vec![GameEvent::PhaseChanged {
                from: Phase::Spawning,
                to: Phase::Falling
            }]
        );
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut state = started(5);
        let piece = state.active;
        state.start();
        assert_eq!(state.active, piece);
        assert_eq!(state.piece_id, 1);
    }

    #[test]
    fn test_inputs_rejected_before_start() {
        let mut state = GameState::with_seed(1);
        assert!(!state.apply_input(Input::MoveLeft));
        assert!(!state.apply_input(Input::Pause));
        assert!(!state.advance(5000));
        assert!(state.active.is_none());
    }

    #[test]
    fn test_try_move() {
        let mut state = started(12345);
        let initial_x = state.active.unwrap().x;

        assert!(state.try_move(1, 0));
        assert_eq!(state.active.unwrap().x, initial_x + 1);

        assert!(state.try_move(-1, 0));
        assert_eq!(state.active.unwrap().x, initial_x);

        // Can't move up
        assert!(!state.try_move(0, -1));
    }

    #[test]
    fn test_walls_stop_movement() {
        let mut state = started(12345);
        let mut moved = 0;
        for _ in 0..10 {
            if state.apply_input(Input::MoveLeft) {
                moved += 1;
            }
        }
        assert!(moved <= 4);
        let min_x = state.active.unwrap().cells().iter().map(|c| c.0).min();
        assert_eq!(min_x, Some(0));
    }

    #[test]
    fn test_rotation_o_piece_rejected() {
        let piece = Piece::new(PieceKind::O, Rotation::North, 3, 5);
        let mut state = with_active(Board::default(), piece);
        assert!(!state.apply_input(Input::RotateCw));
        assert_eq!(state.active, Some(piece));
    }

    #[test]
    fn test_rotation_uses_kick_policy() {
        // Vertical I hugging the left wall; rotating to horizontal needs a kick.
        let piece = Piece::new(PieceKind::I, Rotation::West, -1, 5);
        let mut srs = with_active(Board::default(), piece);
        assert!(srs.apply_input(Input::RotateCw));
        let rotated = srs.active.unwrap();
        assert_eq!(rotated.rotation, Rotation::North);
        assert_eq!((rotated.x, rotated.y), (0, 5));

        let config = GameConfig {
            kick_policy: KickPolicy::None,
            ..GameConfig::default()
        };
        let mut plain = GameState::with_board(config, Board::default()).unwrap();
        plain.start();
        plain.active = Some(piece);
        assert!(!plain.apply_input(Input::RotateCw));
        assert_eq!(plain.active, Some(piece));
    }

    #[test]
    fn test_hard_drop_locks_and_scores() {
        let piece = Piece::new(PieceKind::T, Rotation::North, 3, 0);
        let mut state = with_active(Board::default(), piece);

        assert!(state.apply_input(Input::HardDrop));

        // T north occupies rows 0..=1, so it falls 18 rows.
        assert_eq!(state.score, 36);
        assert_eq!(state.board.get(4, 18), Some(Some(PieceKind::T)));
        assert_eq!(state.board.filled_count(), 4);
        assert_eq!(state.stats.hard_drops, 1);
        assert_eq!(state.stats.pieces_locked, 1);
        assert_eq!(state.piece_id, 2);
        assert_eq!(state.phase, Phase::Falling);
    }

    #[test]
    fn test_lock_sequence_emits_every_phase() {
        let mut state = started(3);
        state.drain_events().for_each(drop);

        state.apply_input(Input::HardDrop);
        let phases: Vec<(Phase, Phase)> = state
            .drain_events()
            .filter_map(|e| match e {
                GameEvent::PhaseChanged { from, to } => Some((from, to)),
                _ => None,
            })
            .collect();
        assert_eq!(
            phases,
            vec![
                (Phase::Falling, Phase::Locking),
                (Phase::Locking, Phase::Clearing),
                (Phase::Clearing, Phase::Spawning),
                (Phase::Spawning, Phase::Falling),
            ]
        );
    }

    #[test]
    fn test_soft_drop_scores_one_point() {
        let mut state = started(12345);
        let y = state.active.unwrap().y;
        assert!(state.apply_input(Input::SoftDrop));
        assert_eq!(state.active.unwrap().y, y + 1);
        assert_eq!(state.score, 1);
        assert_eq!(state.stats.soft_drop_cells, 1);
    }

    #[test]
    fn test_soft_drop_rejected_when_grounded() {
        let piece = Piece::new(PieceKind::O, Rotation::North, 3, 18);
        let mut state = with_active(Board::default(), piece);
        assert!(!state.apply_input(Input::SoftDrop));
        assert_eq!(state.active, Some(piece));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_gravity_moves_one_row_per_interval() {
        let mut state = started(12345);
        let y = state.active.unwrap().y;

        assert!(!state.advance(999));
        assert_eq!(state.active.unwrap().y, y);

        assert!(state.advance(1));
        assert_eq!(state.active.unwrap().y, y + 1);
        assert_eq!(state.gravity_timer_ms, 0);
    }

    #[test]
    fn test_large_delta_applies_several_steps() {
        let mut state = started(12345);
        let y = state.active.unwrap().y;
        state.advance(3500);
        assert_eq!(state.active.unwrap().y, y + 3);
        assert_eq!(state.gravity_timer_ms, 500);
    }

    #[test]
    fn test_gravity_locks_grounded_piece_without_delay() {
        let piece = Piece::new(PieceKind::O, Rotation::North, 3, 18);
        let mut state = with_active(Board::default(), piece);

        assert!(state.advance(1000));
        assert_eq!(state.board.get(4, 18), Some(Some(PieceKind::O)));
        assert_eq!(state.stats.pieces_locked, 1);
        assert_eq!(state.phase, Phase::Falling);
    }

    #[test]
    fn test_lock_delay_waits_and_resets_on_move() {
        let config = GameConfig {
            lock_delay_ms: 500,
            ..GameConfig::default()
        };
        let mut state = GameState::with_board(config, Board::default()).unwrap();
        state.start();
        state.active = Some(Piece::new(PieceKind::O, Rotation::North, 3, 18));

        state.advance(400);
        assert_eq!(state.stats.pieces_locked, 0);
        assert_eq!(state.lock_timer_ms, 400);

        assert!(state.apply_input(Input::MoveLeft));
        assert_eq!(state.lock_timer_ms, 0);
        assert_eq!(state.lock_reset_count, 1);

        state.advance(499);
        assert_eq!(state.stats.pieces_locked, 0);
        state.advance(1);
        assert_eq!(state.stats.pieces_locked, 1);
        assert_eq!(state.board.get(3, 19), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_lock_delay_counts_only_time_after_landing() {
        let config = GameConfig {
            lock_delay_ms: 500,
            ..GameConfig::default()
        };
        let mut state = GameState::with_board(config, Board::default()).unwrap();
        state.start();
        state.active = Some(Piece::new(PieceKind::O, Rotation::North, 3, 17));

        // Lands at 1000ms, then rests for the remaining 400ms.
        state.advance(1400);
        assert!(state.is_grounded());
        assert_eq!(state.stats.pieces_locked, 0);
        assert_eq!(state.lock_timer_ms, 400);

        state.advance(99);
        assert_eq!(state.stats.pieces_locked, 0);
        state.advance(1);
        assert_eq!(state.stats.pieces_locked, 1);
        assert_eq!(state.board.get(4, 19), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_lock_reset_limit() {
        let config = GameConfig {
            lock_delay_ms: 500,
            ..GameConfig::default()
        };
        let mut state = GameState::with_board(config, Board::default()).unwrap();
        state.start();
        state.active = Some(Piece::new(PieceKind::O, Rotation::North, 3, 18));

        for _ in 0..20 {
            state.reset_lock_timer();
        }
        assert_eq!(state.lock_reset_count, LOCK_RESET_LIMIT);
    }

    #[test]
    fn test_line_clear_scores_by_level() {
        let mut board = Board::default();
        for x in 0..10 {
            if !(4..=5).contains(&x) {
                board.set(x, 19, Some(PieceKind::J));
                board.set(x, 18, Some(PieceKind::J));
            }
        }
        let mut state = with_active(board, Piece::new(PieceKind::O, Rotation::North, 3, 0));
        state.level = 2;

        state.apply_input(Input::HardDrop);

        assert_eq!(state.lines, 2);
        assert_eq!(state.board.filled_count(), 0);
        // 18 rows of hard drop plus a double at level 2.
        assert_eq!(state.score, 18 * 2 + 100 * 3);
        assert_eq!(state.stats.clears_by_size, [0, 1, 0, 0]);
    }

    #[test]
    fn test_level_progression() {
        let mut state = started(1);
        state.lines = 9;
        let mut board = Board::default();
        for x in 0..10 {
            if x != 0 {
                board.set(x, 19, Some(PieceKind::L));
            }
        }
        state.board = board;
        state.active = Some(Piece::new(PieceKind::I, Rotation::West, -1, 0));

        state.apply_input(Input::HardDrop);
        assert_eq!(state.lines, 10);
        assert_eq!(state.level, 1);
        assert_eq!(state.drop_interval_ms(), 800);
    }

    #[test]
    fn test_fixed_gravity() {
        let config = GameConfig {
            gravity: Gravity::FixedMs(250),
            start_level: 7,
            ..GameConfig::default()
        };
        let state = GameState::new(config).unwrap();
        assert_eq!(state.level, 7);
        assert_eq!(state.drop_interval_ms(), 250);
    }

    #[test]
    fn test_spawn_blocked_is_game_over_without_mutation() {
        let mut state = started(12345);
        for x in 0..10 {
            state.board.set(x, 0, Some(PieceKind::Z));
        }
        let before = state.board.clone();
        state.active = None;

        assert!(!state.spawn_next());
        assert_eq!(state.phase, Phase::GameOver);
        assert!(state.game_over());
        assert!(state.active.is_none());
        assert_eq!(state.board, before);
        assert!(state
            .drain_events()
            .any(|e| matches!(e, GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_game_over_rejects_everything_but_restart() {
        let mut state = started(1);
        state.active = None;
        state.phase = Phase::GameOver;

        for input in [
            Input::MoveLeft,
            Input::MoveRight,
            Input::RotateCw,
            Input::RotateCcw,
            Input::SoftDrop,
            Input::HardDrop,
            Input::Pause,
        ] {
            assert!(!state.apply_input(input));
        }
        assert!(!state.advance(10_000));
        assert_eq!(state.phase, Phase::GameOver);

        assert!(state.apply_input(Input::Restart));
        assert_eq!(state.phase, Phase::Falling);
        assert_eq!(state.session_id, 1);
    }

    #[test]
    fn test_pause_stops_time_and_input() {
        let mut state = started(12345);
        let piece = state.active;

        assert!(state.apply_input(Input::Pause));
        assert!(state.paused);
        assert!(!state.apply_input(Input::MoveLeft));
        assert!(!state.advance(5000));
        assert_eq!(state.active, piece);

        assert!(state.apply_input(Input::Pause));
        assert!(!state.paused);
        assert!(state.advance(1000));
    }

    #[test]
    fn test_queued_inputs_apply_before_gravity() {
        let mut state = started(12345);
        let start = state.active.unwrap();

        state.queue_input(Input::MoveRight);
        state.queue_input(Input::MoveRight);
        assert_eq!(state.pending_inputs(), 2);
        assert_eq!(state.active, Some(start));

        assert!(state.advance(0));
        assert_eq!(state.pending_inputs(), 0);
        assert_eq!(state.active.unwrap().x, start.x + 2);
        assert_eq!(state.active.unwrap().y, start.y);
    }

    #[test]
    fn test_reset_keeps_config_and_continues_rng() {
        let config = GameConfig {
            board_width: 8,
            board_height: 12,
            ..GameConfig::with_seed(77)
        };
        let mut state = GameState::new(config).unwrap();
        state.start();
        state.apply_input(Input::HardDrop);
        let seed_before = state.queue.seed();

        state.reset();

        assert_eq!(state.session_id, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.board.filled_count(), 0);
        assert_eq!(state.board.width(), 8);
        assert_eq!(state.board.height(), 12);
        assert_eq!(state.config.seed, seed_before);
        assert_eq!(state.phase, Phase::Falling);
    }

    #[test]
    fn test_ghost_y() {
        let piece = Piece::new(PieceKind::T, Rotation::North, 3, 0);
        let state = with_active(Board::default(), piece);
        assert_eq!(state.ghost_y(), Some(18));
        assert!(!state.is_grounded());
    }

    #[test]
    fn test_event_buffer_is_bounded() {
        let mut state = started(1);
        for _ in 0..EVENT_BUFFER_LIMIT {
            state.apply_input(Input::Pause);
        }
        assert_eq!(state.events.len(), EVENT_BUFFER_LIMIT);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = started(12345);
        state.apply_input(Input::HardDrop);
        let snap = state.snapshot();

        assert_eq!(snap.width, 10);
        assert_eq!(snap.height, 20);
        assert_eq!(snap.board.len(), 20);
        assert_eq!(snap.score, state.score);
        assert_eq!(snap.piece_id, 2);
        assert_eq!(snap.phase, Phase::Falling);
        assert_eq!(snap.next_queue, state.next_queue());
        assert_eq!(snap.active.map(|a| a.kind), state.active.map(|a| a.kind));
        let filled = snap.board.iter().flatten().filter(|c| **c != 0).count();
        assert_eq!(filled, 4);
        assert!(snap.playable());
    }
}
