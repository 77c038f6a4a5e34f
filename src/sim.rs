//! Headless game runner driven by a seeded random-placement bot.
//!
//! Each new piece gets a placement: a number of clockwise turns, a horizontal
//! shift, and whether to hard drop or let gravity lock it. The placement is
//! turned into inputs, queued, and the game is advanced in `TICK_MS` steps.
//! Inputs that run into a wall are rejected by the game and simply do nothing.

use serde::Serialize;

use crate::core::{GameConfig, GameEvent, GameState, SimpleRng, Stats};
use crate::types::{Input, TICK_MS};

/// Mixed into the game seed so the bot and the piece queue draw different streams
const BOT_SEED_SALT: u32 = 0x9E37_79B9;

/// Where the bot wants the current piece to go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Clockwise quarter turns, 0..=3
    pub turns: u8,
    /// Columns to move; negative is left
    pub shift: i8,
    /// Finish with a hard drop instead of waiting for gravity
    pub hard_drop: bool,
}

impl Placement {
    /// Write the inputs for this placement into `out`
    pub fn write_inputs(&self, out: &mut Vec<Input>) {
        out.clear();
        out.extend(std::iter::repeat(Input::RotateCw).take(self.turns as usize));
        let step = if self.shift < 0 {
            Input::MoveLeft
        } else {
            Input::MoveRight
        };
        out.extend(std::iter::repeat(step).take(self.shift.unsigned_abs() as usize));
        if self.hard_drop {
            out.push(Input::HardDrop);
        }
    }
}

/// Picks placements uniformly at random
#[derive(Debug, Clone)]
pub struct RandomBot {
    rng: SimpleRng,
}

impl RandomBot {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed ^ BOT_SEED_SALT),
        }
    }

    pub fn choose(&mut self, board_width: u8) -> Placement {
        let width = board_width as u32;
        let turns = self.rng.next_range(4) as u8;
        let shift = self.rng.next_range(width) as i8 - (width / 2) as i8;
        // One piece in four is left to gravity.
        let hard_drop = self.rng.next_range(4) != 0;
        Placement {
            turns,
            shift,
            hard_drop,
        }
    }
}

/// Result of one simulated game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub game: u32,
    pub seed: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub pieces: u32,
    pub ticks: u32,
    /// False when the tick budget ran out first
    pub game_over: bool,
    pub stats: Stats,
}

/// Totals over a batch of games
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimReport {
    pub games: Vec<GameSummary>,
    pub total_score: u64,
    pub total_lines: u64,
    pub best_score: u32,
}

impl SimReport {
    fn from_games(games: Vec<GameSummary>) -> Self {
        let total_score = games.iter().map(|g| g.score as u64).sum();
        let total_lines = games.iter().map(|g| g.lines as u64).sum();
        let best_score = games.iter().map(|g| g.score).max().unwrap_or(0);
        Self {
            games,
            total_score,
            total_lines,
            best_score,
        }
    }
}

/// Play one game until game over or `max_ticks` ticks have passed
pub fn run_game(config: &GameConfig, game: u32, max_ticks: u32) -> anyhow::Result<GameSummary> {
    let mut state = GameState::new(config.clone())?;
    let mut bot = RandomBot::new(config.seed);
    let mut inputs = Vec::new();
    let mut planned_piece = 0;
    let mut ticks = 0;

    state.start();
    while ticks < max_ticks && !state.game_over() {
        if state.piece_id() != planned_piece {
            planned_piece = state.piece_id();
            bot.choose(state.board().width()).write_inputs(&mut inputs);
            for input in inputs.drain(..) {
                state.queue_input(input);
            }
        }
        state.advance(TICK_MS);
        ticks += 1;

        for event in state.drain_events() {
            if let GameEvent::Locked(lock) = event {
                if lock.lines_cleared > 0 {
                    log::debug!(
                        "game {}: {} cleared {} line(s) for {}",
                        game,
                        lock.kind.as_str(),
                        lock.lines_cleared,
                        lock.points
                    );
                }
            }
        }
    }

    let summary = GameSummary {
        game,
        seed: config.seed,
        score: state.score(),
        level: state.level(),
        lines: state.lines(),
        pieces: state.stats().pieces_locked,
        ticks,
        game_over: state.game_over(),
        stats: *state.stats(),
    };
    log::info!(
        "game {} (seed {}): score {}, lines {}, pieces {}, {} ticks{}",
        game,
        summary.seed,
        summary.score,
        summary.lines,
        summary.pieces,
        ticks,
        if summary.game_over { "" } else { ", tick budget exhausted" }
    );
    Ok(summary)
}

/// Play `games` games, game `i` seeded with `config.seed + i`
pub fn run_batch(config: &GameConfig, games: u32, max_ticks: u32) -> anyhow::Result<SimReport> {
    let mut summaries = Vec::with_capacity(games as usize);
    for game in 0..games {
        let mut game_config = config.clone();
        game_config.seed = config.seed.wrapping_add(game);
        summaries.push(run_game(&game_config, game, max_ticks)?);
    }
    Ok(SimReport::from_games(summaries))
}
