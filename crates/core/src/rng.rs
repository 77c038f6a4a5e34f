//! RNG module - deterministic piece generation
//!
//! Pieces come from a seeded LCG so the same seed always deals the same
//! sequence. Two randomizers are supported:
//!
//! - **7-bag**: each bag holds one of each kind, shuffled, dealt until empty
//! - **Uniform**: every draw picks any kind with equal probability
//!
//! The queue keeps a fixed preview of upcoming pieces so callers can show
//! "next" without consuming anything.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::types::{PieceKind, PREVIEW_LEN};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Shape source used by the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Randomizer {
    #[default]
    Bag7,
    Uniform,
}

/// Seeded piece generator with a fixed-length preview
#[derive(Debug, Clone)]
pub struct PieceQueue {
    randomizer: Randomizer,
    /// Remaining pieces of the current bag (dealt from the back)
    bag: ArrayVec<PieceKind, 7>,
    /// Upcoming pieces, front is next
    preview: ArrayVec<PieceKind, PREVIEW_LEN>,
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u32, randomizer: Randomizer) -> Self {
        let mut queue = Self {
            randomizer,
            bag: ArrayVec::new(),
            preview: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        };
        while !queue.preview.is_full() {
            let kind = queue.generate();
            queue.preview.push(kind);
        }
        queue
    }

    fn refill_bag(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        self.rng.shuffle(&mut self.bag);
    }

    fn generate(&mut self) -> PieceKind {
        match self.randomizer {
            Randomizer::Bag7 => {
                if self.bag.is_empty() {
                    self.refill_bag();
                }
                // refill_bag always leaves seven pieces
                self.bag.pop().unwrap_or(PieceKind::I)
            }
            Randomizer::Uniform => {
                PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
            }
        }
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> PieceKind {
        self.preview[0]
    }

    /// Upcoming pieces, next first
    pub fn preview(&self) -> [PieceKind; PREVIEW_LEN] {
        let mut out = [PieceKind::I; PREVIEW_LEN];
        out.copy_from_slice(&self.preview);
        out
    }

    /// Draw the next piece from the queue
    pub fn draw(&mut self) -> PieceKind {
        let piece = self.preview.remove(0);
        let refill = self.generate();
        self.preview.push(refill);
        piece
    }

    pub fn randomizer(&self) -> Randomizer {
        self.randomizer
    }

    /// Current RNG state, used to seed the next session after a reset
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1, Randomizer::Bag7)
    }
}
