//! Per-session counters kept alongside the score.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Pieces merged into the board
    pub pieces_locked: u32,
    /// Clears by size: singles, doubles, triples, tetrises
    pub clears_by_size: [u32; 4],
    pub hard_drops: u32,
    /// Cells travelled by soft drop inputs
    pub soft_drop_cells: u32,
}

impl Stats {
    pub(crate) fn record_lock(&mut self, lines: usize) {
        self.pieces_locked = self.pieces_locked.saturating_add(1);
        if let Some(slot) = lines.checked_sub(1).and_then(|i| self.clears_by_size.get_mut(i)) {
            *slot = slot.saturating_add(1);
        }
    }

    /// Total lines removed, derived from the per-size counters
    pub fn lines_removed(&self) -> u32 {
        self.clears_by_size
            .iter()
            .zip(1u32..)
            .map(|(count, size)| count * size)
            .sum()
    }

    pub fn tetrises(&self) -> u32 {
        self.clears_by_size[3]
    }
}
