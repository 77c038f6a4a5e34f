//! Board module - manages the game grid
//!
//! The board is a `width x height` grid where each cell is empty or holds the
//! kind of the piece that filled it. Dimensions are fixed at construction.
//! Cells live in one flat row-major buffer; coordinates are `(x, y)` with `x`
//! growing right and `y` growing down from the spawn row at `y = 0`.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{
    Cell, PieceKind, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, MAX_BOARD_DIM, MIN_BOARD_DIM,
};

/// Row indices removed by one clear, bottom to top
pub type ClearedRows = ArrayVec<u8, { MAX_BOARD_DIM as usize }>;

/// The game board using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board
    ///
    /// Dimensions are clamped to `MIN_BOARD_DIM..=MAX_BOARD_DIM`; callers that
    /// need to reject bad sizes go through [`crate::config::GameConfig::validate`].
    pub fn new(width: u8, height: u8) -> Self {
        let width = width.clamp(MIN_BOARD_DIM, MAX_BOARD_DIM);
        let height = height.clamp(MIN_BOARD_DIM, MAX_BOARD_DIM);
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Build a board from text rows, top row first
    ///
    /// `.` or space is empty; a piece letter (`I`, `O`, `T`, `S`, `Z`, `J`, `L`)
    /// fills the cell with that kind and any other character fills it with `I`.
    /// Short rows are padded with empty cells. Returns `None` when the row count
    /// or the longest row is outside the accepted dimensions.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let height = u8::try_from(rows.len()).ok()?;
        let width = u8::try_from(rows.iter().map(|r| r.chars().count()).max()?).ok()?;
        if !(MIN_BOARD_DIM..=MAX_BOARD_DIM).contains(&width)
            || !(MIN_BOARD_DIM..=MAX_BOARD_DIM).contains(&height)
        {
            return None;
        }

        let mut board = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' | ' ' => None,
                    other => Some(PieceKind::from_letter(other).unwrap_or(PieceKind::I)),
                };
                board.set(x as i8, y as i8, cell);
            }
        }
        Some(board)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn in_bounds(&self, x: i8, y: i8) -> bool {
        x >= 0 && y >= 0 && (x as u8) < self.width && (y as u8) < self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if a single cell is within bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// True iff every cell of the piece is within bounds and empty
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        piece.cells().iter().all(|&(x, y)| self.is_valid(x, y))
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height as usize && self.row(y).iter().all(Option::is_some)
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        y < self.height as usize && self.row(y).iter().all(Option::is_none)
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width as usize)
    }

    /// Number of filled cells on the whole board
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Merge a piece into the grid
    ///
    /// Returns false, leaving the board untouched, if any cell of the piece is
    /// out of bounds or already filled.
    pub fn lock(&mut self, piece: &Piece) -> bool {
        if !self.is_valid_position(piece) {
            return false;
        }
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.kind));
        }
        true
    }

    /// Remove all full rows, compact the rest downward, return how many were removed
    pub fn clear_lines(&mut self) -> usize {
        self.clear_full_rows().len()
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    /// Uses a two-pointer compaction with no allocation
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = self.width as usize;
        let mut write_y = self.height as usize;

        // Scan from bottom to top
        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y as u8);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        // Everything above the last written row is now empty
        self.cells[..write_y * width].fill(None);

        cleared_rows
    }

    /// Write kind codes (0 = empty) into one `Vec` per row
    ///
    /// Existing row buffers are reused, so refreshing a snapshot of the same
    /// board size does not allocate.
    pub fn write_codes(&self, out: &mut Vec<Vec<u8>>) {
        out.resize_with(self.height as usize, Vec::new);
        for (dst, row) in out.iter_mut().zip(self.rows()) {
            dst.clear();
            dst.extend(row.iter().map(|c| c.map_or(0, |k| k.code())));
        }
    }

    /// Text rendering matching [`Board::from_rows`]
    pub fn to_rows(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|c| c.map_or('.', |k| k.letter())).collect())
            .collect()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}
