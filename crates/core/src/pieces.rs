//! Pieces module - Tetromino shapes, the `Piece` value type, and wall kicks
//!
//! Shapes follow SRS orientation inside a 3x3 (4x4 for I and O) bounding box,
//! with offsets in board coordinates: x grows right, y grows down.
//!
//! Rotation is a pure function of the piece. Whether a rotation is allowed is
//! decided by the caller through [`try_rotate`], which walks the kick table of
//! the configured [`KickPolicy`] and commits the first offset that fits.
//! Reference: https://tetris.wiki/SRS

use serde::{Deserialize, Serialize};

use crate::types::{PieceKind, Rotation, RotationDirection};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => get_i_shape(rotation),
        PieceKind::O => get_o_shape(rotation),
        PieceKind::T => get_t_shape(rotation),
        PieceKind::S => get_s_shape(rotation),
        PieceKind::Z => get_z_shape(rotation),
        PieceKind::J => get_j_shape(rotation),
        PieceKind::L => get_l_shape(rotation),
    }
}

/// I piece shapes
fn get_i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        // N: horizontal, centered on row 1
        Rotation::North => [(0, 1), (1, 1), (2, 1), (3, 1)],
        // E: vertical, right-aligned
        Rotation::East => [(2, 0), (2, 1), (2, 2), (2, 3)],
        // S: horizontal, centered on row 2
        Rotation::South => [(0, 2), (1, 2), (2, 2), (3, 2)],
        // W: vertical, left-aligned
        Rotation::West => [(1, 0), (1, 1), (1, 2), (1, 3)],
    }
}

/// O piece shapes (same for all rotations)
fn get_o_shape(_rotation: Rotation) -> PieceShape {
    [(1, 0), (2, 0), (1, 1), (2, 1)]
}

fn get_t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (1, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (1, 2)],
    }
}

fn get_s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (2, 0), (0, 1), (1, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (2, 2)],
        Rotation::South => [(1, 1), (2, 1), (0, 2), (1, 2)],
        Rotation::West => [(0, 0), (0, 1), (1, 1), (1, 2)],
    }
}

fn get_z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (1, 0), (1, 1), (2, 1)],
        Rotation::East => [(2, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (1, 2), (2, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (0, 2)],
    }
}

fn get_j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (2, 0), (1, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (2, 2)],
        Rotation::West => [(1, 0), (1, 1), (0, 2), (1, 2)],
    }
}

fn get_l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(2, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (1, 2), (2, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (0, 2)],
        Rotation::West => [(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}

/// Width of the bounding box a kind rotates inside
pub fn bounding_box(kind: PieceKind) -> i8 {
    match kind {
        PieceKind::I | PieceKind::O => 4,
        _ => 3,
    }
}

/// A tetromino placed on the board
///
/// The occupied cells are fully determined by `(kind, rotation)` plus the
/// origin `(x, y)`. Moving or rotating returns a new value; nothing here
/// looks at a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    pub fn new(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
        }
    }

    /// Spawn orientation with the topmost mino on row 0, centered horizontally
    pub fn spawn(kind: PieceKind, board_width: u8) -> Self {
        let x = (board_width as i8 - bounding_box(kind)) / 2;
        let top = get_shape(kind, Rotation::North)
            .iter()
            .map(|&(_, dy)| dy)
            .min()
            .unwrap_or(0);
        Self::new(kind, Rotation::North, x, -top)
    }

    /// Mino offsets for the current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board cells covered by the piece
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape()
            .map(|(dx, dy)| (self.x.saturating_add(dx), self.y.saturating_add(dy)))
    }

    /// Translated copy
    pub fn moved(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Copy with the rotation advanced by one step, origin unchanged
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        Self {
            rotation: self.rotation.rotate(direction),
            ..*self
        }
    }
}

/// How rotations that collide in place are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KickPolicy {
    /// Rotate in place or not at all
    None,
    /// Super Rotation System kick tables
    #[default]
    Srs,
}

/// Kick offsets for the five SRS tests
pub type KickTests = [(i8, i8); 5];

/// Indexed by `[from.index()][direction]`, direction 0 = clockwise, 1 = counter-clockwise
pub type KickTable = [[KickTests; 2]; 4];

/// Offsets are in board coordinates (positive y is down), i.e. the published
/// SRS tables with the y axis flipped.
const JLSTZ_KICKS: KickTable = [
    // North
    [
        // N->E
        [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
        // N->W
        [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    ],
    // East
    [
        // E->S
        [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
        // E->N
        [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    ],
    // South
    [
        // S->W
        [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
        // S->E
        [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    ],
    // West
    [
        // W->N
        [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
        // W->S
        [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    ],
];

const I_KICKS: KickTable = [
    // North
    [
        // N->E
        [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
        // N->W
        [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    ],
    // East
    [
        // E->S
        [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
        // E->N
        [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    ],
    // South
    [
        // S->W
        [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
        // S->E
        [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
    ],
    // West
    [
        // W->N
        [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
        // W->S
        [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    ],
];

const IN_PLACE: [(i8, i8); 1] = [(0, 0)];

/// Offsets to try, in order, for a rotation out of `from`
///
/// The first entry is always `(0, 0)`. The O piece never kicks.
pub fn kick_offsets(
    policy: KickPolicy,
    kind: PieceKind,
    from: Rotation,
    direction: RotationDirection,
) -> &'static [(i8, i8)] {
    let table = match (policy, kind) {
        (KickPolicy::None, _) | (_, PieceKind::O) => return &IN_PLACE,
        (KickPolicy::Srs, PieceKind::I) => &I_KICKS,
        (KickPolicy::Srs, _) => &JLSTZ_KICKS,
    };
    let dir = match direction {
        RotationDirection::Clockwise => 0,
        RotationDirection::CounterClockwise => 1,
    };
    &table[from.index() as usize][dir]
}

/// A successful rotation: the committed piece and the kick that made it fit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotated {
    pub piece: Piece,
    pub kick: (i8, i8),
}

/// Try to rotate a piece, testing each kick offset against `is_valid`
///
/// Returns `None` if every offset collides.
pub fn try_rotate(
    piece: &Piece,
    direction: RotationDirection,
    policy: KickPolicy,
    is_valid: impl Fn(&Piece) -> bool,
) -> Option<Rotated> {
    let turned = piece.rotated(direction);
    kick_offsets(policy, piece.kind, piece.rotation, direction)
        .iter()
        .map(|&(dx, dy)| Rotated {
            piece: turned.moved(dx, dy),
            kick: (dx, dy),
        })
        .find(|candidate| is_valid(&candidate.piece))
}
