//! Piece instance - a tetromino with a position and rotation
//!
//! Movement and rotation here never validate anything; the board decides
//! whether a position is legal and callers revert on rejection.

use arrayvec::ArrayVec;

use crate::pieces::{self, Mask};
use crate::types::{PieceKind, Rgb, SPAWN_X, SPAWN_Y};

/// Absolute board cells covered by a piece.
pub type Blocks = ArrayVec<(i8, i8), 16>;

/// Anything the board can test and place: a set of absolute cells plus a color.
pub trait Footprint {
    fn blocks(&self) -> Blocks;
    fn color(&self) -> Rgb;
}

/// A tetromino instance.
///
/// The origin is the top-left corner of the 4x4 mask box, so block
/// coordinates are `origin + mask offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    x: i8,
    y: i8,
    rotation: u8,
}

impl Piece {
    pub fn new(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            x,
            y,
            rotation: 0,
        }
    }

    /// Create a piece at the spawn origin in its first rotation state.
    pub fn spawn(kind: PieceKind) -> Self {
        Self::new(kind, SPAWN_X, SPAWN_Y)
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn x(&self) -> i8 {
        self.x
    }

    pub fn y(&self) -> i8 {
        self.y
    }

    pub fn position(&self) -> (i8, i8) {
        (self.x, self.y)
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Mask of the current rotation state.
    pub fn mask(&self) -> Mask {
        pieces::mask(self.kind, self.rotation)
    }

    /// Translate the origin. Coordinates saturate at the `i8` range, which
    /// is far outside the board.
    pub fn move_by(&mut self, dx: i8, dy: i8) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }

    /// Copy translated by (dx, dy).
    pub fn offset(mut self, dx: i8, dy: i8) -> Self {
        self.move_by(dx, dy);
        self
    }

    pub fn rotate_cw(&mut self) {
        let n = pieces::rotation_count(self.kind);
        self.rotation = (self.rotation + 1) % n;
    }

    pub fn rotate_ccw(&mut self) {
        let n = pieces::rotation_count(self.kind);
        self.rotation = (self.rotation + n - 1) % n;
    }
}

impl Footprint for Piece {
    fn blocks(&self) -> Blocks {
        self.mask()
            .cells()
            // Saturated cells land off the board and fail validation.
            .map(|(dx, dy)| (self.x.saturating_add(dx), self.y.saturating_add(dy)))
            .collect()
    }

    fn color(&self) -> Rgb {
        self.kind.color()
    }
}
