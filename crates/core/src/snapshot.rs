//! Read-only view of a session, filled once per loop iteration.

use crate::piece::Piece;
use crate::pieces::Mask;
use crate::types::{Cell, GameMode, PieceKind, Rgb, BOARD_HEIGHT, BOARD_WIDTH, BASE_FALL_MS, MIN_LEVEL};

pub type Grid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceView {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    pub rotation: u8,
    pub mask: Mask,
    pub color: Rgb,
}

impl PieceView {
    /// Absolute cells covered by this view.
    pub fn blocks(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.mask.cells().map(move |(dx, dy)| (x + dx, y + dy))
    }
}

impl From<Piece> for PieceView {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind(),
            x: value.x(),
            y: value.y(),
            rotation: value.rotation(),
            mask: value.mask(),
            color: value.kind().color(),
        }
    }
}

impl From<PieceKind> for PieceView {
    /// A preview of `kind` at the spawn origin.
    fn from(value: PieceKind) -> Self {
        Piece::spawn(value).into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub mode: GameMode,
    pub board: Grid,
    /// Falling piece; `None` in the menu.
    pub current: Option<PieceView>,
    /// Landing projection of `current`.
    pub ghost: Option<PieceView>,
    pub next: PieceView,
    pub hold: Option<PieceView>,
    pub can_hold: bool,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub fall_interval_ms: u32,
    /// Something is locked in the top rows.
    pub danger: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.mode == GameMode::Playing
    }

    /// Locked cell at (x, y), `None` when empty or out of range.
    pub fn cell(&self, x: i8, y: i8) -> Cell {
        if x < 0 || y < 0 {
            return None;
        }
        self.board
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .flatten()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            mode: GameMode::Menu,
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: None,
            ghost: None,
            next: PieceView::from(PieceKind::I),
            hold: None,
            can_hold: true,
            score: 0,
            lines: 0,
            level: MIN_LEVEL,
            fall_interval_ms: BASE_FALL_MS,
            danger: false,
        }
    }
}
