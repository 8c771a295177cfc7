//! Pieces module - tetromino catalog
//!
//! Static rotation tables for the seven tetrominoes. Every rotation state is a
//! 4x4 occupancy mask; O has one state, S and Z have two, the rest have four.
//! The tables are immutable and shared by every piece instance.

use crate::types::PieceKind;

/// 4x4 occupancy mask, row-major, bit `row * 4 + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mask(u16);

impl Mask {
    /// Build a mask from four 4-character rows. `.` is empty, anything else is set.
    pub const fn from_rows(rows: [&str; 4]) -> Self {
        let mut bits = 0u16;
        let mut r = 0;
        while r < 4 {
            let bytes = rows[r].as_bytes();
            let mut c = 0;
            while c < 4 && c < bytes.len() {
                if bytes[c] != b'.' {
                    bits |= 1u16 << (r * 4 + c) as u32;
                }
                c += 1;
            }
            r += 1;
        }
        Mask(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Whether the cell at (`col`, `row`) is occupied.
    pub const fn is_set(self, col: u8, row: u8) -> bool {
        col < 4 && row < 4 && self.0 & (1u16 << (row * 4 + col) as u32) != 0
    }

    /// Number of occupied cells.
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Occupied cells as (col, row) offsets, in row-major order.
    pub fn cells(self) -> impl Iterator<Item = (i8, i8)> {
        (0..16u8)
            .filter(move |i| self.0 & (1u16 << i) != 0)
            .map(|i| ((i % 4) as i8, (i / 4) as i8))
    }
}

const I_ROTATIONS: [Mask; 4] = [
    Mask::from_rows(["....", "IIII", "....", "...."]),
    Mask::from_rows(["..I.", "..I.", "..I.", "..I."]),
    Mask::from_rows(["....", "....", "IIII", "...."]),
    Mask::from_rows([".I..", ".I..", ".I..", ".I.."]),
];

const O_ROTATIONS: [Mask; 1] = [Mask::from_rows(["....", ".OO.", ".OO.", "...."])];

const T_ROTATIONS: [Mask; 4] = [
    Mask::from_rows(["....", ".T..", "TTT.", "...."]),
    Mask::from_rows(["....", ".T..", ".TT.", ".T.."]),
    Mask::from_rows(["....", "....", "TTT.", ".T.."]),
    Mask::from_rows(["....", ".T..", "TT..", ".T.."]),
];

const S_ROTATIONS: [Mask; 2] = [
    Mask::from_rows(["....", ".SS.", "SS..", "...."]),
    Mask::from_rows(["....", ".S..", ".SS.", "..S."]),
];

const Z_ROTATIONS: [Mask; 2] = [
    Mask::from_rows(["....", "ZZ..", ".ZZ.", "...."]),
    Mask::from_rows(["....", "..Z.", ".ZZ.", ".Z.."]),
];

const J_ROTATIONS: [Mask; 4] = [
    Mask::from_rows(["....", "J...", "JJJ.", "...."]),
    Mask::from_rows(["....", ".JJ.", ".J..", ".J.."]),
    Mask::from_rows(["....", "....", "JJJ.", "..J."]),
    Mask::from_rows(["....", ".J..", ".J..", "JJ.."]),
];

const L_ROTATIONS: [Mask; 4] = [
    Mask::from_rows(["....", "..L.", "LLL.", "...."]),
    Mask::from_rows(["....", ".L..", ".L..", ".LL."]),
    Mask::from_rows(["....", "....", "LLL.", "L..."]),
    Mask::from_rows(["....", "LL..", ".L..", ".L.."]),
];

/// Offsets tried in order after a rotation collides.
///
/// The unkicked position (0, 0) has already been tested by the time these apply.
pub const WALL_KICKS: [(i8, i8); 5] = [(-1, 0), (1, 0), (0, -1), (-1, -1), (1, -1)];

/// Ordered rotation states for a piece kind.
pub fn rotations(kind: PieceKind) -> &'static [Mask] {
    match kind {
        PieceKind::I => &I_ROTATIONS,
        PieceKind::O => &O_ROTATIONS,
        PieceKind::T => &T_ROTATIONS,
        PieceKind::S => &S_ROTATIONS,
        PieceKind::Z => &Z_ROTATIONS,
        PieceKind::J => &J_ROTATIONS,
        PieceKind::L => &L_ROTATIONS,
    }
}

/// Number of distinct rotation states.
pub fn rotation_count(kind: PieceKind) -> u8 {
    rotations(kind).len() as u8
}

/// Mask for a kind at a rotation index (taken modulo the state count).
pub fn mask(kind: PieceKind, rotation: u8) -> Mask {
    let states = rotations(kind);
    states[rotation as usize % states.len()]
}
