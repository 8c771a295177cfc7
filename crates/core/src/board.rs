//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the color of a
//! locked piece. Storage is a flat row-major array, so the grid is always
//! exactly `BOARD_WIDTH * BOARD_HEIGHT` cells.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows with y < 0 are the hidden spawn area above the visible board.

use arrayvec::ArrayVec;

use crate::piece::{Footprint, Piece};
use crate::types::{Cell, DANGER_ROWS, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * W + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= H {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Cells of one row (panics if `y` is out of range).
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * W..(y + 1) * W]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(W)
    }

    /// Whether every block of `piece` is on the board horizontally, above the
    /// floor, and not overlapping a locked cell.
    ///
    /// Blocks above the top (y < 0) skip the occupancy check so pieces can
    /// spawn partially hidden.
    pub fn is_valid_position<P: Footprint + ?Sized>(&self, piece: &P) -> bool {
        piece.blocks().iter().all(|&(x, y)| {
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                return false;
            }
            y < 0 || !self.is_occupied(x, y)
        })
    }

    /// Write the piece's color into every block that lands on the board.
    ///
    /// Blocks outside the grid (notably y < 0) are skipped.
    pub fn place_piece<P: Footprint + ?Sized>(&mut self, piece: &P) {
        let color = piece.color();
        for (x, y) in piece.blocks() {
            self.set(x, y, Some(color));
        }
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    ///
    /// Uses a two-pointer compaction with zero allocation. Surviving rows keep
    /// their relative order and the vacated rows at the top become empty.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, H> {
        let mut cleared_rows = ArrayVec::new();
        let mut write_y = H;

        for read_y in (0..H).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * W;
                    self.cells.copy_within(src..src + W, write_y * W);
                }
            }
        }

        self.cells[..write_y * W].fill(None);

        cleared_rows
    }

    /// Remove every complete row at once and return how many were removed.
    pub fn clear_lines(&mut self) -> usize {
        self.clear_full_rows().len()
    }

    /// Whether any cell in the top `DANGER_ROWS` rows is occupied.
    pub fn is_game_over(&self) -> bool {
        let rows = (DANGER_ROWS as usize).min(H);
        self.cells[..rows * W].iter().any(|cell| cell.is_some())
    }

    /// Landing projection of `piece`: the lowest position reachable by moving
    /// straight down. The argument is not modified.
    pub fn ghost_position(&self, piece: &Piece) -> Piece {
        let mut ghost = *piece;
        while self.is_valid_position(&ghost) {
            ghost.move_by(0, 1);
        }
        ghost.move_by(0, -1);
        ghost
    }

    /// Stack height of each column (0 for an empty column).
    pub fn height_map(&self) -> [u8; W] {
        let mut heights = [0u8; W];
        for (x, height) in heights.iter_mut().enumerate() {
            if let Some(top) = (0..H).find(|&y| self.cells[y * W + x].is_some()) {
                *height = (H - top) as u8;
            }
        }
        heights
    }

    /// Empty cells with at least one occupied cell above them in the same column.
    pub fn hole_count(&self) -> u32 {
        let mut holes = 0;
        for x in 0..W {
            let mut covered = false;
            for y in 0..H {
                match self.cells[y * W + x] {
                    Some(_) => covered = true,
                    None if covered => holes += 1,
                    None => {}
                }
            }
        }
        holes
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into a fixed 2D array (row-major, top row first).
    pub fn write_grid(&self, out: &mut [[Cell; W]; H]) {
        for (dst, src) in out.iter_mut().zip(self.cells.chunks_exact(W)) {
            dst.copy_from_slice(src);
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), H);
        assert!(cells_2d.iter().all(|row| row.len() == W));

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            flat[y * W..(y + 1) * W].copy_from_slice(row);
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceKind, Rgb};

    const RED: Cell = Some(Rgb::new(255, 0, 0));
    const BLUE: Cell = Some(Rgb::new(0, 0, 255));

    fn fill_row(board: &mut Board, y: i8, cell: Cell) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, cell);
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_board_from_cells_roundtrip() {
        let mut cells_2d = vec![vec![None; W]; H];
        cells_2d[5][3] = RED;
        cells_2d[10][7] = BLUE;

        let board = Board::from_cells(cells_2d.clone());
        assert_eq!(board.to_cells(), cells_2d);
    }

    #[test]
    fn test_clear_rows_two_and_five() {
        let mut board = Board::new();
        for y in 0..H as i8 {
            if y == 2 || y == 5 {
                fill_row(&mut board, y, RED);
            } else {
                // Partial rows, tagged by a marker in column y % W.
                board.set(y % BOARD_WIDTH as i8, y, BLUE);
            }
        }
        let before = board.to_cells();

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[5, 2]);

        let after = board.to_cells();
        assert!(after[0].iter().all(|c| c.is_none()));
        assert!(after[1].iter().all(|c| c.is_none()));
        // Rows below 5 are untouched.
        for y in 6..H {
            assert_eq!(after[y], before[y]);
        }
        // Rows 3 and 4 move down by one, rows 0 and 1 by two.
        assert_eq!(after[5], before[4]);
        assert_eq!(after[4], before[3]);
        assert_eq!(after[3], before[1]);
        assert_eq!(after[2], before[0]);
    }

    #[test]
    fn test_clear_more_than_four_rows() {
        let mut board = Board::new();
        for y in 14..20 {
            fill_row(&mut board, y, RED);
        }
        assert_eq!(board.clear_lines(), 6);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_place_piece_skips_hidden_rows() {
        let mut board = Board::new();
        let piece = Piece::new(PieceKind::I, 0, -2);
        // Rotation 0 occupies mask row 1, which is y = -1 here.
        board.place_piece(&piece);
        assert_eq!(board, Board::new());

        let mut tall = Piece::new(PieceKind::I, 0, -2);
        tall.rotate_cw();
        board.place_piece(&tall);
        assert_eq!(board.get(2, 0), Some(Some(PieceKind::I.color())));
        assert_eq!(board.get(2, 1), Some(Some(PieceKind::I.color())));
        assert_eq!(board.get(2, 2), Some(None));
    }

    #[test]
    fn test_hidden_blocks_are_exempt_from_occupancy_only() {
        let mut board = Board::new();
        fill_row(&mut board, 0, RED);
        board.set(4, 0, None);
        board.set(5, 0, None);

        // O at (3,-2) covers (4..=5, -1..=0).
        let piece = Piece::new(PieceKind::O, 3, -2);
        assert!(board.is_valid_position(&piece));

        // Hidden blocks still respect the side walls.
        let off_left = Piece::new(PieceKind::O, -2, -3);
        assert!(!board.is_valid_position(&off_left));
    }

    #[test]
    fn test_origin_near_i8_limits_is_invalid() {
        let board = Board::new();
        assert!(!board.is_valid_position(&Piece::new(PieceKind::I, 126, 0)));
        assert!(!board.is_valid_position(&Piece::new(PieceKind::I, 3, 126)));
        assert!(!board.is_valid_position(&Piece::new(PieceKind::O, i8::MIN, 0)));
        assert!(!board.is_valid_position(&Piece::new(PieceKind::O, 3, i8::MAX)));
    }

    #[test]
    fn test_is_game_over_checks_top_four_rows() {
        let mut board = Board::new();
        board.set(0, 4, RED);
        assert!(!board.is_game_over());
        board.set(9, 3, RED);
        assert!(board.is_game_over());
    }

    #[test]
    fn test_ghost_does_not_mutate_input() {
        let board = Board::new();
        let piece = Piece::spawn(PieceKind::T);
        let ghost = board.ghost_position(&piece);
        assert_eq!(piece.position(), (3, 0));
        assert_eq!(ghost.x(), 3);
        // T rotation 0 spans mask rows 1..=2, so the bottom row lands on 19.
        assert_eq!(ghost.y(), 17);
    }

    #[test]
    fn test_ghost_stops_on_stack() {
        let mut board = Board::new();
        fill_row(&mut board, 15, RED);
        let ghost = board.ghost_position(&Piece::spawn(PieceKind::O));
        assert_eq!(ghost.y(), 12);
        assert!(ghost.blocks().iter().all(|&(_, y)| y <= 14));
    }

    #[test]
    fn test_height_map_and_holes() {
        let mut board = Board::new();
        board.set(0, 19, RED);
        board.set(1, 17, RED);
        board.set(9, 10, RED);

        let heights = board.height_map();
        assert_eq!(heights[0], 1);
        assert_eq!(heights[1], 3);
        assert_eq!(heights[2], 0);
        assert_eq!(heights[9], 10);

        // Column 1 has two holes below row 17, column 9 has nine below row 10.
        assert_eq!(board.hole_count(), 11);
    }
}
