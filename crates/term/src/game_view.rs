//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Mask, PieceView};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameMode, BOARD_HEIGHT, BOARD_WIDTH};

/// Narrowest and widest board cell, in terminal columns.
pub const MIN_CELL_WIDTH: u16 = 1;
pub const MAX_CELL_WIDTH: u16 = 4;

const BLOCK: char = '█';
const GHOST: char = '░';
const EMPTY: char = '·';

const BOARD_BG: Rgb = Rgb::new(10, 10, 24);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const NEON_CYAN: Rgb = Rgb::new(0, 255, 255);
const NEON_PINK: Rgb = Rgb::new(255, 20, 147);
const NEON_RED: Rgb = Rgb::new(255, 40, 40);
const TEXT: Rgb = Rgb::new(220, 220, 220);
const GRID: Rgb = Rgb::new(60, 60, 90);

const CONTROLS: [(&str, &str); 9] = [
    ("←/→", "move"),
    ("↓", "soft drop"),
    ("↑/Z", "rotate"),
    ("X", "rotate back"),
    ("SPACE", "hard drop"),
    ("C", "hold"),
    ("P", "pause"),
    ("M", "mute"),
    ("Q", "quit"),
];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Top-left corner of the board frame on screen.
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_w
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16) * self.cell_w + 2,
            (BOARD_HEIGHT as u16) * self.cell_h + 2,
        )
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is resized to the
    /// viewport and cleared first.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(TEXT, PANEL_BG).cell(' '));

        if snap.mode == GameMode::Menu {
            self.draw_menu(fb, viewport);
            return;
        }

        let (frame_w, frame_h) = self.frame_size();
        let origin = Origin {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
        };

        let border = if snap.danger { NEON_RED } else { NEON_CYAN };
        self.draw_border(fb, origin, frame_w, frame_h, CellStyle::new(border, PANEL_BG));

        // Locked cells.
        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (ch, style) = match cell {
                    Some(color) => (BLOCK, CellStyle::new(*color, BOARD_BG)),
                    None => (EMPTY, CellStyle::new(GRID, BOARD_BG).dim()),
                };
                self.fill_cell(fb, origin, x as i8, y as i8, ch, style);
            }
        }

        if let Some(ghost) = snap.ghost {
            let style = CellStyle::new(ghost.color, BOARD_BG).dim();
            for (x, y) in ghost.blocks() {
                self.fill_cell(fb, origin, x, y, GHOST, style);
            }
        }

        if let Some(current) = snap.current {
            let style = CellStyle::new(current.color, BOARD_BG).bold();
            for (x, y) in current.blocks() {
                self.fill_cell(fb, origin, x, y, BLOCK, style);
            }
        }

        self.draw_side_panel(fb, snap, viewport, origin, frame_w);

        match snap.mode {
            GameMode::Paused => {
                self.draw_overlay(fb, origin, &["PAUSED", "", "P to resume"]);
            }
            GameMode::GameOver => {
                let mut score = [0u8; 16];
                let score = format_score(snap.score, &mut score);
                self.draw_overlay(fb, origin, &["GAME OVER", "", "SCORE", score, "", "R restart", "M menu"]);
            }
            _ => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let title = CellStyle::new(NEON_PINK, PANEL_BG).bold();
        let text = CellStyle::new(TEXT, PANEL_BG);
        let key = CellStyle::new(NEON_CYAN, PANEL_BG).bold();

        let block_h = 6 + CONTROLS.len() as u16;
        let mut y = viewport.height.saturating_sub(block_h) / 2;
        let center = |s: &str| viewport.width.saturating_sub(s.chars().count() as u16) / 2;

        let heading = "NEON TETRIS";
        fb.put_str(center(heading), y, heading, title);
        y = y.saturating_add(2);

        let prompt = "SPACE / ENTER to start";
        fb.put_str(center(prompt), y, prompt, text);
        y = y.saturating_add(2);

        let x = viewport.width.saturating_sub(20) / 2;
        for (keys, action) in CONTROLS {
            fb.put_str(x, y, keys, key);
            fb.put_str(x + 7, y, action, text);
            y = y.saturating_add(1);
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, o: Origin, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(o.x, o.y, '┌', style);
        fb.put_char(o.x + w - 1, o.y, '┐', style);
        fb.put_char(o.x, o.y + h - 1, '└', style);
        fb.put_char(o.x + w - 1, o.y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(o.x + dx, o.y, '─', style);
            fb.put_char(o.x + dx, o.y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(o.x, o.y + dy, '│', style);
            fb.put_char(o.x + w - 1, o.y + dy, '│', style);
        }
    }

    /// Paint one board cell. Cells outside the visible grid (hidden rows) are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, o: Origin, x: i8, y: i8, ch: char, style: CellStyle) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = o.x + 1 + (x as u16) * self.cell_w;
        let py = o.y + 1 + (y as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    /// 4x4 preview of a piece's mask at (x, y). Returns the rows used.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, mask: Mask, style: CellStyle) -> u16 {
        let mut rows = 0;
        for row in 0..4u8 {
            if !(0..4u8).any(|col| mask.is_set(col, row)) {
                continue;
            }
            for col in 0..4u8 {
                if mask.is_set(col, row) {
                    let px = x + (col as u16) * self.cell_w;
                    fb.fill_rect(px, y + rows, self.cell_w, 1, BLOCK, style);
                }
            }
            rows += 1;
        }
        rows
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        origin: Origin,
        frame_w: u16,
    ) {
        let panel_x = origin.x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(NEON_PINK, PANEL_BG).bold();
        let value = CellStyle::new(TEXT, PANEL_BG);

        let mut y = origin.y;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        y = y.saturating_add(self.draw_preview(fb, panel_x, y, snap.next.mask, piece_style(&snap.next)));
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "HOLD", label);
        y = y.saturating_add(1);
        match snap.hold {
            Some(held) => {
                let mut style = piece_style(&held);
                if !snap.can_hold {
                    style = style.dim();
                }
                y = y.saturating_add(self.draw_preview(fb, panel_x, y, held.mask, style));
            }
            None => {
                fb.put_str(panel_x, y, "-", value);
                y = y.saturating_add(1);
            }
        }
        y = y.saturating_add(1);

        // Controls only when there is room below the previews.
        if y.saturating_add(CONTROLS.len() as u16) > viewport.height {
            return;
        }
        let key = CellStyle::new(NEON_CYAN, PANEL_BG);
        for (keys, action) in CONTROLS {
            fb.put_str(panel_x, y, keys, key);
            fb.put_str(panel_x + 7, y, action, value.dim());
            y += 1;
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, o: Origin, lines: &[&str]) {
        let (frame_w, frame_h) = self.frame_size();
        let top = o.y + frame_h.saturating_sub(lines.len() as u16) / 2;
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();

        let box_w = lines.iter().map(|l| l.chars().count() as u16).max().unwrap_or(0) + 4;
        let box_x = o.x + frame_w.saturating_sub(box_w) / 2;
        fb.fill_rect(box_x, top.saturating_sub(1), box_w, lines.len() as u16 + 2, ' ', style);

        for (i, line) in lines.iter().enumerate() {
            let w = line.chars().count() as u16;
            let x = o.x + frame_w.saturating_sub(w) / 2;
            fb.put_str(x, top + i as u16, line, style);
        }
    }
}

fn piece_style(view: &PieceView) -> CellStyle {
    CellStyle::new(view.color, PANEL_BG)
}

/// Format `value` into `buf` and return it as a `&str`.
fn format_score(value: u32, buf: &mut [u8; 16]) -> &str {
    let mut n = value;
    let mut start = buf.len();
    loop {
        start -= 1;
        buf[start] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    std::str::from_utf8(&buf[start..]).unwrap_or("0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_score_digits() {
        let mut buf = [0u8; 16];
        assert_eq!(format_score(0, &mut buf), "0");
        let mut buf = [0u8; 16];
        assert_eq!(format_score(1234, &mut buf), "1234");
    }

    #[test]
    fn cell_width_is_clamped() {
        assert_eq!(GameView::new(0, 1).cell_width(), 1);
        assert_eq!(GameView::new(9, 1).cell_width(), 4);
        assert_eq!(GameView::default().cell_width(), 2);
    }

    #[test]
    fn menu_screen_has_title_and_prompt() {
        let fb = GameView::default().render(&GameSnapshot::default(), Viewport::new(80, 30));
        assert!(fb.contains_text("NEON TETRIS"));
        assert!(fb.contains_text("SPACE / ENTER to start"));
        assert!(!fb.contains_text("SCORE"));
    }
}
