//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget toolkits and instead renders snapshots into a simple
//! framebuffer that is diffed and flushed to the terminal.
//!
//! - [`GameView`] is pure: snapshot in, framebuffer out
//! - [`TerminalRenderer`] owns the terminal (raw mode, alternate screen)
//! - [`BellAudio`] turns audio cues into terminal bells

pub mod bell;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use neon_tetris_core as core;
pub use neon_tetris_engine as engine;
pub use neon_tetris_types as types;

pub use bell::BellAudio;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport, MAX_CELL_WIDTH, MIN_CELL_WIDTH};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
