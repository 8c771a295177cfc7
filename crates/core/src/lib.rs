//! Core game rules - pure, deterministic, and testable
//!
//! Everything that decides what happens in a game lives here; nothing in this
//! crate touches the terminal, audio, or the clock. Time comes in as elapsed
//! milliseconds, input as [`Intent`](types::Intent)s, and output goes out as a
//! [`GameSnapshot`] plus buffered [`GameEvent`](types::GameEvent)s.
//!
//! # Module Structure
//!
//! - [`pieces`]: static rotation tables and the wall kick list
//! - [`piece`]: a positioned tetromino and the [`Footprint`] capability
//! - [`board`]: 10x20 grid with collision, placement and line clearing
//! - [`scoring`]: line clear points, drop points, levels and fall speed
//! - [`rng`]: seeded piece source (uniform by default, optional 7-bag)
//! - [`session`]: the game state machine
//! - [`snapshot`]: read-only per-frame view for renderers
//!
//! # Example
//!
//! ```
//! use neon_tetris_core::{GameSession, Randomizer};
//! use neon_tetris_types::{GameMode, Intent};
//!
//! let mut game = GameSession::new(12345, Randomizer::Uniform);
//! game.handle(Intent::StartGame);
//! assert_eq!(game.mode(), GameMode::Playing);
//!
//! game.handle(Intent::MoveRight);
//! game.handle(Intent::RotateCw);
//! game.handle(Intent::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```

pub mod board;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use neon_tetris_types as types;

pub use board::Board;
pub use piece::{Blocks, Footprint, Piece};
pub use pieces::{Mask, WALL_KICKS};
pub use rng::{PieceSource, Randomizer, SimpleRng};
pub use scoring::{fall_interval_ms, hard_drop_score, level_for_lines, line_clear_score};
pub use session::GameSession;
pub use snapshot::{GameSnapshot, Grid, PieceView};
