//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Intent`]s. The mapping is
//! mode aware but otherwise stateless; key repeat is left to the terminal.

pub mod map;

pub use neon_tetris_types as types;

pub use map::{map_key, should_quit};
