//! Neon Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof as
//! `neon_tetris::{core,engine,input,term,types}` and adds the pieces that only
//! the binary needs: configuration and the terminal frontend.

pub mod config;
pub mod frontend;

pub use neon_tetris_core as core;
pub use neon_tetris_engine as engine;
pub use neon_tetris_input as input;
pub use neon_tetris_term as term;
pub use neon_tetris_types as types;
