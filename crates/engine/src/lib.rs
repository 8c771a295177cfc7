//! Game loop and the seams around it.
//!
//! The core is deterministic and knows nothing about time sources, terminals
//! or speakers. This crate ties it to the outside world through two traits:
//!
//! - [`Frontend`]: produces [`Intent`](types::Intent)s and consumes snapshots
//! - [`AudioSink`]: plays cues derived from session events
//!
//! [`GameLoop`] owns the session and both collaborators, so there is no
//! shared state between them.

pub mod audio;
pub mod game_loop;

pub use neon_tetris_core as core;
pub use neon_tetris_types as types;

pub use audio::{cue_for, AudioCue, AudioSink, NullAudio, Tone};
pub use game_loop::{Frontend, GameLoop, MAX_FPS, MIN_FPS};
