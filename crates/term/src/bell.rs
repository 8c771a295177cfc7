//! Terminal bell as an audio sink.
//!
//! A terminal can't synthesize the cue tones, so the bell stands in for the
//! cues that matter: drops, clears, level-ups and game over. Movement and
//! rotation stay silent.

use std::io::{self, Write};

use log::trace;

use crate::engine::{AudioCue, AudioSink};

const BEL: u8 = 0x07;

pub struct BellAudio<W: Write = io::Stdout> {
    out: W,
    muted: bool,
}

impl BellAudio<io::Stdout> {
    pub fn new(muted: bool) -> Self {
        Self::with_writer(io::stdout(), muted)
    }
}

impl<W: Write> BellAudio<W> {
    pub fn with_writer(out: W, muted: bool) -> Self {
        Self { out, muted }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Number of bell strokes for a cue.
    pub fn rings(cue: AudioCue) -> usize {
        match cue {
            AudioCue::Move | AudioCue::Rotate => 0,
            AudioCue::Drop | AudioCue::LineClear | AudioCue::LevelUp | AudioCue::GameOver => 1,
            AudioCue::FourLines => 2,
        }
    }
}

impl<W: Write> AudioSink for BellAudio<W> {
    fn play(&mut self, cue: AudioCue) {
        if self.muted {
            return;
        }
        let n = Self::rings(cue);
        if n == 0 {
            return;
        }
        trace!("bell for {}", cue.as_str());
        // Best effort.
        let _ = self.out.write_all(&[BEL; 2][..n]).and_then(|_| self.out.flush());
    }

    fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}
