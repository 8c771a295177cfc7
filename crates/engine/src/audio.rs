//! Sound effect cues.
//!
//! The session raises [`GameEvent`]s; the loop maps each one to an
//! [`AudioCue`] and hands it to whatever [`AudioSink`] is plugged in. Sinks
//! are fire-and-forget: nothing flows back into the game.

use crate::types::GameEvent;

/// Rows cleared at once that count as a four-line clear.
const FOUR_LINES: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    Move,
    Rotate,
    Drop,
    LineClear,
    FourLines,
    GameOver,
    LevelUp,
}

/// Synthesis recipe for a cue. Frequencies in Hz, durations in ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Beep { freq: u32, ms: u32 },
    /// Linear frequency glide.
    Sweep { from: u32, to: u32, ms: u32 },
    /// Notes played back to back, sharing `ms` equally.
    Arpeggio { notes: &'static [u32], ms: u32 },
}

impl Tone {
    pub fn duration_ms(&self) -> u32 {
        match *self {
            Tone::Beep { ms, .. } | Tone::Sweep { ms, .. } | Tone::Arpeggio { ms, .. } => ms,
        }
    }
}

impl AudioCue {
    pub fn tone(&self) -> Tone {
        match self {
            AudioCue::Move => Tone::Beep { freq: 220, ms: 100 },
            AudioCue::Rotate => Tone::Beep { freq: 440, ms: 80 },
            AudioCue::Drop => Tone::Sweep {
                from: 440,
                to: 220,
                ms: 200,
            },
            AudioCue::LineClear => Tone::Arpeggio {
                notes: &[261, 329, 392, 523],
                ms: 150,
            },
            AudioCue::FourLines => Tone::Arpeggio {
                notes: &[261, 329, 392, 523, 659],
                ms: 300,
            },
            AudioCue::GameOver => Tone::Sweep {
                from: 523,
                to: 130,
                ms: 1000,
            },
            AudioCue::LevelUp => Tone::Arpeggio {
                notes: &[392, 523, 659, 784],
                ms: 200,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AudioCue::Move => "move",
            AudioCue::Rotate => "rotate",
            AudioCue::Drop => "drop",
            AudioCue::LineClear => "line_clear",
            AudioCue::FourLines => "four_lines",
            AudioCue::GameOver => "game_over",
            AudioCue::LevelUp => "level_up",
        }
    }
}

/// Cue to play for a session event.
pub fn cue_for(event: GameEvent) -> AudioCue {
    match event {
        GameEvent::PieceMoved => AudioCue::Move,
        GameEvent::PieceRotated => AudioCue::Rotate,
        GameEvent::PieceDropped { .. } => AudioCue::Drop,
        GameEvent::LinesCleared { count } if count >= FOUR_LINES => AudioCue::FourLines,
        GameEvent::LinesCleared { .. } => AudioCue::LineClear,
        GameEvent::GameOver { .. } => AudioCue::GameOver,
        GameEvent::LevelUp { .. } => AudioCue::LevelUp,
    }
}

/// Something that can make (or pretend to make) noise.
pub trait AudioSink {
    /// Play a cue. Muted sinks drop it silently.
    fn play(&mut self, cue: AudioCue);

    fn toggle_mute(&mut self);

    fn is_muted(&self) -> bool;
}

/// Silent sink that still tracks mute state and what it was asked to play.
#[derive(Debug, Default, Clone)]
pub struct NullAudio {
    muted: bool,
    played: u64,
}

impl NullAudio {
    pub fn new(muted: bool) -> Self {
        Self { muted, played: 0 }
    }

    /// Cues accepted while unmuted.
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) {
        if !self.muted {
            self.played += 1;
        }
    }

    fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}
