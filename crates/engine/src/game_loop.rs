//! Fixed-rate game loop.
//!
//! One iteration: drain intents from the frontend, feed them to the session,
//! advance the session by the real elapsed time, route events to the audio
//! sink, and present a snapshot. Only the frame limiter sleeps.

use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, info, trace};

use crate::audio::{cue_for, AudioSink};
use crate::core::{GameSession, GameSnapshot};
use crate::types::{GameMode, Intent, TARGET_FPS};

/// Slowest and fastest accepted frame rates.
pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 240;

/// The presentation side of the loop: where intents come from and where
/// snapshots go.
pub trait Frontend {
    /// Append any pending intents to `out` without blocking.
    ///
    /// `mode` lets the frontend map the same key differently per screen.
    fn poll_intents(&mut self, mode: GameMode, out: &mut Vec<Intent>) -> Result<()>;

    /// Show one frame.
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()>;
}

pub struct GameLoop<F, A> {
    session: GameSession,
    frontend: F,
    audio: A,
    running: bool,
    fps: u32,
    intents: Vec<Intent>,
    snapshot: GameSnapshot,
    /// Sub-millisecond remainder carried between iterations.
    carry_us: u128,
}

impl<F: Frontend, A: AudioSink> GameLoop<F, A> {
    pub fn new(session: GameSession, frontend: F, audio: A) -> Self {
        Self {
            session,
            frontend,
            audio,
            running: true,
            fps: TARGET_FPS,
            intents: Vec::with_capacity(16),
            snapshot: GameSnapshot::default(),
            carry_us: 0,
        }
    }

    /// Set the frame rate cap (clamped to `MIN_FPS..=MAX_FPS`).
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps.clamp(MIN_FPS, MAX_FPS);
        self
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Last snapshot handed to the frontend.
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ask the loop to exit once the current iteration finishes.
    pub fn stop(&mut self) {
        if self.running {
            debug!("stop requested");
        }
        self.running = false;
    }

    fn dispatch(&mut self, intent: Intent) {
        trace!("intent {} in {}", intent.as_str(), self.session.mode().as_str());
        match intent {
            Intent::Quit => self.stop(),
            Intent::ToggleMute => {
                self.audio.toggle_mute();
                debug!("audio muted: {}", self.audio.is_muted());
            }
            other => {
                self.session.handle(other);
            }
        }
    }

    /// Run one iteration as if `elapsed_ms` had passed since the previous one.
    pub fn step(&mut self, elapsed_ms: u32) -> Result<()> {
        let mut intents = std::mem::take(&mut self.intents);
        intents.clear();
        self.frontend.poll_intents(self.session.mode(), &mut intents)?;
        for &intent in &intents {
            self.dispatch(intent);
        }
        self.intents = intents;

        self.session.tick(elapsed_ms);

        for event in self.session.drain_events() {
            self.audio.play(cue_for(event));
        }

        self.session.snapshot_into(&mut self.snapshot);
        self.frontend.present(&self.snapshot)
    }

    /// Convert a wall-clock delta to whole milliseconds, keeping the remainder.
    fn elapsed_ms(&mut self, elapsed: Duration) -> u32 {
        let total_us = self.carry_us + elapsed.as_micros();
        self.carry_us = total_us % 1000;
        u32::try_from(total_us / 1000).unwrap_or(u32::MAX)
    }

    /// Loop until stopped, capping iterations at the configured frame rate.
    pub fn run(&mut self) -> Result<()> {
        let frame = Duration::from_micros(1_000_000 / u64::from(self.fps));
        info!("game loop started at {} fps", self.fps);

        let mut last = Instant::now();
        while self.running {
            let started = Instant::now();
            let elapsed = self.elapsed_ms(started.duration_since(last));
            last = started;

            self.step(elapsed)?;

            if let Some(rest) = frame.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }

        info!("game loop stopped, final score {}", self.session.score());
        Ok(())
    }

    /// Tear the loop apart, e.g. to restore the terminal held by the frontend.
    pub fn into_parts(self) -> (GameSession, F, A) {
        (self.session, self.frontend, self.audio)
    }
}
