//! Loop-level tests with a scripted frontend

use std::collections::VecDeque;

use anyhow::Result;

use neon_tetris::core::{GameSession, GameSnapshot, Randomizer};
use neon_tetris::engine::{Frontend, GameLoop, NullAudio};
use neon_tetris::term::BellAudio;
use neon_tetris::types::{GameMode, Intent};

/// Hands out one batch per poll, then keeps hard dropping until game over,
/// then quits.
struct Autoplay {
    script: VecDeque<Vec<Intent>>,
    frames: usize,
    last: Option<GameSnapshot>,
}

impl Autoplay {
    fn new(script: Vec<Vec<Intent>>) -> Self {
        Self {
            script: script.into(),
            frames: 0,
            last: None,
        }
    }
}

impl Frontend for Autoplay {
    fn poll_intents(&mut self, mode: GameMode, out: &mut Vec<Intent>) -> Result<()> {
        if let Some(batch) = self.script.pop_front() {
            out.extend(batch);
            return Ok(());
        }
        match mode {
            GameMode::Playing => out.push(Intent::HardDrop),
            _ => out.push(Intent::Quit),
        }
        Ok(())
    }

    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        self.frames += 1;
        self.last = Some(*snapshot);
        Ok(())
    }
}

#[test]
fn autoplay_reaches_game_over_and_quits() {
    let session = GameSession::new(99, Randomizer::Uniform);
    let frontend = Autoplay::new(vec![vec![Intent::StartGame]]);
    let mut game = GameLoop::new(session, frontend, NullAudio::default()).with_fps(240);

    game.run().unwrap();

    let (session, frontend, audio) = game.into_parts();
    assert_eq!(session.mode(), GameMode::GameOver);
    let last = frontend.last.unwrap();
    assert_eq!(last.mode, GameMode::GameOver);
    assert_eq!(last.score, session.score());
    // At least one drop cue per frame that hard dropped, plus game over.
    assert!(audio.played() as usize >= frontend.frames - 2);
}

#[test]
fn bell_rings_for_drops_but_not_moves() {
    let session = GameSession::new(5, Randomizer::Uniform);
    let frontend = Autoplay::new(vec![
        vec![Intent::StartGame],
        vec![Intent::MoveLeft, Intent::RotateCw],
        vec![Intent::HardDrop],
        vec![Intent::Quit],
    ]);
    let audio = BellAudio::with_writer(Vec::<u8>::new(), false);
    let mut game = GameLoop::new(session, frontend, audio);

    for _ in 0..4 {
        game.step(0).unwrap();
    }
    assert!(!game.is_running());

    let (_, _, audio) = game.into_parts();
    let bells = audio.writer().iter().filter(|&&b| b == 0x07).count();
    assert_eq!(bells, 1);
}

#[test]
fn muted_bell_stays_silent() {
    let session = GameSession::new(5, Randomizer::Uniform);
    let frontend = Autoplay::new(vec![
        vec![Intent::StartGame],
        vec![Intent::ToggleMute],
        vec![Intent::HardDrop],
    ]);
    let audio = BellAudio::with_writer(Vec::<u8>::new(), false);
    let mut game = GameLoop::new(session, frontend, audio);

    for _ in 0..3 {
        game.step(0).unwrap();
    }

    let (session, _, audio) = game.into_parts();
    assert!(session.score() > 0);
    assert!(audio.writer().is_empty());
}
