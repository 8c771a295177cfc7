//! Neon Tetris runner (default binary).
//!
//! Parses configuration, sets up logging, takes over the terminal and runs
//! the game loop until the player quits.

use std::fs::File;
use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};
use log::info;

use neon_tetris::config::{Args, Config};
use neon_tetris::core::GameSession;
use neon_tetris::engine::GameLoop;
use neon_tetris::frontend::TermFrontend;
use neon_tetris::term::BellAudio;

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(&args)?;
    init_logging(&config)?;
    info!(
        "starting: seed {}, randomizer {}, {} fps",
        config.seed,
        config.randomizer.as_str(),
        config.fps
    );

    let session = GameSession::new(config.seed, config.randomizer);
    let mut frontend = TermFrontend::new(config.cell_width);
    frontend.enter()?;
    restore_terminal_on_panic();

    let audio = BellAudio::new(config.muted);
    let mut game = GameLoop::new(session, frontend, audio).with_fps(config.fps);
    let result = game.run();

    let (session, mut frontend, _) = game.into_parts();
    // Always try to restore terminal state.
    let _ = frontend.exit();
    result?;

    println!("Final score: {}", session.score());
    Ok(())
}

fn init_logging(config: &Config) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(path) = &config.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

/// Leave raw mode and the alternate screen before the panic message prints.
fn restore_terminal_on_panic() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );
        default_hook(info);
    }));
}
