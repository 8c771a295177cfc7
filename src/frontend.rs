//! Terminal frontend: crossterm keys in, framebuffer frames out.

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use crate::core::GameSnapshot;
use crate::engine::Frontend;
use crate::input::map_key;
use crate::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use crate::types::{GameMode, Intent};

/// Used when the terminal size can't be queried.
const FALLBACK_SIZE: (u16, u16) = (80, 24);

pub struct TermFrontend {
    renderer: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
}

impl TermFrontend {
    pub fn new(cell_width: u16) -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view: GameView::new(cell_width, 1),
            fb: FrameBuffer::new(0, 0),
        }
    }

    /// Take over the terminal.
    pub fn enter(&mut self) -> Result<()> {
        self.renderer.enter()
    }

    /// Give the terminal back. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }
}

impl Frontend for TermFrontend {
    fn poll_intents(&mut self, mode: GameMode, out: &mut Vec<Intent>) -> Result<()> {
        while event::poll(Duration::ZERO).context("failed to poll terminal events")? {
            match event::read().context("failed to read terminal event")? {
                // Presses and repeats only.
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    out.extend(map_key(key, mode));
                }
                Event::Resize(..) => self.renderer.invalidate(),
                _ => {}
            }
        }
        Ok(())
    }

    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        let (width, height) = crossterm::terminal::size().unwrap_or(FALLBACK_SIZE);
        self.view
            .render_into(snapshot, Viewport::new(width, height), &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }
}
