//! Session module - the game state machine
//!
//! A [`GameSession`] owns everything that changes during play: the board, the
//! falling piece, the next and held kinds, score, lines, level and the fall
//! timer. It is driven from the outside by [`GameSession::handle`] (discrete
//! intents) and [`GameSession::tick`] (elapsed time), and reports what
//! happened through buffered [`GameEvent`]s.
//!
//! Mode transitions:
//!
//! ```text
//! Menu --StartGame--> Playing <--TogglePause--> Paused
//!                        |
//!                   spawn blocked
//!                        v
//!                    GameOver --Restart--> Playing
//!                        \----ReturnToMenu--> Menu
//! ```
//!
//! Intents that do not apply to the current mode are ignored.

use log::{debug, info};

use crate::board::Board;
use crate::piece::Piece;
use crate::pieces::WALL_KICKS;
use crate::rng::{PieceSource, Randomizer};
use crate::scoring::{fall_interval_ms, hard_drop_score, level_for_lines, line_clear_score};
use crate::snapshot::{GameSnapshot, PieceView};
use crate::types::{GameEvent, GameMode, Intent, PieceKind, MIN_LEVEL};

/// Complete state of one player's game.
#[derive(Debug, Clone)]
pub struct GameSession {
    mode: GameMode,
    board: Board,
    current: Piece,
    next: PieceKind,
    hold: Option<PieceKind>,
    can_hold: bool,
    score: u32,
    lines: u32,
    level: u32,
    fall_interval_ms: u32,
    fall_accumulator_ms: u32,
    source: PieceSource,
    /// Events raised since the last drain.
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a session in the menu, drawing pieces with `randomizer`.
    pub fn new(seed: u32, randomizer: Randomizer) -> Self {
        Self::with_source(PieceSource::new(seed, randomizer))
    }

    /// Create a session in the menu around an existing piece source.
    pub fn with_source(mut source: PieceSource) -> Self {
        let current = Piece::spawn(source.draw());
        let next = source.draw();
        Self {
            mode: GameMode::Menu,
            board: Board::new(),
            current,
            next,
            hold: None,
            can_hold: true,
            score: 0,
            lines: 0,
            level: MIN_LEVEL,
            fall_interval_ms: fall_interval_ms(MIN_LEVEL),
            fall_accumulator_ms: 0,
            source,
            events: Vec::new(),
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The falling piece. Only meaningful outside the menu.
    pub fn current(&self) -> Piece {
        self.current
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    pub fn fall_accumulator_ms(&self) -> u32 {
        self.fall_accumulator_ms
    }

    pub fn seed(&self) -> u32 {
        self.source.seed()
    }

    pub fn randomizer(&self) -> Randomizer {
        self.source.randomizer()
    }

    pub fn is_playing(&self) -> bool {
        self.mode == GameMode::Playing
    }

    /// Landing projection of the current piece.
    pub fn ghost(&self) -> Piece {
        self.board.ghost_position(&self.current)
    }

    fn set_mode(&mut self, mode: GameMode) {
        if self.mode != mode {
            info!("mode {} -> {}", self.mode.as_str(), mode.as_str());
            self.mode = mode;
        }
    }

    /// Fresh board and counters, first piece spawned. Mode is left alone.
    fn reset(&mut self) {
        self.board.clear();
        self.hold = None;
        self.can_hold = true;
        self.score = 0;
        self.lines = 0;
        self.level = MIN_LEVEL;
        self.fall_interval_ms = fall_interval_ms(MIN_LEVEL);
        self.fall_accumulator_ms = 0;
        self.current = Piece::spawn(self.source.draw());
        self.next = self.source.draw();
        debug!("new game, first piece {}", self.current.kind().as_str());
    }

    /// Dispatch one intent. Returns true if it changed anything.
    ///
    /// `ToggleMute` and `Quit` belong to the loop and are ignored here, as is
    /// any intent that does not apply to the current mode.
    pub fn handle(&mut self, intent: Intent) -> bool {
        match (self.mode, intent) {
            (GameMode::Menu, Intent::StartGame) => self.start(),
            (GameMode::Playing, Intent::MoveLeft) => self.move_left(),
            (GameMode::Playing, Intent::MoveRight) => self.move_right(),
            (GameMode::Playing, Intent::SoftDrop) => self.soft_drop(),
            (GameMode::Playing, Intent::RotateCw) => self.rotate(true),
            (GameMode::Playing, Intent::RotateCcw) => self.rotate(false),
            (GameMode::Playing, Intent::HardDrop) => self.hard_drop().is_some(),
            (GameMode::Playing, Intent::Hold) => self.hold(),
            (GameMode::Playing | GameMode::Paused, Intent::TogglePause) => self.toggle_pause(),
            (GameMode::GameOver, Intent::Restart) => self.restart(),
            (GameMode::GameOver, Intent::ReturnToMenu) => self.return_to_menu(),
            _ => false,
        }
    }

    /// Leave the menu with a fresh game.
    pub fn start(&mut self) -> bool {
        if self.mode != GameMode::Menu {
            return false;
        }
        self.reset();
        self.set_mode(GameMode::Playing);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.mode {
            GameMode::Playing => self.set_mode(GameMode::Paused),
            GameMode::Paused => self.set_mode(GameMode::Playing),
            _ => return false,
        }
        true
    }

    /// Start over after game over.
    pub fn restart(&mut self) -> bool {
        if self.mode != GameMode::GameOver {
            return false;
        }
        self.reset();
        self.set_mode(GameMode::Playing);
        true
    }

    pub fn return_to_menu(&mut self) -> bool {
        if self.mode != GameMode::GameOver {
            return false;
        }
        self.set_mode(GameMode::Menu);
        true
    }

    /// Translate the current piece if the target is valid.
    fn shift(&mut self, dx: i8, dy: i8) -> bool {
        let moved = self.current.offset(dx, dy);
        if self.board.is_valid_position(&moved) {
            self.current = moved;
            true
        } else {
            false
        }
    }

    /// Player-initiated move: only a real position change raises `PieceMoved`.
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.is_playing() {
            return false;
        }
        let moved = self.shift(dx, dy);
        if moved {
            self.events.push(GameEvent::PieceMoved);
        }
        moved
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move down one row. Awards no points and never locks.
    pub fn soft_drop(&mut self) -> bool {
        self.try_move(0, 1)
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.rotate(true)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.rotate(false)
    }

    /// Rotate, falling back to the wall kick offsets in order. On failure the
    /// piece keeps its previous rotation and origin.
    fn rotate(&mut self, clockwise: bool) -> bool {
        if !self.is_playing() {
            return false;
        }

        let mut rotated = self.current;
        if clockwise {
            rotated.rotate_cw();
        } else {
            rotated.rotate_ccw();
        }

        let landed = if self.board.is_valid_position(&rotated) {
            Some(rotated)
        } else {
            WALL_KICKS
                .iter()
                .map(|&(dx, dy)| rotated.offset(dx, dy))
                .find(|candidate| self.board.is_valid_position(candidate))
        };

        match landed {
            Some(piece) => {
                self.current = piece;
                self.events.push(GameEvent::PieceRotated);
                true
            }
            None => false,
        }
    }

    /// Drop to the landing row and lock. Returns the distance travelled.
    pub fn hard_drop(&mut self) -> Option<u32> {
        if !self.is_playing() {
            return None;
        }

        let mut distance = 0u32;
        while self.shift(0, 1) {
            distance += 1;
        }

        self.score = self.score.saturating_add(hard_drop_score(distance));
        self.events.push(GameEvent::PieceDropped { distance });
        self.lock_current();
        Some(distance)
    }

    /// Stash the current kind, once per spawned piece.
    ///
    /// With an empty slot the next piece comes in as on a natural spawn.
    /// Otherwise the held kind swaps in at the spawn origin.
    pub fn hold(&mut self) -> bool {
        if !self.is_playing() || !self.can_hold {
            return false;
        }

        let current_kind = self.current.kind();
        match self.hold.replace(current_kind) {
            Some(held) => {
                self.current = Piece::spawn(held);
                if !self.board.is_valid_position(&self.current) {
                    self.enter_game_over();
                }
            }
            None => self.spawn_next(),
        }

        debug!("held {}", current_kind.as_str());
        self.can_hold = false;
        true
    }

    /// Place the current piece, score any cleared rows and spawn the next one.
    fn lock_current(&mut self) {
        self.board.place_piece(&self.current);
        debug!(
            "locked {} at ({}, {})",
            self.current.kind().as_str(),
            self.current.x(),
            self.current.y()
        );

        let cleared = self.board.clear_lines();
        let previous_level = self.level;

        if cleared > 0 {
            self.lines = self.lines.saturating_add(cleared as u32);
            self.score = self
                .score
                .saturating_add(line_clear_score(cleared, previous_level));
            self.events.push(GameEvent::LinesCleared {
                count: cleared as u32,
            });
            debug!("cleared {} lines, total {}", cleared, self.lines);
        }

        self.level = level_for_lines(self.lines);
        self.fall_interval_ms = fall_interval_ms(self.level);
        if self.level > previous_level {
            info!("level up to {}", self.level);
            self.events.push(GameEvent::LevelUp { level: self.level });
        }

        self.spawn_next();
    }

    /// Promote `next` to the current piece and draw a fresh `next`.
    fn spawn_next(&mut self) {
        self.current = Piece::spawn(self.next);
        self.next = self.source.draw();
        self.can_hold = true;
        debug!(
            "spawned {}, next {}",
            self.current.kind().as_str(),
            self.next.as_str()
        );

        if !self.board.is_valid_position(&self.current) {
            self.enter_game_over();
        }
    }

    fn enter_game_over(&mut self) {
        info!("game over with score {}", self.score);
        self.set_mode(GameMode::GameOver);
        self.events.push(GameEvent::GameOver { score: self.score });
    }

    /// Advance the fall timer by `elapsed_ms`.
    ///
    /// Once the accumulator reaches the fall interval the piece moves down a
    /// row, or locks if it cannot. Returns true if either happened. This is
    /// the only place the timer restarts during a game; holds and hard drops
    /// leave it running.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.is_playing() {
            return false;
        }

        self.fall_accumulator_ms = self.fall_accumulator_ms.saturating_add(elapsed_ms);
        if self.fall_accumulator_ms < self.fall_interval_ms {
            return false;
        }

        if !self.shift(0, 1) {
            self.lock_current();
        }
        self.fall_accumulator_ms = 0;
        true
    }

    /// Hand out the events raised since the last call, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);

        out.mode = self.mode;
        if self.mode == GameMode::Menu {
            out.current = None;
            out.ghost = None;
        } else {
            out.current = Some(self.current.into());
            out.ghost = Some(self.ghost().into());
        }
        out.next = PieceView::from(self.next);
        out.hold = self.hold.map(PieceView::from);
        out.can_hold = self.can_hold;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.fall_interval_ms = self.fall_interval_ms;
        out.danger = self.board.is_game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    #[cfg(test)]
    pub(crate) fn set_current(&mut self, piece: Piece) {
        self.current = piece;
    }

    #[cfg(test)]
    pub(crate) fn set_lines(&mut self, lines: u32) {
        self.lines = lines;
        self.level = level_for_lines(lines);
        self.fall_interval_ms = fall_interval_ms(self.level);
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::with_source(PieceSource::default())
    }
}
