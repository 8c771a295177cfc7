//! Shared types and constants for the Neon Tetris workspace.
//!
//! Everything here is plain data with no dependencies, so the same definitions
//! can be used by the core rules, the game loop, and any presentation layer.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn origin**: (3, 0), the top-left corner of a piece's 4x4 box
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TARGET_FPS` | 60 | Loop iterations per second |
//! | `BASE_FALL_MS` | 500 | Fall interval at level 1 |
//! | `FALL_STEP_MS` | 50 | Interval reduction per level |
//! | `MIN_FALL_MS` | 50 | Interval floor |
//!
//! # Examples
//!
//! ```
//! use neon_tetris_types::{Intent, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::T.as_str(), "T");
//! assert_eq!(Intent::HardDrop.as_str(), "hardDrop");
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Rows at the top of the board that count as the danger zone.
pub const DANGER_ROWS: u8 = 4;

/// Spawn column for the origin of every new piece (horizontally centered 4x4 box).
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 2;

/// Spawn row for the origin of every new piece.
pub const SPAWN_Y: i8 = 0;

/// Loop iterations per second.
pub const TARGET_FPS: u32 = 60;

/// Fall interval at level 1.
pub const BASE_FALL_MS: u32 = 500;

/// Fall interval reduction per level above 1.
pub const FALL_STEP_MS: u32 = 50;

/// Fastest possible fall interval.
pub const MIN_FALL_MS: u32 = 50;

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Starting level.
pub const MIN_LEVEL: u32 = 1;

/// Level cap.
pub const MAX_LEVEL: u32 = 15;

/// Points per row travelled on a hard drop.
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Line clear scoring table.
///
/// Base points for clearing N lines at once, multiplied by the level that was
/// in effect while the piece fell:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Rgb)`: Cell filled with the color of the piece that locked there
pub type Cell = Option<Rgb>;

/// The seven tetromino piece kinds
///
/// Each piece has a fixed neon color:
/// - **I**: Cyan
/// - **O**: Yellow
/// - **T**: Purple
/// - **S**: Green
/// - **Z**: Red
/// - **J**: Blue
/// - **L**: Orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Display color of this kind.
    pub const fn color(&self) -> Rgb {
        match self {
            PieceKind::I => Rgb::new(0, 255, 255),
            PieceKind::O => Rgb::new(255, 255, 0),
            PieceKind::T => Rgb::new(128, 0, 128),
            PieceKind::S => Rgb::new(0, 255, 0),
            PieceKind::Z => Rgb::new(255, 0, 0),
            PieceKind::J => Rgb::new(0, 0, 255),
            PieceKind::L => Rgb::new(255, 165, 0),
        }
    }
}

/// Top-level mode of a game session.
///
/// `Menu` is the initial mode. The legal transitions are:
/// Menu → Playing, Playing ⇄ Paused, Playing → GameOver,
/// GameOver → Playing (restart) and GameOver → Menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Menu => "menu",
            GameMode::Playing => "playing",
            GameMode::Paused => "paused",
            GameMode::GameOver => "game_over",
        }
    }
}

/// Discrete input intents fed into the game loop.
///
/// These are produced by an input adapter (keyboard, script, test) and are
/// independent of any particular device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Rotate piece clockwise
    RotateCw,
    /// Rotate piece counter-clockwise
    RotateCcw,
    /// Drop to the landing row and lock immediately
    HardDrop,
    /// Swap with the hold slot (once per spawned piece)
    Hold,
    /// Pause or resume
    TogglePause,
    /// Mute or unmute sound effects (handled by the audio sink)
    ToggleMute,
    /// Start a fresh game after game over
    Restart,
    /// Leave the game over screen for the menu
    ReturnToMenu,
    /// Leave the menu and start playing
    StartGame,
    /// Stop the loop
    Quit,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::SoftDrop => "softDrop",
            Intent::RotateCw => "rotateCw",
            Intent::RotateCcw => "rotateCcw",
            Intent::HardDrop => "hardDrop",
            Intent::Hold => "hold",
            Intent::TogglePause => "togglePause",
            Intent::ToggleMute => "toggleMute",
            Intent::Restart => "restart",
            Intent::ReturnToMenu => "returnToMenu",
            Intent::StartGame => "startGame",
            Intent::Quit => "quit",
        }
    }
}

/// Fire-and-forget notifications raised by the session.
///
/// Audio and visual effects react to these; nothing is returned to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// A move intent changed the piece position.
    PieceMoved,
    /// A rotate intent succeeded (possibly after a kick).
    PieceRotated,
    /// A hard drop travelled `distance` rows before locking.
    PieceDropped { distance: u32 },
    /// A lock removed `count` rows.
    LinesCleared { count: u32 },
    /// The level went up to `level`.
    LevelUp { level: u32 },
    /// A freshly spawned piece did not fit.
    GameOver { score: u32 },
}
