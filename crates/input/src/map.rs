//! Key mapping from terminal events to intents.
//!
//! The same key means different things on different screens (Space starts the
//! game from the menu and hard-drops while playing), so mapping takes the
//! current mode into account.

use crate::types::{GameMode, Intent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to an intent for the given mode.
pub fn map_key(key: KeyEvent, mode: GameMode) -> Option<Intent> {
    if should_quit(key) {
        return Some(Intent::Quit);
    }

    match mode {
        GameMode::Menu => match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => Some(Intent::StartGame),
            _ => None,
        },
        GameMode::Playing => playing_key(key.code),
        GameMode::Paused => match key.code {
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(Intent::TogglePause),
            _ => None,
        },
        GameMode::GameOver => match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Intent::Restart),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(Intent::ReturnToMenu),
            _ => None,
        },
    }
}

fn playing_key(code: KeyCode) -> Option<Intent> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(Intent::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(Intent::MoveRight),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(Intent::SoftDrop),

        // Rotation
        KeyCode::Up | KeyCode::Char('z') | KeyCode::Char('Z') => Some(Intent::RotateCw),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(Intent::RotateCcw),

        // Actions
        KeyCode::Char(' ') => Some(Intent::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Intent::Hold),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Intent::ToggleMute),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(Intent::TogglePause),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(code: KeyCode, mode: GameMode) -> Option<Intent> {
        map_key(KeyEvent::from(code), mode)
    }

    #[test]
    fn test_movement_keys() {
        let mode = GameMode::Playing;
        assert_eq!(press(KeyCode::Left, mode), Some(Intent::MoveLeft));
        assert_eq!(press(KeyCode::Right, mode), Some(Intent::MoveRight));
        assert_eq!(press(KeyCode::Down, mode), Some(Intent::SoftDrop));

        assert_eq!(press(KeyCode::Char('H'), mode), Some(Intent::MoveLeft));
        assert_eq!(press(KeyCode::Char('l'), mode), Some(Intent::MoveRight));
        assert_eq!(press(KeyCode::Char('j'), mode), Some(Intent::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        let mode = GameMode::Playing;
        assert_eq!(press(KeyCode::Up, mode), Some(Intent::RotateCw));
        assert_eq!(press(KeyCode::Char('z'), mode), Some(Intent::RotateCw));
        assert_eq!(press(KeyCode::Char('x'), mode), Some(Intent::RotateCcw));
    }

    #[test]
    fn test_action_keys() {
        let mode = GameMode::Playing;
        assert_eq!(press(KeyCode::Char(' '), mode), Some(Intent::HardDrop));
        assert_eq!(press(KeyCode::Char('c'), mode), Some(Intent::Hold));
        assert_eq!(press(KeyCode::Char('m'), mode), Some(Intent::ToggleMute));
        assert_eq!(press(KeyCode::Char('p'), mode), Some(Intent::TogglePause));
        assert_eq!(press(KeyCode::Esc, mode), Some(Intent::TogglePause));
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(press(KeyCode::Char(' '), GameMode::Menu), Some(Intent::StartGame));
        assert_eq!(press(KeyCode::Enter, GameMode::Menu), Some(Intent::StartGame));
        assert_eq!(press(KeyCode::Left, GameMode::Menu), None);
    }

    #[test]
    fn test_paused_only_resumes() {
        assert_eq!(press(KeyCode::Char('p'), GameMode::Paused), Some(Intent::TogglePause));
        assert_eq!(press(KeyCode::Esc, GameMode::Paused), Some(Intent::TogglePause));
        assert_eq!(press(KeyCode::Char(' '), GameMode::Paused), None);
        assert_eq!(press(KeyCode::Char('m'), GameMode::Paused), None);
    }

    #[test]
    fn test_game_over_keys() {
        assert_eq!(press(KeyCode::Char('r'), GameMode::GameOver), Some(Intent::Restart));
        assert_eq!(press(KeyCode::Char('m'), GameMode::GameOver), Some(Intent::ReturnToMenu));
        assert_eq!(press(KeyCode::Char(' '), GameMode::GameOver), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));

        // Ctrl-C quits even while playing, where plain `c` holds.
        assert_eq!(
            map_key(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                GameMode::Playing
            ),
            Some(Intent::Quit)
        );
        for mode in [GameMode::Menu, GameMode::Paused, GameMode::GameOver] {
            assert_eq!(press(KeyCode::Char('q'), mode), Some(Intent::Quit));
        }
    }
}
