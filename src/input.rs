//! Keyboard mapping for the game screen.

use crate::flappy::GameSession;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// The full-screen tap: start or jump (Space, Up, Enter).
    Tap,
    /// Start over after game over (R).
    Restart,
    /// Leave the game (Q, Esc, Ctrl-C).
    Quit,
    Other,
}

/// Result of handling an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

pub fn map_key(key: KeyEvent) -> GameInput {
    // Key repeats and releases arrive on some platforms; only presses count.
    if key.kind != KeyEventKind::Press {
        return GameInput::Other;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => GameInput::Quit,
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => GameInput::Tap,
        KeyCode::Char('r') | KeyCode::Char('R') => GameInput::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => GameInput::Quit,
        _ => GameInput::Other,
    }
}

/// Apply one input to the session.
pub fn handle_input(session: &mut GameSession, input: GameInput) -> InputResult {
    match input {
        GameInput::Tap if session.phase().is_over() => session.restart(),
        GameInput::Tap => session.press(),
        GameInput::Restart => session.restart(),
        GameInput::Quit => return InputResult::Quit,
        GameInput::Other => {}
    }
    InputResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::flappy::RunPhase;
    use crate::scores::{MemoryScoreStore, UserId};
    use crossterm::event::KeyEventState;
    use std::sync::Arc;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn session() -> GameSession {
        GameSession::new(
            GameConfig::default(),
            Arc::new(MemoryScoreStore::new()),
            UserId::new("keys"),
        )
    }

    #[test]
    fn test_tap_keys() {
        assert_eq!(map_key(press(KeyCode::Char(' '))), GameInput::Tap);
        assert_eq!(map_key(press(KeyCode::Up)), GameInput::Tap);
        assert_eq!(map_key(press(KeyCode::Enter)), GameInput::Tap);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(press(KeyCode::Esc)), GameInput::Quit);
        assert_eq!(map_key(press(KeyCode::Char('q'))), GameInput::Quit);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            GameInput::Quit
        );
    }

    #[test]
    fn test_release_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(release), GameInput::Other);
    }

    #[test]
    fn test_tap_starts_run() {
        let mut session = session();
        assert_eq!(handle_input(&mut session, GameInput::Tap), InputResult::Continue);
        assert_eq!(session.phase(), RunPhase::Running);
    }

    #[test]
    fn test_quit_reported() {
        let mut session = session();
        assert_eq!(handle_input(&mut session, GameInput::Quit), InputResult::Quit);
    }

    #[test]
    fn test_restart_ignored_mid_run() {
        let mut session = session();
        handle_input(&mut session, GameInput::Tap);
        handle_input(&mut session, GameInput::Restart);
        assert_eq!(session.phase(), RunPhase::Running);
    }
}
