use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// What a key press means to the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Steer the snake towards an absolute direction
    Steer(Direction),
    Restart,
    Quit,
    /// Unrecognized key; the current heading is retained
    None,
}

/// Maps raw key events to [`KeyAction`]s.
///
/// Arrow keys, WASD and vi-style hjkl all steer; unrecognized keys are
/// ignored rather than rejected.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') => {
                KeyAction::Steer(Direction::Up)
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') => {
                KeyAction::Steer(Direction::Down)
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') => {
                KeyAction::Steer(Direction::Left)
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') => {
                KeyAction::Steer(Direction::Right)
            }

            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys_steer() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Up)),
            KeyAction::Steer(Direction::Up)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Down)),
            KeyAction::Steer(Direction::Down)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Left)),
            KeyAction::Steer(Direction::Left)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Right)),
            KeyAction::Steer(Direction::Right)
        );
    }

    #[test]
    fn test_wasd_and_vi_keys_steer() {
        let handler = InputHandler::new();

        for (code, dir) in [
            (KeyCode::Char('w'), Direction::Up),
            (KeyCode::Char('k'), Direction::Up),
            (KeyCode::Char('s'), Direction::Down),
            (KeyCode::Char('j'), Direction::Down),
            (KeyCode::Char('a'), Direction::Left),
            (KeyCode::Char('h'), Direction::Left),
            (KeyCode::Char('d'), Direction::Right),
            (KeyCode::Char('l'), Direction::Right),
        ] {
            assert_eq!(handler.handle_key_event(press(code)), KeyAction::Steer(dir));
        }
    }

    #[test]
    fn test_control_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(KeyCode::Char('r'))), KeyAction::Restart);
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handler.handle_key_event(press(KeyCode::Esc)), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('x'))), KeyAction::None);
        assert_eq!(handler.handle_key_event(press(KeyCode::Tab)), KeyAction::None);
    }
}
