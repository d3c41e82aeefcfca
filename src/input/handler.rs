use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    Quit,
    None,
}

/// Maps raw key presses to game commands
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Right => KeyAction::GameAction(Action::Steer(Direction::Right)),
            KeyCode::Up => KeyAction::GameAction(Action::Steer(Direction::Up)),
            KeyCode::Left => KeyAction::GameAction(Action::Steer(Direction::Left)),
            KeyCode::Down => KeyAction::GameAction(Action::Steer(Direction::Down)),

            // Movement - WASD
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::GameAction(Action::Steer(Direction::Right))
            }
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::GameAction(Action::Steer(Direction::Up))
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::GameAction(Action::Steer(Direction::Left))
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::GameAction(Action::Steer(Direction::Down))
            }

            KeyCode::Esc => KeyAction::Quit,

            // Bare modifier presses only arrive with keyboard enhancement on
            KeyCode::Modifier(_) => KeyAction::None,

            _ => KeyAction::GameAction(Action::AnyKey),
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
