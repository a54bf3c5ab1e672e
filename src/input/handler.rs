use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::event::InputEvent;
use crate::game::Direction;

/// Terminal rows are roughly twice as tall as columns
const ROW_ASPECT: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    Input(InputEvent),
    Quit,
    None,
}

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
            KeyCode::Up => Self::turn(Direction::Up),
            KeyCode::Down => Self::turn(Direction::Down),
            KeyCode::Left => Self::turn(Direction::Left),
            KeyCode::Right => Self::turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Self::turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => Self::turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => Self::turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => Self::turn(Direction::Right),

            // Controls
            KeyCode::Enter => KeyAction::Input(InputEvent::RestartKey),
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Input(InputEvent::RestartButton),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    /// Left-button press and drag stand in for touch start and touch move
    pub fn handle_mouse_event(&self, mouse: MouseEvent) -> Option<InputEvent> {
        let x = mouse.column as f32;
        let y = mouse.row as f32 * ROW_ASPECT;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::TouchStart { x, y }),
            MouseEventKind::Drag(MouseButton::Left) => Some(InputEvent::TouchMove { x, y }),
            _ => None,
        }
    }

    fn turn(direction: Direction) -> KeyAction {
        KeyAction::Input(InputEvent::Direction(direction))
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
