use crate::game::Direction;

/// A discrete input delivered to the session
///
/// Touch coordinates are in arbitrary units; only their differences matter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A direction key was pressed
    Direction(Direction),
    /// A finger (or mouse button) went down
    TouchStart { x: f32, y: f32 },
    /// The finger moved while down
    TouchMove { x: f32, y: f32 },
    /// The restart key, only honoured once the game has ended
    RestartKey,
    /// The restart button, honoured at any time
    RestartButton,
}

impl From<Direction> for InputEvent {
    fn from(direction: Direction) -> Self {
        InputEvent::Direction(direction)
    }
}
