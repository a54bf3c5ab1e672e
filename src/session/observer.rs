use crate::game::{GameState, GameStatus, Position};

/// Read-only picture of a game handed to the display side
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Snake cells, head first
    pub snake: Vec<Position>,
    pub food: Position,
    pub grid_size: usize,
    pub score: u32,
    pub steps: u32,
    pub status: GameStatus,
    pub interval_ms: u64,
}

impl Snapshot {
    pub fn capture(state: &GameState, interval_ms: u64) -> Self {
        Self {
            snake: state.snake.body.clone(),
            food: state.food,
            grid_size: state.grid_size,
            score: state.score,
            steps: state.steps,
            status: state.status,
            interval_ms,
        }
    }

    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}

/// Display side of the session
///
/// Implementations draw and show scores; they never feed state back.
pub trait GameObserver {
    fn render_frame(&mut self, snapshot: &Snapshot);

    fn report_score(&mut self, score: u32, best_score: u32);
}
