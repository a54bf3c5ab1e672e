use super::{
    config::GameConfig,
    direction::Direction,
    state::{CollisionType, GameState, GameStatus, Position, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Cell the head moved to, or would have moved to on a collision
    pub new_head: Position,
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision: Option<CollisionType>,
    /// Whether the game has ended (collision or full board)
    pub terminated: bool,
}

/// The game engine that handles all game logic
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine seeded from the OS
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine with reproducible food placement
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let center = (self.config.grid_size / 2) as i32;

        let snake = Snake::new(
            Position::new(center, center),
            Direction::Right,
            self.config.initial_snake_length,
        );

        match self.place_food(&snake) {
            Some(food) => GameState::new(snake, food, self.config.grid_size),
            None => {
                let head = snake.head();
                let mut state = GameState::new(snake, head, self.config.grid_size);
                state.status = GameStatus::Won;
                state
            }
        }
    }

    /// Advance the snake one cell in `direction`
    ///
    /// A `direction` that reverses the snake is ignored and the current
    /// heading is kept.
    pub fn step(&mut self, state: &mut GameState, direction: Direction) -> StepResult {
        if state.status.is_finished() {
            return StepResult {
                new_head: state.snake.head(),
                ate_food: false,
                collision: None,
                terminated: true,
            };
        }

        if !state.snake.direction.is_opposite(direction) {
            state.snake.direction = direction;
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        // Check for collisions against the body as it is before the move
        if let Some(collision) = self.check_collision(state, new_head) {
            state.status = GameStatus::GameOver(collision);
            state.steps += 1;

            return StepResult {
                new_head,
                ate_food: false,
                collision: Some(collision),
                terminated: true,
            };
        }

        let ate_food = new_head == state.food;
        state.snake.advance(new_head, ate_food);

        if ate_food {
            state.score += 1;
            match self.place_food(&state.snake) {
                Some(food) => state.food = food,
                None => state.status = GameStatus::Won,
            }
        }

        state.steps += 1;

        StepResult {
            new_head,
            ate_food,
            collision: None,
            terminated: state.status.is_finished(),
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // The tail still counts: it has not moved yet.
        if state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a random cell the snake does not occupy
    ///
    /// Returns `None` when the snake covers the whole board.
    pub fn place_food(&mut self, snake: &Snake) -> Option<Position> {
        let size = self.config.grid_size;
        let cells = self.config.cell_count();
        if snake.len() >= cells {
            return None;
        }

        for _ in 0..cells * 4 {
            let x = self.rng.gen_range(0..size) as i32;
            let y = self.rng.gen_range(0..size) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return Some(pos);
            }
        }

        // Crowded board: sample the free cells directly.
        let free: Vec<Position> = (0..size as i32)
            .flat_map(|y| (0..size as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.occupies(*pos))
            .collect();
        free.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(
        body: Vec<Position>,
        direction: Direction,
        food: Position,
        size: usize,
    ) -> GameState {
        GameState::new(Snake { body, direction }, food, size)
    }

    #[test]
    fn test_reset() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 1);
        let state = engine.reset();

        assert!(state.status.is_running());
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(
            state.snake.body,
            vec![
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10)
            ]
        );
        assert_eq!(state.snake.direction, Direction::Right);
        assert!(!state.snake.occupies(state.food));
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 2);
        let mut state = engine.reset();
        state.food = Position::new(0, 0);

        let result = engine.step(&mut state, Direction::Right);

        assert!(!result.terminated);
        assert!(!result.ate_food);
        assert_eq!(result.new_head, Position::new(11, 10));
        assert_eq!(
            state.snake.body,
            vec![
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10)
            ]
        );
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 1);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = GameEngine::seeded(GameConfig::small(), 3);
        let mut state = engine.reset();

        // Place food directly in front of snake
        state.food = state.snake.head().moved_in_direction(Direction::Right);
        let initial_length = state.snake.len();

        let result = engine.step(&mut state, Direction::Right);

        assert!(result.ate_food);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), initial_length + 1);
        assert!(!state.snake.occupies(state.food));
    }

    #[test]
    fn test_wall_collision_left_and_right() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 4);

        let mut state = state_with(
            vec![Position::new(0, 5), Position::new(1, 5), Position::new(2, 5)],
            Direction::Left,
            Position::new(5, 5),
            20,
        );
        let result = engine.step(&mut state, Direction::Left);
        assert!(result.terminated);
        assert_eq!(result.new_head, Position::new(-1, 5));
        assert_eq!(state.status, GameStatus::GameOver(CollisionType::Wall));

        let mut state = state_with(
            vec![Position::new(19, 5), Position::new(18, 5), Position::new(17, 5)],
            Direction::Right,
            Position::new(5, 5),
            20,
        );
        let result = engine.step(&mut state, Direction::Right);
        assert_eq!(result.collision, Some(CollisionType::Wall));
        assert_eq!(result.new_head, Position::new(20, 5));
        // Body untouched on a collision
        assert_eq!(state.snake.head(), Position::new(19, 5));
    }

    #[test]
    fn test_self_collision() {
        let mut engine = GameEngine::seeded(GameConfig::small(), 5);

        // Heading up with the body curled to the left of the head
        let mut state = state_with(
            vec![
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(4, 6),
                Position::new(4, 5),
                Position::new(4, 4),
            ],
            Direction::Up,
            Position::new(8, 8),
            10,
        );

        // Left from (5,5) runs into (4,5)
        let result = engine.step(&mut state, Direction::Left);

        assert!(result.terminated);
        assert_eq!(result.collision, Some(CollisionType::SelfCollision));
    }

    #[test]
    fn test_tail_cell_still_blocks() {
        let mut engine = GameEngine::seeded(GameConfig::small(), 6);

        // A 2x2 loop: the head would step onto the tail that is about to move.
        let mut state = state_with(
            vec![
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(4, 6),
                Position::new(4, 5),
            ],
            Direction::Up,
            Position::new(8, 8),
            10,
        );

        let result = engine.step(&mut state, Direction::Left);

        assert_eq!(result.collision, Some(CollisionType::SelfCollision));
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = GameEngine::seeded(GameConfig::small(), 7);
        let mut state = engine.reset();
        state.food = Position::new(0, 0);

        let result = engine.step(&mut state, Direction::Left);

        assert_eq!(state.snake.direction, Direction::Right);
        assert!(!result.terminated);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = GameEngine::seeded(GameConfig::small(), 8);
        let mut state = engine.reset();
        state.status = GameStatus::GameOver(CollisionType::Wall);
        let before = state.clone();

        let result = engine.step(&mut state, Direction::Up);

        assert!(result.terminated);
        assert_eq!(state, before);
    }

    #[test]
    fn test_place_food_avoids_snake() {
        let mut engine = GameEngine::seeded(GameConfig::new(4), 9);
        // Snake covering all but one cell of a 4x4 board
        let mut body = Vec::new();
        for y in 0..4 {
            let row: Vec<i32> = if y % 2 == 0 {
                (0..4).collect()
            } else {
                (0..4).rev().collect()
            };
            for x in row {
                body.push(Position::new(x, y));
            }
        }
        let free = body.pop().unwrap();
        let snake = Snake { body, direction: Direction::Right };

        for _ in 0..20 {
            assert_eq!(engine.place_food(&snake), Some(free));
        }
    }

    #[test]
    fn test_place_food_full_board() {
        let mut engine = GameEngine::seeded(GameConfig::new(2), 10);
        let snake = Snake {
            body: vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(1, 1),
                Position::new(0, 1),
            ],
            direction: Direction::Left,
        };

        assert_eq!(engine.place_food(&snake), None);
    }

    #[test]
    fn test_eating_last_free_cell_wins() {
        let mut engine = GameEngine::seeded(GameConfig::new(2), 11);
        let mut state = state_with(
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)],
            Direction::Left,
            Position::new(0, 1),
            2,
        );

        let result = engine.step(&mut state, Direction::Down);

        assert!(result.ate_food);
        assert!(result.terminated);
        assert_eq!(state.status, GameStatus::Won);
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_random_play_keeps_invariants() {
        let mut engine = GameEngine::seeded(GameConfig::small(), 12);
        let mut rng = StdRng::seed_from_u64(99);
        let directions = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

        for _ in 0..50 {
            let mut state = engine.reset();
            let mut last_score = 0;
            for _ in 0..10_000 {
                if state.status.is_finished() {
                    break;
                }
                let direction = *directions.choose(&mut rng).unwrap();
                engine.step(&mut state, direction);

                let mut cells = state.snake.body.clone();
                cells.sort_by_key(|p| (p.x, p.y));
                cells.dedup();
                assert_eq!(cells.len(), state.snake.len());
                assert!(state.score >= last_score);
                if state.status.is_running() {
                    assert!(!state.snake.occupies(state.food));
                }
                last_score = state.score;
            }
        }
    }
}
