//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O, timers or
//! rendering dependencies. The session layer drives it one tick at a time.

pub mod config;
pub mod direction;
pub mod engine;
pub mod speed;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, StepResult};
pub use speed::SpeedController;
pub use state::{CollisionType, GameState, GameStatus, Position, Snake};
