//! Neon Snake - a grid snake game for the terminal
//!
//! This library provides:
//! - Core game logic (game module)
//! - Input mapping with latched directions and swipes (input module)
//! - The timer-driven game session (session module)
//! - Best score persistence (storage module)
//! - TUI rendering (render module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;
pub mod storage;
