use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the game
///
/// Every field has a default, so a JSON config file only needs to name the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square grid, in cells
    pub grid_size: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    // Speed progression
    /// Tick interval at the start of every game
    pub initial_interval_ms: u64,
    /// The interval never drops below this
    pub min_interval_ms: u64,
    /// How much the interval shrinks per speed-up
    pub interval_step_ms: u64,
    /// A speed-up happens whenever the score reaches a multiple of this
    pub speedup_every: u32,

    /// Minimum drag distance before a swipe registers
    pub swipe_threshold: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_snake_length: 3,
            initial_interval_ms: 120,
            min_interval_ms: 60,
            interval_step_ms: 8,
            speedup_every: 5,
            swipe_threshold: 20.0,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config in {:?}", path))
    }

    /// Total number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Validate configuration parameters
    ///
    /// `Ok(())` if the game can be played with this config, `Err(String)`
    /// describing the first problem otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }

        // The snake starts at the centre and extends to the left.
        if self.initial_snake_length > self.grid_size / 2 + 1 {
            return Err(format!(
                "initial_snake_length ({}) does not fit on a {}x{} grid",
                self.initial_snake_length, self.grid_size, self.grid_size
            ));
        }

        if self.grid_size > i32::MAX as usize {
            return Err(format!("grid_size is too large, got {}", self.grid_size));
        }

        if self.min_interval_ms == 0 {
            return Err("min_interval_ms must be positive".to_string());
        }

        if self.initial_interval_ms < self.min_interval_ms {
            return Err(format!(
                "initial_interval_ms ({}) cannot be below min_interval_ms ({})",
                self.initial_interval_ms, self.min_interval_ms
            ));
        }

        if self.speedup_every == 0 {
            return Err("speedup_every must be at least 1".to_string());
        }

        if self.swipe_threshold <= 0.0 {
            return Err(format!(
                "swipe_threshold must be positive, got {}",
                self.swipe_threshold
            ));
        }

        Ok(())
    }
}
