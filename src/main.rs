use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::info;
use neon_snake::game::{GameConfig, GameEngine};
use neon_snake::modes::HumanMode;
use neon_snake::storage::FileBestScoreStore;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "neon_snake")]
#[command(version, about = "Grid snake game for the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the square grid
    #[arg(long)]
    grid_size: Option<usize>,

    /// Mouse drag distance (in columns) needed to register a swipe
    #[arg(long)]
    swipe_threshold: Option<f32>,

    /// Where the best score is kept (defaults to the user data directory)
    #[arg(long)]
    best_score_file: Option<PathBuf>,

    /// Log file; the terminal itself is taken by the game
    #[arg(long, default_value = "neon_snake.log")]
    log_file: PathBuf,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(threshold) = self.swipe_threshold {
            config.swipe_threshold = threshold;
        }

        config
            .validate()
            .map_err(|err| anyhow!("Invalid game configuration: {err}"))?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(LevelFilter::Info, Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = cli.game_config()?;
    info!("Starting neon_snake with {config:?}");

    let best_score_path = match &cli.best_score_file {
        Some(path) => path.clone(),
        None => FileBestScoreStore::default_path()?,
    };
    info!("Best score file: {:?}", best_score_path);
    let store = FileBestScoreStore::new(best_score_path);

    let engine = match cli.seed {
        Some(seed) => GameEngine::seeded(config, seed),
        None => GameEngine::new(config),
    };

    let mut human_mode = HumanMode::new(engine, store);
    human_mode.run().await?;

    Ok(())
}
