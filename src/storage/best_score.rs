use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Persistence for the single best-score value
pub trait BestScoreStore {
    /// The stored best score, 0 if nothing has been stored yet
    fn load(&self) -> Result<u32>;

    fn save(&mut self, best_score: u32) -> Result<()>;
}

/// On-disk layout of the best score file
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct BestScoreFile {
    best_score: u32,
}

/// Stores the best score as a small JSON file
#[derive(Debug, Clone)]
pub struct FileBestScoreStore {
    path: PathBuf,
}

impl FileBestScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `best_score.json` in the platform's local data directory
    pub fn default_path() -> Result<PathBuf> {
        let proj = ProjectDirs::from("com", "neon_snake", "NeonSnake")
            .context("could not resolve project directories")?;
        Ok(proj.data_local_dir().join("best_score.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for FileBestScoreStore {
    fn load(&self) -> Result<u32> {
        if !self.path.exists() {
            return Ok(0);
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read best score from {:?}", self.path))?;
        let file: BestScoreFile = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse best score in {:?}", self.path))?;
        Ok(file.best_score)
    }

    fn save(&mut self, best_score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        // Write next to the target, then rename over it.
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_vec_pretty(&BestScoreFile { best_score })
            .context("Failed to serialize best score")?;
        fs::write(&tmp, data).with_context(|| format!("Failed to write {:?}", tmp))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to move {:?} into place", tmp))?;
        Ok(())
    }
}

/// Keeps the best score in memory only; used when nothing should touch disk
#[derive(Debug, Clone, Default)]
pub struct MemoryBestScoreStore {
    best_score: u32,
    saves: usize,
}

impl MemoryBestScoreStore {
    pub fn new(best_score: u32) -> Self {
        Self {
            best_score,
            saves: 0,
        }
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// How many times `save` was called
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl BestScoreStore for MemoryBestScoreStore {
    fn load(&self) -> Result<u32> {
        Ok(self.best_score)
    }

    fn save(&mut self, best_score: u32) -> Result<()> {
        self.best_score = best_score;
        self.saves += 1;
        Ok(())
    }
}
