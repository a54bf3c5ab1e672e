//! Best score persistence

pub mod best_score;

pub use best_score::{BestScoreStore, FileBestScoreStore, MemoryBestScoreStore};
