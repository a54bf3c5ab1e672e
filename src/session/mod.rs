//! The game session: the Running/GameOver state machine around the engine
//!
//! A session never touches a clock, a screen or a file directly. It asks a
//! [`Scheduler`] for ticks, hands [`Snapshot`]s to a [`GameObserver`] and
//! keeps the best score in a [`BestScoreStore`](crate::storage::BestScoreStore).

pub mod game_session;
pub mod observer;
pub mod scheduler;

pub use game_session::Session;
pub use observer::{GameObserver, Snapshot};
pub use scheduler::{ManualScheduler, Scheduler, SchedulerCall, TimerHandle};
