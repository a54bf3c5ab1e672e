//! Turning raw key and touch input into latched snake directions

pub mod event;
pub mod handler;
pub mod latch;
pub mod swipe;

pub use event::InputEvent;
pub use handler::{InputHandler, KeyAction};
pub use latch::DirectionLatch;
pub use swipe::SwipeTracker;
