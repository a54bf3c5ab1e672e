use log::{debug, info, warn};
use rand::{Rng, rngs::StdRng};
use std::time::Duration;

use super::observer::{GameObserver, Snapshot};
use super::scheduler::{Scheduler, TimerHandle};
use crate::game::{Direction, GameEngine, GameState, GameStatus, SpeedController, StepResult};
use crate::input::{DirectionLatch, InputEvent, SwipeTracker};
use crate::storage::BestScoreStore;

/// One player's run of games
///
/// Owns everything that changes while playing: the board, the latched
/// direction, the speed, the live timer and the best score. The scheduler,
/// store and observer are the only ways it reaches the outside world.
pub struct Session<S, B, O, R = StdRng> {
    engine: GameEngine<R>,
    state: GameState,
    latch: DirectionLatch,
    swipe: SwipeTracker,
    speed: SpeedController,
    timer: Option<TimerHandle>,
    best_score: u32,
    games_started: u32,
    scheduler: S,
    store: B,
    observer: O,
}

impl<S, B, O, R> Session<S, B, O, R>
where
    S: Scheduler,
    B: BestScoreStore,
    O: GameObserver,
    R: Rng,
{
    /// Load the best score and start the first game
    pub fn new(mut engine: GameEngine<R>, scheduler: S, store: B, observer: O) -> Self {
        let best_score = match store.load() {
            Ok(best_score) => best_score,
            Err(err) => {
                warn!("Could not load best score, starting from 0: {err:#}");
                0
            }
        };

        let config = engine.config().clone();
        let state = engine.reset();

        let mut session = Self {
            engine,
            latch: DirectionLatch::new(state.snake.direction),
            state,
            swipe: SwipeTracker::new(config.swipe_threshold),
            speed: SpeedController::new(&config),
            timer: None,
            best_score,
            games_started: 0,
            scheduler,
            store,
            observer,
        };
        session.begin();
        session
    }

    /// Throw the current game away and start a fresh one
    pub fn restart(&mut self) {
        self.state = self.engine.reset();
        self.begin();
    }

    fn begin(&mut self) {
        self.latch = DirectionLatch::new(self.state.snake.direction);
        self.speed.reset();
        self.stop_timer();
        self.games_started += 1;

        if self.state.status.is_running() {
            self.timer = Some(self.scheduler.schedule_repeating(self.speed.interval()));
        }

        info!(
            "Game started: grid {}x{}, interval {}ms, best score {}",
            self.state.grid_size,
            self.state.grid_size,
            self.speed.interval_ms(),
            self.best_score
        );

        self.report_score();
        self.render();
    }

    /// Run one simulation step for the timer identified by `handle`
    ///
    /// Returns `None` without touching anything when the game is not running
    /// or the handle belongs to a timer that has since been replaced.
    pub fn tick(&mut self, handle: TimerHandle) -> Option<StepResult> {
        if !self.state.status.is_running() || self.timer != Some(handle) {
            debug!("Ignoring tick from timer {}", handle.id());
            return None;
        }

        let direction = self.latch.apply();
        let result = self.engine.step(&mut self.state, direction);

        if let Some(collision) = result.collision {
            self.stop_timer();
            info!(
                "Game over ({collision:?}) at {:?}: score {}, {} steps",
                result.new_head, self.state.score, self.state.steps
            );
        } else if result.ate_food {
            self.report_score();

            if self.state.status == GameStatus::Won {
                self.stop_timer();
                info!("Board filled: score {}", self.state.score);
            } else if let Some(interval) = self.speed.on_score(self.state.score) {
                self.reschedule(interval);
            }
        }

        self.render();
        Some(result)
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Direction(direction) => self.request(direction),
            InputEvent::TouchStart { x, y } => self.swipe.touch_start(x, y),
            InputEvent::TouchMove { x, y } => {
                if let Some(direction) = self.swipe.touch_move(x, y) {
                    self.request(direction);
                }
            }
            InputEvent::RestartKey => {
                if self.state.status.is_finished() {
                    self.restart();
                }
            }
            InputEvent::RestartButton => self.restart(),
        }
    }

    fn request(&mut self, direction: Direction) {
        if !self.state.status.is_running() {
            return;
        }
        if !self.latch.request(direction) {
            debug!(
                "Rejected {direction:?}: reverses {:?}",
                self.latch.current()
            );
        }
    }

    fn reschedule(&mut self, interval: Duration) {
        self.stop_timer();
        self.timer = Some(self.scheduler.schedule_repeating(interval));
        info!(
            "Speed up at score {}: interval now {}ms",
            self.state.score,
            interval.as_millis()
        );
    }

    fn stop_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn report_score(&mut self) {
        if self.state.score > self.best_score {
            self.best_score = self.state.score;
            match self.store.save(self.best_score) {
                Ok(()) => debug!("Saved best score {}", self.best_score),
                Err(err) => warn!("Could not save best score {}: {err:#}", self.best_score),
            }
        }
        self.observer.report_score(self.state.score, self.best_score);
    }

    fn render(&mut self) {
        let snapshot = self.snapshot();
        self.observer.render_frame(&snapshot);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.speed.interval_ms())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Counts the first game too
    pub fn games_started(&self) -> u32 {
        self.games_started
    }

    pub fn interval_ms(&self) -> u64 {
        self.speed.interval_ms()
    }

    /// The live timer, `None` once the game has ended
    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    pub fn requested_direction(&self) -> Direction {
        self.latch.requested()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn store(&self) -> &B {
        &self.store
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Test hook for arranging a specific board
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
