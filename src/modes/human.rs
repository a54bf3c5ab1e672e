use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use super::ticker::{TickDriver, TokioScheduler, tick_channel};
use crate::game::GameEngine;
use crate::input::{InputEvent, InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, Screen};
use crate::session::{Session, TimerHandle};
use crate::storage::BestScoreStore;

pub struct HumanMode<B: BestScoreStore> {
    session: Session<TokioScheduler, B, Screen>,
    driver: TickDriver,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl<B: BestScoreStore> HumanMode<B> {
    pub fn new(engine: GameEngine, store: B) -> Self {
        let (scheduler, driver) = tick_channel();
        let session = Session::new(engine, scheduler, store, Screen::new());

        Self {
            session,
            driver,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            "Quitting after {} games, best score {}",
            self.metrics.games_played,
            self.session.best_score()
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame); game ticks come from the session's timer
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                handle = self.driver.tick() => {
                    self.on_tick(handle);
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.session.observer(), &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Input(input) => self.send_input(input),
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Mouse(mouse) => {
                if let Some(input) = self.input_handler.handle_mouse_event(mouse) {
                    self.send_input(input);
                }
            }
            _ => {}
        }
    }

    fn send_input(&mut self, input: InputEvent) {
        let games_before = self.session.games_started();
        self.session.handle_input(input);

        if self.session.games_started() != games_before {
            self.metrics.on_game_start();
        }
    }

    fn on_tick(&mut self, handle: TimerHandle) {
        if let Some(result) = self.session.tick(handle) {
            if result.terminated {
                self.metrics.on_game_over();
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, GameStatus};
    use crate::storage::MemoryBestScoreStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode() -> HumanMode<MemoryBestScoreStore> {
        HumanMode::new(
            GameEngine::seeded(GameConfig::default(), 5),
            MemoryBestScoreStore::new(0),
        )
    }

    fn press(mode: &mut HumanMode<MemoryBestScoreStore>, code: KeyCode) {
        mode.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    #[tokio::test]
    async fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.session.status(), GameStatus::Running);
        assert_eq!(mode.session.state().score, 0);
        assert!(mode.session.observer().frame().is_some());
    }

    #[tokio::test]
    async fn test_keys_reach_session() {
        let mut mode = mode();

        press(&mut mode, KeyCode::Char('w'));
        assert_eq!(mode.session.requested_direction(), Direction::Up);

        press(&mut mode, KeyCode::Char('q'));
        assert!(mode.should_quit);
    }

    #[tokio::test]
    async fn test_restart_button_restarts_clock() {
        let mut mode = mode();
        mode.metrics.on_game_over();

        press(&mut mode, KeyCode::Char('r'));

        assert_eq!(mode.session.games_started(), 2);
        assert_eq!(mode.metrics.elapsed_time, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_ticks_session() {
        let mut mode = mode();

        let handle = mode.driver.tick().await;
        mode.on_tick(handle);

        assert_eq!(mode.session.state().steps, 1);
    }
}
