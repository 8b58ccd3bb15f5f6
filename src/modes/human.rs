use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{Direction, GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Keyboard-controlled play mode
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    /// Most recently steered direction, applied on the next game tick
    pending_direction: Option<Direction>,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut engine = GameEngine::new(config)?;
        let state = engine.reset();

        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_direction: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks at 8 Hz, renders at 30 FPS
        let mut tick_timer = interval(Duration::from_millis(125));
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    if self.state.is_alive {
                        self.update_game();
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

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
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(dir) => {
                    self.pending_direction = Some(dir);
                }
                KeyAction::Restart => {
                    self.reset_game();
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn update_game(&mut self) {
        let requested = self.pending_direction.take();
        let result = self.engine.step_human(&mut self.state, requested);

        if result.terminated && !self.state.is_alive {
            self.metrics
                .on_game_over(self.state.score, self.state.snake.len());
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_game_start();
        self.pending_direction = None;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_initialization() {
        let mode = HumanMode::new(GameConfig::default()).unwrap();
        assert!(mode.state.is_alive);
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.state.snake.len(), 3);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(HumanMode::new(GameConfig::new(410, 400)).is_err());
    }

    #[test]
    fn test_reset_clears_game() {
        let mut mode = HumanMode::new(GameConfig::default()).unwrap();
        mode.state.score = 40;
        mode.state.is_alive = false;
        mode.pending_direction = Some(Direction::Left);

        mode.reset_game();

        assert_eq!(mode.state.score, 0);
        assert!(mode.state.is_alive);
        assert!(mode.pending_direction.is_none());
    }

    #[test]
    fn test_step_consumes_pending_direction() {
        let mut mode = HumanMode::new(GameConfig::default()).unwrap();
        mode.state.food.clear();
        mode.pending_direction = Some(Direction::Right);

        mode.update_game();

        assert!(mode.pending_direction.is_none());
        assert_eq!(mode.state.snake.direction, Direction::Right);
    }
}
